mod command;
mod logging;
mod store;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
