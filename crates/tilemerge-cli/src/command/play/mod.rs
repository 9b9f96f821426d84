use std::path::PathBuf;

use tracing::info;

use crate::{command::SessionArg, logging};

use self::terminal_input::TerminalInput;

mod input;
mod terminal_input;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    pub(crate) session: SessionArg,
    /// File receiving the log output (the terminal is owned by the game)
    #[clap(long, default_value = "tilemerge.log")]
    log_file: PathBuf,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { session, log_file } = arg;

    logging::init_file(log_file)?;
    let mut session = session.build_session()?;

    let state = ratatui::run(|terminal| session.run(&mut TerminalInput::new(terminal)))?;

    info!(
        %state,
        size = session.config().size,
        score = session.score(),
        best_score = session.best_score(),
        "session ended"
    );
    if let Some(err) = session.store_error() {
        eprintln!("warning: {err}");
    }
    Ok(())
}
