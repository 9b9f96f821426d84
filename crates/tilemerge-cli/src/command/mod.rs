use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tilemerge_engine::{
    BestScoreStore, Grid, MemoryStore, RandomTiles, Session, SessionConfig, TileSeed,
};
use tracing::info;

use crate::store::JsonFileStore;

use self::{play::PlayArg, script::ScriptArg};

mod play;
mod script;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct CommandArgs {
    /// What mode to run the program in (interactive play when omitted)
    #[command(subcommand)]
    mode: Option<Mode>,
    #[clap(flatten)]
    play: PlayArg,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Play a key sequence without a terminal UI and print the final grid
    Script(#[clap(flatten)] ScriptArg),
}

/// Options shared by every mode that runs a session.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SessionArg {
    /// Grid dimension
    #[clap(long, default_value_t = Grid::DEFAULT_SIZE)]
    size: usize,
    /// Tile value that wins the game (doubles each time you continue)
    #[clap(long, default_value_t = SessionConfig::DEFAULT_WIN_THRESHOLD)]
    win_value: u32,
    /// JSON file holding best scores
    #[clap(long, default_value = "./data/best_score.json")]
    best_score_file: PathBuf,
    /// Key of the best score inside the best score file
    #[clap(long, default_value = "best_score")]
    score_key: String,
    /// Keep the best score in memory only
    #[clap(long)]
    no_persist: bool,
    /// Seed for tile placement, as 32 hex digits
    #[clap(long)]
    seed: Option<TileSeed>,
}

pub(crate) type CliSession = Session<Box<dyn BestScoreStore>, RandomTiles>;

impl SessionArg {
    fn config(&self) -> SessionConfig {
        SessionConfig {
            size: self.size,
            win_threshold: self.win_value,
        }
    }

    fn store(&self) -> Box<dyn BestScoreStore> {
        if self.no_persist {
            Box::new(MemoryStore::new())
        } else {
            Box::new(JsonFileStore::new(&self.best_score_file, &self.score_key))
        }
    }

    pub(crate) fn build_session(&self) -> anyhow::Result<CliSession> {
        let tiles = self.seed.map_or_else(RandomTiles::new, RandomTiles::with_seed);
        info!(
            seed = %tiles.seed().to_hex(),
            size = self.size,
            win_value = self.win_value,
            "creating session"
        );
        let session = Session::new(self.config(), self.store(), tiles)?;
        Ok(session)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Some(Mode::Play(arg)) => play::run(&arg)?,
        Some(Mode::Script(arg)) => script::run(&arg)?,
        None => play::run(&args.play)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_play() {
        let args = CommandArgs::try_parse_from(["tilemerge"]).unwrap();
        assert!(args.mode.is_none());
        assert_eq!(args.play.session.config(), SessionConfig::default());
    }

    #[test]
    fn test_top_level_play_options() {
        let args = CommandArgs::try_parse_from(["tilemerge", "--size", "5", "--win-value", "64"])
            .unwrap();
        let config = args.play.session.config();
        assert_eq!(config.size, 5);
        assert_eq!(config.win_threshold, 64);
    }

    #[test]
    fn test_script_subcommand() {
        let args = CommandArgs::try_parse_from([
            "tilemerge",
            "script",
            "wasd",
            "--seed",
            "0123456789abcdef0123456789abcdef",
            "--no-persist",
        ])
        .unwrap();
        let Some(Mode::Script(arg)) = args.mode else {
            panic!("expected script mode");
        };
        assert!(arg.session.no_persist);
        assert!(arg.session.seed.is_some());
    }

    #[test]
    fn test_rejects_bad_seed() {
        assert!(CommandArgs::try_parse_from(["tilemerge", "--seed", "xyz"]).is_err());
    }

    #[test]
    fn test_invalid_config_fails_to_build() {
        let args = CommandArgs::try_parse_from(["tilemerge", "--size", "1", "--no-persist"])
            .unwrap();
        assert!(args.play.session.build_session().is_err());
    }
}
