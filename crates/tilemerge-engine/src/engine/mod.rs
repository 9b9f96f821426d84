//! Session logic built on top of the [`core`](crate::core) grid.
//!
//! - [`Session`] - State machine driving a game (init, playing, win, game over, exit)
//! - [`Action`] - Player commands and their key decoding
//! - [`TileSource`] - Injectable randomness for tile insertion ([`RandomTiles`], [`ScriptedTiles`])
//! - [`BestScoreStore`] - Boundary to the durable best score ([`MemoryStore`])
//!
//! # Game Flow
//!
//! 1. The session starts in `Init`; initializing it clears the grid and places two tiles
//! 2. Each directional action slides the tiles; a legal move is followed by a new tile
//! 3. A tile reaching the win threshold enters `Win`, a grid with no legal move enters `Over`
//! 4. From either prompt the player continues (threshold doubles), restarts, or exits
//!
//! # Example
//!
//! ```
//! use tilemerge_engine::{Action, MemoryStore, RandomTiles, Session, SessionConfig};
//!
//! let mut session =
//!     Session::new(SessionConfig::default(), MemoryStore::new(), RandomTiles::new()).unwrap();
//! session.initialize();
//!
//! for action in [Action::LEFT, Action::UP, Action::RIGHT, Action::DOWN] {
//!     if !session.state().is_playing() {
//!         break;
//!     }
//!     session.step(action);
//! }
//! println!("{}score: {}", session.grid(), session.score());
//! ```

pub use self::{action::*, best_score::*, session::*, tile_source::*};

mod action;
mod best_score;
mod session;
mod tile_source;
