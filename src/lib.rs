//! Career finance simulator: a single-player, month-by-month model of a
//! career, a budget, and the surprises in between, built for teaching
//! personal finance.
//!
//! The crate has no UI and no storage backend. Front ends drive an
//! [`Engine`], subscribe to its notifications, and hand it a
//! [`SaveStore`] when they want to persist a game.

pub mod career;
pub mod format;
pub mod time;

pub use career::config::EngineConfig;
pub use career::error::{SaveError, SnapshotError};
pub use career::logic::MonthResult;
pub use career::notify::{Notification, NotificationKind};
pub use career::save::{MemoryStore, SaveStore};
pub use career::state::{Difficulty, GameState};
pub use career::Engine;
pub use time::Calendar;
