#![forbid(unsafe_code)]

pub mod bank;
pub mod leaderboard;
pub mod model;
pub mod roster;
pub mod time;

pub use leaderboard::LeaderboardEntry;
pub use roster::Roster;
pub use time::Clock;
