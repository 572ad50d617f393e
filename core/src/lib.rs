//! Board engine and mission controller for a minesweeper-style campaign.
//!
//! A [`Board`] owns the tiles of one mission and implements generation, flood-fill
//! reveals, markers and the end-of-mission sweep. A [`MissionController`] strings
//! boards into a campaign with armor, scoring and levels. Neither touches any
//! presentation: every action returns a [`Frame`] describing what changed.

pub use action::*;
pub use board::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use mission::*;
pub use score::*;
pub use storage::*;
pub use tile::*;
pub use types::*;

mod action;
mod board;
mod config;
mod error;
mod event;
mod generator;
mod mission;
mod score;
mod storage;
mod tile;
mod types;
