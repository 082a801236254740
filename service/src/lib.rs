//! Session lifecycle and statistics around the mines engine.
//!
//! [`GameService`] is the entry point for transports: it owns the
//! [`SessionRegistry`] of live games and the [`StatsStore`] of finished ones.

pub use error::*;
pub use player::*;
pub use registry::*;
pub use service::*;
pub use settings::*;
pub use stats::*;

mod error;
mod handler;
mod player;
mod registry;
mod service;
mod settings;
mod stats;
