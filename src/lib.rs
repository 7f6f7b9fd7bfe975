//! Blockfall (workspace facade crate).
//!
//! Re-exports the dedicated crates under `crates/` as
//! `blockfall::{core, input, term, types}` and adds the runner-side pieces:
//! the [`session::Session`] scheduler and the [`config::Config`] CLI.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod config;
pub mod session;

pub use config::Config;
pub use session::{Session, SessionPhase};
