//! Shared plumbing for the mysql-local workspace.
//!
//! This crate holds the pieces every layer needs but no layer owns:
//! currently just [`ErrorLocation`], the `file:line:column` capture that all
//! error enums in the workspace embed.
//!
//! ## Architecture
//!
//! - **common** (this crate): shared error plumbing
//! - **models**: pure data structures
//! - **server-core**: business logic operating on models
//! - **mysql-local**: CLI wiring everything together

pub mod error;


pub use error::error_location::ErrorLocation;
