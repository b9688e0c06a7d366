//! Domain models for mysql-local.
//!
//! This crate contains pure data structures representing the core
//! concepts in our application. Models have no business logic - they're
//! just data that can be passed between layers.
//!
//! ## Architecture
//!
//! - **models** (this crate): Pure data structures
//! - **server-core**: Business logic operating on models
//! - **mysql-local**: CLI wiring everything together
//!
//! This layered architecture keeps concerns separated and makes testing easier.

pub mod error;
pub mod server_info;


pub use error::model_error::ModelError;
pub use server_info::ServerInfo;
pub use server_info::builder::ServerInfoBuilder;
