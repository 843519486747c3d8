//! Common utilities shared across all microservices.
//!
//! This crate provides unified error handling for HTTP and gRPC.

pub mod error;

pub use error::{AppError, AppResult, OptionExt};
