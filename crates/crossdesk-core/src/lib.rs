//! # crossdesk-core
//!
//! Core types shared across the crossdesk API:
//!
//! - [`error`]: the [`AppError`] response error type
//! - [`catalog`]: the closed permission-code catalog
//! - [`pagination`]: pagination query params and response metadata

pub mod catalog;
pub mod error;
pub mod pagination;

pub use error::AppError;
