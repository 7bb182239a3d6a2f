//! # crossdesk-config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: session-token signing configuration
//! - [`cors`]: CORS allowed origins
//! - [`assist`]: AI-assist vendor endpoints

pub mod assist;
pub mod cors;
pub mod jwt;

pub use assist::AssistConfig;
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
