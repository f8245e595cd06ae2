//! Shared types for skill domain discovery: the registry model, descriptor
//! projection, language codes, and configuration.

pub mod config;
pub mod descriptor;
pub mod lang;
pub mod types;

pub use config::Config;
pub use lang::LangCode;
pub use types::*;
