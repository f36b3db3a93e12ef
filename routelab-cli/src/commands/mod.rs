//! CLI command implementations.

pub mod common;
pub mod config;
pub mod decode;
pub mod encode;
pub mod init;
pub mod route;
