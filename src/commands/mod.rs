//! CLI commands

pub mod export;
pub mod init;
pub mod list;
pub mod new;
