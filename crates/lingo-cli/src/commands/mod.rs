//! Subcommand implementations.

pub mod check;
pub mod guide;
pub mod init;
pub mod list_checkers;
pub mod output;
