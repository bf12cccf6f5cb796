//! I/O collaborators for `cz` commands.

pub mod backup;
pub mod config;
pub mod git;
pub mod process;
pub mod prompt;
pub mod report;
