//! Error types for memo core operations.
//!
//! Core operations never terminate the process; they return these errors
//! and the command layer decides the exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for memo core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the memo core
#[derive(Error, Debug)]
pub enum Error {
    #[error("memo {0} not found")]
    NotFound(u32),

    #[error("no memos yet: {} does not exist", .0.display())]
    MissingDir(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid input: {0}")]
    MalformedInput(String),

    #[error("{tool} failed: {message}")]
    ExternalTool { tool: String, message: String },
}

impl Error {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    pub fn external_tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalTool {
            tool: tool.into(),
            message: message.into(),
        }
    }
}
