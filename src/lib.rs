//! memo - personal markdown memo manager
//!
//! Small numbered markdown files in one flat directory. The directory is
//! the index: every memo is named `{number}-{YYYY-MM-DD}-{slug}.md` and
//! sequence numbers are recovered by scanning those names.
//!
//! ## Key Concepts
//!
//! - **Sequence numbers**: assigned once at creation, strictly increasing,
//!   retired on deletion rather than reused
//! - **Directory as index**: no database; the filename carries the number,
//!   creation date and title slug
//! - **Thin collaborators**: editor, git and the HTTP viewer are wrappers
//!   around external tools, not subsystems

pub mod cli;
pub mod config;
pub mod core;
pub mod web;

pub use config::Config;
pub use core::error::Error;
pub use core::store::{MemoStore, MemoSummary};
