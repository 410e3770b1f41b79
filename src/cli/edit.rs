//! `memo edit` command
//!
//! Resolves a memo number to its file and opens the editor on it. The
//! filename (and with it the number and creation date) never changes.

use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::core::editor;
use crate::core::error::Error;
use crate::core::store::MemoStore;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Memo number
    pub id: u32,
}

pub fn run(args: EditArgs, config: &Config) -> Result<()> {
    let store = MemoStore::open(&config.memo_dir);
    let path = store.resolve(args.id)?.ok_or(Error::NotFound(args.id))?;

    editor::open(&config.editor, &path)?;
    Ok(())
}
