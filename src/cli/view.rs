//! `memo view` command
//!
//! Renders a memo as styled terminal text, word-wrapped to the display
//! width with a margin left free on wide terminals.

use anyhow::Result;
use clap::Args;

use crate::cli::display_width;
use crate::config::Config;
use crate::core::error::Error;
use crate::core::store::MemoStore;
use crate::core::markdown;

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Memo number
    pub id: u32,
}

pub fn run(args: ViewArgs, config: &Config) -> Result<()> {
    let store = MemoStore::open(&config.memo_dir);
    let path = store.resolve(args.id)?.ok_or(Error::NotFound(args.id))?;
    let content = std::fs::read_to_string(&path)?;

    let mut width = display_width(config);
    if width > 80 {
        width -= 10;
    }

    print!("{}", markdown::render_terminal(&content, width));
    Ok(())
}
