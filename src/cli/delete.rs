//! `memo delete` command
//!
//! Removes a memo file. The sequence number is retired, never handed out
//! again. Exits non-zero when the number resolves to nothing.

use anyhow::Result;
use clap::Args;
use dialoguer::Confirm;

use crate::config::Config;
use crate::core::error::Error;
use crate::core::git;
use crate::core::store::MemoStore;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Memo number
    pub id: u32,

    /// Delete without asking for confirmation
    #[arg(short, long)]
    pub force: bool,
}

pub fn run(args: DeleteArgs, config: &Config) -> Result<()> {
    let store = MemoStore::open(&config.memo_dir);
    let path = store.resolve(args.id)?.ok_or(Error::NotFound(args.id))?;

    if !args.force && console::user_attended() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete memo {} ({})?", args.id, path.display()))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Nothing deleted");
            return Ok(());
        }
    }

    let removed = store.delete(args.id)?;
    println!("Deleted {}", removed.display());

    if config.git {
        git::commit_file(&config.memo_dir, &removed, &format!("Delete memo {}", args.id))?;
    }

    Ok(())
}
