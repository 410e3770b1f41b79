//! `memo serve` command
//!
//! Starts the local web viewer. Without an id the root page is the memo
//! index; with one, the root page is that memo itself.
//!
//! # Usage
//! ```bash
//! memo serve              # index on http://127.0.0.1:4000
//! memo serve 3            # memo 3 as the root page
//! memo serve --port 8080
//! ```

use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::web;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Memo number to serve at the root page (index when omitted)
    pub id: Option<u32>,

    /// Port to listen on
    #[arg(short, long, default_value = "4000")]
    pub port: u16,
}

pub async fn run(args: ServeArgs, config: &Config) -> Result<()> {
    web::serve(config.clone(), args.id, args.port).await
}
