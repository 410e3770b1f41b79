//! `memo list` command
//!
//! Prints the numerically ordered listing as a styled block using the
//! configured colours, or as JSON for scripting.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::cli::display_width;
use crate::config::Config;
use crate::core::store::MemoStore;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ListArgs, config: &Config) -> Result<()> {
    let store = MemoStore::open(&config.memo_dir);
    let memos = store.list()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&memos)?);
        return Ok(());
    }

    if memos.is_empty() {
        println!("No memos yet. Create one with `memo new`.");
        return Ok(());
    }

    let width = display_width(config);
    let fg = parse_hex_colour(&config.list_fg_colour);
    let bg = parse_hex_colour(&config.list_bg_colour);

    let mut lines = vec![String::new()];
    lines.extend(memos.iter().map(|m| format!("    {}", m.display_line())));
    lines.push(String::new());

    for line in lines {
        let padded = pad_to_width(&line, width);
        match (fg, bg) {
            (Some((fr, fg_, fb)), Some((br, bg_, bb))) => {
                println!(
                    "{}",
                    padded.truecolor(fr, fg_, fb).on_truecolor(br, bg_, bb).bold()
                );
            }
            _ => println!("{}", padded.bold()),
        }
    }

    Ok(())
}

fn pad_to_width(line: &str, width: usize) -> String {
    let len = console::measure_text_width(line);
    if len >= width {
        line.to_string()
    } else {
        format!("{}{}", line, " ".repeat(width - len))
    }
}

/// `#RRGGBB` to its three components. Anything else disables styling.
fn parse_hex_colour(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
