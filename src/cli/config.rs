//! `memo config` command
//!
//! Get or set configuration values, edit them in an interactive form, or
//! show them as a table.
//!
//! # Usage
//! ```bash
//! memo config                  # form or table, per `edit_config`
//! memo config --edit           # interactive form
//! memo config --view           # table of current settings
//! memo config --path           # show config file location
//! memo config editor           # get one value
//! memo config editor nano      # set one value
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use console::Term;
use dialoguer::{Confirm, Input};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Config;

/// Settable top-level keys, mirroring the `Config` fields.
const KEYS: [&str; 8] = [
    "memo_dir",
    "editor",
    "list_fg_colour",
    "list_bg_colour",
    "display_width",
    "edit_config",
    "git",
    "assets_dir",
];

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Config key to get or set (e.g. editor, memo_dir)
    pub key: Option<String>,

    /// Value to set
    pub value: Option<String>,

    /// Edit the configuration in an interactive form
    #[arg(short, long)]
    pub edit: bool,

    /// View the configuration as a table
    #[arg(long)]
    pub view: bool,

    /// Show the config file path
    #[arg(long)]
    pub path: bool,
}

pub fn run(args: ConfigArgs, config: &Config, config_path: &Path) -> Result<()> {
    if args.path {
        println!("{}", config_path.display());
        if !config_path.is_file() {
            println!("(not created yet; defaults are in effect)");
        }
        return Ok(());
    }

    if let Some(key) = &args.key {
        return match &args.value {
            Some(value) => set_value(config_path, key, value),
            None => get_value(config, key),
        };
    }

    if args.edit {
        return edit_form(config, config_path);
    }
    if args.view {
        return view_table(config);
    }

    // No flags: the `edit_config` setting picks the default behaviour
    if config.edit_config && console::user_attended() {
        edit_form(config, config_path)
    } else {
        view_table(config)
    }
}

fn get_value(config: &Config, key: &str) -> Result<()> {
    let value = match key {
        "memo_dir" => config.memo_dir.display().to_string(),
        "editor" => config.editor.clone(),
        "list_fg_colour" => config.list_fg_colour.clone(),
        "list_bg_colour" => config.list_bg_colour.clone(),
        "display_width" => config.display_width.to_string(),
        "edit_config" => config.edit_config.to_string(),
        "git" => config.git.to_string(),
        "assets_dir" => config.assets_dir.display().to_string(),
        _ => bail!("unknown config key: {} (known: {})", key, KEYS.join(", ")),
    };
    println!("{}", value);
    Ok(())
}

/// Set one key in the config file, keeping any comments and layout.
fn set_value(config_path: &Path, key: &str, value: &str) -> Result<()> {
    use toml_edit::{value as toml_value, DocumentMut};

    if !KEYS.contains(&key) {
        bail!("unknown config key: {} (known: {})", key, KEYS.join(", "));
    }

    let content = if config_path.is_file() {
        std::fs::read_to_string(config_path)?
    } else {
        String::new()
    };

    let mut doc: DocumentMut = content.parse().context("failed to parse config file")?;
    doc[key] = toml_value(parse_toml_value(value));

    // Reject values the typed config cannot carry before writing them
    let updated = doc.to_string();
    toml::from_str::<Config>(&updated)
        .with_context(|| format!("{} is not a valid value for {}", value, key))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(config_path, updated)?;

    println!("Set {} = {}", key, value);
    Ok(())
}

/// Parse string value to the matching TOML type
fn parse_toml_value(s: &str) -> toml_edit::Value {
    if s == "true" {
        return true.into();
    }
    if s == "false" {
        return false.into();
    }
    if let Ok(i) = s.parse::<i64>() {
        return i.into();
    }
    s.into()
}

fn view_table(config: &Config) -> Result<()> {
    #[derive(Tabled)]
    struct Setting {
        #[tabled(rename = "Key")]
        key: &'static str,
        #[tabled(rename = "Value")]
        value: String,
    }

    let rows = vec![
        Setting {
            key: "memo_dir",
            value: config.memo_dir.display().to_string(),
        },
        Setting {
            key: "editor",
            value: config.editor.clone(),
        },
        Setting {
            key: "list_fg_colour",
            value: config.list_fg_colour.clone(),
        },
        Setting {
            key: "list_bg_colour",
            value: config.list_bg_colour.clone(),
        },
        Setting {
            key: "display_width",
            value: config.display_width.to_string(),
        },
        Setting {
            key: "edit_config",
            value: config.edit_config.to_string(),
        },
        Setting {
            key: "git",
            value: config.git.to_string(),
        },
        Setting {
            key: "assets_dir",
            value: config.assets_dir.display().to_string(),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    Ok(())
}

fn edit_form(config: &Config, config_path: &Path) -> Result<()> {
    println!("Editing configuration ({})\n", config_path.display());

    let mut updated = config.clone();

    let memo_dir: String = Input::new()
        .with_prompt("Memo directory")
        .default(config.memo_dir.display().to_string())
        .interact_text()?;
    updated.memo_dir = PathBuf::from(memo_dir);

    updated.editor = Input::new()
        .with_prompt("Editor")
        .default(config.editor.clone())
        .interact_text()?;

    updated.list_fg_colour = Input::new()
        .with_prompt("Listing foreground colour")
        .default(config.list_fg_colour.clone())
        .interact_text()?;

    updated.list_bg_colour = Input::new()
        .with_prompt("Listing background colour")
        .default(config.list_bg_colour.clone())
        .interact_text()?;

    updated.display_width = Input::new()
        .with_prompt("Display width (0 = detect)")
        .default(config.display_width)
        .interact_text()?;

    updated.edit_config = Confirm::new()
        .with_prompt("Open this form by default when running `memo config`?")
        .default(config.edit_config)
        .interact()?;

    updated.git = Confirm::new()
        .with_prompt("Commit memo changes to git?")
        .default(config.git)
        .interact()?;

    let save = Confirm::new()
        .with_prompt("Save configuration?")
        .default(true)
        .interact()?;

    if save {
        with_status("Saving configuration", || updated.save_to(config_path))?;
        println!("Saved configuration to {}", config_path.display());
    } else {
        println!("Configuration not saved");
    }

    Ok(())
}

/// Run `f` behind a short status animation. The `ACCESSIBLE` environment
/// variable (or a non-terminal stderr) switches to a plain message.
fn with_status<T>(label: &str, f: impl FnOnce() -> T) -> T {
    const FRAMES: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

    let term = Term::stderr();
    let accessible = std::env::var_os("ACCESSIBLE").is_some();
    if accessible || !term.is_term() {
        eprintln!("{}...", label);
        return f();
    }

    for frame in FRAMES.iter().cycle().take(8) {
        let _ = term.write_str(&format!("\r{} {}", frame, label));
        std::thread::sleep(Duration::from_millis(60));
    }
    let result = f();
    let _ = term.clear_line();
    result
}
