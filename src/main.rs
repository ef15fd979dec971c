//! inkdraft - A terminal rich-text editor with markdown-style shortcuts.
//!
//! # Usage
//!
//! ```bash
//! inkdraft
//! inkdraft --storage notes.json
//! inkdraft --dump
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;

use inkdraft::app::App;
use inkdraft::config::{
    ConfigFlags, ThemeMode, clear_config_flags, default_storage_path, global_config_path,
    load_config_flags, local_override_path, save_config_flags,
};
use inkdraft::storage::{EDITOR_CONTENT_KEY, FileStorage, Storage};

/// A terminal rich-text editor with markdown-style formatting shortcuts
#[derive(Parser, Debug)]
#[command(name = "inkdraft", version, about, long_about = None)]
struct Cli {
    /// Storage file holding the saved content
    #[arg(long, value_name = "PATH")]
    storage: Option<PathBuf>,

    /// Color palette for the terminal background
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Disable mouse capture
    #[arg(long)]
    no_mouse: bool,

    /// Write logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the saved content as JSON and exit
    #[arg(long)]
    dump: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    /// The persistable subset of the flags.
    fn config_flags(&self) -> ConfigFlags {
        ConfigFlags {
            no_mouse: self.no_mouse,
            theme: self.theme,
            storage: self.storage.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}

fn dump(storage: &FileStorage) -> Result<()> {
    let Some(json) = storage
        .get_item(EDITOR_CONTENT_KEY)
        .context("Failed to read storage")?
    else {
        eprintln!("No saved content in {}", storage.path().display());
        return Ok(());
    };
    let value: serde_json::Value =
        serde_json::from_str(&json).context("Saved content is not valid JSON")?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.config_flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    let storage_path = effective.storage.clone().unwrap_or_else(default_storage_path);
    let storage = FileStorage::new(storage_path);

    if cli.dump {
        return dump(&storage);
    }

    let colorfgbg = std::env::var("COLORFGBG").ok();
    let light = effective
        .theme
        .unwrap_or(ThemeMode::Auto)
        .is_light(colorfgbg.as_deref());

    // Run the application
    let mut app = App::new(Box::new(storage))
        .with_theme(light)
        .with_mouse(!effective.no_mouse);

    app.run().context("Application error")
}
