use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "inkdraft";
const STORAGE_FILE: &str = "local_storage.json";

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    /// Whether to use the light palette. `Auto` reads the terminal's
    /// `COLORFGBG` value.
    pub fn is_light(self, colorfgbg: Option<&str>) -> bool {
        match self {
            Self::Light => true,
            Self::Dark => false,
            Self::Auto => light_from_colorfgbg(colorfgbg),
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

fn light_from_colorfgbg(colorfgbg: Option<&str>) -> bool {
    let Some(value) = colorfgbg else {
        return false;
    };
    let bg = value.rsplit(';').next().unwrap_or(value);
    bg.parse::<u8>().is_ok_and(|bg| bg >= 7)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_mouse: bool,
    pub theme: Option<ThemeMode>,
    pub storage: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; options in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_mouse: self.no_mouse || other.no_mouse,
            theme: other.theme.or(self.theme),
            storage: other.storage.clone().or_else(|| self.storage.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    platform_dir("APPDATA", &["Library", "Application Support"], "XDG_CONFIG_HOME", ".config")
        .map_or_else(local_override_path, |dir| dir.join("config"))
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".inkdraftrc")
}

/// Where the storage file lives unless `--storage` says otherwise.
pub fn default_storage_path() -> PathBuf {
    platform_dir(
        "LOCALAPPDATA",
        &["Library", "Application Support"],
        "XDG_DATA_HOME",
        ".local/share",
    )
    .map_or_else(|| PathBuf::from(STORAGE_FILE), |dir| dir.join(STORAGE_FILE))
}

fn platform_dir(
    windows_var: &str,
    macos_subdirs: &[&str],
    xdg_var: &str,
    xdg_fallback: &str,
) -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let _ = (macos_subdirs, xdg_var, xdg_fallback);
        std::env::var_os(windows_var).map(|dir| PathBuf::from(dir).join(APP_DIR))
    }

    #[cfg(target_os = "macos")]
    {
        let _ = (windows_var, xdg_var, xdg_fallback);
        std::env::var_os("HOME").map(|home| {
            macos_subdirs
                .iter()
                .fold(PathBuf::from(home), |path, part| path.join(part))
                .join(APP_DIR)
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let _ = (windows_var, macos_subdirs);
        if let Some(xdg) = std::env::var_os(xdg_var).filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(xdg).join(APP_DIR));
        }
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(xdg_fallback).join(APP_DIR))
    }
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# inkdraft defaults (saved with --save)".to_string()];
    if flags.no_mouse {
        lines.push("--no-mouse".to_string());
    }
    if let Some(theme) = flags.theme {
        lines.push(format!("--theme {}", theme.as_str()));
    }
    if let Some(storage) = &flags.storage {
        lines.push(format!("--storage {}", storage.display()));
    }
    if let Some(log_file) = &flags.log_file {
        lines.push(format!("--log-file {}", log_file.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the persistable flags out of raw arguments. Unknown tokens are
/// skipped, so the full `argv` can be passed in.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = token
            .split_once('=')
            .map_or((token, None), |(name, value)| (name, Some(value)));
        let takes_value = matches!(name, "--theme" | "--storage" | "--log-file");
        let value = if takes_value && inline_value.is_none() {
            i += 1;
            tokens.get(i).map(String::as_str)
        } else {
            inline_value
        };

        match (name, value) {
            ("--no-mouse", None) => flags.no_mouse = true,
            ("--theme", Some(value)) => flags.theme = parse_theme(value),
            ("--storage", Some(value)) => flags.storage = Some(PathBuf::from(value)),
            ("--log-file", Some(value)) => flags.log_file = Some(PathBuf::from(value)),
            _ => {}
        }
        i += 1;
    }
    flags
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "auto" => Some(ThemeMode::Auto),
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}
