//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use fontdl_core::{DEFAULT_OUTPUT_DIR, DownloadOptions, FilenameScheme};
use url::Url;

/// `key = value` file configuration for fontdl defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Default output directory for downloads.
    pub output_dir: Option<PathBuf>,
    /// Stylesheet endpoint base URL.
    pub stylesheet_endpoint: Option<String>,
    /// Prefix accepted asset URLs must start with.
    pub asset_host: Option<String>,
    /// User-Agent sent with every request.
    pub user_agent: Option<String>,
    /// Default file naming scheme.
    pub naming: Option<FilenameScheme>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against runtime constraints.
    pub fn validate(&self) -> Result<()> {
        validate_http_url("stylesheet_endpoint", self.stylesheet_endpoint.as_deref())?;
        validate_http_url("asset_host", self.asset_host.as_deref())?;

        if let Some(user_agent) = &self.user_agent
            && user_agent.trim().is_empty()
        {
            bail!("Invalid config value for `user_agent`: must not be empty");
        }
        if let Some(output_dir) = &self.output_dir
            && output_dir.as_os_str().is_empty()
        {
            bail!("Invalid config value for `output_dir`: must not be empty");
        }
        Ok(())
    }
}

fn validate_http_url(field: &str, value: Option<&str>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    let parsed = Url::parse(value)
        .with_context(|| format!("Invalid config value for `{field}`: '{value}' is not a URL"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "Invalid config value for `{field}`: scheme '{}' is not supported. Expected http or https",
            parsed.scheme()
        );
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Log filter directive used when neither `RUST_LOG` nor CLI flags decide.
    #[must_use]
    pub fn log_level(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose => "debug",
            Self::Quiet => "error",
            Self::Debug => "trace",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

impl LoadedConfig {
    /// Download options with file values applied over the defaults.
    #[must_use]
    pub fn download_options(&self, naming_override: Option<FilenameScheme>) -> DownloadOptions {
        let defaults = DownloadOptions::default();
        let Some(config) = &self.config else {
            return DownloadOptions {
                naming: naming_override.unwrap_or(defaults.naming),
                ..defaults
            };
        };
        DownloadOptions {
            stylesheet_endpoint: config
                .stylesheet_endpoint
                .clone()
                .unwrap_or(defaults.stylesheet_endpoint),
            asset_host: config.asset_host.clone().unwrap_or(defaults.asset_host),
            naming: naming_override
                .or(config.naming)
                .unwrap_or(defaults.naming),
        }
    }

    /// Output directory: CLI value, then file value, then `fonts`.
    #[must_use]
    pub fn output_dir(&self, cli_value: Option<PathBuf>) -> PathBuf {
        cli_value
            .or_else(|| self.config.as_ref().and_then(|c| c.output_dir.clone()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    /// User-Agent from the file, if one is set.
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.config.as_ref().and_then(|c| c.user_agent.as_deref())
    }

    /// Verbosity from the file, if one is set.
    #[must_use]
    pub fn verbosity(&self) -> Option<VerbositySetting> {
        self.config.as_ref().and_then(|c| c.verbosity)
    }
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/fontdl/config.toml`
/// 2. `$HOME/.config/fontdl/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home).join("fontdl").join("config.toml"));
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("fontdl")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.exists() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_number = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_number}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let string_value = || {
            parse_string_literal(value)
                .with_context(|| format!("Invalid `{key}` value on line {line_number}"))
        };

        match key {
            "output_dir" => cfg.output_dir = Some(PathBuf::from(string_value()?)),
            "stylesheet_endpoint" => cfg.stylesheet_endpoint = Some(string_value()?),
            "asset_host" => cfg.asset_host = Some(string_value()?),
            "user_agent" => cfg.user_agent = Some(string_value()?),
            "naming" => {
                let parsed = string_value()?;
                let scheme = parsed.parse::<FilenameScheme>().map_err(|reason| {
                    anyhow::anyhow!("Invalid `naming` value on line {line_number}: {reason}")
                })?;
                cfg.naming = Some(scheme);
            }
            "verbosity" => {
                let parsed = string_value()?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_number}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_number}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}
