use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cli::{AppContext, InitArgs};
use crate::infra::encoding::resolve_label;
use crate::infra::io::LoadOptions;
use crate::infra::write::{WriteOptions, safe_write};

/// Config file names probed in the working directory, first match wins.
pub const CONFIG_FILES: [&str; 2] = ["textkit.toml", ".textkit.toml"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Head/tail defaults
    pub preview: PreviewConfig,

    /// Word frequency defaults
    pub frequency: FrequencyConfig,

    /// Advanced search defaults
    pub search: SearchConfig,

    /// Decoding behaviour
    pub encoding: EncodingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig
{
    pub lines: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyConfig
{
    pub top: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig
{
    pub context: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig
{
    /// WHATWG label of the legacy code page for non-UTF-8 input
    pub fallback: String,
    /// Refuse to decode lossily
    pub strict: bool,
}

impl Default for PreviewConfig
{
    fn default() -> Self
    {
        Self { lines: 10 }
    }
}

impl Default for FrequencyConfig
{
    fn default() -> Self
    {
        Self { top: 10 }
    }
}

impl Default for EncodingConfig
{
    fn default() -> Self
    {
        Self {
            fallback: "windows-1254".to_string(),
            strict: false,
        }
    }
}

impl Config
{
    /// Loader options derived from the `[encoding]` table.
    pub fn load_options(&self) -> Result<LoadOptions>
    {
        let fallback = resolve_label(&self.encoding.fallback).with_context(|| {
            format!("unknown fallback encoding '{}'", self.encoding.fallback)
        })?;

        Ok(LoadOptions {
            fallback,
            strict: self.encoding.strict,
        })
    }
}

/// Load configuration from the working directory and `TEXTKIT_*` env vars.
pub fn load_config() -> Result<Config>
{
    load_config_from(Path::new("."))
}

/// Working-directory config, or defaults when it cannot be loaded.
pub fn current() -> Config
{
    load_config().unwrap_or_else(|e| {
        warn!("{e:#}; using default configuration");
        Config::default()
    })
}

/// Load configuration rooted at `dir`.
pub fn load_config_from(dir: &Path) -> Result<Config>
{
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    for name in &CONFIG_FILES
    {
        let path = dir.join(name);
        if path.exists()
        {
            builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
            break;
        }
    }

    // Add environment variables with TEXTKIT_ prefix, e.g. TEXTKIT_PREVIEW__LINES
    builder = builder.add_source(
        config::Environment::with_prefix("TEXTKIT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILES[0]);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    safe_write(&config_path, &toml_string, WriteOptions::BACKUP)
        .context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
