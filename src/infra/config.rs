use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::core::expand::ContextConfig;
use crate::core::render::RenderOptions;

/// Config file names, first match wins
const CONFIG_FILES: [&str; 2] = ["scopegrep.toml", ".scopegrep.toml"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Expansion used by `sgr search`
    pub context: ContextConfig,

    /// Expansion used by `sgr overview`
    pub overview: ContextConfig,

    /// Output settings shared by both commands
    pub render: RenderOptions,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            context: ContextConfig::default(),
            overview: ContextConfig::overview(),
            // the terminal tool colors unless told otherwise
            render: RenderOptions {
                color: true,
                ..RenderOptions::default()
            },
        }
    }
}

/// Load config from the working directory and `SCOPEGREP_*` variables.
pub fn load_config() -> Result<Config>
{
    load_config_from(Path::new("."))
}

/// Same as [`load_config`], looking for the config file in `dir`.
pub fn load_config_from(dir: &Path) -> Result<Config>
{
    // Defaults go in first so partially filled sections keep their presets
    let defaults = config::Config::try_from(&Config::default())
        .context("Failed to prepare default configuration")?;
    let mut builder = config::Config::builder().add_source(defaults);

    if let Some(path) = find_config_file(dir)
    {
        tracing::debug!(path = %path.display(), "using config file");
        builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
    }

    // SCOPEGREP_CONTEXT__SURROUNDING_LINES=5 → context.surrounding_lines
    builder = builder.add_source(
        config::Environment::with_prefix("SCOPEGREP")
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

fn find_config_file(dir: &Path) -> Option<PathBuf>
{
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
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

    std::fs::write(&config_path, toml_string).with_context(|| {
        format!("Failed to write config file {}", config_path.display())
    })?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
