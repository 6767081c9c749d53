pub mod toml_config;

use crate::core::query::DEFAULT_PAGE_SIZE;
use crate::core::ConfigProvider;
use crate::utils::error::{PokedexError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use toml_config::TomlConfig;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CATALOG_SOURCE: &str = "data/pokemon.csv";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_ICON_BASE_URL: &str = "https://img.pokemondb.net/sprites/silver/normal";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "pokedex")]
#[command(about = "Serve a creature catalog with capture tracking over HTTP")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, help = "Catalog location: a .csv/.json file or an http(s) URL")]
    pub catalog: Option<String>,

    #[arg(long, help = "Origin allowed to call the API with credentials")]
    pub allowed_origin: Option<String>,

    #[arg(long)]
    pub icon_base_url: Option<String>,

    #[arg(long)]
    pub default_page_size: Option<usize>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Effective settings: CLI flags over the TOML file over built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub catalog_source: String,
    pub allowed_origin: String,
    pub icon_base_url: String,
    pub default_page_size: usize,
    pub log_level: Option<String>,
    pub json_logs: bool,
    pub verbose: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            catalog_source: DEFAULT_CATALOG_SOURCE.to_string(),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            log_level: None,
            json_logs: false,
            verbose: false,
        }
    }
}

impl ServiceConfig {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        Ok(Self::merge(cli, file))
    }

    pub fn merge(cli: &CliConfig, file: TomlConfig) -> Self {
        let defaults = Self::default();

        Self {
            host: cli.host.clone().or(file.server.host).unwrap_or(defaults.host),
            port: cli.port.or(file.server.port).unwrap_or(defaults.port),
            catalog_source: cli
                .catalog
                .clone()
                .or(file.catalog.source)
                .unwrap_or(defaults.catalog_source),
            allowed_origin: cli
                .allowed_origin
                .clone()
                .or(file.cors.allowed_origin)
                .unwrap_or(defaults.allowed_origin),
            icon_base_url: cli
                .icon_base_url
                .clone()
                .or(file.icons.base_url)
                .unwrap_or(defaults.icon_base_url),
            default_page_size: cli
                .default_page_size
                .or(file.query.default_page_size)
                .unwrap_or(defaults.default_page_size),
            log_level: file.logging.level,
            json_logs: cli.json_logs || file.logging.json.unwrap_or(false),
            verbose: cli.verbose,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ConfigProvider for ServiceConfig {
    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn catalog_source(&self) -> &str {
        &self.catalog_source
    }

    fn allowed_origin(&self) -> &str {
        &self.allowed_origin
    }

    fn icon_base_url(&self) -> &str {
        &self.icon_base_url
    }

    fn default_page_size(&self) -> usize {
        self.default_page_size
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.host)?;

        if self.port == 0 {
            return Err(PokedexError::InvalidConfigValueError {
                field: "server.port".to_string(),
                value: self.port.to_string(),
                reason: "Port must be non-zero".to_string(),
            });
        }

        validate_non_empty_string("catalog.source", &self.catalog_source)?;
        validate_url("cors.allowed_origin", &self.allowed_origin)?;
        validate_url("icons.base_url", &self.icon_base_url)?;
        validate_positive_number("query.default_page_size", self.default_page_size, 1)?;
        Ok(())
    }
}
