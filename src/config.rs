use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use toml;
use tracing::{info, warn};

/// Configuration for the pinboard server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL for the database connection
    pub database_url: String,
    /// Address the API server listens on
    pub bind_addr: String,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    /// Optional update for database URL
    #[serde(default)]
    pub database_url: Option<String>,
    /// Optional update for the listen address
    #[serde(default)]
    pub bind_addr: Option<String>,
}

/// Command line arguments for the application
#[derive(Parser, Debug)]
#[clap(name = "pinboard", about = "A card-sharing board server")]
pub struct CliArgs {
    /// Database URL
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Address to serve the API on
    #[clap(long, env = "BIND_ADDR")]
    pub bind_addr: Option<String>,

    /// Debug mode
    #[clap(long, env = "PINBOARD_DEBUG", default_value_t = false)]
    pub debug: bool,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            bind_addr: update.bind_addr.unwrap_or(self.bind_addr),
        }
    }
}

/// Returns the base (default) configuration
pub fn base_config(config_path: Option<PathBuf>) -> Config {
    let database_url = config_path.map_or("pinboard.db".to_string(), |path| {
        path.join("pinboard.db").to_string_lossy().to_string()
    });

    Config {
        database_url,
        bind_addr: "0.0.0.0:3000".to_string(),
    }
}

/// Loads configuration from a TOML file
pub fn config_from_file(config_file: Option<PathBuf>) -> Result<ConfigUpdate, String> {
    // Without a config file there is nothing to override
    let config_file = match config_file {
        Some(config_file) => config_file,
        None => return Ok(ConfigUpdate::default()),
    };

    if !config_file.exists() {
        info!("Config file not found at {:?}, using defaults", config_file);
        return Ok(ConfigUpdate::default());
    }

    match fs::read_to_string(&config_file) {
        Ok(content) => match toml::from_str::<ConfigUpdate>(&content) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", config_file);
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                Err(format!("Failed to parse config file: {}", e))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            Err(format!("Failed to read config file: {}", e))
        }
    }
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        database_url: args.database_url,
        bind_addr: args.bind_addr,
    }
}

/// Gets the complete configuration by combining defaults with
/// values from config file, environment variables, and command line arguments
/// in order of increasing precedence
pub fn get_config(args: CliArgs) -> Config {
    let config_dir = match ProjectDirs::from("com", "pinboard", "pinboard") {
        Some(proj_dirs) => Some(PathBuf::from(proj_dirs.config_dir())),
        None => {
            warn!("Could not determine XDG config directory, skipping config file");
            None
        }
    };

    let config_dir = config_dir.filter(|path| {
        if path.exists() {
            true
        } else {
            info!("Config path not found at {:?}, using defaults", path);
            false
        }
    });

    let base = base_config(config_dir.clone());
    let config_file = config_dir.map(|dir| dir.join("config.toml"));

    // Apply updates in order of increasing precedence
    let config = base
        .apply_update(config_from_file(config_file).unwrap_or_default())
        .apply_update(config_from_args(args));

    info!(
        "Final configuration: database_url={}, bind_addr={}",
        config.database_url, config.bind_addr
    );

    config
}
