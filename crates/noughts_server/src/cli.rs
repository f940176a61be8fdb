//! Command-line interface for the noughts server.

use clap::Parser;
use noughts_server::{ConfigError, ServerConfig};
use std::path::PathBuf;

/// Noughts & crosses against a random computer opponent, over HTTP
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Noughts & crosses game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML config file; built-in defaults are used when omitted
    #[arg(short, long, env = "NOUGHTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Host to bind to (overrides the config file)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides the config file)
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Seed for the computer opponent, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Loads the config file, if any, and applies command-line overrides.
    pub fn load_config(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };
        if let Some(host) = &self.host {
            config = config.with_host(host.clone());
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "noughts", "--host", "0.0.0.0", "--port", "4000", "--seed", "9",
        ]);
        let config = cli.load_config().unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:4000");
        assert_eq!(*config.seed(), Some(9));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
