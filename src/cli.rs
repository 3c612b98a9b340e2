//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use astra::config::{self, Environment, ServerConfig, DEFAULT_CLIENT_DIR};
use astra::params::RenderConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "astra")]
#[command(about = "ASTRA.IO landing page: hero scene viewer, page builder and server", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP backend (flags override PORT, NODE_ENV, CLIENT_DIR)
    Serve {
        /// Port to listen on [env: PORT, default: 3000]
        #[arg(long, value_parser = port_arg)]
        port: Option<u16>,

        /// development or production [env: NODE_ENV, default: development]
        #[arg(long = "env", value_name = "ENVIRONMENT", value_parser = environment_arg)]
        environment: Option<Environment>,

        /// Built client served in production [env: CLIENT_DIR]
        #[arg(long, value_name = "DIR")]
        client_dir: Option<PathBuf>,
    },

    /// Open the hero scene in a native window
    View {
        #[arg(long, value_name = "PIXELS", default_value_t = 640)]
        width: u32,

        #[arg(long, value_name = "PIXELS", default_value_t = 600)]
        height: u32,
    },

    /// Write the landing page into the client directory
    Build {
        #[arg(long, value_name = "DIR", env = "CLIENT_DIR", default_value = DEFAULT_CLIENT_DIR)]
        out_dir: PathBuf,

        /// Also render hero.png and show it when scripts are disabled
        #[arg(long)]
        poster: bool,
    },

    /// Render one frame of the hero scene to a PNG
    Snapshot {
        #[arg(long, value_name = "FILE", default_value = "hero.png")]
        out: PathBuf,

        /// Scene time to capture (seconds after start)
        #[arg(long, value_name = "SECONDS", default_value_t = 0.0)]
        time: f32,

        #[arg(long, value_name = "PIXELS", default_value_t = 640)]
        width: u32,

        #[arg(long, value_name = "PIXELS", default_value_t = 600)]
        height: u32,
    },
}

fn port_arg(s: &str) -> Result<u16, String> {
    config::parse_port(s).map_err(|e| e.to_string())
}

fn environment_arg(s: &str) -> Result<Environment, String> {
    s.parse().map_err(|e: astra::Error| e.to_string())
}

/// Apply command-line overrides on top of a config read from the environment
pub fn server_config(
    base: ServerConfig,
    port: Option<u16>,
    environment: Option<Environment>,
    client_dir: Option<PathBuf>,
) -> ServerConfig {
    ServerConfig {
        port: port.unwrap_or(base.port),
        environment: environment.unwrap_or(base.environment),
        client_dir: client_dir.unwrap_or(base.client_dir),
        ..base
    }
}

/// Window or frame size for the native renderer
pub fn render_config(width: u32, height: u32) -> RenderConfig {
    RenderConfig {
        window_width: width.max(1),
        window_height: height.max(1),
        ..RenderConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags() {
        let args =
            Args::try_parse_from(["astra", "serve", "--port", "8080", "--env", "production"])
                .unwrap();
        let Command::Serve {
            port,
            environment,
            client_dir,
        } = args.command
        else {
            panic!("expected serve");
        };
        assert_eq!(port, Some(8080));
        assert_eq!(environment, Some(Environment::Production));
        assert_eq!(client_dir, None);
    }

    #[test]
    fn test_serve_rejects_bad_values() {
        assert!(Args::try_parse_from(["astra", "serve", "--port", "http"]).is_err());
        assert!(Args::try_parse_from(["astra", "serve", "--env", "staging"]).is_err());
    }

    #[test]
    fn test_flags_override_environment() {
        let base = ServerConfig {
            port: 4000,
            db_uri: Some("mongodb://db".to_string()),
            ..ServerConfig::default()
        };
        let config = server_config(base.clone(), None, Some(Environment::Production), None);
        assert_eq!(config.port, 4000);
        assert!(config.environment.is_production());
        assert_eq!(config.db_uri, base.db_uri);

        let config = server_config(base, Some(5000), None, Some(PathBuf::from("dist")));
        assert_eq!(config.port, 5000);
        assert_eq!(config.client_dir, PathBuf::from("dist"));
    }

    #[test]
    fn test_snapshot_defaults() {
        let args = Args::try_parse_from(["astra", "snapshot"]).unwrap();
        let Command::Snapshot {
            out,
            time,
            width,
            height,
        } = args.command
        else {
            panic!("expected snapshot");
        };
        assert_eq!(out, PathBuf::from("hero.png"));
        assert_eq!(time, 0.0);
        assert_eq!((width, height), (640, 600));
    }

    #[test]
    fn test_render_config_never_zero_sized() {
        let config = render_config(0, 0);
        assert_eq!((config.window_width, config.window_height), (1, 1));
        assert_eq!(config.clear_alpha, 1.0);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["astra"]).is_err());
    }
}
