use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(
    name = "linequeue",
    about = "In-memory queues of unique text lines, served over HTTP",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at DEBUG instead of INFO
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides the config file)
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,

    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_serve_flags() {
        let cli = Cli::parse_from(["linequeue", "-v", "serve", "--bind", "0.0.0.0:9000"]);
        assert_eq!(cli.log_level(), Level::DEBUG);
        let Command::Serve(args) = cli.command;
        assert_eq!(args.bind, Some("0.0.0.0:9000".parse().unwrap()));
        assert!(args.config.is_none());
    }

    #[test]
    fn rejects_bad_address() {
        assert!(Cli::try_parse_from(["linequeue", "serve", "--bind", "nowhere"]).is_err());
    }

    #[test]
    fn quiet_by_default() {
        let cli = Cli::parse_from(["linequeue", "serve"]);
        assert_eq!(cli.log_level(), Level::INFO);
    }
}
