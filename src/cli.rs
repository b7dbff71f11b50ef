use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "jeepcast",
    version,
    about = "Should the Jeep top and doors come off today?"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a forecast feed document ("-" reads stdin)
    Analyze {
        #[arg(short, long)]
        feed: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Fetch today's forecast from OpenWeatherMap and analyze it
    Fetch {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Analyze as of this instant instead of now (RFC 3339)
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_with_options() {
        let cli = Cli::parse_from([
            "jeepcast",
            "-vv",
            "analyze",
            "--feed",
            "feed.json",
            "--json",
            "--now",
            "2024-06-01T12:00:00Z",
        ]);
        assert_eq!(cli.log_filter(), "trace");
        match cli.command {
            Some(Commands::Analyze { feed, output }) => {
                assert_eq!(feed, PathBuf::from("feed.json"));
                assert!(output.json);
                assert_eq!(output.now.unwrap().to_rfc3339(), "2024-06-01T12:00:00+00:00");
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn no_command_is_allowed() {
        let cli = Cli::parse_from(["jeepcast"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.log_filter(), "warn");
    }
}
