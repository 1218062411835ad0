use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fasttrack", version, about = "FastTrack CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fast lifecycle control
    Fast {
        #[command(subcommand)]
        action: commands::fast::FastAction,
    },
    /// History and statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Fast { action } => commands::fast::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "fasttrack",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fast_start_with_hours_and_backdate() {
        let cli = Cli::try_parse_from([
            "fasttrack",
            "fast",
            "start",
            "--hours",
            "18",
            "--at",
            "2026-07-14T20:00:00Z",
        ])
        .unwrap();
        match cli.command {
            Commands::Fast {
                action: commands::fast::FastAction::Start { hours, at },
            } => {
                assert_eq!(hours, Some(18.0));
                assert_eq!(at.as_deref(), Some("2026-07-14T20:00:00Z"));
            }
            _ => panic!("expected fast start"),
        }
    }

    #[test]
    fn parses_stats_daily_with_days() {
        let cli = Cli::try_parse_from(["fasttrack", "stats", "daily", "--days", "7"]).unwrap();
        match cli.command {
            Commands::Stats {
                action: commands::stats::StatsAction::Daily { days },
            } => assert_eq!(days, Some(7)),
            _ => panic!("expected stats daily"),
        }
    }

    #[test]
    fn rejects_unknown_subcommands() {
        assert!(Cli::try_parse_from(["fasttrack", "snooze"]).is_err());
    }
}
