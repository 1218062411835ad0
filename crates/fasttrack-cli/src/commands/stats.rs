use clap::Subcommand;
use fasttrack_core::Config;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Totals, longest, and average over completed fasts
    Summary,
    /// Hours fasted per day, newest window ending today
    Daily {
        /// Days to cover; defaults to the configured chart window
        #[arg(long)]
        days: Option<u32>,
    },
    /// Completed fasts, newest first
    History {
        /// Print at most this many entries
        #[arg(long)]
        limit: Option<usize>,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    let tracker = super::open_tracker(&cfg)?;

    match action {
        StatsAction::Summary => {
            println!("{}", serde_json::to_string_pretty(&tracker.stats())?);
        }
        StatsAction::Daily { days } => {
            let days = days.unwrap_or(cfg.chart.days);
            println!(
                "{}",
                serde_json::to_string_pretty(&tracker.daily_totals(days))?
            );
        }
        StatsAction::History { limit } => {
            let history = tracker.history();
            let shown = &history[..limit.unwrap_or(history.len()).min(history.len())];
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
    }
    Ok(())
}
