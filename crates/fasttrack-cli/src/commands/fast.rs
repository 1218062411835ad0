use chrono::{DateTime, Utc};
use clap::Subcommand;
use fasttrack_core::Config;

#[derive(Subcommand)]
pub enum FastAction {
    /// Begin a fast (overwrites any unfinished one)
    Start {
        /// Fasting window in hours; defaults to the configured window
        #[arg(long)]
        hours: Option<f64>,
        /// Backdated start time (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    /// Push the planned end time out
    Extend {
        /// Hours to add
        #[arg(long, default_value = "1")]
        hours: f64,
    },
    /// End the active fast and record it
    End,
    /// Print current tracker state as JSON
    Status,
    /// Wipe the active fast, all history, and the stored snapshot
    Reset,
    /// Clear recorded history, keeping any active fast
    ClearHistory,
}

pub fn run(action: FastAction) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    let mut tracker = super::open_tracker(&cfg)?;

    match action {
        FastAction::Start { hours, at } => {
            let hours = hours.unwrap_or(cfg.fasting.default_hours);
            let start_at = at
                .map(|s| DateTime::parse_from_rfc3339(&s))
                .transpose()?
                .map(|t| t.with_timezone(&Utc));
            let event = tracker.start_fast(hours, start_at);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        FastAction::Extend { hours } => match tracker.extend_fast(hours) {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("{{\"type\": \"no_active_fast\"}}"),
        },
        FastAction::End => match tracker.end_fast() {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("{{\"type\": \"no_active_fast\"}}"),
        },
        FastAction::Status => {
            println!("{}", serde_json::to_string_pretty(&tracker.status())?);
        }
        FastAction::Reset => {
            let event = tracker.reset_all();
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        FastAction::ClearHistory => {
            let event = tracker.clear_history();
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }
    Ok(())
}
