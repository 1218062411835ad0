pub mod config;
pub mod fast;
pub mod stats;

use fasttrack_core::{Config, FastTracker, FileStore, NullScheduler};

/// Open the tracker over the on-disk store.
///
/// The CLI runs headless, so alerts go to the [`NullScheduler`]: handles are
/// tracked and the cancel/schedule choreography is exercised, but nothing
/// fires. A desktop shell would inject its platform scheduler here.
pub fn open_tracker(cfg: &Config) -> Result<FastTracker<FileStore, NullScheduler>, Box<dyn std::error::Error>> {
    let store = FileStore::open_default()?;
    Ok(FastTracker::load_with(
        store,
        NullScheduler,
        cfg.fasting.default_hours,
        cfg.notifications.alert_content(),
    ))
}
