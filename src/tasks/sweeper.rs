//! TTL Sweep Task
//!
//! Background task that periodically drops expired entries from the
//! in-memory fast layer. Reads already ignore expired entries; the sweep only
//! reclaims their memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::backend::MemoryFastCache;
use crate::config::Config;

/// Spawns a task sweeping `fast` every `config.cleanup_interval` seconds.
///
/// The task loops forever; abort the returned handle to stop it.
///
/// # Example
/// ```ignore
/// let config = Config::from_env();
/// let fast = Arc::new(MemoryFastCache::from_config(&config));
/// let sweep_handle = spawn_sweep_task(fast.clone(), &config);
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(fast: Arc<MemoryFastCache>, config: &Config) -> JoinHandle<()> {
    let interval_secs = config.cleanup_interval.max(1);
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting fast layer sweep task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = fast.sweep_expired().await;
            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}
