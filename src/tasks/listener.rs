//! Change Listener Task
//!
//! Drains a backend's change-notification stream and invokes a callback for
//! each observable cross-context write.

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::backend::ChangeEvent;

/// Spawns a task that drains `receiver` and invokes `callback` per write.
///
/// Removal notifications (no new value) are skipped. The raw stored text is
/// parsed as JSON before the callback sees it; it is deliberately not run
/// through the entry decompression pipeline, so remote writes surface in
/// their stored form. Text that does not parse is reported and skipped.
///
/// The task ends when the sending side is dropped. The returned handle can
/// be used to abort it earlier.
pub fn spawn_listener_task<F>(mut receiver: Receiver<ChangeEvent>, callback: F) -> JoinHandle<()>
where
    F: Fn(String, serde_json::Value) + Send + 'static,
{
    tokio::spawn(async move {
        info!("Starting change listener task");

        loop {
            let event = match receiver.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "change listener lagged, notifications dropped");
                    continue;
                }
                Err(RecvError::Closed) => {
                    info!("Change stream closed, stopping listener task");
                    break;
                }
            };

            let Some(text) = event.new_value else {
                // Removal notification
                continue;
            };

            match serde_json::from_str(&text) {
                Ok(value) => {
                    debug!(key = %event.key, "observed cross-context write");
                    callback(event.key, value);
                }
                Err(err) => {
                    warn!(key = %event.key, error = %err, "ignoring unparseable change event");
                }
            }
        }
    })
}
