//! # Async Tasks
//!
//! Background work whose result comes back as an [`AppEvent`]: price polling,
//! the push stream, and trade list refreshes.

pub mod market;
pub mod trades;

use std::future::Future;

use async_channel::Sender;

use crate::app::events::AppEvent;

/// Run `task` on the Tokio runtime and deliver the event it produces.
pub(crate) fn spawn_event<F>(event_tx: Sender<AppEvent>, task: F)
where
    F: Future<Output = AppEvent> + Send + 'static,
{
    tokio::spawn(async move {
        let event = task.await;
        let name = event.name();
        if event_tx.send(event).await.is_err() {
            tracing::debug!(event = name, "Event channel closed, dropping task result");
        }
    });
}
