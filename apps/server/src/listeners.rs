//! Background subscribers that log cross-slice events.

use gems::features::assessment::events::AttemptSubmitted;
use gems::features::games::events::GameFinished;
use gems_event_bus::{Event, EventBus, EventBusError, EventReceiverExt};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Subscribes now and logs every event until the bus is dropped.
///
/// # Errors
/// Returns the bus error when either subscription fails.
pub fn spawn(events: &EventBus) -> Result<Vec<JoinHandle<()>>, EventBusError> {
    Ok(vec![
        listen::<AttemptSubmitted>(events, |event| {
            info!(
                attempt = %event.attempt_id,
                paper = %event.paper_id,
                status = ?event.status,
                score = event.total_score,
                possible = event.total_possible,
                percentage = event.percentage,
                "Attempt submitted"
            );
        })?,
        listen::<GameFinished>(events, |event| {
            info!(game = %event.game_id, kind = %event.kind, status = %event.status, score = event.score, "Game finished");
        })?,
    ])
}

fn listen<T: Event>(
    events: &EventBus,
    handle: impl Fn(Arc<T>) + Send + 'static,
) -> Result<JoinHandle<()>, EventBusError> {
    let mut receiver = events.subscribe::<T>()?;
    Ok(tokio::spawn(async move {
        while let Some(event) = receiver.next_event().await {
            handle(event);
        }
    }))
}
