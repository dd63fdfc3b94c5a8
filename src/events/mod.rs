use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::grid::Location;

/// Domain events emitted after state changes commit. Delivery is
/// fire-and-forget: a full or closed channel is logged and ignored, so
/// event plumbing can never fail a completed mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    ProductCreated(Uuid),
    ProductUpdated(Uuid),
    ProductDeleted(Uuid),
    ProductMoved {
        product_id: Uuid,
        from: Location,
        to: Location,
    },
    CategoryCreated(Uuid),
    CategoryUpdated(Uuid),
    CategoryDeleted(Uuid),
    DemoReseeded {
        products: usize,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Best-effort send used by services after a mutation has committed.
    pub async fn emit(&self, event: Event) {
        if let Err(err) = self.send(event).await {
            warn!("dropping domain event: {}", err);
        }
    }
}

/// Background consumer for the event channel. Currently this only logs;
/// webhook or queue fan-out would subscribe here.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::ProductMoved {
                product_id,
                from,
                to,
            } => {
                info!(%product_id, %from, %to, "event: product moved");
            }
            other => {
                info!(event = ?other, "event");
            }
        }
    }
    info!("event channel closed; processor exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emit_swallows_send_failures() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let sender = EventSender::new(tx);
        assert!(sender.send(Event::ProductDeleted(Uuid::new_v4())).await.is_err());
        // Must not panic or propagate.
        sender.emit(Event::ProductDeleted(Uuid::new_v4())).await;
    }
}
