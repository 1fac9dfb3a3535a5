//! User lifecycle event publishing.
//!
//! Handlers hand finished facts to a publisher after a successful mutation.
//! Delivery guarantees belong to the publisher implementation.

use async_trait::async_trait;
use tracing::{info, warn};

use domain::UserEvent;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserEventPublisher: Send + Sync {
    async fn publish(&self, event: UserEvent);
}

/// Emits each event as a structured log record.
#[derive(Debug, Default, Clone)]
pub struct TracingEventPublisher {
    exchange: String,
}

impl TracingEventPublisher {
    pub fn new(exchange: impl Into<String>) -> Self {
        Self {
            exchange: exchange.into(),
        }
    }
}

#[async_trait]
impl UserEventPublisher for TracingEventPublisher {
    async fn publish(&self, event: UserEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => info!(
                exchange = %self.exchange,
                user_id = %event.user_id,
                action = ?event.action_type,
                payload = %payload,
                "User event published"
            ),
            Err(err) => warn!(
                exchange = %self.exchange,
                user_id = %event.user_id,
                action = ?event.action_type,
                error = %err,
                "User event could not be serialized"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::{Account, ActionType};

    use super::*;

    #[tokio::test]
    async fn test_tracing_publisher_accepts_event() {
        let account = Account::new_student(
            "ada".to_string(),
            "ada@example.com".to_string(),
            "hash".to_string(),
            "Ada Lovelace".to_string(),
        );
        let publisher = TracingEventPublisher::new("ead.user.events");

        publisher
            .publish(UserEvent::from_account(&account, ActionType::Update))
            .await;
    }
}
