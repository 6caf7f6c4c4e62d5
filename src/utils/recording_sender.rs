//! Notification sender that keeps requests in memory instead of delivering them

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::notification::NotificationRequest;
use crate::traits::*;
use crate::types::*;

/// Captures every request it is asked to send
///
/// Can be told to fail, to exercise the path where delivery does not happen.
#[derive(Debug, Clone, Default)]
pub struct RecordingSender {
    sent: Arc<RwLock<Vec<NotificationRequest>>>,
    fail_with: Option<String>,
}

impl RecordingSender {
    /// A sender that records every request and always succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose every delivery fails with the given message
    pub fn failing(message: &str) -> Self {
        Self {
            sent: Arc::default(),
            fail_with: Some(message.to_string()),
        }
    }

    /// Requests delivered so far, oldest first
    pub fn sent(&self) -> ReconcileResult<Vec<NotificationRequest>> {
        self.sent
            .read()
            .map(|sent| sent.clone())
            .map_err(|_| ReconcileError::Storage("sender log lock poisoned".to_string()))
    }
}

#[async_trait]
impl NotificationSender for RecordingSender {
    async fn send(&self, request: &NotificationRequest) -> ReconcileResult<()> {
        if let Some(ref message) = self.fail_with {
            return Err(ReconcileError::Delivery(format!(
                "delivery to {} failed: {}",
                request.recipient_phone(),
                message
            )));
        }

        self.sent
            .write()
            .map_err(|_| ReconcileError::Storage("sender log lock poisoned".to_string()))?
            .push(request.clone());
        Ok(())
    }
}
