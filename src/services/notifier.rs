//! Delivery of finalized booking requests to the administrators.

use async_trait::async_trait;
use teloxide::prelude::*;
use thiserror::Error;

/// Failure to reach one administrator.
#[derive(Debug, Error)]
#[error("could not notify admin {admin_id}: {reason}")]
pub struct DeliveryError {
    pub admin_id: i64,
    pub reason: String,
}

/// Sends a text to a single administrator.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, admin_id: i64, text: &str) -> Result<(), DeliveryError>;
}

/// Notifier backed by the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, admin_id: i64, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(ChatId(admin_id), text)
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError {
                admin_id,
                reason: e.to_string(),
            })
    }
}

/// Per-administrator outcome of one fan-out.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    pub outcomes: Vec<(i64, Result<(), DeliveryError>)>,
}

impl DeliveryReport {
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|(_, r)| r.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DeliveryError> {
        self.outcomes.iter().filter_map(|(_, r)| r.as_ref().err())
    }
}

/// Attempts delivery to every administrator in order. A failure for one
/// never stops the others; there is no retry.
pub async fn notify_admins(notifier: &dyn Notifier, admins: &[i64], text: &str) -> DeliveryReport {
    let mut report = DeliveryReport::default();
    for &admin_id in admins {
        let outcome = notifier.notify(admin_id, text).await;
        report.outcomes.push((admin_id, outcome));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FlakyNotifier {
        broken: i64,
        sent: Mutex<Vec<i64>>,
    }

    #[async_trait]
    impl Notifier for FlakyNotifier {
        async fn notify(&self, admin_id: i64, _text: &str) -> Result<(), DeliveryError> {
            if admin_id == self.broken {
                return Err(DeliveryError { admin_id, reason: "chat not found".into() });
            }
            self.sent.lock().unwrap().push(admin_id);
            Ok(())
        }
    }

    #[test]
    fn test_one_failure_does_not_stop_the_rest() {
        let notifier = FlakyNotifier { broken: 2, sent: Mutex::new(Vec::new()) };
        let report = tokio_test::block_on(notify_admins(&notifier, &[1, 2, 3], "hi"));

        assert_eq!(report.delivered(), 2);
        assert_eq!(report.failures().count(), 1);
        assert_eq!(*notifier.sent.lock().unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_no_admins_is_a_noop() {
        let notifier = FlakyNotifier { broken: 0, sent: Mutex::new(Vec::new()) };
        let report = tokio_test::block_on(notify_admins(&notifier, &[], "hi"));
        assert_eq!(report.delivered(), 0);
        assert!(report.outcomes.is_empty());
    }
}
