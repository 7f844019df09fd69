use tracing::{debug, error, info, warn};

/// Logs an inbound event with consistent format
pub fn log_event_start(event: &str, user: &str, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("EVENT_START: {} by {} in chat {} - {}", event, user, chat_id, d),
        None => info!("EVENT_START: {} by {} in chat {}", event, user, chat_id),
    }
}

/// Logs an accepted event with consistent format
pub fn log_event_success(event: &str, user: &str, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => debug!("EVENT_SUCCESS: {} by {} in chat {} - {}", event, user, chat_id, d),
        None => debug!("EVENT_SUCCESS: {} by {} in chat {}", event, user, chat_id),
    }
}

/// Logs a rejected event (stale button, missing step) with consistent format
pub fn log_event_rejected(event: &str, reason: &str, user: &str, chat_id: i64) {
    warn!(
        "EVENT_REJECTED: {} - {} - user {} in chat {}",
        event, reason, user, chat_id
    );
}

/// Logs a failed delivery to one administrator
pub fn log_delivery_error(admin_id: i64, reference: &str, error: &str) {
    error!(
        "DELIVERY_ERROR: request {} to admin {} failed: {}",
        reference, admin_id, error
    );
}

/// Logs a finalized booking request
pub fn log_booking_submitted(reference: &str, user: &str, items: usize, delivered: usize, failed: usize) {
    info!(
        "BOOKING: request {} by {} with {} item(s) - delivered to {} admin(s), {} failed",
        reference, user, items, delivered, failed
    );
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
