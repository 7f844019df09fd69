use chrono::{NaiveDate, NaiveTime};
use std::fmt;
use thiserror::Error;

use crate::booking::conversation::Stage;

/// What a booking step needed but did not find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prerequisite {
    Service,
    DateTime,
    CartItems,
}

impl fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prerequisite::Service => f.write_str("service not chosen"),
            Prerequisite::DateTime => f.write_str("date and time not chosen"),
            Prerequisite::CartItems => f.write_str("nothing to book"),
        }
    }
}

/// Rejections produced while handling a single conversation event.
///
/// None of these are fatal: the event handler turns them into a transient
/// message for the user and leaves the conversation where it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("unknown service key '{0}'")]
    InvalidServiceKey(String),

    #[error("duration of {0} minutes is not offered")]
    InvalidDuration(u32),

    #[error("cart index {index} is out of range (cart has {len} items)")]
    InvalidCartIndex { index: usize, len: usize },

    #[error("date {0} is outside the booking window")]
    InvalidDate(NaiveDate),

    #[error("slot {0} is outside working hours")]
    InvalidSlot(NaiveTime),

    #[error("missing prerequisite: {0}")]
    MissingPrerequisite(Prerequisite),

    #[error("'{action}' is not available while {stage}")]
    UnexpectedAction { action: &'static str, stage: Stage },
}
