//! # Massage Booking Bot
//!
//! A Telegram bot that walks a client through booking a massage.
//!
//! ## Features
//! - Russian and English dialogue
//! - Service, duration, date and hourly slot selection with live pricing
//! - A cart for booking several sessions at once
//! - Finished requests forwarded to the studio administrators

/// Services, pricing, the cart and the per-user dialogue
pub mod booking;
/// Telegram commands, handlers and message rendering
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Localized message templates
pub mod i18n;
/// Application context, notification delivery and the health endpoint
pub mod services;
/// Utility functions for datetime, validation, and logging
pub mod utils;
