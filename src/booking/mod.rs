//! Booking domain: catalog, pricing, cart and the per-user dialogue.

pub mod cart;
pub mod catalog;
pub mod conversation;
pub mod error;
pub mod pricing;

pub use cart::{Cart, CartItem};
pub use catalog::{Catalog, DurationOption, Service};
pub use conversation::{
    BookingRequest, BookingRules, Contact, Conversation, Draft, Event, EventContext, RequestKind,
    Stage, Transition,
};
pub use error::{BookingError, Prerequisite};
