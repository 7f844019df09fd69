//! Inline button payloads.
//!
//! Payloads are short `prefix:value` strings, well under Telegram's 64 byte
//! limit. Parsing only checks shape; whether a value is currently valid is
//! decided by the conversation.

use chrono::{NaiveDate, NaiveTime};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::booking::{Contact, Event};
use crate::utils::datetime::{format_date, format_time, parse_date, parse_time};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed callback data '{0}'")]
pub struct MalformedCallback(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Language(String),
    Service(String),
    Book(String),
    Duration(u32),
    Date(NaiveDate),
    Slot(NaiveDate, NaiveTime),
    CartAdd,
    CartView,
    CartDelete(usize),
    CartCheckout,
    SubmitNow,
    UseContact(String),
    EnterContactManual,
    Back,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Language(code) => write!(f, "lang:{code}"),
            Action::Service(key) => write!(f, "svc:{key}"),
            Action::Book(key) => write!(f, "book:{key}"),
            Action::Duration(minutes) => write!(f, "dur:{minutes}"),
            Action::Date(date) => write!(f, "cal:{}", format_date(*date)),
            Action::Slot(date, time) => write!(f, "dt:{}|{}", format_date(*date), format_time(*time)),
            Action::CartAdd => f.write_str("cart:add"),
            Action::CartView => f.write_str("cart:view"),
            Action::CartDelete(index) => write!(f, "cart:del:{index}"),
            Action::CartCheckout => f.write_str("cart:checkout"),
            Action::SubmitNow => f.write_str("submit:now"),
            Action::UseContact(contact) => write!(f, "use_contact:{contact}"),
            Action::EnterContactManual => f.write_str("enter_contact_manual"),
            Action::Back => f.write_str("nav:back"),
        }
    }
}

impl FromStr for Action {
    type Err = MalformedCallback;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let malformed = || MalformedCallback(data.to_string());

        match data {
            "cart:add" => return Ok(Action::CartAdd),
            "cart:view" => return Ok(Action::CartView),
            "cart:checkout" => return Ok(Action::CartCheckout),
            "submit:now" => return Ok(Action::SubmitNow),
            "enter_contact_manual" => return Ok(Action::EnterContactManual),
            "nav:back" => return Ok(Action::Back),
            _ => {}
        }

        let (prefix, value) = data.split_once(':').ok_or_else(malformed)?;
        match prefix {
            "lang" => Ok(Action::Language(value.to_string())),
            "svc" => Ok(Action::Service(value.to_string())),
            "book" => Ok(Action::Book(value.to_string())),
            "dur" => value.parse().map(Action::Duration).map_err(|_| malformed()),
            "cal" => parse_date(value).map(Action::Date).ok_or_else(malformed),
            "dt" => {
                let (date, time) = value.split_once('|').ok_or_else(malformed)?;
                let date = parse_date(date).ok_or_else(malformed)?;
                let time = parse_time(time).ok_or_else(malformed)?;
                Ok(Action::Slot(date, time))
            }
            "cart" => value
                .strip_prefix("del:")
                .and_then(|index| index.parse().ok())
                .map(Action::CartDelete)
                .ok_or_else(malformed),
            "use_contact" => Ok(Action::UseContact(value.to_string())),
            _ => Err(malformed()),
        }
    }
}

impl From<Action> for Event {
    fn from(action: Action) -> Self {
        match action {
            Action::Language(code) => Event::SelectLanguage(code),
            Action::Service(key) => Event::SelectService(key),
            Action::Book(key) => Event::BookService(key),
            Action::Duration(minutes) => Event::SelectDuration(minutes),
            Action::Date(date) => Event::PickDate(date),
            Action::Slot(date, time) => Event::PickSlot(date, time),
            Action::CartAdd => Event::AddToCart,
            Action::CartView => Event::ViewCart,
            Action::CartDelete(index) => Event::RemoveCartItem(index),
            Action::CartCheckout => Event::Checkout,
            Action::SubmitNow => Event::SubmitNow,
            Action::UseContact(contact) => Event::ProvideContact(Contact::Username(contact)),
            Action::EnterContactManual => Event::EnterContactManually,
            Action::Back => Event::BackToServices,
        }
    }
}
