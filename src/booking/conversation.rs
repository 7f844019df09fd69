//! Per-user booking dialogue.
//!
//! A [`Conversation`] is owned by exactly one chat. Every inbound event goes
//! through [`Conversation::apply`], which either moves the dialogue forward and
//! reports what happened as a [`Transition`], or rejects the event with a
//! [`BookingError`] and leaves the conversation untouched. The only exception
//! is contact entry: it always ends the conversation, successfully or not.

use chrono::{NaiveDate, NaiveTime};
use std::fmt;

use crate::booking::cart::{Cart, CartItem};
use crate::booking::catalog::{Catalog, DEFAULT_DURATION_MIN};
use crate::booking::error::{BookingError, Prerequisite};
use crate::booking::pricing::price;
use crate::i18n::Language;
use crate::utils::validation::{sanitize_contact_input, validate_booking_date, validate_slot};

/// First bookable hour.
pub const SLOT_START: u32 = 10;
/// Last bookable hour, inclusive.
pub const SLOT_END: u32 = 19;
/// Number of days offered by the calendar, starting today.
pub const BOOKING_WINDOW_DAYS: u32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    ChoosingLanguage,
    ChoosingService,
    ChoosingDuration,
    ChoosingDateTime,
    Summary,
    EnteringContact,
    ViewingCart,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ChoosingLanguage => "choosing language",
            Stage::ChoosingService => "choosing service",
            Stage::ChoosingDuration => "choosing duration",
            Stage::ChoosingDateTime => "choosing date and time",
            Stage::Summary => "reviewing summary",
            Stage::EnteringContact => "entering contact",
            Stage::ViewingCart => "viewing cart",
        };
        f.write_str(name)
    }
}

/// Bookable hours and the calendar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRules {
    pub slot_start: u32,
    pub slot_end: u32,
    pub window_days: u32,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            slot_start: SLOT_START,
            slot_end: SLOT_END,
            window_days: BOOKING_WINDOW_DAYS,
        }
    }
}

/// Everything an event needs besides the conversation itself.
#[derive(Debug, Clone, Copy)]
pub struct EventContext<'a> {
    pub catalog: &'a Catalog,
    pub rules: &'a BookingRules,
    pub today: NaiveDate,
    /// Telegram username of the sender, without the leading `@`.
    pub username: Option<&'a str>,
}

/// Booking fields collected so far. The price is never stored here; it is
/// derived from service and duration whenever it is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub service: Option<String>,
    pub duration_min: u32,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub language: Option<Language>,
    pub username: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            service: None,
            duration_min: DEFAULT_DURATION_MIN,
            date: None,
            time: None,
            language: None,
            username: String::new(),
        }
    }
}

impl Draft {
    fn has_date_time(&self) -> bool {
        self.date.is_some() && self.time.is_some()
    }
}

/// How the user answered the contact prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contact {
    /// The pre-filled `@username` button.
    Username(String),
    /// A typed message, sanitized before use.
    FreeText(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SelectLanguage(String),
    SelectService(String),
    BookService(String),
    SelectDuration(u32),
    PickDate(NaiveDate),
    PickSlot(NaiveDate, NaiveTime),
    AddToCart,
    ViewCart,
    RemoveCartItem(usize),
    Checkout,
    SubmitNow,
    EnterContactManually,
    ProvideContact(Contact),
    BackToServices,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::SelectLanguage(_) => "select_language",
            Event::SelectService(_) => "select_service",
            Event::BookService(_) => "book_service",
            Event::SelectDuration(_) => "select_duration",
            Event::PickDate(_) => "pick_date",
            Event::PickSlot(..) => "pick_slot",
            Event::AddToCart => "add_to_cart",
            Event::ViewCart => "view_cart",
            Event::RemoveCartItem(_) => "remove_cart_item",
            Event::Checkout => "checkout",
            Event::SubmitNow => "submit_now",
            Event::EnterContactManually => "enter_contact_manually",
            Event::ProvideContact(_) => "provide_contact",
            Event::BackToServices => "back_to_services",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Single,
    Cart,
}

/// A finalized request, ready to be forwarded to the administrators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub kind: RequestKind,
    pub items: Vec<CartItem>,
    pub contact: String,
}

/// What an accepted event did, for the presentation layer to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    LanguageChosen,
    ServiceShown { key: String },
    ServiceBooked,
    DurationChanged { next: Stage },
    DatePicked { date: NaiveDate },
    SlotPicked { date: NaiveDate, time: NaiveTime },
    AddedToCart,
    CartShown,
    ContactRequested,
    ContactPromptRepeated,
    ServicesListed,
    Completed(BookingRequest),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    stage: Stage,
    draft: Draft,
    cart: Cart,
    closed: bool,
}

impl Conversation {
    /// A fresh conversation waiting for the language choice.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Language to talk in; Russian until the user picks one.
    pub fn language(&self) -> Language {
        self.draft.language.unwrap_or_default()
    }

    pub fn has_language(&self) -> bool {
        self.draft.language.is_some()
    }

    /// Set once the dialogue has reached its end; the owner must drop it.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn apply(&mut self, event: Event, ctx: &EventContext<'_>) -> Result<Transition, BookingError> {
        let action = event.name();
        match event {
            Event::SelectLanguage(code) => {
                self.expect(&[Stage::ChoosingLanguage], action)?;
                self.draft.language = Some(Language::from_code_or_default(&code));
                self.cart.clear();
                self.stage = Stage::ChoosingService;
                Ok(Transition::LanguageChosen)
            }
            Event::SelectService(key) => {
                self.expect(&[Stage::ChoosingService], action)?;
                ctx.catalog.service(&key)?;
                self.draft.service = Some(key.clone());
                self.draft.duration_min = DEFAULT_DURATION_MIN;
                self.draft.username = ctx.username.unwrap_or_default().to_string();
                Ok(Transition::ServiceShown { key })
            }
            Event::BookService(key) => {
                self.expect(&[Stage::ChoosingService], action)?;
                ctx.catalog.service(&key)?;
                self.draft.service = Some(key);
                self.stage = Stage::ChoosingDuration;
                Ok(Transition::ServiceBooked)
            }
            Event::SelectDuration(minutes) => {
                self.expect(
                    &[Stage::ChoosingDuration, Stage::ChoosingDateTime, Stage::Summary],
                    action,
                )?;
                if self.draft.service.is_none() {
                    return Err(BookingError::MissingPrerequisite(Prerequisite::Service));
                }
                ctx.catalog.duration(minutes)?;
                self.draft.duration_min = minutes;
                self.stage = if self.draft.has_date_time() {
                    Stage::Summary
                } else {
                    Stage::ChoosingDateTime
                };
                Ok(Transition::DurationChanged { next: self.stage })
            }
            Event::PickDate(date) => {
                self.expect(&[Stage::ChoosingDuration, Stage::ChoosingDateTime], action)?;
                validate_booking_date(date, ctx.today, ctx.rules.window_days)?;
                self.draft.date = Some(date);
                self.draft.time = None;
                self.stage = Stage::ChoosingDateTime;
                Ok(Transition::DatePicked { date })
            }
            Event::PickSlot(date, time) => {
                self.expect(&[Stage::ChoosingDateTime], action)?;
                validate_booking_date(date, ctx.today, ctx.rules.window_days)?;
                validate_slot(time, ctx.rules.slot_start, ctx.rules.slot_end)?;
                self.draft.date = Some(date);
                self.draft.time = Some(time);
                self.stage = Stage::Summary;
                Ok(Transition::SlotPicked { date, time })
            }
            Event::AddToCart => {
                self.expect(
                    &[Stage::Summary, Stage::ChoosingService, Stage::ChoosingDuration],
                    action,
                )?;
                let item = self.snapshot(ctx.catalog)?;
                self.cart.add(item);
                Ok(Transition::AddedToCart)
            }
            Event::ViewCart => {
                if !self.has_language() {
                    return Err(BookingError::UnexpectedAction { action, stage: self.stage });
                }
                self.stage = Stage::ViewingCart;
                Ok(Transition::CartShown)
            }
            Event::RemoveCartItem(index) => {
                self.expect(&[Stage::ViewingCart], action)?;
                let len = self.cart.len();
                self.cart
                    .remove_at(index)
                    .ok_or(BookingError::InvalidCartIndex { index, len })?;
                Ok(Transition::CartShown)
            }
            Event::Checkout => {
                self.expect(&[Stage::ViewingCart], action)?;
                if self.cart.is_empty() {
                    return Err(BookingError::MissingPrerequisite(Prerequisite::CartItems));
                }
                self.request_contact(ctx);
                Ok(Transition::ContactRequested)
            }
            Event::SubmitNow => {
                self.expect(&[Stage::Summary], action)?;
                if !self.draft.has_date_time() {
                    return Err(BookingError::MissingPrerequisite(Prerequisite::DateTime));
                }
                self.request_contact(ctx);
                Ok(Transition::ContactRequested)
            }
            Event::EnterContactManually => {
                self.expect(&[Stage::EnteringContact], action)?;
                Ok(Transition::ContactPromptRepeated)
            }
            Event::ProvideContact(contact) => {
                self.expect(&[Stage::EnteringContact], action)?;
                let result = self.commit(contact, ctx.catalog);
                self.close();
                result.map(Transition::Completed)
            }
            Event::BackToServices => {
                if !self.has_language() {
                    return Err(BookingError::UnexpectedAction { action, stage: self.stage });
                }
                self.stage = Stage::ChoosingService;
                Ok(Transition::ServicesListed)
            }
        }
    }

    fn expect(&self, allowed: &[Stage], action: &'static str) -> Result<(), BookingError> {
        if allowed.contains(&self.stage) {
            Ok(())
        } else {
            Err(BookingError::UnexpectedAction { action, stage: self.stage })
        }
    }

    fn request_contact(&mut self, ctx: &EventContext<'_>) {
        self.draft.username = ctx.username.unwrap_or_default().to_string();
        self.stage = Stage::EnteringContact;
    }

    /// Freezes the draft into a cart line.
    fn snapshot(&self, catalog: &Catalog) -> Result<CartItem, BookingError> {
        let (Some(date), Some(time)) = (self.draft.date, self.draft.time) else {
            return Err(BookingError::MissingPrerequisite(Prerequisite::DateTime));
        };
        let service = self
            .draft
            .service
            .clone()
            .ok_or(BookingError::MissingPrerequisite(Prerequisite::Service))?;
        let price = price(catalog, &service, self.draft.duration_min)?;
        Ok(CartItem {
            service,
            duration_min: self.draft.duration_min,
            date,
            time,
            price,
        })
    }

    fn commit(&mut self, contact: Contact, catalog: &Catalog) -> Result<BookingRequest, BookingError> {
        let contact = match contact {
            Contact::Username(value) => value.trim().to_string(),
            Contact::FreeText(raw) => {
                let sanitized = sanitize_contact_input(&raw);
                if sanitized.is_empty() {
                    self.draft.username.clone()
                } else {
                    sanitized
                }
            }
        };

        if !self.cart.is_empty() {
            return Ok(BookingRequest {
                kind: RequestKind::Cart,
                items: self.cart.take(),
                contact,
            });
        }

        let item = self.snapshot(catalog)?;
        Ok(BookingRequest {
            kind: RequestKind::Single,
            items: vec![item],
            contact,
        })
    }

    fn close(&mut self) {
        *self = Conversation {
            closed: true,
            ..Conversation::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn ten() -> NaiveTime {
        NaiveTime::from_hms_opt(10, 0, 0).unwrap()
    }

    fn run(conversation: &mut Conversation, event: Event) -> Result<Transition, BookingError> {
        let catalog = Catalog::standard();
        let rules = BookingRules::default();
        let ctx = EventContext {
            catalog: &catalog,
            rules: &rules,
            today: today(),
            username: Some("alice"),
        };
        conversation.apply(event, &ctx)
    }

    fn at_summary(service: &str) -> Conversation {
        let mut c = Conversation::new();
        run(&mut c, Event::SelectLanguage("en".into())).unwrap();
        run(&mut c, Event::BookService(service.into())).unwrap();
        run(&mut c, Event::PickDate(today())).unwrap();
        run(&mut c, Event::PickSlot(today(), ten())).unwrap();
        c
    }

    #[test]
    fn test_invalid_language_defaults_to_russian() {
        let mut c = Conversation::new();
        assert_eq!(run(&mut c, Event::SelectLanguage("xx".into())), Ok(Transition::LanguageChosen));
        assert_eq!(c.language(), Language::Ru);
        assert!(c.has_language());
        assert_eq!(c.stage(), Stage::ChoosingService);
    }

    #[test]
    fn test_select_service_resets_duration() {
        let mut c = Conversation::new();
        run(&mut c, Event::SelectLanguage("ru".into())).unwrap();
        c.draft.duration_min = 90;
        run(&mut c, Event::SelectService("relax".into())).unwrap();
        assert_eq!(c.draft().service.as_deref(), Some("relax"));
        assert_eq!(c.draft().duration_min, 60);
        assert_eq!(c.draft().username, "alice");
        assert_eq!(c.stage(), Stage::ChoosingService);
    }

    #[test]
    fn test_unknown_service_leaves_state_unchanged() {
        let mut c = Conversation::new();
        run(&mut c, Event::SelectLanguage("ru".into())).unwrap();
        let before = c.clone();
        assert_eq!(
            run(&mut c, Event::BookService("sauna".into())),
            Err(BookingError::InvalidServiceKey("sauna".into()))
        );
        assert_eq!(c, before);
    }

    #[test]
    fn test_duration_advances_to_calendar_without_date() {
        let mut c = Conversation::new();
        run(&mut c, Event::SelectLanguage("en".into())).unwrap();
        run(&mut c, Event::BookService("classic".into())).unwrap();
        assert_eq!(
            run(&mut c, Event::SelectDuration(45)),
            Ok(Transition::DurationChanged { next: Stage::ChoosingDateTime })
        );
    }

    #[test]
    fn test_duration_after_rebooking_keeps_date_but_asks_for_time() {
        let mut c = Conversation::new();
        run(&mut c, Event::SelectLanguage("en".into())).unwrap();
        run(&mut c, Event::BookService("classic".into())).unwrap();
        run(&mut c, Event::PickDate(today())).unwrap();
        run(&mut c, Event::BackToServices).unwrap();
        run(&mut c, Event::BookService("relax".into())).unwrap();

        assert_eq!(
            run(&mut c, Event::SelectDuration(45)),
            Ok(Transition::DurationChanged { next: Stage::ChoosingDateTime })
        );
        assert_eq!(c.stage(), Stage::ChoosingDateTime);
        assert_eq!(c.draft().date, Some(today()));
        assert_eq!(c.draft().time, None);
    }

    #[test]
    fn test_picking_a_new_date_clears_the_time() {
        let mut c = at_summary("classic");
        run(&mut c, Event::BackToServices).unwrap();
        run(&mut c, Event::BookService("relax".into())).unwrap();
        assert_eq!(c.draft().time, Some(ten()));

        let tomorrow = today().succ_opt().unwrap();
        run(&mut c, Event::PickDate(tomorrow)).unwrap();

        assert_eq!(c.draft().date, Some(tomorrow));
        assert_eq!(c.draft().time, None);
        assert_eq!(c.stage(), Stage::ChoosingDateTime);
        assert!(run(&mut c, Event::SubmitNow).is_err());
    }

    #[test]
    fn test_duration_returns_to_summary_when_slot_known() {
        let mut c = at_summary("classic");
        assert_eq!(
            run(&mut c, Event::SelectDuration(90)),
            Ok(Transition::DurationChanged { next: Stage::Summary })
        );
        assert_eq!(c.draft().duration_min, 90);
    }

    #[test]
    fn test_repeated_duration_is_idempotent() {
        let mut c = at_summary("classic");
        run(&mut c, Event::SelectDuration(45)).unwrap();
        let draft = c.draft().clone();
        run(&mut c, Event::SelectDuration(45)).unwrap();
        assert_eq!(c.draft(), &draft);
        assert!(c.cart().is_empty());
    }

    #[test]
    fn test_unknown_duration_is_rejected() {
        let mut c = at_summary("classic");
        let before = c.clone();
        assert_eq!(run(&mut c, Event::SelectDuration(120)), Err(BookingError::InvalidDuration(120)));
        assert_eq!(c, before);
    }

    #[test]
    fn test_date_window_boundaries() {
        let mut c = Conversation::new();
        run(&mut c, Event::SelectLanguage("en".into())).unwrap();
        run(&mut c, Event::BookService("classic".into())).unwrap();

        let last = today() + chrono::Duration::days(13);
        let beyond = today() + chrono::Duration::days(14);
        assert_eq!(run(&mut c, Event::PickDate(beyond)), Err(BookingError::InvalidDate(beyond)));
        assert_eq!(run(&mut c, Event::PickDate(last)), Ok(Transition::DatePicked { date: last }));
        assert_eq!(c.stage(), Stage::ChoosingDateTime);
    }

    #[test]
    fn test_slot_hour_boundaries() {
        let mut c = Conversation::new();
        run(&mut c, Event::SelectLanguage("en".into())).unwrap();
        run(&mut c, Event::BookService("classic".into())).unwrap();
        run(&mut c, Event::PickDate(today())).unwrap();

        let late = NaiveTime::from_hms_opt(SLOT_END + 1, 0, 0).unwrap();
        assert_eq!(run(&mut c, Event::PickSlot(today(), late)), Err(BookingError::InvalidSlot(late)));

        let last = NaiveTime::from_hms_opt(SLOT_END, 0, 0).unwrap();
        assert!(run(&mut c, Event::PickSlot(today(), last)).is_ok());
        assert_eq!(c.stage(), Stage::Summary);
    }

    #[test]
    fn test_add_to_cart_requires_date_and_time() {
        let mut c = Conversation::new();
        run(&mut c, Event::SelectLanguage("en".into())).unwrap();
        run(&mut c, Event::SelectService("classic".into())).unwrap();
        let before = c.clone();
        assert_eq!(
            run(&mut c, Event::AddToCart),
            Err(BookingError::MissingPrerequisite(Prerequisite::DateTime))
        );
        assert_eq!(c, before);
    }

    #[test]
    fn test_cart_item_is_a_snapshot() {
        let mut c = at_summary("deep_trigger");
        run(&mut c, Event::SelectDuration(90)).unwrap();
        run(&mut c, Event::AddToCart).unwrap();
        run(&mut c, Event::SelectDuration(30)).unwrap();

        let item = &c.cart().items()[0];
        assert_eq!(item.duration_min, 90);
        assert_eq!(item.price, 105);
    }

    #[test]
    fn test_wrong_stage_is_rejected() {
        let mut c = Conversation::new();
        assert_eq!(
            run(&mut c, Event::Checkout),
            Err(BookingError::UnexpectedAction { action: "checkout", stage: Stage::ChoosingLanguage })
        );
        assert!(run(&mut c, Event::BackToServices).is_err());
    }

    #[test]
    fn test_cart_is_not_reachable_before_language() {
        let mut c = Conversation::new();
        assert_eq!(
            run(&mut c, Event::ViewCart),
            Err(BookingError::UnexpectedAction { action: "view_cart", stage: Stage::ChoosingLanguage })
        );
        assert_eq!(c, Conversation::new());
    }

    #[test]
    fn test_checkout_requires_items() {
        let mut c = at_summary("classic");
        run(&mut c, Event::ViewCart).unwrap();
        assert_eq!(
            run(&mut c, Event::Checkout),
            Err(BookingError::MissingPrerequisite(Prerequisite::CartItems))
        );
        assert_eq!(c.stage(), Stage::ViewingCart);
    }

    #[test]
    fn test_remove_out_of_range_cart_index() {
        let mut c = at_summary("classic");
        run(&mut c, Event::AddToCart).unwrap();
        run(&mut c, Event::ViewCart).unwrap();
        assert_eq!(
            run(&mut c, Event::RemoveCartItem(3)),
            Err(BookingError::InvalidCartIndex { index: 3, len: 1 })
        );
        assert_eq!(c.cart().len(), 1);
        assert_eq!(run(&mut c, Event::RemoveCartItem(0)), Ok(Transition::CartShown));
        assert!(c.cart().is_empty());
    }

    #[test]
    fn test_empty_free_text_falls_back_to_username() {
        let mut c = at_summary("classic");
        run(&mut c, Event::SubmitNow).unwrap();
        let outcome = run(&mut c, Event::ProvideContact(Contact::FreeText("  !!! ".into()))).unwrap();
        match outcome {
            Transition::Completed(request) => assert_eq!(request.contact, "alice"),
            other => panic!("unexpected transition {other:?}"),
        }
        assert!(c.is_closed());
    }

    #[test]
    fn test_contact_with_nothing_to_commit_resets() {
        let mut c = at_summary("classic");
        run(&mut c, Event::SubmitNow).unwrap();
        c.draft.time = None;
        assert_eq!(
            run(&mut c, Event::ProvideContact(Contact::Username("@alice".into()))),
            Err(BookingError::MissingPrerequisite(Prerequisite::DateTime))
        );
        assert!(c.is_closed());
        assert!(c.cart().is_empty());
        assert_eq!(c.stage(), Stage::ChoosingLanguage);
    }
}
