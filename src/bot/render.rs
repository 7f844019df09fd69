//! Turns conversation state into localized prompts and menus.

use chrono::NaiveDate;

use crate::bot::assets::Assets;
use crate::bot::callback_data::Action;
use crate::bot::menu::{Menu, MenuButton, Prompt, Reply};
use crate::booking::catalog::DEFAULT_DURATION_MIN;
use crate::booking::{
    BookingError, BookingRequest, BookingRules, Cart, CartItem, Catalog, Conversation, Draft,
    Prerequisite, RequestKind, Stage, Transition,
};
use crate::booking::pricing::price;
use crate::i18n::{self, Language, TextKey};
use crate::utils::datetime::{booking_window, format_date, format_day_label, format_time, slot_times};

/// Buttons per row in the calendar and slot pickers.
const GRID_WIDTH: usize = 4;
const PLACEHOLDER: &str = "—";

pub struct Renderer<'a> {
    catalog: &'a Catalog,
    rules: &'a BookingRules,
    assets: &'a Assets,
    lang: Language,
}

impl<'a> Renderer<'a> {
    pub fn new(catalog: &'a Catalog, rules: &'a BookingRules, assets: &'a Assets, lang: Language) -> Self {
        Self { catalog, rules, assets, lang }
    }

    fn t(&self, key: TextKey) -> &'static str {
        i18n::text(self.lang, key)
    }

    /// Bilingual greeting with the language picker. Always starts in Russian.
    pub fn greeting(&self) -> Prompt {
        let menu = Menu::grid(
            vec![
                MenuButton::new("🇷🇺 Русский", Action::Language("ru".into())),
                MenuButton::new("🇬🇧 English", Action::Language("en".into())),
            ],
            2,
        );
        Prompt::text(i18n::text(Language::Ru, TextKey::GreetBoth))
            .with_menu(menu)
            .with_photo(self.assets.banner())
    }

    pub fn service_list(&self, caption: TextKey) -> Prompt {
        Prompt::text(self.t(caption)).with_menu(self.service_menu())
    }

    fn service_menu(&self) -> Menu {
        Menu::column(
            self.catalog
                .services()
                .iter()
                .map(|s| MenuButton::new(s.title.get(self.lang), Action::Service(s.key.to_string())))
                .collect(),
        )
    }

    pub fn service_card(&self, key: &str, cart_exists: bool) -> Result<Prompt, BookingError> {
        let service = self.catalog.service(key)?;
        let text = format!(
            "{}\n\n{}\n\n⏰ {} {} {}\n💰 €{}",
            service.title.get(self.lang),
            service.description.get(self.lang),
            DEFAULT_DURATION_MIN,
            self.t(TextKey::Minutes),
            self.t(TextKey::ByDefault),
            service.base_price,
        );

        let mut buttons = vec![MenuButton::new(
            format!("🎯 {}", self.t(TextKey::BookNow).to_uppercase()),
            Action::Book(key.to_string()),
        )];
        buttons.extend(
            self.catalog
                .services()
                .iter()
                .filter(|s| s.key != key)
                .map(|s| MenuButton::new(s.title.get(self.lang), Action::Service(s.key.to_string()))),
        );
        if cart_exists {
            buttons.push(MenuButton::new(self.t(TextKey::ViewCart), Action::CartView));
        }

        Ok(Prompt::text(text)
            .with_menu(Menu::column(buttons))
            .with_photo(self.assets.image(service.image)))
    }

    pub fn summary_text(&self, draft: &Draft) -> Result<String, BookingError> {
        let (title, amount) = match draft.service.as_deref() {
            Some(key) => (
                self.catalog.title(key, self.lang)?,
                price(self.catalog, key, draft.duration_min)?,
            ),
            None => (PLACEHOLDER, 0),
        };
        let date = draft.date.map_or_else(|| PLACEHOLDER.to_string(), format_date);
        let time = draft.time.map_or_else(|| PLACEHOLDER.to_string(), format_time);
        Ok(format!(
            "{}\n• {}\n• {} {}\n• €{}\n• {} {}",
            self.t(TextKey::SummaryTitle),
            title,
            draft.duration_min,
            self.t(TextKey::Minutes),
            amount,
            date,
            time,
        ))
    }

    /// Summary followed by the duration picker, current choice marked.
    pub fn duration_picker(&self, draft: &Draft) -> Result<Prompt, BookingError> {
        let key = draft
            .service
            .as_deref()
            .ok_or(BookingError::MissingPrerequisite(Prerequisite::Service))?;
        let mut buttons = Vec::with_capacity(self.catalog.durations().len());
        for option in self.catalog.durations() {
            let mark = if option.minutes == draft.duration_min { "• " } else { "" };
            let amount = price(self.catalog, key, option.minutes)?;
            buttons.push(MenuButton::new(
                format!("{mark}{} — €{amount}", option.label.get(self.lang)),
                Action::Duration(option.minutes),
            ));
        }
        let text = format!("{}\n\n{}", self.summary_text(draft)?, self.t(TextKey::DurationPrompt));
        Ok(Prompt::text(text).with_menu(Menu::column(buttons)))
    }

    pub fn calendar(&self, today: NaiveDate) -> Prompt {
        let buttons = booking_window(today, self.rules.window_days)
            .into_iter()
            .map(|day| MenuButton::new(format_day_label(day), Action::Date(day)))
            .collect();
        Prompt::text(self.t(TextKey::CalendarPrompt)).with_menu(Menu::grid(buttons, GRID_WIDTH))
    }

    pub fn slots(&self, date: NaiveDate) -> Prompt {
        let buttons = slot_times(self.rules.slot_start, self.rules.slot_end)
            .into_iter()
            .map(|time| MenuButton::new(format_time(time), Action::Slot(date, time)))
            .collect();
        Prompt::text(self.t(TextKey::SlotsPrompt)).with_menu(Menu::grid(buttons, GRID_WIDTH))
    }

    pub fn summary(&self, draft: &Draft, cart_exists: bool) -> Result<Prompt, BookingError> {
        let mut buttons = vec![
            MenuButton::new(self.t(TextKey::BookNow), Action::SubmitNow),
            MenuButton::new(self.t(TextKey::AddToCart), Action::CartAdd),
        ];
        if cart_exists {
            buttons.push(MenuButton::new(self.t(TextKey::ViewCart), Action::CartView));
        }
        Ok(Prompt::text(self.summary_text(draft)?).with_menu(Menu::column(buttons)))
    }

    pub fn added_to_cart(&self) -> Prompt {
        Prompt::text(self.t(TextKey::AddedToCart)).with_menu(Menu::column(vec![MenuButton::new(
            self.t(TextKey::ViewCart),
            Action::CartView,
        )]))
    }

    /// `N. title, D min, €P, date time`
    pub fn cart_line(&self, position: usize, item: &CartItem) -> Result<String, BookingError> {
        Ok(format!(
            "{}. {}, {} {}, €{}, {} {}",
            position,
            self.catalog.title(&item.service, self.lang)?,
            item.duration_min,
            self.t(TextKey::Minutes),
            item.price,
            format_date(item.date),
            format_time(item.time),
        ))
    }

    pub fn cart(&self, cart: &Cart) -> Result<Prompt, BookingError> {
        let back = MenuButton::new(self.t(TextKey::CancelBack), Action::Back);
        if cart.is_empty() {
            return Ok(Prompt::text(self.t(TextKey::NoBookings)).with_menu(Menu::column(vec![back])));
        }

        let mut lines = vec![self.t(TextKey::ViewCart).to_string(), String::new()];
        let mut buttons = Vec::with_capacity(cart.len() + 2);
        for (index, item) in cart.items().iter().enumerate() {
            lines.push(self.cart_line(index + 1, item)?);
            buttons.push(MenuButton::new(
                format!("{} {}", self.t(TextKey::Delete), index + 1),
                Action::CartDelete(index),
            ));
        }
        buttons.push(MenuButton::new(self.t(TextKey::BookNow), Action::CartCheckout));
        buttons.push(back);
        Ok(Prompt::text(lines.join("\n")).with_menu(Menu::column(buttons)))
    }

    pub fn contact_request(&self, username: &str) -> Prompt {
        let mut buttons = Vec::with_capacity(3);
        if !username.is_empty() {
            buttons.push(MenuButton::new(
                i18n::render(self.lang, TextKey::UseUsername, &[("username", username)]),
                Action::UseContact(format!("@{username}")),
            ));
        }
        buttons.push(MenuButton::new(self.t(TextKey::EnterContact), Action::EnterContactManual));
        buttons.push(MenuButton::new(self.t(TextKey::CancelBack), Action::Back));
        Prompt::text(self.t(TextKey::ChooseContact)).with_menu(Menu::column(buttons))
    }

    pub fn confirmation(&self) -> Vec<Prompt> {
        vec![
            Prompt::text(self.t(TextKey::BookingConfirmed))
                .with_menu(self.service_menu())
                .with_photo(self.assets.confirmation()),
            Prompt::text(self.t(TextKey::BookingSaved)),
        ]
    }

    /// Text forwarded to every administrator.
    pub fn admin_notification(
        &self,
        request: &BookingRequest,
        sender: &str,
        reference: &str,
    ) -> Result<String, BookingError> {
        match request.kind {
            RequestKind::Cart => {
                let mut lines = Vec::with_capacity(request.items.len());
                for (index, item) in request.items.iter().enumerate() {
                    lines.push(self.cart_line(index + 1, item)?);
                }
                Ok(format!(
                    "📋 New bookings from {sender}\nContact: {}\nRef: {reference}\n\n{}",
                    request.contact,
                    lines.join("\n"),
                ))
            }
            RequestKind::Single => {
                let item = request
                    .items
                    .first()
                    .ok_or(BookingError::MissingPrerequisite(Prerequisite::CartItems))?;
                Ok(format!(
                    "📋 New booking\n👤 {sender}\n💆 {}\n⏰ {} {}, €{}\n📅 {} {}\n📞 {}\n🔖 {reference}",
                    self.catalog.title(&item.service, self.lang)?,
                    item.duration_min,
                    self.t(TextKey::Minutes),
                    item.price,
                    format_date(item.date),
                    format_time(item.time),
                    request.contact,
                ))
            }
        }
    }

    /// Transient message for a rejected event.
    pub fn rejection(&self, error: &BookingError) -> Reply {
        let key = match error {
            BookingError::MissingPrerequisite(Prerequisite::CartItems) => TextKey::NoBookings,
            BookingError::MissingPrerequisite(Prerequisite::DateTime) => TextKey::NeedDateTime,
            _ => TextKey::InvalidChoice,
        };
        Reply::alert(self.t(key))
    }

    /// What to show after an accepted event.
    pub fn transition(
        &self,
        transition: &Transition,
        conversation: &Conversation,
        today: NaiveDate,
    ) -> Result<Reply, BookingError> {
        let draft = conversation.draft();
        let cart_exists = !conversation.cart().is_empty();

        let reply = match transition {
            Transition::LanguageChosen => Reply::prompt(
                self.service_list(TextKey::GreetCaption).with_photo(self.assets.banner()),
            ),
            Transition::ServiceShown { key } => Reply::prompt(self.service_card(key, cart_exists)?),
            Transition::ServiceBooked => {
                Reply::prompts(vec![self.duration_picker(draft)?, self.calendar(today)])
            }
            Transition::DurationChanged { next } => {
                let follow_up = match (next, draft.date) {
                    (Stage::Summary, _) => self.summary(draft, cart_exists)?,
                    (_, Some(date)) => self.slots(date),
                    (_, None) => self.calendar(today),
                };
                Reply::prompts(vec![
                    Prompt::text(self.t(TextKey::Updated)),
                    self.duration_picker(draft)?,
                    follow_up,
                ])
            }
            Transition::DatePicked { date } => {
                Reply::prompt(self.slots(*date)).with_notice(format!("📅 {}", format_date(*date)))
            }
            Transition::SlotPicked { date, time } => Reply::prompt(self.summary(draft, cart_exists)?)
                .with_notice(format!("🕐 {} {}", format_date(*date), format_time(*time))),
            Transition::AddedToCart => Reply::prompt(self.added_to_cart()),
            Transition::CartShown => Reply::prompt(self.cart(conversation.cart())?),
            Transition::ContactRequested => Reply::prompt(self.contact_request(&draft.username)),
            Transition::ContactPromptRepeated => Reply::prompt(Prompt::text(self.t(TextKey::ChooseContact))),
            Transition::ServicesListed => Reply::prompt(self.service_list(TextKey::ChooseService)),
            Transition::Completed(_) => Reply::prompts(self.confirmation()),
        };
        Ok(reply)
    }
}
