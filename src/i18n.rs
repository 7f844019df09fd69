//! Localized message templates.
//!
//! Every [`TextKey`] has a template in every [`Language`]; [`validate`] checks
//! this at startup so a missing translation fails fast instead of falling back.

use anyhow::{anyhow, Result};
use std::fmt;

/// Languages the bot can talk in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Ru,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Ru, Language::En];

    /// Parses a language code, defaulting to Russian for anything unknown.
    pub fn from_code_or_default(code: &str) -> Self {
        match code.trim() {
            "en" => Language::En,
            _ => Language::Ru,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A pair of strings, one per supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localized {
    pub ru: &'static str,
    pub en: &'static str,
}

impl Localized {
    pub const fn new(ru: &'static str, en: &'static str) -> Self {
        Self { ru, en }
    }

    pub fn get(&self, lang: Language) -> &'static str {
        match lang {
            Language::Ru => self.ru,
            Language::En => self.en,
        }
    }
}

/// Keys of every user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    GreetBoth,
    GreetCaption,
    ChooseService,
    DurationPrompt,
    CalendarPrompt,
    SlotsPrompt,
    SummaryTitle,
    NeedDateTime,
    BookNow,
    AddToCart,
    CancelBack,
    ChooseContact,
    UseUsername,
    EnterContact,
    BookingSaved,
    BookingConfirmed,
    Updated,
    NoBookings,
    Minutes,
    ByDefault,
    ViewCart,
    AddedToCart,
    Delete,
    InvalidChoice,
    TryLater,
    HistoryDisabled,
    Info,
    UnknownCommand,
}

impl TextKey {
    pub const ALL: [TextKey; 28] = [
        TextKey::GreetBoth,
        TextKey::GreetCaption,
        TextKey::ChooseService,
        TextKey::DurationPrompt,
        TextKey::CalendarPrompt,
        TextKey::SlotsPrompt,
        TextKey::SummaryTitle,
        TextKey::NeedDateTime,
        TextKey::BookNow,
        TextKey::AddToCart,
        TextKey::CancelBack,
        TextKey::ChooseContact,
        TextKey::UseUsername,
        TextKey::EnterContact,
        TextKey::BookingSaved,
        TextKey::BookingConfirmed,
        TextKey::Updated,
        TextKey::NoBookings,
        TextKey::Minutes,
        TextKey::ByDefault,
        TextKey::ViewCart,
        TextKey::AddedToCart,
        TextKey::Delete,
        TextKey::InvalidChoice,
        TextKey::TryLater,
        TextKey::HistoryDisabled,
        TextKey::Info,
        TextKey::UnknownCommand,
    ];

    fn localized(self) -> Localized {
        match self {
            TextKey::GreetBoth => Localized::new(
                "🌟 Привет! Я помогу подобрать и забронировать массаж. / Hello! I will help you to select and book a massage.\n\nРусский — нажмите 🇷🇺\nEnglish — нажмите 🇬🇧",
                "🌟 Hello! / Привет!\n\nEnglish — press 🇬🇧\nРусский — press 🇷🇺",
            ),
            TextKey::GreetCaption => Localized::new(
                "🌟 Тут по шагам ты сможешь выбрать массаж, время, дату и оформить бронь.\n\nВыберите подходящий вид массажа:",
                "🌟 Hi — I can help you pick and book a massage.\n\nChoose a massage type:",
            ),
            TextKey::ChooseService => Localized::new("Выберите вид массажа:", "Choose a massage type:"),
            TextKey::DurationPrompt => Localized::new("⏰ Подтверди длительность сеанса:", "⏰ Choose duration:"),
            TextKey::CalendarPrompt => Localized::new(
                "📅 Выберите дату (доступно 14 дней):",
                "📅 Choose date (14 days):",
            ),
            TextKey::SlotsPrompt => Localized::new("🕐 Какое желаемое время?:", "🕐 Choose time (slot):"),
            TextKey::SummaryTitle => Localized::new("📋 Ваш выбор:", "📋 Your selection:"),
            TextKey::NeedDateTime => Localized::new(
                "❗ Сначала выберите дату и время.",
                "❗ First choose date and time.",
            ),
            TextKey::BookNow => Localized::new("📩 Забронировать сейчас", "📩 Book now"),
            TextKey::AddToCart => Localized::new("➕ Добавить в корзину", "➕ Add to cart"),
            TextKey::CancelBack => Localized::new("◀️ Отменить / Назад в меню", "◀️ Cancel / Back to menu"),
            TextKey::ChooseContact => Localized::new(
                "📞 Укажите контакт для связи (можно использовать @username или номер +...):",
                "📞 Provide contact (or use @username or +phone):",
            ),
            TextKey::UseUsername => Localized::new(
                "Использовать Telegram @{username}",
                "Use Telegram @{username}",
            ),
            TextKey::EnterContact => Localized::new("Ввести контакт вручную", "Enter contact manually"),
            TextKey::BookingSaved => Localized::new(
                "✅ Спасибо! Заявка отправлена. Администратор проверит и свяжется по оставленному контакту.",
                "✅ Booking saved. Await confirmation.",
            ),
            TextKey::BookingConfirmed => Localized::new(
                "✅ Ваш массаж забронирован, с вами свяжется специалист.",
                "✅ Thank you, your massage is booked, the specialist will contact you.",
            ),
            TextKey::Updated => Localized::new("✅ Обновлено", "✅ Updated"),
            TextKey::NoBookings => Localized::new("📝 У вас пока нет заявок.", "📝 You have no bookings yet."),
            TextKey::Minutes => Localized::new("мин", "min"),
            TextKey::ByDefault => Localized::new("по умолчанию", "by default"),
            TextKey::ViewCart => Localized::new("🛒 Корзина", "🛒 View cart"),
            TextKey::AddedToCart => Localized::new("✅ Добавлено в корзину.", "✅ Added to cart."),
            TextKey::Delete => Localized::new("❌ Удалить", "❌ Remove"),
            TextKey::InvalidChoice => Localized::new(
                "⚠️ Этот вариант больше недоступен.",
                "⚠️ This option is no longer available.",
            ),
            TextKey::TryLater => Localized::new(
                "Ошибка при отправке. Попробуйте позже.",
                "Something went wrong. Please try again later.",
            ),
            TextKey::HistoryDisabled => Localized::new(
                "📝 Ведение истории заявок локально отключено. Все заявки отправлены администраторам.",
                "📝 Booking history is not kept here. All requests are forwarded to the administrators.",
            ),
            TextKey::Info => Localized::new(
                "Тут можно быстро выбрать нужный тип массажа, далее забронировать дату и время, оставив контакт для связи.\n\nСпециалист ответит по выбранному виду связи для подтверждения.\nЧтобы начать бронирование, нажмите /start.",
                "Here you can quickly pick a massage type, then book a date and time and leave a contact.\n\nThe specialist will reach out through that contact to confirm.\nPress /start to begin.",
            ),
            TextKey::UnknownCommand => Localized::new(
                "Неизвестная команда. Список команд: /help",
                "Unknown command. Use /help to see all commands.",
            ),
        }
    }
}

/// Returns the raw template for `key` in `lang`.
pub fn text(lang: Language, key: TextKey) -> &'static str {
    key.localized().get(lang)
}

/// Renders a template, substituting `{name}` placeholders.
pub fn render(lang: Language, key: TextKey, args: &[(&str, &str)]) -> String {
    args.iter().fold(text(lang, key).to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}

fn placeholders(template: &str) -> Vec<&str> {
    let mut found: Vec<&str> = template
        .split('{')
        .skip(1)
        .filter_map(|rest| rest.split_once('}').map(|(name, _)| name))
        .collect();
    found.sort_unstable();
    found.dedup();
    found
}

/// Checks that every key has a non-empty template in every language and that
/// all languages agree on the placeholders a template takes.
pub fn validate() -> Result<()> {
    for key in TextKey::ALL {
        let reference = placeholders(text(Language::Ru, key));
        for lang in Language::ALL {
            let template = text(lang, key);
            if template.trim().is_empty() {
                return Err(anyhow!("Missing '{lang}' translation for {key:?}"));
            }
            if placeholders(template) != reference {
                return Err(anyhow!(
                    "Placeholder mismatch in '{lang}' translation for {key:?}"
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_is_translated() {
        assert!(validate().is_ok());
    }

    #[test]
    fn test_language_parsing_defaults_to_russian() {
        assert_eq!(Language::from_code_or_default("en"), Language::En);
        assert_eq!(Language::from_code_or_default("ru"), Language::Ru);
        assert_eq!(Language::from_code_or_default("de"), Language::Ru);
        assert_eq!(Language::from_code_or_default(""), Language::Ru);
    }

    #[test]
    fn test_render_substitutes_placeholders() {
        let rendered = render(Language::En, TextKey::UseUsername, &[("username", "alice")]);
        assert_eq!(rendered, "Use Telegram @alice");
    }

    #[test]
    fn test_placeholders_are_collected() {
        assert_eq!(placeholders("a {x} b {y} c {x}"), vec!["x", "y"]);
        assert!(placeholders("no placeholders").is_empty());
    }
}
