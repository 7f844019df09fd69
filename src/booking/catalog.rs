//! Static definitions of the offered services and session durations.

use crate::booking::error::BookingError;
use crate::i18n::{Language, Localized};

/// Duration a freshly selected service starts with.
pub const DEFAULT_DURATION_MIN: u32 = 60;

/// A massage offered by the studio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub key: &'static str,
    pub title: Localized,
    pub description: Localized,
    /// Price of a 60 minute session, in whole euros.
    pub base_price: u32,
    /// File name of the optional service picture inside the images directory.
    pub image: &'static str,
}

/// One of the selectable session lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationOption {
    pub minutes: u32,
    pub label: Localized,
}

const SERVICES: [Service; 3] = [
    Service {
        key: "classic",
        title: Localized::new("Классический массаж", "Classic massage"),
        description: Localized::new(
            "Классическая техника массажа всего тела — расслабление мышц, проработка зажимов, улучшение кровообращения.",
            "Basic full-body technique — relaxation, improves circulation.",
        ),
        base_price: 60,
        image: "service1.jpg",
    },
    Service {
        key: "relax",
        title: Localized::new("Расслабляющий массаж", "Relaxing massage"),
        description: Localized::new(
            "Медленные техники, фокус на релаксации и снижении стресса.",
            "Slow techniques, focus on relaxation and stress relief.",
        ),
        base_price: 55,
        image: "service2.jpg",
    },
    Service {
        key: "deep_trigger",
        title: Localized::new("Глубокий массаж", "Deep tissue massage"),
        description: Localized::new(
            "Глубокая проработка мышц и триггерных точек.",
            "Deep work with muscle knots and trigger points.",
        ),
        base_price: 70,
        image: "service3.jpg",
    },
];

const DURATIONS: [DurationOption; 4] = [
    DurationOption { minutes: 30, label: Localized::new("30 мин", "30 min") },
    DurationOption { minutes: 45, label: Localized::new("45 мин", "45 min") },
    DurationOption { minutes: 60, label: Localized::new("1 час", "1 hour") },
    DurationOption { minutes: 90, label: Localized::new("1 ч 30 мин", "1.5 hours") },
];

/// Read-only lookup over services and durations, shared by all conversations.
#[derive(Debug, Clone)]
pub struct Catalog {
    services: Vec<Service>,
    durations: Vec<DurationOption>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// The studio's fixed offer.
    pub fn standard() -> Self {
        Self {
            services: SERVICES.to_vec(),
            durations: DURATIONS.to_vec(),
        }
    }

    /// Services in display order.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn durations(&self) -> &[DurationOption] {
        &self.durations
    }

    pub fn contains(&self, key: &str) -> bool {
        self.services.iter().any(|s| s.key == key)
    }

    pub fn service(&self, key: &str) -> Result<&Service, BookingError> {
        self.services
            .iter()
            .find(|s| s.key == key)
            .ok_or_else(|| BookingError::InvalidServiceKey(key.to_string()))
    }

    pub fn title(&self, key: &str, lang: Language) -> Result<&'static str, BookingError> {
        self.service(key).map(|s| s.title.get(lang))
    }

    pub fn duration(&self, minutes: u32) -> Result<&DurationOption, BookingError> {
        self.durations
            .iter()
            .find(|d| d.minutes == minutes)
            .ok_or(BookingError::InvalidDuration(minutes))
    }
}
