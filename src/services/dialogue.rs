//! The booking application: routes inbound events through a user's
//! conversation, renders the outcome and forwards finished requests.

use chrono::NaiveDate;
use std::sync::Arc;
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage, InMemStorageError};
use uuid::Uuid;

use crate::booking::{
    BookingError, BookingRequest, BookingRules, Catalog, Contact, Conversation, Event, EventContext, Stage,
    Transition,
};
use crate::bot::assets::Assets;
use crate::bot::callback_data::MalformedCallback;
use crate::bot::menu::{Prompt, Reply};
use crate::bot::render::Renderer;
use crate::config::Config;
use crate::i18n::{self, Language, TextKey};
use crate::services::notifier::{notify_admins, Notifier};
use crate::utils::logging::{
    log_booking_submitted, log_delivery_error, log_event_rejected, log_event_start, log_event_success,
};

/// Live conversations keyed by chat. Memory only; a restart forgets them.
pub type ConversationStorage = InMemStorage<Conversation>;
pub type ConversationDialogue = Dialogue<Conversation, ConversationStorage>;
pub type DialogueResult<T> = Result<T, InMemStorageError>;

/// Reply texts that ask for the booking history.
const HISTORY_REQUESTS: [&str; 3] = ["Мои заявки", "My bookings", "/mybookings"];

/// Who sent an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub chat_id: i64,
    pub user_id: u64,
    /// Telegram username without the leading `@`.
    pub username: Option<String>,
}

impl Participant {
    /// `@username`, or the numeric id for users without one.
    pub fn handle(&self) -> String {
        match self.username.as_deref() {
            Some(name) if !name.is_empty() => format!("@{name}"),
            _ => format!("id {}", self.user_id),
        }
    }
}

pub struct BookingApp {
    catalog: Catalog,
    rules: BookingRules,
    assets: Assets,
    notifier: Arc<dyn Notifier>,
    admins: Vec<i64>,
}

impl BookingApp {
    pub fn new(notifier: Arc<dyn Notifier>, admins: Vec<i64>, rules: BookingRules, assets: Assets) -> Self {
        Self {
            catalog: Catalog::standard(),
            rules,
            assets,
            notifier,
            admins,
        }
    }

    pub fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> Self {
        let rules = BookingRules {
            slot_start: config.slot_start,
            slot_end: config.slot_end,
            ..BookingRules::default()
        };
        Self::new(
            notifier,
            config.admin_ids.clone(),
            rules,
            Assets::new(config.images_dir.clone()),
        )
    }

    pub fn admin_count(&self) -> usize {
        self.admins.len()
    }

    fn renderer(&self, lang: Language) -> Renderer<'_> {
        Renderer::new(&self.catalog, &self.rules, &self.assets, lang)
    }

    async fn language_of(dialogue: &ConversationDialogue) -> DialogueResult<Language> {
        Ok(dialogue.get().await?.map(|c| c.language()).unwrap_or_default())
    }

    /// Drops whatever the user was doing and shows the language picker.
    pub async fn start(&self, who: &Participant, dialogue: &ConversationDialogue) -> DialogueResult<Reply> {
        log_event_start("start", &who.handle(), who.chat_id, None);
        dialogue.update(Conversation::new()).await?;
        Ok(Reply::prompt(self.renderer(Language::Ru).greeting()))
    }

    /// Back to the service list, or a fresh start if no language is known yet.
    pub async fn menu(
        &self,
        who: &Participant,
        dialogue: &ConversationDialogue,
        today: NaiveDate,
    ) -> DialogueResult<Reply> {
        match dialogue.get().await? {
            Some(conversation) if conversation.has_language() => {
                self.handle_event(who, dialogue, Event::BackToServices, today).await
            }
            _ => self.start(who, dialogue).await,
        }
    }

    pub async fn info(&self, dialogue: &ConversationDialogue) -> DialogueResult<Reply> {
        let lang = Self::language_of(dialogue).await?;
        dialogue.reset().await?;
        Ok(Reply::prompt(Prompt::text(i18n::text(lang, TextKey::Info))))
    }

    /// Requests are not stored locally, so there is nothing to list.
    pub async fn history(&self, dialogue: &ConversationDialogue) -> DialogueResult<Reply> {
        let lang = Self::language_of(dialogue).await?;
        Ok(Reply::prompt(Prompt::text(i18n::text(lang, TextKey::HistoryDisabled))))
    }

    /// A button payload that does not parse, typically from a much older bot version.
    pub async fn reject_malformed(
        &self,
        who: &Participant,
        dialogue: &ConversationDialogue,
        error: &MalformedCallback,
    ) -> DialogueResult<Reply> {
        log_event_rejected("callback", &error.to_string(), &who.handle(), who.chat_id);
        let lang = Self::language_of(dialogue).await?;
        Ok(Reply::alert(i18n::text(lang, TextKey::InvalidChoice)))
    }

    /// Applies one event to the sender's conversation and renders the result.
    pub async fn handle_event(
        &self,
        who: &Participant,
        dialogue: &ConversationDialogue,
        event: Event,
        today: NaiveDate,
    ) -> DialogueResult<Reply> {
        let user = who.handle();
        let name = event.name();
        log_event_start(name, &user, who.chat_id, None);

        let mut conversation = dialogue.get_or_default().await?;
        let previous_language = conversation.language();
        let ctx = EventContext {
            catalog: &self.catalog,
            rules: &self.rules,
            today,
            username: who.username.as_deref(),
        };
        let outcome = conversation.apply(event, &ctx);

        let lang = if conversation.is_closed() {
            dialogue.reset().await?;
            previous_language
        } else {
            dialogue.update(conversation.clone()).await?;
            conversation.language()
        };
        let renderer = self.renderer(lang);

        let transition = match outcome {
            Ok(transition) => transition,
            Err(e) => {
                log_event_rejected(name, &e.to_string(), &user, who.chat_id);
                return Ok(renderer.rejection(&e));
            }
        };

        if let Transition::Completed(request) = &transition {
            if let Err(e) = self.finalize(who, request, &renderer).await {
                tracing::error!("Failed to finalize booking for {}: {}", user, e);
                return Ok(Reply::alert(i18n::text(lang, TextKey::TryLater)));
            }
        }

        match renderer.transition(&transition, &conversation, today) {
            Ok(reply) => {
                let stage = conversation.stage().to_string();
                log_event_success(name, &user, who.chat_id, Some(stage.as_str()));
                Ok(reply)
            }
            Err(e) => {
                tracing::error!("Failed to render {} for {}: {}", name, user, e);
                Ok(Reply::alert(i18n::text(lang, TextKey::TryLater)))
            }
        }
    }

    /// Typed text: a contact while one is requested, the history shortcut,
    /// or nothing at all.
    pub async fn handle_text(
        &self,
        who: &Participant,
        dialogue: &ConversationDialogue,
        text: &str,
        today: NaiveDate,
    ) -> DialogueResult<Reply> {
        let trimmed = text.trim();
        if HISTORY_REQUESTS.contains(&trimmed) {
            return self.history(dialogue).await;
        }
        if trimmed.starts_with('/') {
            let lang = Self::language_of(dialogue).await?;
            return Ok(Reply::prompt(Prompt::text(i18n::text(lang, TextKey::UnknownCommand))));
        }

        let stage = dialogue.get().await?.map(|c| c.stage());
        if stage == Some(Stage::EnteringContact) {
            let event = Event::ProvideContact(Contact::FreeText(text.to_string()));
            return self.handle_event(who, dialogue, event, today).await;
        }
        Ok(Reply::default())
    }

    /// Sends the finished request to every administrator. Delivery failures
    /// are logged; the booking counts as accepted regardless.
    async fn finalize(
        &self,
        who: &Participant,
        request: &BookingRequest,
        renderer: &Renderer<'_>,
    ) -> Result<(), BookingError> {
        let reference: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
        let text = renderer.admin_notification(request, &who.handle(), &reference)?;

        let report = notify_admins(self.notifier.as_ref(), &self.admins, &text).await;
        for failure in report.failures() {
            log_delivery_error(failure.admin_id, &reference, &failure.reason);
        }
        log_booking_submitted(
            &reference,
            &who.handle(),
            request.items.len(),
            report.delivered(),
            report.failures().count(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_handle() {
        let named = Participant { chat_id: 1, user_id: 7, username: Some("alice".into()) };
        assert_eq!(named.handle(), "@alice");

        let anonymous = Participant { chat_id: 1, user_id: 7, username: None };
        assert_eq!(anonymous.handle(), "id 7");

        let blank = Participant { chat_id: 1, user_id: 7, username: Some(String::new()) };
        assert_eq!(blank.handle(), "id 7");
    }
}
