pub mod callback;
pub mod general_message;
pub mod message;

use std::sync::Arc;
use teloxide::{
    dispatching::{dialogue, UpdateHandler},
    prelude::*,
};

use crate::booking::Conversation;
use crate::bot::commands::Command;
use crate::services::dialogue::{BookingApp, ConversationDialogue, ConversationStorage, Participant};

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), HandlerError>;

pub struct BotHandler {
    pub app: Arc<BookingApp>,
}

impl BotHandler {
    pub fn new(app: Arc<BookingApp>) -> Self {
        Self { app }
    }

    /// Every branch runs inside the sender's dialogue, so the storage must be
    /// registered with the dispatcher's dependencies.
    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        use teloxide::dispatching::UpdateFilterExt;

        let app_command = self.app.clone();
        let app_callback = self.app.clone();
        let app_text = self.app.clone();

        dialogue::enter::<Update, ConversationStorage, Conversation, _>()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command, dialogue: ConversationDialogue| {
                        let app = app_command.clone();
                        async move { message::command_handler(bot, msg, cmd, dialogue, app).await }
                    }),
            )
            .branch(Update::filter_callback_query().endpoint(
                move |bot: Bot, q: CallbackQuery, dialogue: ConversationDialogue| {
                    let app = app_callback.clone();
                    async move { callback::callback_handler(bot, q, dialogue, app).await }
                },
            ))
            .branch(Update::filter_message().endpoint(
                move |bot: Bot, msg: Message, dialogue: ConversationDialogue| {
                    let app = app_text.clone();
                    async move { general_message::handle_general_message(bot, msg, dialogue, app).await }
                },
            ))
    }
}

/// Sender of a message. Channel posts have no sender and map to user id 0.
pub fn participant(msg: &Message) -> Participant {
    let user = msg.from();
    Participant {
        chat_id: msg.chat.id.0,
        user_id: user.map_or(0, |u| u.id.0),
        username: user.and_then(|u| u.username.clone()),
    }
}
