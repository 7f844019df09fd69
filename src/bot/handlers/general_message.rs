use std::sync::Arc;
use teloxide::prelude::*;

use crate::bot::handlers::{participant, HandlerResult};
use crate::bot::responder::{deliver, TelegramResponder};
use crate::services::dialogue::{BookingApp, ConversationDialogue};
use crate::utils::datetime::today;

/// Plain text: a typed contact, the history shortcut, or an unknown command.
/// Anything else is ignored.
pub async fn handle_general_message(
    bot: Bot,
    msg: Message,
    dialogue: ConversationDialogue,
    app: Arc<BookingApp>,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let who = participant(&msg);
    let reply = app.handle_text(&who, &dialogue, text, today()).await?;
    if !reply.is_empty() {
        deliver(&TelegramResponder::new(bot, msg.chat.id), &reply).await?;
    }
    Ok(())
}
