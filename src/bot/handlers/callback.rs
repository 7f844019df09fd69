use std::sync::Arc;
use teloxide::prelude::*;

use crate::bot::callback_data::Action;
use crate::bot::handlers::HandlerResult;
use crate::bot::responder::{deliver, TelegramResponder};
use crate::services::dialogue::{BookingApp, ConversationDialogue, Participant};
use crate::utils::datetime::today;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    dialogue: ConversationDialogue,
    app: Arc<BookingApp>,
) -> HandlerResult {
    let who = Participant {
        chat_id: dialogue.chat_id().0,
        user_id: q.from.id.0,
        username: q.from.username.clone(),
    };
    let data = q.data.clone().unwrap_or_default();

    tracing::info!(
        "Callback received: '{}' from {} in chat {}",
        data,
        who.handle(),
        who.chat_id
    );

    let reply = match data.parse::<Action>() {
        Ok(action) => app.handle_event(&who, &dialogue, action.into(), today()).await?,
        Err(e) => app.reject_malformed(&who, &dialogue, &e).await?,
    };

    let responder = TelegramResponder::answering(bot, dialogue.chat_id(), q.id.clone());
    deliver(&responder, &reply).await?;
    Ok(())
}
