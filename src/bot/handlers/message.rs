use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::Command;
use crate::bot::handlers::{participant, HandlerResult};
use crate::bot::menu::{Prompt, Reply};
use crate::bot::responder::{deliver, TelegramResponder};
use crate::services::dialogue::{BookingApp, ConversationDialogue};
use crate::utils::datetime::today;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: ConversationDialogue,
    app: Arc<BookingApp>,
) -> HandlerResult {
    let who = participant(&msg);
    let reply = match cmd {
        Command::Help => Reply::prompt(Prompt::text(Command::descriptions().to_string())),
        Command::Start => app.start(&who, &dialogue).await?,
        Command::Menu => app.menu(&who, &dialogue, today()).await?,
        Command::Info => app.info(&dialogue).await?,
        Command::My => app.history(&dialogue).await?,
    };

    deliver(&TelegramResponder::new(bot, msg.chat.id), &reply).await?;
    Ok(())
}
