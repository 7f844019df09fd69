use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::InputFile;

use crate::bot::keyboards::inline_keyboard;
use crate::bot::menu::{Notice, Prompt, Reply};

/// Where a rendered reply goes.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Answers the button press, or shows the notice when there was none.
    async fn acknowledge(&self, notice: Option<&Notice>) -> ResponseResult<()>;

    async fn send(&self, prompt: &Prompt) -> ResponseResult<()>;
}

/// Acknowledges first, then sends every prompt. A failed acknowledgement
/// (an expired callback query, say) is logged and the prompts still go out.
pub async fn deliver(sink: &dyn ReplySink, reply: &Reply) -> ResponseResult<()> {
    if let Err(e) = sink.acknowledge(reply.notice.as_ref()).await {
        tracing::warn!("Failed to acknowledge update: {}", e);
    }
    for prompt in &reply.prompts {
        sink.send(prompt).await?;
    }
    Ok(())
}

/// Sends rendered prompts to one chat.
pub struct TelegramResponder {
    bot: Bot,
    chat_id: ChatId,
    query_id: Option<String>,
}

impl TelegramResponder {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id, query_id: None }
    }

    /// Replies to a button press; the notice becomes the callback answer.
    pub fn answering(bot: Bot, chat_id: ChatId, query_id: String) -> Self {
        Self { bot, chat_id, query_id: Some(query_id) }
    }
}

#[async_trait]
impl ReplySink for TelegramResponder {
    async fn acknowledge(&self, notice: Option<&Notice>) -> ResponseResult<()> {
        match &self.query_id {
            // Always answer so the client stops showing the spinner.
            Some(id) => {
                let mut answer = self.bot.answer_callback_query(id.clone());
                if let Some(notice) = notice {
                    answer = answer.text(notice.text.clone()).show_alert(notice.alert);
                }
                answer.await?;
            }
            // No button to attach a notice to, so it goes out as text.
            None => {
                if let Some(notice) = notice {
                    self.bot.send_message(self.chat_id, notice.text.clone()).await?;
                }
            }
        }
        Ok(())
    }

    /// Sends a prompt as a photo with caption when it has a picture, as plain
    /// text otherwise. A failed upload degrades to text.
    async fn send(&self, prompt: &Prompt) -> ResponseResult<()> {
        if let Some(photo) = &prompt.photo {
            let mut request = self
                .bot
                .send_photo(self.chat_id, InputFile::file(photo.clone()))
                .caption(prompt.text.clone());
            if let Some(menu) = &prompt.menu {
                request = request.reply_markup(inline_keyboard(menu));
            }
            match request.await {
                Ok(_) => return Ok(()),
                Err(e) => {
                    tracing::warn!("Failed to send photo {}: {}, falling back to text", photo.display(), e);
                }
            }
        }

        let mut request = self.bot.send_message(self.chat_id, prompt.text.clone());
        if let Some(menu) = &prompt.menu {
            request = request.reply_markup(inline_keyboard(menu));
        }
        request.await?;
        Ok(())
    }
}
