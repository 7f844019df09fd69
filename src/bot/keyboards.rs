use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::bot::menu::Menu;

/// Converts a menu into Telegram's inline keyboard, one callback button per entry.
pub fn inline_keyboard(menu: &Menu) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = menu
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.action.to_string()))
                .collect()
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}
