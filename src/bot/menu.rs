//! Transport-neutral description of what to show the user.

use std::path::PathBuf;

use crate::bot::callback_data::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub label: String,
    pub action: Action,
}

impl MenuButton {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self { label: label.into(), action }
    }
}

/// Rows of labeled actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    pub rows: Vec<Vec<MenuButton>>,
}

impl Menu {
    /// One button per row.
    pub fn column(buttons: Vec<MenuButton>) -> Self {
        Self {
            rows: buttons.into_iter().map(|b| vec![b]).collect(),
        }
    }

    /// `per_row` buttons per row, the last row possibly shorter.
    pub fn grid(buttons: Vec<MenuButton>, per_row: usize) -> Self {
        let mut rows = Vec::new();
        let mut row = Vec::with_capacity(per_row);
        for button in buttons {
            row.push(button);
            if row.len() == per_row.max(1) {
                rows.push(std::mem::take(&mut row));
            }
        }
        if !row.is_empty() {
            rows.push(row);
        }
        Self { rows }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &MenuButton> {
        self.rows.iter().flatten()
    }
}

/// A message to send: text, optional buttons, optional picture.
///
/// When a picture is present the text becomes its caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub menu: Option<Menu>,
    pub photo: Option<PathBuf>,
}

impl Prompt {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), menu: None, photo: None }
    }

    pub fn with_menu(mut self, menu: Menu) -> Self {
        self.menu = Some(menu);
        self
    }

    pub fn with_photo(mut self, photo: Option<PathBuf>) -> Self {
        self.photo = photo;
        self
    }
}

/// Short acknowledgement of a button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub alert: bool,
}

/// Everything one inbound event produces for the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub notice: Option<Notice>,
    pub prompts: Vec<Prompt>,
}

impl Reply {
    pub fn prompts(prompts: Vec<Prompt>) -> Self {
        Self { notice: None, prompts }
    }

    pub fn prompt(prompt: Prompt) -> Self {
        Self::prompts(vec![prompt])
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Self {
            notice: Some(Notice { text: text.into(), alert: true }),
            prompts: Vec::new(),
        }
    }

    pub fn with_notice(mut self, text: impl Into<String>) -> Self {
        self.notice = Some(Notice { text: text.into(), alert: false });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.notice.is_none() && self.prompts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buttons(n: usize) -> Vec<MenuButton> {
        (0..n).map(|i| MenuButton::new(i.to_string(), Action::CartDelete(i))).collect()
    }

    #[test]
    fn test_grid_splits_rows() {
        let menu = Menu::grid(buttons(14), 4);
        let sizes: Vec<_> = menu.rows.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 4, 4, 2]);
        assert_eq!(menu.buttons().count(), 14);
    }

    #[test]
    fn test_column_has_one_button_per_row() {
        let menu = Menu::column(buttons(3));
        assert_eq!(menu.rows.len(), 3);
        assert!(menu.rows.iter().all(|r| r.len() == 1));
    }
}
