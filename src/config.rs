use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

use crate::booking::conversation::{SLOT_END, SLOT_START};

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub admin_ids: Vec<i64>,
    pub http_port: u16,
    pub images_dir: PathBuf,
    pub slot_start: u32,
    pub slot_end: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let admins = env::var("ADMIN_IDS")
            .map_err(|_| anyhow!("ADMIN_IDS must be set"))?;
        let admin_ids = parse_admin_ids(&admins)?;

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let images_dir = env::var("IMAGES_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| "./images".to_string());

        let slot_start = parse_hour("SLOT_START", SLOT_START)?;
        let slot_end = parse_hour("SLOT_END", SLOT_END)?;
        if slot_start > slot_end {
            return Err(anyhow!("Invalid slot hours: SLOT_START must not be after SLOT_END"));
        }

        Ok(Config {
            telegram_bot_token: token,
            admin_ids,
            http_port,
            images_dir: PathBuf::from(images_dir),
            slot_start,
            slot_end,
        })
    }
}

/// Parses administrator chat ids separated by whitespace or commas.
pub fn parse_admin_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| anyhow!("Invalid ADMIN_IDS entry '{}'", part))
        })
        .collect()
}

fn parse_hour(name: &str, default: u32) -> Result<u32> {
    let Ok(value) = env::var(name) else {
        return Ok(default);
    };
    if value.trim().is_empty() {
        return Ok(default);
    }
    let hour: u32 = value
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid {}", name))?;
    if hour > 23 {
        return Err(anyhow!("Invalid {}: hour must be between 0 and 23", name));
    }
    Ok(hour)
}
