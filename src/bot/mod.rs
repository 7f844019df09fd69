pub mod assets;
pub mod callback_data;
pub mod commands;
pub mod handlers;
pub mod keyboards;
pub mod menu;
pub mod render;
pub mod responder;
