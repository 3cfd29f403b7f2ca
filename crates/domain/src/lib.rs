pub mod card;
pub mod content;
pub mod setting;
pub mod ui;
