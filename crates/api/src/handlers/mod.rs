pub mod auth;
pub mod catalog;
pub mod price_pos;
pub mod reports;
pub mod resources;
pub mod uploads;
