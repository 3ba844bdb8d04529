pub mod api;
pub mod error;
pub mod item;
pub mod link;
pub mod mix;
pub mod models;
pub mod navigator;
pub mod timeago;
