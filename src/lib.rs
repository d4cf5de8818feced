pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod services;
