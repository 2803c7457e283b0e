pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod i18n;
pub mod models;
pub mod services;
pub mod session;
pub mod state;
pub mod views;
