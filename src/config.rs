use std::env;

use crate::i18n::Locale;

pub const DEV_SECRET_KEY: &str = "servicebook-dev-secret-change-me";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub secret_key: String,
    pub locale: Locale,
    pub cookie_secure: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "servicebook.db".to_string()),
            secret_key: env::var("SECRET_KEY")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEV_SECRET_KEY.to_string()),
            locale: env::var("APP_LOCALE")
                .map(|v| Locale::parse(&v))
                .unwrap_or_default(),
            cookie_secure: env::var("COOKIE_SECURE")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.secret_key == DEV_SECRET_KEY
    }
}
