use anyhow::Context;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub email: EmailSettings,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not found")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        Ok(Self {
            database_url,
            bind_addr,
            email: EmailSettings::from_env()?,
        })
    }
}

/// Outbound mail block. An empty `smtp_host` disables real delivery; the
/// mailer then records composed messages instead of sending them.
#[derive(Debug, Clone)]
pub struct EmailSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub enable_tls: bool,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
    pub organizer_email: Option<String>,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            smtp_host: String::new(),
            smtp_port: 587,
            enable_tls: true,
            username: String::new(),
            password: String::new(),
            from_email: "noreply@doctorly.example".to_string(),
            from_name: "Healthcare Scheduling System".to_string(),
            organizer_email: None,
        }
    }
}

impl EmailSettings {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut settings = Self::default();
        if let Ok(host) = env::var("SMTP_HOST") {
            settings.smtp_host = host;
        }
        if let Ok(port) = env::var("SMTP_PORT") {
            settings.smtp_port = port.parse().context("SMTP_PORT must be a port number")?;
        }
        if let Ok(tls) = env::var("SMTP_TLS") {
            settings.enable_tls = tls != "false" && tls != "0";
        }
        if let Ok(username) = env::var("SMTP_USERNAME") {
            settings.username = username;
        }
        if let Ok(password) = env::var("SMTP_PASSWORD") {
            settings.password = password;
        }
        if let Ok(from_email) = env::var("MAIL_FROM_EMAIL") {
            settings.from_email = from_email;
        }
        if let Ok(from_name) = env::var("MAIL_FROM_NAME") {
            settings.from_name = from_name;
        }
        settings.organizer_email = env::var("ORGANIZER_EMAIL").ok().filter(|v| !v.is_empty());
        Ok(settings)
    }
}
