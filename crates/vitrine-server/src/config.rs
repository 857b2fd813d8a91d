use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) bind_addr: String,
    pub(crate) session_secret: String,
    pub(crate) session_ttl_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".into(),
            session_secret: "your-secret-key".into(),
            session_ttl_seconds: 24 * 60 * 60,
        }
    }
}

/// Defaults, overridden by `server.toml`, overridden by `VITRINE_*` env vars.
pub(crate) fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.bind_addr = v.clone();
            }
            if let Some(v) = file_cfg.get("session_secret") {
                settings.session_secret = v.clone();
            }
            if let Some(v) = file_cfg.get("session_ttl_seconds") {
                if let Ok(parsed) = v.parse::<u64>() {
                    settings.session_ttl_seconds = parsed;
                }
            }
        }
    }

    if let Ok(v) = std::env::var("PORT") {
        if let Ok(port) = v.parse::<u16>() {
            settings.bind_addr = format!("0.0.0.0:{port}");
        }
    }
    if let Ok(v) = std::env::var("VITRINE_BIND") {
        settings.bind_addr = v;
    }
    if let Ok(v) = std::env::var("SESSION_SECRET") {
        settings.session_secret = v;
    }
    if let Ok(v) = std::env::var("VITRINE_SESSION_SECRET") {
        settings.session_secret = v;
    }
    if let Ok(v) = std::env::var("VITRINE_SESSION_TTL_SECONDS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.session_ttl_seconds = parsed;
        }
    }

    settings
}
