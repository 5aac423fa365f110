// src/config.rs
use std::env;

/// Model used when GEMINI_MODEL is not set.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Fixed persona sent ahead of every user message. Not user-editable.
pub const SYSTEM_PROMPT: &str = "\
You are a careful, supportive yoga and Ayurveda educator.
- Suggest 1–3 gentle asanas with steps, hold time, props/mods, and contraindications.
- Always list \"Avoid\" if unsafe; include an Ayurveda tip (no diagnosis or dosages).
- Flag risks (pregnancy, hypertension, glaucoma, recent surgery, severe pain).
- If red flags (trauma, fever+back pain, bowel/bladder loss, weakness, chest pain, severe eye pressure, pregnancy complications) → stop and advise urgent care.
- Warm, concise tone. Use short sections and bullet points.
";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Upstream credential. None means the server answers every chat
    /// request with a configuration error instead of refusing to start.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl AppConfig {
    /// Read configuration from the process environment, once, at startup.
    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        Self {
            host,
            port,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
