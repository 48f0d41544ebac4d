use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Remote chat-completion provider settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub chat: ChatConfig,
    /// Shown as the preparer on diet plan reports.
    pub doctor_name: String,
    /// Builder sessions untouched this long are dropped.
    pub plan_idle_minutes: u64,
    pub plan_max_per_owner: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "ojas".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "ojas-users".into()),
            ttl_minutes: env_parse("JWT_TTL_MINUTES", 60),
            refresh_ttl_minutes: env_parse("JWT_REFRESH_TTL_MINUTES", 60 * 24 * 14),
        };
        let chat = ChatConfig {
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash-preview-05-20".into()),
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into()),
            max_attempts: env_parse("CHAT_MAX_ATTEMPTS", 5),
            base_delay_ms: env_parse("CHAT_BASE_DELAY_MS", 1000),
        };
        if chat.api_key.is_empty() {
            tracing::warn!("GEMINI_API_KEY is not set; chat requests will fail");
        }
        let doctor_name = std::env::var("DOCTOR_NAME").unwrap_or_else(|_| {
            "Dr. Armaan Gupta (Gold medalist, PHD(BMMS), Ayurveda Specialist)".into()
        });
        Ok(Self {
            database_url,
            jwt,
            chat,
            doctor_name,
            plan_idle_minutes: env_parse("PLAN_IDLE_MINUTES", 120),
            plan_max_per_owner: env_parse("PLAN_MAX_PER_OWNER", 16),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
