use std::env;

use url::Url;

#[derive(Debug)]
pub enum ConfigError {
    MissingVariable(String),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVariable(name) => {
                write!(f, "Missing environment variable: {}", name)
            }
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime configuration, loaded once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    /// Externally reachable base URL used when handing out WebSocket URLs.
    pub public_base_url: String,

    pub embeddings_service_url: String,
    pub embedding_model: String,
    pub embedding_dimension: usize,

    pub chunk_size: usize,
    pub chunk_overlap: usize,

    pub default_tenant_id: String,
    pub default_user_id: String,

    pub retrieval_top_k: i64,
    pub retrieval_min_score: Option<f32>,

    pub llm_api_key: String,
    pub llm_model: String,
    pub llm_base_url: String,

    pub deepgram_api_key: String,
    pub elevenlabs_api_key: String,
    pub elevenlabs_voice_id: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVariable("DATABASE_URL".to_string()))?;

        let port = parse_var("PORT", 8000)?;
        let chunk_size = parse_var("CHUNK_SIZE", 1000)?;
        let chunk_overlap = parse_var("CHUNK_OVERLAP", 250)?;
        if chunk_overlap >= chunk_size {
            return Err(ConfigError::InvalidValue(format!(
                "CHUNK_OVERLAP ({}) must be smaller than CHUNK_SIZE ({})",
                chunk_overlap, chunk_size
            )));
        }

        let retrieval_min_score = match env::var("RETRIEVAL_MIN_SCORE") {
            Ok(raw) => Some(raw.parse::<f32>().map_err(|_| {
                ConfigError::InvalidValue(format!("RETRIEVAL_MIN_SCORE: '{}'", raw))
            })?),
            Err(_) => None,
        };

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url,
            port,
            allowed_origins,
            public_base_url: url_var("PUBLIC_BASE_URL", format!("http://localhost:{}", port))?,
            embeddings_service_url: url_var(
                "EMBEDDINGS_SERVICE_URL",
                "http://localhost:8080/v1/embeddings".to_string(),
            )?,
            embedding_model: env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "text-embedding-004".to_string()),
            embedding_dimension: parse_var("EMBEDDING_DIMENSION", 1536)?,
            chunk_size,
            chunk_overlap,
            default_tenant_id: env::var("DEFAULT_TENANT_ID")
                .unwrap_or_else(|_| "mvp_tenant".to_string()),
            default_user_id: env::var("DEFAULT_USER_ID")
                .unwrap_or_else(|_| "mvp_user".to_string()),
            retrieval_top_k: parse_var("RETRIEVAL_TOP_K", 5)?,
            retrieval_min_score,
            llm_api_key: env::var("LLM_API_KEY").unwrap_or_default(),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| "openai/gpt-oss-20b".to_string()),
            llm_base_url: url_var(
                "LLM_BASE_URL",
                "https://api.groq.com/openai/v1".to_string(),
            )?,
            deepgram_api_key: env::var("DEEPGRAM_API_KEY").unwrap_or_default(),
            elevenlabs_api_key: env::var("ELEVENLABS_API_KEY").unwrap_or_default(),
            elevenlabs_voice_id: env::var("ELEVENLABS_VOICE_ID")
                .unwrap_or_else(|_| "pNInz6obpgDQGcFmaJgB".to_string()),
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(format!("{}: '{}'", name, raw))),
        Err(_) => Ok(default),
    }
}

/// Reads a URL variable and rejects values `Url` cannot parse, so a typo
/// fails at startup instead of on the first outbound request.
fn url_var(name: &str, default: String) -> Result<String, ConfigError> {
    let raw = env::var(name).unwrap_or(default);
    Url::parse(&raw).map_err(|_| ConfigError::InvalidValue(format!("{}: '{}'", name, raw)))?;
    Ok(raw)
}
