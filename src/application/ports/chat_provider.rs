use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug)]
pub enum ChatProviderError {
    NetworkError(String),
    ApiError(String),
    EmptyResponse,
}

impl std::fmt::Display for ChatProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatProviderError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ChatProviderError::ApiError(msg) => write!(f, "API error: {}", msg),
            ChatProviderError::EmptyResponse => write!(f, "Model returned no choices"),
        }
    }
}

impl std::error::Error for ChatProviderError {}

/// Large-language-model completion API.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ChatProviderError>;
}
