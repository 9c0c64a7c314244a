use serde::{Deserialize, Serialize};

/// Conversation persona selected at session bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptType {
    CallCenter,
    Technical,
    CustomerService,
    Sales,
    Emergency,
    DocumentQna,
}

impl PromptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptType::CallCenter => "call_center",
            PromptType::Technical => "technical",
            PromptType::CustomerService => "customer_service",
            PromptType::Sales => "sales",
            PromptType::Emergency => "emergency",
            PromptType::DocumentQna => "document_qna",
        }
    }

    /// Missing or unrecognized values fall back to the call center persona
    /// rather than failing the session bootstrap.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("technical") => PromptType::Technical,
            Some("customer_service") => PromptType::CustomerService,
            Some("sales") => PromptType::Sales,
            Some("emergency") => PromptType::Emergency,
            Some("document_qna") => PromptType::DocumentQna,
            _ => PromptType::CallCenter,
        }
    }
}

impl Default for PromptType {
    fn default() -> Self {
        PromptType::CallCenter
    }
}

impl std::fmt::Display for PromptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_parse() {
        assert_eq!(
            PromptType::parse_or_default(Some("technical")),
            PromptType::Technical
        );
        assert_eq!(
            PromptType::parse_or_default(Some("document_qna")),
            PromptType::DocumentQna
        );
    }

    #[test]
    fn test_unknown_values_fall_back() {
        assert_eq!(PromptType::parse_or_default(None), PromptType::CallCenter);
        assert_eq!(
            PromptType::parse_or_default(Some("pirate")),
            PromptType::CallCenter
        );
        assert_eq!(PromptType::parse_or_default(Some("")), PromptType::CallCenter);
    }

    #[test]
    fn test_as_str_round_trips() {
        for prompt_type in [
            PromptType::CallCenter,
            PromptType::Technical,
            PromptType::CustomerService,
            PromptType::Sales,
            PromptType::Emergency,
            PromptType::DocumentQna,
        ] {
            assert_eq!(
                PromptType::parse_or_default(Some(prompt_type.as_str())),
                prompt_type
            );
        }
    }
}
