use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::value_objects::PromptType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

/// Ephemeral per-connection conversation state. Lives only in memory for the
/// lifetime of the connection; never persisted.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    equipment_id: Uuid,
    tenant_id: String,
    prompt_type: PromptType,
    history: Vec<Turn>,
    started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: Uuid, equipment_id: Uuid, tenant_id: String, prompt_type: PromptType) -> Self {
        Self {
            id,
            equipment_id,
            tenant_id,
            prompt_type,
            history: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn equipment_id(&self) -> Uuid {
        self.equipment_id
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn prompt_type(&self) -> PromptType {
        self.prompt_type
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn record_user_turn(&mut self, content: String) {
        self.history.push(Turn {
            role: TurnRole::User,
            content,
        });
    }

    pub fn record_assistant_turn(&mut self, content: String) {
        self.history.push(Turn {
            role: TurnRole::Assistant,
            content,
        });
    }

    pub fn turn_count(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_preserves_order() {
        let mut session = Session::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "tenant-a".to_string(),
            PromptType::Technical,
        );

        session.record_user_turn("How do I reset the drive?".to_string());
        session.record_assistant_turn("Hold the reset button for five seconds.".to_string());

        assert_eq!(session.turn_count(), 2);
        assert_eq!(session.history()[0].role, TurnRole::User);
        assert_eq!(session.history()[1].role, TurnRole::Assistant);
        assert_eq!(session.prompt_type(), PromptType::Technical);
    }
}
