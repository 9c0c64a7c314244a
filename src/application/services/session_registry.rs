use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::application::ports::voice_pipeline::SessionConfig;
use crate::domain::value_objects::PromptType;

/// How long a bootstrapped session may wait for its WebSocket to attach.
const CLAIM_TTL: Duration = Duration::from_secs(300);

/// In-memory handoff between the session bootstrap endpoint and the
/// WebSocket that attaches afterwards. A registration is single-use: the
/// first connection for a session id claims it and later attempts get
/// nothing, so a leaked session id cannot be replayed. Registrations that
/// are never claimed expire after a TTL and are swept on the next
/// registration, so abandoned bootstraps do not accumulate.
pub struct SessionRegistry {
    ttl: Duration,
    pending: Mutex<HashMap<Uuid, (Instant, SessionConfig)>>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_ttl(CLAIM_TTL)
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Register a new pending session and return its id.
    pub fn register(
        &self,
        equipment_id: Uuid,
        tenant_id: String,
        prompt_type: PromptType,
    ) -> Uuid {
        let session_id = Uuid::new_v4();
        let config = SessionConfig {
            session_id,
            equipment_id,
            tenant_id,
            prompt_type,
        };

        let mut pending = self.pending.lock().unwrap();
        pending.retain(|_, (registered_at, _)| registered_at.elapsed() < self.ttl);
        pending.insert(session_id, (Instant::now(), config));
        session_id
    }

    /// Claim a pending session, consuming the registration. Expired
    /// registrations are treated as already gone.
    pub fn take(&self, session_id: Uuid) -> Option<SessionConfig> {
        self.pending
            .lock()
            .unwrap()
            .remove(&session_id)
            .filter(|(registered_at, _)| registered_at.elapsed() < self.ttl)
            .map(|(_, config)| config)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_consumes_registration() {
        let registry = SessionRegistry::new();
        let session_id = registry.register(
            Uuid::new_v4(),
            "tenant-a".to_string(),
            PromptType::CallCenter,
        );

        let config = registry.take(session_id).unwrap();
        assert_eq!(config.session_id, session_id);
        assert_eq!(config.tenant_id, "tenant-a");

        // Second claim must fail.
        assert!(registry.take(session_id).is_none());
        assert_eq!(registry.pending_count(), 0);
    }

    #[test]
    fn test_unknown_session_id_yields_none() {
        let registry = SessionRegistry::new();
        assert!(registry.take(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_expired_registration_cannot_be_claimed() {
        let registry = SessionRegistry::with_ttl(Duration::ZERO);
        let session_id = registry.register(
            Uuid::new_v4(),
            "tenant-a".to_string(),
            PromptType::CallCenter,
        );

        assert!(registry.take(session_id).is_none());
    }

    #[test]
    fn test_register_sweeps_expired_entries() {
        let registry = SessionRegistry::with_ttl(Duration::ZERO);
        registry.register(
            Uuid::new_v4(),
            "tenant-a".to_string(),
            PromptType::CallCenter,
        );
        registry.register(
            Uuid::new_v4(),
            "tenant-a".to_string(),
            PromptType::CallCenter,
        );

        // Only the newest registration survives the sweep.
        assert_eq!(registry.pending_count(), 1);
    }
}
