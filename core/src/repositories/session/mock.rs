//! Mock implementation of SessionRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::session::Session;
use crate::errors::DomainError;

use super::r#trait::SessionRepository;

/// Mock session repository for testing, keyed by token hash
pub struct MockSessionRepository {
    pub sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl MockSessionRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockSessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create(&self, session: Session) -> Result<Session, DomainError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.token_hash.clone(), session.clone());
        Ok(session)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(token_hash).cloned())
    }

    async fn revoke(&self, token_hash: &str) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().await;

        if let Some(session) = sessions.get_mut(token_hash) {
            session.revoke();
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
