use crate::session::SaslSession;
use crate::validated::*;

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// A stored session. Handlers hold the lock for the whole of their
/// invocation, which serialises work on any one connection's session.
pub type SharedSession = Arc<Mutex<SaslSession>>;

/// The live SASL sessions, at most one per connection
#[derive(Debug, Default)]
pub struct SessionStore
{
    sessions: RwLock<HashMap<ConnectionId, SharedSession>>,
}

impl SessionStore
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Look up the session for a connection
    pub fn get(&self, connection: &ConnectionId) -> Option<SharedSession>
    {
        self.sessions.read().get(connection).cloned()
    }

    /// Store a session under its own connection ID, replacing any previous one
    pub fn set(&self, session: SaslSession) -> SharedSession
    {
        let connection = session.connection();
        let shared = Arc::new(Mutex::new(session));

        if self.sessions.write().insert(connection, Arc::clone(&shared)).is_some()
        {
            tracing::warn!(%connection, "Replaced an existing SASL session");
        }

        shared
    }

    /// Remove and return the session for a connection
    pub fn clear(&self, connection: &ConnectionId) -> Option<SharedSession>
    {
        self.sessions.write().remove(connection)
    }

    /// Remove `session` from the store if it is still the one stored for
    /// `connection`. Returns whether it was removed.
    pub fn remove(&self, connection: &ConnectionId, session: &SharedSession) -> bool
    {
        let mut sessions = self.sessions.write();
        match sessions.get(connection)
        {
            Some(current) if Arc::ptr_eq(current, session) =>
            {
                sessions.remove(connection);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize
    {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.sessions.read().is_empty()
    }

    /// Sessions that have been alive for at least `timeout`
    pub fn expired(&self, timeout: Duration) -> Vec<(ConnectionId, SharedSession)>
    {
        self.sessions
            .read()
            .iter()
            .filter(|(_, session)| session.lock().is_expired(timeout))
            .map(|(id, session)| (*id, Arc::clone(session)))
            .collect()
    }
}
