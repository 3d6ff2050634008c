use parking_lot::Mutex;
use sable_sasl::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

/// A pre-registration client that records everything sent to it
pub struct TestConnection {
    pub id: ConnectionId,
    pub registered: bool,
    pub capabilities: ClientCapabilitySet,
    pub fingerprint: Option<String>,
    pub nick: Option<String>,
    sent: Mutex<Vec<String>>,
}

impl TestConnection {
    /// An unregistered client that has negotiated `sasl`
    pub fn new(id: &str) -> Self {
        Self {
            id: super::conn_id(id),
            registered: false,
            capabilities: [ClientCapability::Sasl].into_iter().collect(),
            fingerprint: None,
            nick: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Lines sent to the client since the last call
    pub fn take_sent(&self) -> Vec<String> {
        std::mem::take(&mut *self.sent.lock())
    }
}

impl MessageSink for TestConnection {
    fn send(&self, msg: OutboundClientMessage) {
        self.sent.lock().push(msg.content().to_string());
    }
}

impl SaslConnection for TestConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn is_registered(&self) -> bool {
        self.registered
    }

    fn capabilities(&self) -> ClientCapabilitySet {
        self.capabilities
    }

    fn tls_fingerprint(&self) -> Option<String> {
        self.fingerprint.clone()
    }

    fn nick(&self) -> Option<String> {
        self.nick.clone()
    }
}

/// The connections and servers known to the local server
#[derive(Default)]
pub struct TestNetwork {
    clients: HashMap<ConnectionId, Arc<TestConnection>>,
    servers: HashMap<ConnectionId, ServerName>,
}

impl TestNetwork {
    pub fn add_client(&mut self, connection: TestConnection) -> Arc<TestConnection> {
        let connection = Arc::new(connection);
        self.clients.insert(connection.id, Arc::clone(&connection));
        connection
    }

    pub fn add_server(&mut self, id: &str, name: ServerName) {
        self.servers.insert(super::conn_id(id), name);
    }
}

impl ConnectionLookup for TestNetwork {
    fn find(&self, id: &ConnectionId) -> Option<LookupTarget<'_>> {
        if let Some(client) = self.clients.get(id) {
            return Some(LookupTarget::Client(&**client));
        }
        self.servers.get(id).map(|name| LookupTarget::Server(*name))
    }
}
