use sable_sasl::prelude::*;
use std::sync::Arc;

pub mod connection;
pub mod transport;

pub use connection::{TestConnection, TestNetwork};
pub use transport::{RecordingFallback, RecordingTransport};

/// Log to stdout for the tests that want it; repeated calls are harmless
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn server_name() -> ServerName {
    ServerName::convert("irc.example.net").unwrap()
}

pub fn conn_id(id: &str) -> ConnectionId {
    ConnectionId::convert(id).unwrap()
}

pub fn params(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// A module wired to recording collaborators
pub struct TestServer {
    pub module: Arc<SaslModule>,
    pub transport: Arc<RecordingTransport>,
    pub fallback: Arc<RecordingFallback>,
}

impl TestServer {
    pub fn new(config: SaslConfig) -> Self {
        let transport = Arc::new(RecordingTransport::default());
        let fallback = Arc::new(RecordingFallback::default());
        let module = Arc::new(SaslModule::new(
            server_name(),
            config,
            transport.clone(),
            fallback.clone(),
        ));

        Self {
            module,
            transport,
            fallback,
        }
    }

    /// Deliver an agent message as it would arrive over the server link
    pub fn from_agent(&self, network: &TestNetwork, list: &[&str]) -> RouteResult {
        self.module
            .handle_sasl_encap("services.example.net", network, &params(list))
    }

    pub fn authenticate(&self, connection: &TestConnection, list: &[&str]) -> CommandResult {
        self.module.handle_authenticate(connection, &params(list))
    }
}

impl Default for TestServer {
    fn default() -> Self {
        Self::new(SaslConfig::default())
    }
}
