//! The encapsulated `SASL` server-to-server message, and delivery of it
//! towards the authentication agent.

use crate::errors::RelayError;
use crate::validated::*;

use arc_swap::ArcSwap;
use std::sync::Arc;

/// The subcommand carried by a relayed SASL message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayMode
{
    /// `S`: a client has started authenticating with a mechanism
    Start,
    /// `C`: payload data, in either direction
    Client,
    /// `D`: the agent has reached a result
    Done,
    /// Anything else; passed through untouched
    Other(String),
}

impl RelayMode
{
    pub fn token(&self) -> &str
    {
        match self
        {
            Self::Start => "S",
            Self::Client => "C",
            Self::Done => "D",
            Self::Other(s) => s,
        }
    }

    pub fn parse(token: &str) -> Self
    {
        match token
        {
            "S" => Self::Start,
            "C" => Self::Client,
            "D" => Self::Done,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A SASL message on its way from this server to an agent.
///
/// Encoded as `<target> SASL <connection> <agent or *> <mode> <data...>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayMessage
{
    /// Where to route the message; `*` broadcasts to every server
    pub target: String,
    /// The client on whose behalf the message is sent
    pub connection: ConnectionId,
    /// The agent handling this client, once known
    pub agent: Option<AgentId>,
    pub mode: RelayMode,
    pub data: Vec<String>,
}

impl RelayMessage
{
    pub const COMMAND: &'static str = "SASL";

    /// The parameter list handed to the server link's encapsulation layer
    pub fn to_params(&self) -> Vec<String>
    {
        let mut params = Vec::with_capacity(5 + self.data.len());
        params.push(self.target.clone());
        params.push(Self::COMMAND.to_string());
        params.push(self.connection.to_string());
        params.push(self.agent.map(|a| a.to_string()).unwrap_or_else(|| "*".to_string()));
        params.push(self.mode.token().to_string());
        params.extend(self.data.iter().cloned());
        params
    }
}

/// A SASL message received from an agent, with the encapsulation target
/// already stripped: `<agent> <connection> <mode> [data...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentMessage
{
    pub agent: AgentId,
    pub target: ConnectionId,
    pub mode: RelayMode,
    pub data: Vec<String>,
}

impl AgentMessage
{
    pub fn parse(params: &[String]) -> Result<Self, RelayError>
    {
        let [agent, target, mode, data @ ..] = params else {
            return Err(RelayError::NotEnoughParameters(params.len()));
        };

        Ok(Self {
            agent: agent.parse()?,
            target: target.parse()?,
            mode: RelayMode::parse(mode),
            data: data.to_vec(),
        })
    }

    /// The first data field, or the empty string if there was none
    pub fn payload(&self) -> &str
    {
        self.data.first().map(String::as_str).unwrap_or("")
    }

    pub fn is_done(&self) -> bool
    {
        self.mode == RelayMode::Done
    }
}

/// Delivers encapsulated messages over the server link
pub trait RelayTransport: Send + Sync
{
    /// Attempt to send `message`. An `Err` means nothing was sent.
    fn send_encapsulated(&self, message: &RelayMessage) -> Result<(), RelayError>;
}

/// Receives messages the transport couldn't deliver, so that something local
/// can decide what happens to the client instead
pub trait SaslFallback: Send + Sync
{
    fn handle(&self, message: &RelayMessage);
}

/// Outbound side of the relay: builds messages for the configured target and
/// hands them to the transport, falling back when it can't deliver
pub struct Relay
{
    target: ArcSwap<String>,
    transport: Arc<dyn RelayTransport>,
    fallback: Arc<dyn SaslFallback>,
}

impl Relay
{
    pub fn new(target: String, transport: Arc<dyn RelayTransport>, fallback: Arc<dyn SaslFallback>) -> Self
    {
        Self {
            target: ArcSwap::from_pointee(target),
            transport,
            fallback,
        }
    }

    /// The current routing target for outbound messages
    pub fn target(&self) -> Arc<String>
    {
        self.target.load_full()
    }

    /// Change the routing target; messages already sent are unaffected
    pub fn set_target(&self, target: String)
    {
        self.target.store(Arc::new(target));
    }

    /// Build the `S` message that opens a session with the agent.
    ///
    /// The certificate fingerprint is only included for `EXTERNAL`.
    pub fn start(&self, connection: ConnectionId, mechanism: &Mechanism, fingerprint: Option<String>) -> RelayMessage
    {
        let mut data = vec![mechanism.to_string()];

        if mechanism.is_external()
        {
            data.extend(fingerprint.filter(|fp| !fp.is_empty()));
        }

        RelayMessage {
            target: self.target().to_string(),
            connection,
            agent: None,
            mode: RelayMode::Start,
            data,
        }
    }

    /// Build a `C` message carrying client data to the bound agent
    pub fn client_data(&self, connection: ConnectionId, agent: AgentId, data: Vec<String>) -> RelayMessage
    {
        RelayMessage {
            target: self.target().to_string(),
            connection,
            agent: Some(agent),
            mode: RelayMode::Client,
            data,
        }
    }

    /// Send a message, handing it to the fallback if the transport can't
    pub fn send(&self, message: RelayMessage)
    {
        if let Err(error) = self.transport.send_encapsulated(&message)
        {
            tracing::debug!(?error, ?message, "Couldn't relay SASL message; using fallback");
            self.fallback.handle(&message);
        }
    }
}
