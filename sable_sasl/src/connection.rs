//! Interfaces the relay needs from the surrounding server's connection handling

use crate::capability::*;
use crate::messages::MessageSink;
use crate::validated::*;

/// A local client connection, as seen by the SASL relay
pub trait SaslConnection: MessageSink
{
    /// The opaque connection ID used to address this client on the relay
    fn id(&self) -> ConnectionId;

    /// Whether the connection has completed registration
    fn is_registered(&self) -> bool;

    /// The client capabilities negotiated so far
    fn capabilities(&self) -> ClientCapabilitySet;

    /// The fingerprint of the client's TLS certificate, if one was presented
    fn tls_fingerprint(&self) -> Option<String>;

    /// The nickname used as the target of numerics; `None` before NICK has been sent
    fn nick(&self) -> Option<String>;
}

/// What a relay target ID resolved to
pub enum LookupTarget<'a>
{
    /// A client connected to this server
    Client(&'a dyn SaslConnection),
    /// A server; SASL traffic is never addressed to one
    Server(ServerName),
}

/// Resolves connection IDs received from the relay
pub trait ConnectionLookup
{
    fn find(&self, id: &ConnectionId) -> Option<LookupTarget<'_>>;
}
