use super::*;
use crate::connection::SaslConnection;

/// Trait describing an object to which a client protocol message can be sent
pub trait MessageSink
{
    /// Send a protocol message to this sink
    fn send(&self, msg: OutboundClientMessage);
}

/// Replies to the client on whose behalf a handler is running
pub trait CommandResponse
{
    /// Send a fully formed message
    fn send(&self, msg: OutboundClientMessage);

    /// Send a numeric, filling in the server as source and the client as target
    fn numeric(&self, numeric: UntargetedNumeric);
}

/// The [`CommandResponse`] used for a live client connection
pub struct ConnectionResponse<'a>
{
    source: &'a ServerName,
    connection: &'a dyn SaslConnection,
}

impl<'a> ConnectionResponse<'a>
{
    pub fn new(source: &'a ServerName, connection: &'a dyn SaslConnection) -> Self
    {
        Self { source, connection }
    }
}

impl CommandResponse for ConnectionResponse<'_>
{
    fn send(&self, msg: OutboundClientMessage)
    {
        self.connection.send(msg);
    }

    fn numeric(&self, numeric: UntargetedNumeric)
    {
        self.connection.send(numeric.format_for(self.source, &self.connection.nick()));
    }
}
