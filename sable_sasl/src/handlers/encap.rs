use super::*;

/// Whether an inbound SASL message was consumed here.
///
/// This only informs routing across the server mesh; it says nothing about
/// the outcome of the authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteResult
{
    Handled,
    NotHandled,
}

impl RouteResult
{
    pub fn is_handled(self) -> bool
    {
        self == Self::Handled
    }
}

impl SaslModule
{
    /// Handle the parameters of an encapsulated `SASL` message received from
    /// `source`, after the encapsulation target has been stripped.
    #[tracing::instrument(skip(self, lookup, params))]
    pub fn handle_sasl_encap(&self, source: &str, lookup: &dyn ConnectionLookup, params: &[String]) -> RouteResult
    {
        match AgentMessage::parse(params)
        {
            Ok(message) => self.handle_agent_message(lookup, &message),
            Err(error) =>
            {
                tracing::debug!(?error, ?params, "Malformed SASL message");
                RouteResult::NotHandled
            }
        }
    }

    /// Feed a message from an agent into the session for its target client
    pub fn handle_agent_message(&self, lookup: &dyn ConnectionLookup, message: &AgentMessage) -> RouteResult
    {
        let connection = match lookup.find(&message.target)
        {
            Some(LookupTarget::Client(connection)) => connection,
            Some(LookupTarget::Server(server)) =>
            {
                tracing::debug!(connection = %message.target, %server, "SASL message addressed to a server");
                return RouteResult::NotHandled;
            }
            None =>
            {
                tracing::debug!(connection = %message.target, "User not found in SASL message");
                return RouteResult::NotHandled;
            }
        };

        let Some(shared) = self.sessions.get(&message.target) else {
            return RouteResult::NotHandled;
        };

        let response = ConnectionResponse::new(&self.server_name, connection);
        let mut session = shared.lock();

        // Aborted and removed by someone else after we fetched it
        if session.is_discarded()
        {
            return RouteResult::NotHandled;
        }

        if session.advance_from_agent(message, &response) == SaslState::Done
        {
            session.announce(&response);
            session.discard();
            drop(session);
            self.sessions.remove(&message.target, &shared);
        }

        RouteResult::Handled
    }
}
