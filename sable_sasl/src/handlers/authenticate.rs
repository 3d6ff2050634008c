use super::*;

impl SaslModule
{
    /// Handle `AUTHENTICATE` from a client that hasn't finished registering.
    ///
    /// The first call starts a session with the given mechanism; later calls
    /// carry payload data (or `*` to abort) into the existing session.
    #[tracing::instrument(skip_all, fields(connection = %connection.id()))]
    pub fn handle_authenticate(&self, connection: &dyn SaslConnection, args: &[String]) -> CommandResult
    {
        if connection.is_registered()
        {
            return Err(CommandError::AlreadyRegistered);
        }

        let capabilities = connection.capabilities();
        if !capabilities.has(ClientCapability::Sasl)
        {
            tracing::trace!(%capabilities, "AUTHENTICATE without the sasl capability");
            return Err(CommandError::CapabilityNotEnabled(ClientCapability::Sasl));
        }

        let Some(text) = args.first() else {
            return Err(CommandError::NotEnoughParameters("AUTHENTICATE"));
        };

        let conn_id = connection.id();
        let response = ConnectionResponse::new(&self.server_name, connection);

        let Some(shared) = self.sessions.get(&conn_id) else {
            if text == "*"
            {
                // Nothing to abort, but the client still learns it isn't authenticating
                response.numeric(numeric::SaslAborted::new());
                return Ok(());
            }

            // No session, so the argument is the mechanism name
            let mechanism: Mechanism = text.parse()?;
            let fingerprint = if mechanism.is_external() { connection.tls_fingerprint() } else { None };

            self.sessions.set(SaslSession::new(conn_id));
            tracing::trace!(%mechanism, "Starting SASL session");

            self.relay.send(self.relay.start(conn_id, &mechanism, fingerprint));
            return Ok(());
        };

        let step = {
            let mut session = shared.lock();
            let step = session.advance_from_client(args);
            if let ClientStep::Aborted(_) = step
            {
                session.announce(&response);
                session.discard();
            }
            step
        };

        match step
        {
            ClientStep::Swallowed =>
            {
                tracing::trace!("No agent bound yet; dropping client data");
            }
            ClientStep::Relay(agent, data) =>
            {
                self.relay.send(self.relay.client_data(conn_id, agent, data));
            }
            ClientStep::Aborted(relay_abort) =>
            {
                self.sessions.remove(&conn_id, &shared);

                if let Some((agent, data)) = relay_abort
                {
                    self.relay.send(self.relay.client_data(conn_id, agent, data));
                }
            }
        }

        Ok(())
    }
}
