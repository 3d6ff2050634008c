use crate::prelude::*;

use arc_swap::ArcSwap;
use std::sync::Arc;
use std::time::Duration;

const MIN_EXPIRY_PERIOD: Duration = Duration::from_millis(1);

/// The SASL relay for one IRC server.
///
/// Owns the live sessions and the outbound relay, and exposes the hooks the
/// rest of the server calls: the `AUTHENTICATE` command, inbound agent
/// messages, registration, disconnection and session expiry.
pub struct SaslModule
{
    pub(crate) server_name: ServerName,
    pub(crate) config: ArcSwap<SaslConfig>,
    pub(crate) relay: Relay,
    pub(crate) sessions: SessionStore,
}

impl SaslModule
{
    pub fn new(server_name: ServerName, config: SaslConfig, transport: Arc<dyn RelayTransport>, fallback: Arc<dyn SaslFallback>) -> Self
    {
        Self {
            server_name,
            relay: Relay::new(config.target.clone(), transport, fallback),
            config: ArcSwap::from_pointee(config),
            sessions: SessionStore::new(),
        }
    }

    /// Apply a new configuration. Sessions in progress keep running; their
    /// next outbound message uses the new target.
    pub fn reload(&self, config: SaslConfig)
    {
        tracing::debug!(?config, "Reloading SASL configuration");
        self.relay.set_target(config.target.clone());
        self.config.store(Arc::new(config));
    }

    pub fn config(&self) -> Arc<SaslConfig>
    {
        self.config.load_full()
    }

    pub fn server_name(&self) -> &ServerName
    {
        &self.server_name
    }

    pub fn sessions(&self) -> &SessionStore
    {
        &self.sessions
    }

    pub fn relay(&self) -> &Relay
    {
        &self.relay
    }

    /// Warn if the collaborators SASL depends on aren't present. Returns
    /// whether everything needed is available.
    pub fn check_collaborators(&self, accounts_available: bool, capabilities_available: bool) -> bool
    {
        if !accounts_available || !capabilities_available
        {
            tracing::warn!(accounts_available, capabilities_available,
                           "SASL is enabled, but account tracking or capability negotiation is missing; authentication will not work correctly");
            return false;
        }
        true
    }

    /// Process a parsed client line. Returns `false` if the command isn't one
    /// this module handles, in which case nothing has been done.
    pub fn dispatch(&self, connection: &dyn SaslConnection, message: &ClientMessage) -> bool
    {
        if !message.command.eq_ignore_ascii_case("AUTHENTICATE")
        {
            return false;
        }

        if let Err(error) = self.handle_authenticate(connection, &message.args)
        {
            tracing::debug!(%error, connection = %connection.id(), "AUTHENTICATE rejected");
            if let Some(numeric) = error.numeric()
            {
                ConnectionResponse::new(&self.server_name, connection).numeric(numeric);
            }
        }

        true
    }

    /// The connection has completed registration; any unfinished session is
    /// aborted and discarded.
    pub fn on_user_register(&self, connection: &ConnectionId) -> Option<SaslSession>
    {
        let shared = self.sessions.clear(connection)?;
        Some(Self::force_abort(&shared, None))
    }

    /// The connection has gone away; any session it had is aborted and discarded.
    pub fn on_disconnect(&self, connection: &ConnectionId) -> Option<SaslSession>
    {
        let shared = self.sessions.clear(connection)?;
        Some(Self::force_abort(&shared, None))
    }

    /// Abort and discard a session that has already been taken out of the
    /// store, announcing the abort through `response` if one is given.
    /// Returns the session's final state.
    fn force_abort(shared: &SharedSession, response: Option<&dyn CommandResponse>) -> SaslSession
    {
        let mut session = shared.lock();
        session.abort();
        if let Some(response) = response
        {
            session.announce(response);
        }
        session.discard();
        tracing::trace!(connection = %session.connection(), "Discarded SASL session");
        session.clone()
    }

    /// Abort every session older than the configured timeout, telling the
    /// client if it's still connected. Returns how many were aborted.
    pub fn expire_sessions(&self, lookup: &dyn ConnectionLookup) -> usize
    {
        let Some(timeout) = self.config().session_timeout() else {
            return 0;
        };

        let mut count = 0;

        for (connection, shared) in self.sessions.expired(timeout)
        {
            // Finished or replaced since the scan
            if !self.sessions.remove(&connection, &shared)
            {
                continue;
            }

            tracing::debug!(%connection, "SASL session timed out");

            match lookup.find(&connection)
            {
                Some(LookupTarget::Client(client)) =>
                {
                    Self::force_abort(&shared, Some(&ConnectionResponse::new(&self.server_name, client)));
                }
                _ =>
                {
                    Self::force_abort(&shared, None);
                }
            }

            count += 1;
        }

        count
    }

    /// Run [`expire_sessions`](Self::expire_sessions) every `period` until the
    /// returned task is aborted. Periods shorter than a millisecond are
    /// rounded up to one.
    pub fn spawn_expiry_task(self: Arc<Self>, lookup: Arc<dyn ConnectionLookup + Send + Sync>, period: Duration) -> tokio::task::JoinHandle<()>
    {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period.max(MIN_EXPIRY_PERIOD));
            loop
            {
                interval.tick().await;
                let count = self.expire_sessions(&*lookup);
                if count > 0
                {
                    tracing::trace!(count, "Expired SASL sessions");
                }
            }
        })
    }
}
