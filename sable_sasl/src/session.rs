//! Per-connection SASL session state.
//!
//! A [`SaslSession`] tracks one authentication attempt between a local client
//! and a remote agent. It never interprets the mechanism; it only decides,
//! for each message from either side, whether to pass it on, ignore it, or
//! finish the exchange.

use crate::messages::{message, numeric, CommandResponse};
use crate::relay::AgentMessage;
use crate::validated::*;

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaslState
{
    /// The start message has been sent; no agent has answered yet
    Init,
    /// An agent has claimed the session and payloads are flowing
    Negotiating,
    /// A result has been reached; the session is about to be discarded
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaslResult
{
    Pending,
    Success,
    Failure,
    Aborted,
}

impl SaslResult
{
    /// Interpret the status token of a `D` message from an agent
    pub fn from_status(status: &str) -> Self
    {
        match status
        {
            "F" => Self::Failure,
            "A" => Self::Aborted,
            _ => Self::Success,
        }
    }
}

/// What should happen to a line of client data fed into a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientStep
{
    /// Nothing is relayed; the line is dropped
    Swallowed,
    /// Relay the data to the bound agent
    Relay(AgentId, Vec<String>),
    /// The client gave up. If an agent is bound, the abort is relayed to it too.
    Aborted(Option<(AgentId, Vec<String>)>),
}

#[derive(Debug, Clone)]
pub struct SaslSession
{
    connection: ConnectionId,
    agent: Option<AgentId>,
    state: SaslState,
    result: SaslResult,
    announced: bool,
    discarded: bool,
    created: Instant,
}

impl SaslSession
{
    pub fn new(connection: ConnectionId) -> Self
    {
        Self {
            connection,
            agent: None,
            state: SaslState::Init,
            result: SaslResult::Pending,
            announced: false,
            discarded: false,
            created: Instant::now(),
        }
    }

    pub fn connection(&self) -> ConnectionId
    {
        self.connection
    }

    /// The agent bound to this session, once one has replied
    pub fn agent(&self) -> Option<AgentId>
    {
        self.agent
    }

    pub fn state(&self) -> SaslState
    {
        self.state
    }

    /// The outcome of the exchange; only available once the session is done
    pub fn result(&self) -> Option<SaslResult>
    {
        (self.state == SaslState::Done).then_some(self.result)
    }

    pub fn is_announced(&self) -> bool
    {
        self.announced
    }

    /// Whether the session has been taken out of the store. Anyone still
    /// holding it must leave it alone.
    pub fn is_discarded(&self) -> bool
    {
        self.discarded
    }

    pub fn is_expired(&self, timeout: Duration) -> bool
    {
        self.created.elapsed() >= timeout
    }

    /// Process a message from an agent, forwarding any challenge to the client.
    ///
    /// The first agent to reply is bound to the session; anything from another
    /// agent after that is ignored.
    pub fn advance_from_agent(&mut self, msg: &AgentMessage, response: &dyn CommandResponse) -> SaslState
    {
        if self.discarded
        {
            return self.state;
        }

        match self.state
        {
            SaslState::Init =>
            {
                self.agent = Some(msg.agent);
                response.send(message::Authenticate::new(challenge(msg.payload())));
                self.state = SaslState::Negotiating;
                tracing::trace!(connection = %self.connection, agent = %msg.agent, "SASL session bound to agent");
            }
            SaslState::Negotiating =>
            {
                if self.agent != Some(msg.agent)
                {
                    tracing::trace!(connection = %self.connection, agent = %msg.agent, "Ignoring SASL message from unbound agent");
                    return self.state;
                }

                if msg.is_done()
                {
                    self.state = SaslState::Done;
                    self.result = SaslResult::from_status(msg.payload());
                    tracing::trace!(connection = %self.connection, result = ?self.result, "SASL session finished");
                }
                else
                {
                    response.send(message::Authenticate::new(challenge(msg.payload())));
                }
            }
            SaslState::Done => { }
        }

        self.state
    }

    /// Process the parameters of an `AUTHENTICATE` line sent after the session
    /// was started.
    ///
    /// A first parameter of exactly `*` aborts the session.
    pub fn advance_from_client(&mut self, data: &[String]) -> ClientStep
    {
        let aborting = data.first().map(|d| d == "*").unwrap_or(false);

        match (self.state, self.agent)
        {
            (SaslState::Negotiating, Some(agent)) =>
            {
                if aborting
                {
                    self.abort();
                    ClientStep::Aborted(Some((agent, data.to_vec())))
                }
                else
                {
                    ClientStep::Relay(agent, data.to_vec())
                }
            }
            (SaslState::Init, _) if aborting =>
            {
                self.abort();
                ClientStep::Aborted(None)
            }
            _ => ClientStep::Swallowed,
        }
    }

    /// Finish the session as aborted. A session that already has a result keeps it.
    pub fn abort(&mut self)
    {
        if self.state != SaslState::Done
        {
            self.state = SaslState::Done;
            self.result = SaslResult::Aborted;
            tracing::trace!(connection = %self.connection, "SASL session aborted");
        }
    }

    /// Finish the session and mark it as removed from the store, so that a
    /// handler which fetched it earlier neither advances nor announces it
    pub fn discard(&mut self)
    {
        self.abort();
        self.discarded = true;
    }

    /// Tell the client how the exchange ended. Only the first call on a
    /// finished session sends anything.
    pub fn announce(&mut self, response: &dyn CommandResponse)
    {
        if self.announced || self.discarded
        {
            return;
        }

        match self.result()
        {
            Some(SaslResult::Success) => response.numeric(numeric::SaslSuccess::new()),
            Some(SaslResult::Failure) => response.numeric(numeric::SaslFail::new()),
            Some(SaslResult::Aborted) => response.numeric(numeric::SaslAborted::new()),
            Some(SaslResult::Pending) | None => return,
        }

        self.announced = true;
    }
}

/// An empty challenge is sent as `+`
fn challenge(payload: &str) -> &str
{
    if payload.is_empty() { "+" } else { payload }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::messages::{OutboundClientMessage, UntargetedNumeric};
    use crate::relay::RelayMode;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Replies(Mutex<Vec<String>>);

    impl CommandResponse for Replies
    {
        fn send(&self, msg: OutboundClientMessage)
        {
            self.0.lock().push(msg.content().to_string());
        }

        fn numeric(&self, numeric: UntargetedNumeric)
        {
            self.0.lock().push(numeric.code().to_string());
        }
    }

    impl Replies
    {
        fn take(&self) -> Vec<String>
        {
            std::mem::take(&mut *self.0.lock())
        }
    }

    fn session() -> SaslSession
    {
        SaslSession::new(ConnectionId::convert("001AAAAAB").unwrap())
    }

    fn agent_msg(agent: &str, mode: RelayMode, data: &[&str]) -> AgentMessage
    {
        AgentMessage {
            agent: AgentId::convert(agent).unwrap(),
            target: ConnectionId::convert("001AAAAAB").unwrap(),
            mode,
            data: data.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn line(data: &str) -> Vec<String>
    {
        vec![data.to_string()]
    }

    #[test]
    fn first_agent_reply_binds_agent()
    {
        let replies = Replies::default();
        let mut session = session();

        assert_eq!(session.agent(), None);
        assert_eq!(session.advance_from_agent(&agent_msg("00A", RelayMode::Client, &["+"]), &replies), SaslState::Negotiating);
        assert_eq!(session.agent(), Some(AgentId::convert("00A").unwrap()));
        assert_eq!(replies.take(), vec!["AUTHENTICATE +"]);
    }

    #[test]
    fn other_agents_are_ignored()
    {
        let replies = Replies::default();
        let mut session = session();

        session.advance_from_agent(&agent_msg("00A", RelayMode::Client, &["+"]), &replies);
        replies.take();

        assert_eq!(session.advance_from_agent(&agent_msg("00B", RelayMode::Client, &["AQID"]), &replies), SaslState::Negotiating);
        assert_eq!(session.advance_from_agent(&agent_msg("00B", RelayMode::Done, &["S"]), &replies), SaslState::Negotiating);

        assert_eq!(session.agent(), Some(AgentId::convert("00A").unwrap()));
        assert_eq!(session.result(), None);
        assert!(replies.take().is_empty());
    }

    #[test]
    fn done_status_sets_result()
    {
        for (status, expected) in [("F", SaslResult::Failure), ("A", SaslResult::Aborted), ("S", SaslResult::Success), ("", SaslResult::Success)]
        {
            let replies = Replies::default();
            let mut session = session();
            session.advance_from_agent(&agent_msg("00A", RelayMode::Client, &["+"]), &replies);

            assert_eq!(session.advance_from_agent(&agent_msg("00A", RelayMode::Done, &[status]), &replies), SaslState::Done);
            assert_eq!(session.result(), Some(expected));
        }
    }

    #[test]
    fn empty_challenge_is_sent_as_plus()
    {
        let replies = Replies::default();
        let mut session = session();

        session.advance_from_agent(&agent_msg("00A", RelayMode::Client, &[]), &replies);
        session.advance_from_agent(&agent_msg("00A", RelayMode::Client, &["AQID"]), &replies);

        assert_eq!(replies.take(), vec!["AUTHENTICATE +", "AUTHENTICATE AQID"]);
    }

    #[test]
    fn client_data_before_agent_reply_is_swallowed()
    {
        let mut session = session();
        assert_eq!(session.advance_from_client(&line("dGVzdA==")), ClientStep::Swallowed);
        assert_eq!(session.state(), SaslState::Init);
    }

    #[test]
    fn client_data_is_relayed_to_bound_agent()
    {
        let replies = Replies::default();
        let mut session = session();
        session.advance_from_agent(&agent_msg("00A", RelayMode::Client, &["+"]), &replies);

        assert_eq!(
            session.advance_from_client(&line("dGVzdA==")),
            ClientStep::Relay(AgentId::convert("00A").unwrap(), line("dGVzdA=="))
        );
        assert_eq!(session.state(), SaslState::Negotiating);
    }

    #[test]
    fn client_abort_from_any_state()
    {
        let mut unbound = session();
        assert_eq!(unbound.advance_from_client(&line("*")), ClientStep::Aborted(None));
        assert_eq!(unbound.result(), Some(SaslResult::Aborted));

        let replies = Replies::default();
        let mut bound = session();
        bound.advance_from_agent(&agent_msg("00A", RelayMode::Client, &["+"]), &replies);
        assert_eq!(
            bound.advance_from_client(&line("*")),
            ClientStep::Aborted(Some((AgentId::convert("00A").unwrap(), line("*"))))
        );
        assert_eq!(bound.state(), SaslState::Done);
        assert_eq!(bound.result(), Some(SaslResult::Aborted));
    }

    #[test]
    fn only_a_lone_star_aborts()
    {
        let replies = Replies::default();
        let mut session = session();
        session.advance_from_agent(&agent_msg("00A", RelayMode::Client, &["+"]), &replies);

        assert!(matches!(session.advance_from_client(&line("*abc")), ClientStep::Relay(..)));
        assert_eq!(session.state(), SaslState::Negotiating);
    }

    #[test]
    fn abort_keeps_existing_result()
    {
        let replies = Replies::default();
        let mut session = session();
        session.advance_from_agent(&agent_msg("00A", RelayMode::Client, &["+"]), &replies);
        session.advance_from_agent(&agent_msg("00A", RelayMode::Done, &["S"]), &replies);

        session.abort();
        assert_eq!(session.result(), Some(SaslResult::Success));
    }

    #[test]
    fn announce_exactly_once()
    {
        let replies = Replies::default();
        let mut session = session();

        // Nothing to announce while the exchange is still running
        session.announce(&replies);
        assert!(!session.is_announced());
        assert!(replies.take().is_empty());

        session.abort();
        session.announce(&replies);
        session.announce(&replies);

        assert!(session.is_announced());
        assert_eq!(replies.take(), vec!["906"]);
    }

    #[test]
    fn announce_maps_results_to_numerics()
    {
        for (status, code) in [("S", "903"), ("F", "904"), ("A", "906")]
        {
            let replies = Replies::default();
            let mut session = session();
            session.advance_from_agent(&agent_msg("00A", RelayMode::Client, &["+"]), &replies);
            session.advance_from_agent(&agent_msg("00A", RelayMode::Done, &[status]), &replies);
            replies.take();

            session.announce(&replies);
            assert_eq!(replies.take(), vec![code]);
        }
    }

    #[test]
    fn discarded_session_is_inert()
    {
        let replies = Replies::default();
        let mut session = session();
        session.advance_from_agent(&agent_msg("00A", RelayMode::Client, &["+"]), &replies);
        replies.take();

        session.discard();
        assert!(session.is_discarded());
        assert_eq!(session.result(), Some(SaslResult::Aborted));

        session.advance_from_agent(&agent_msg("00A", RelayMode::Client, &["AQID"]), &replies);
        session.announce(&replies);

        assert!(!session.is_announced());
        assert!(replies.take().is_empty());
    }

    #[test]
    fn announced_before_discard_stays_announced()
    {
        let replies = Replies::default();
        let mut session = session();

        session.abort();
        session.announce(&replies);
        session.discard();
        session.announce(&replies);

        assert!(session.is_announced());
        assert_eq!(replies.take(), vec!["906"]);
    }

    #[test]
    fn expiry()
    {
        let session = session();
        assert!(session.is_expired(Duration::ZERO));
        assert!(!session.is_expired(Duration::from_secs(3600)));
    }
}
