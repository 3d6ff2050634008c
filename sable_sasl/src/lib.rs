//! SASL authentication relay for an IRC server.
//!
//! The server doesn't implement any SASL mechanism itself. A client's
//! `AUTHENTICATE` lines are wrapped in encapsulated `SASL` messages and sent
//! over the server link to an authentication agent (normally services); the
//! agent's replies come back the same way and are turned into `AUTHENTICATE`
//! challenges or the final 903/904/906 numerics.
//!
//! # Sessions
//!
//! Each connection has at most one [`SaslSession`](session::SaslSession),
//! held in the [`SessionStore`](store::SessionStore). The first agent to
//! reply to a session's start message is bound to it, and messages from any
//! other agent are ignored from then on. A session finishes when the agent
//! reports a result, the client sends `*`, or the server forces an abort
//! because the connection registered, disconnected or took too long.
//!
//! # Wiring
//!
//! The surrounding server provides:
//!
//! - a [`RelayTransport`](relay::RelayTransport) that puts messages on the
//!   server link, and a [`SaslFallback`](relay::SaslFallback) that takes over
//!   when the link can't deliver;
//! - [`SaslConnection`](connection::SaslConnection) for its client
//!   connections, and a [`ConnectionLookup`](connection::ConnectionLookup)
//!   to resolve connection IDs arriving from agents.
//!
//! and then calls [`SaslModule::dispatch`](module::SaslModule::dispatch) (or
//! `handle_authenticate`) for client lines, `handle_sasl_encap` for agent
//! messages, and `on_user_register`/`on_disconnect` as connections change.

pub mod capability;
pub mod client_message;
pub mod config;
pub mod connection;
pub mod errors;
pub mod handlers;
pub mod messages;
pub mod module;
pub mod relay;
pub mod session;
pub mod store;
pub mod validated;

pub mod prelude;
