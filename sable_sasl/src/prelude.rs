//! Collects commonly-used names for convenient import

pub use crate::{
    capability::*,
    client_message::ClientMessage,
    config::*,
    connection::*,
    errors::*,
    handlers::RouteResult,
    messages::{
        CommandResponse,
        ConnectionResponse,
        MessageSink,
        numeric,
        OutboundClientMessage,
        UntargetedNumeric,
    },
    module::SaslModule,
    relay::*,
    session::*,
    store::*,
    validated::*,
};
