use thiserror::Error;

use crate::capability::ClientCapability;
use crate::messages::{numeric, UntargetedNumeric};
use crate::validated::*;

/// Reasons a client command is rejected before it reaches the SASL state machine
#[derive(Debug, Error)]
pub enum CommandError
{
    /// Not enough arguments were provided
    #[error("Not enough parameters for {0}")]
    NotEnoughParameters(&'static str),
    /// The connection has already completed registration
    #[error("Connection is already registered")]
    AlreadyRegistered,
    /// The client hasn't negotiated a capability that the command depends on
    #[error("Capability {0} has not been negotiated")]
    CapabilityNotEnabled(ClientCapability),
    /// A given parameter (.0) wasn't valid for the expected type (.1)
    #[error("Invalid argument {0} for {1}")]
    InvalidArgument(String, String),
}

impl CommandError
{
    /// The numeric, if any, that tells the client why its command was rejected
    pub fn numeric(&self) -> Option<UntargetedNumeric>
    {
        match self
        {
            Self::NotEnoughParameters(command) => Some(numeric::NotEnoughParameters::new(command)),
            Self::AlreadyRegistered => Some(numeric::AlreadyRegistered::new()),
            // A client that sends a malformed mechanism name gets the same reply
            // as one whose mechanism the agent refused
            Self::InvalidArgument(..) => Some(numeric::SaslFail::new()),
            Self::CapabilityNotEnabled(_) => None,
        }
    }
}

impl From<InvalidMechanismError> for CommandError
{
    fn from(e: InvalidMechanismError) -> Self
    {
        Self::InvalidArgument(e.0, "mechanism".to_string())
    }
}

pub type CommandResult = Result<(), CommandError>;

/// An error encountered relaying a SASL message to or from an agent
#[derive(Debug, Error)]
pub enum RelayError
{
    /// No link to the configured agent target was available
    #[error("No route to SASL target {0}")]
    Unreachable(String),
    /// An inbound SASL message had too few fields
    #[error("SASL message has {0} parameters, at least 3 are required")]
    NotEnoughParameters(usize),
    #[error("{0}")]
    InvalidConnectionId(#[from] InvalidConnectionIdError),
    #[error("{0}")]
    InvalidAgentId(#[from] InvalidAgentIdError),
}
