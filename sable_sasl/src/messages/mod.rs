//! Client protocol messages emitted by the SASL relay

use crate::validated::*;

pub mod message;
pub mod numeric;

mod source_target;
pub use source_target::*;

mod response;
pub use response::*;

/// A numeric reply that does not yet know its source and target.
///
/// Handlers construct these through the types in [`numeric`]; the
/// [`CommandResponse`] that delivers them fills in the server name and the
/// client's current nickname (or `*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntargetedNumeric
{
    numeric_code: &'static str,
    args: String,
}

impl UntargetedNumeric
{
    /// Create a new numeric
    pub fn new(numeric_code: &'static str, args: String) -> Self
    {
        Self { numeric_code, args }
    }

    /// The three-digit numeric code
    pub fn code(&self) -> &'static str
    {
        self.numeric_code
    }

    /// Provide the source and target information required to convert this to an [`OutboundClientMessage`]
    pub fn format_for(&self, source: &(impl MessageSource + ?Sized), target: &(impl MessageTarget + ?Sized)) -> OutboundClientMessage
    {
        OutboundClientMessage::new(format!(":{} {} {} {}", source.format(), self.numeric_code, target.format(), self.args))
    }
}

/// A server-to-client protocol message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundClientMessage
{
    content: String,
}

impl OutboundClientMessage
{
    /// Create a new message
    pub fn new(content: String) -> Self
    {
        Self { content }
    }

    /// The message text, without line terminator
    pub fn content(&self) -> &str
    {
        &self.content
    }
}

impl std::fmt::Display for OutboundClientMessage
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
    {
        f.write_str(&self.content)
    }
}
