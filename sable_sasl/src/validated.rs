//! Validated string types for the identifiers that appear on the relay wire

use arrayvec::ArrayString;
use sable_macros::define_validated;
use thiserror::Error;

/// Base trait for validated string types.
pub trait Validated: Sized
{
    type Underlying;
    type Error;

    /// Check whether the provided value is valid according to this type's
    /// rules.
    fn validate(value: &Self::Underlying) -> Result<(), <Self as Validated>::Error>;

    /// Attempt to create a new instance using the given value. Returns `Ok(_)`
    /// if the value passes validation, and `Err(_)` if not.
    fn new(value: Self::Underlying) -> Result<Self, <Self as Validated>::Error>;

    /// Access the raw stored value
    fn value(&self) -> &Self::Underlying;

    /// Attempt to convert from anything that can be converted to a string.
    fn convert(arg: impl std::string::ToString) -> Result<Self, <Self as Validated>::Error>;
}

struct StringValidationError(String);
type StringValidationResult = Result<(), StringValidationError>;

fn check_allowed_chars(value: &str, allowed_chars: &[&str]) -> StringValidationResult
{
    for c in value.chars()
    {
        if !allowed_chars.iter().any(|s| s.contains(c))
        {
            return Err(StringValidationError(value.to_string()));
        }
    }
    Ok(())
}

/// A token is safe to place in a middle parameter position: non-empty, no
/// spaces or control characters, and not starting with ':'
fn check_protocol_token(value: &str) -> StringValidationResult
{
    if value.is_empty() || value.starts_with(':') || value.chars().any(|c| c <= ' ' || c == '\x7f')
    {
        return Err(StringValidationError(value.to_string()));
    }
    Ok(())
}

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGIT: &str = "0123456789";

define_validated! {
    ConnectionId(ArrayString<64>) {
        check_protocol_token(value)?;
        if value.as_str() == "*" {
            return Self::error(value);
        }
        Ok(())
    }

    AgentId(ArrayString<64>) {
        check_protocol_token(value)?;
        if value.as_str() == "*" {
            return Self::error(value);
        }
        Ok(())
    }

    Mechanism(ArrayString<20>) {
        check_allowed_chars(value, &[UPPER, LOWER, DIGIT, "-_"])?;
        if value.is_empty() {
            return Self::error(value);
        }
        Ok(())
    }

    ServerName(ArrayString<64>) {
        check_allowed_chars(value, &[UPPER, LOWER, DIGIT, "_-."])?;
        if let Some(first) = value.chars().next() {
            if DIGIT.contains(first) || first == '-' {
                return Self::error(value);
            }
        } else {
            return Self::error(value);
        }
        Ok(())
    }
}

impl Mechanism
{
    /// The mechanism name for which a client certificate fingerprint is
    /// forwarded to the agent
    pub const EXTERNAL: &'static str = "EXTERNAL";

    /// Whether this is the `EXTERNAL` mechanism. The comparison is exact, as
    /// mechanism names are sent verbatim to the agent.
    pub fn is_external(&self) -> bool
    {
        self.0.as_str() == Self::EXTERNAL
    }
}
