use super::*;

/// Trait describing an object that can be the source of a client protocol message
pub trait MessageSource
{
    fn format(&self) -> String;
}

/// Trait describing an object that can be the target of a client protocol message
pub trait MessageTarget
{
    fn format(&self) -> String;
}

/// Placeholder type to denote that a message is being sent to a target whose name we
/// don't know - e.g. a pre-registration client that hasn't sent NICK yet
pub struct UnknownTarget;

impl MessageSource for ServerName
{
    fn format(&self) -> String { self.to_string() }
}

impl MessageTarget for UnknownTarget
{
    fn format(&self) -> String { "*".to_string() }
}

impl MessageTarget for str
{
    fn format(&self) -> String { self.to_string() }
}

impl<T: MessageTarget> MessageTarget for Option<T>
{
    fn format(&self) -> String
    {
        match self
        {
            Some(target) => target.format(),
            None => UnknownTarget.format(),
        }
    }
}

impl MessageTarget for String
{
    fn format(&self) -> String { self.clone() }
}
