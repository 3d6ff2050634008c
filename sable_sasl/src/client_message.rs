/// A tokenised, but not yet processed, message from a client connection
#[derive(Debug)]
pub struct ClientMessage
{
    /// The command
    pub command: String,
    /// The list of arguments
    pub args: Vec<String>,
}

impl ClientMessage
{
    /// Create a `ClientMessage` from a received line. Message tags are
    /// skipped; nothing in the SASL exchange depends on them.
    pub fn parse(raw: &str) -> Option<Self>
    {
        let mut raw = raw.trim_start();

        if raw.starts_with('@')
        {
            let (_tags, rest) = raw.split_once(' ')?;
            raw = rest.trim_start();
        }

        if raw.is_empty()
        {
            return None;
        }

        let (command, mut rest) = match raw.split_once(' ')
        {
            Some((command, rest)) => (command, rest),
            None => (raw, ""),
        };

        let mut args = Vec::new();

        loop
        {
            if let Some(trailing) = rest.strip_prefix(':')
            {
                args.push(trailing.to_string());
                break;
            }

            match rest.split_once(' ')
            {
                Some((arg, remainder)) =>
                {
                    if !arg.is_empty()
                    {
                        args.push(arg.to_string());
                    }
                    rest = remainder;
                }
                None =>
                {
                    if !rest.is_empty()
                    {
                        args.push(rest.to_string());
                    }
                    break;
                }
            }
        }

        Some(Self {
            command: command.to_string(),
            args,
        })
    }
}
