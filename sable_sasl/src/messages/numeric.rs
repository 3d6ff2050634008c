use sable_macros::define_messages;

define_messages! {
    461(NotEnoughParameters)    => { (command: &str)    => "{command} :Not enough parameters" },
    462(AlreadyRegistered)      => { ()                 => ":You are already connected and cannot handshake again" },

    903(SaslSuccess)            => { ()                 => ":SASL authentication successful" },
    904(SaslFail)               => { ()                 => ":SASL authentication failed" },
    906(SaslAborted)            => { ()                 => ":SASL authentication aborted" }
}
