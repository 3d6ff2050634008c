use sable_macros::define_messages;

define_messages! {
    // SASL
    Authenticate    => { (data: &str) => "AUTHENTICATE {data}" }
}
