extern crate proc_macro;

use proc_macro::TokenStream;

mod define_validated;

#[proc_macro]
pub fn define_validated(input: TokenStream) -> TokenStream
{
    define_validated::define_validated(input)
}

mod define_messages;

#[proc_macro]
pub fn define_messages(input: TokenStream) -> TokenStream
{
    define_messages::define_messages(input)
}
