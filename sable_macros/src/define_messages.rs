use super::*;

use quote::quote;
use syn::{
    parse_macro_input,
    braced,
    parenthesized,
    Token,
    Type,
    Result,
    Ident,
    LitStr,
    LitInt,
    token,
    punctuated::Punctuated,
};
use syn::parse::{Parse, ParseStream};

mod kw
{
    syn::custom_keyword!(source);
    syn::custom_keyword!(target);
}

enum MessageArg
{
    Source(kw::source),
    Target(kw::target),
    Arg(MessageArgDefn),
}

struct MessageArgDefn
{
    name: Ident,
    _colon: Token![:],
    typename: Type,
}

struct MessageDefn
{
    numeric: Option<LitInt>,
    typename: Ident,
    _arrow1: Token![=>],
    _brace: token::Brace,
    _paren: token::Paren,
    args: Punctuated<MessageArg, Token![,]>,
    _arrow2: Token![=>],
    value: LitStr,
}

struct MessageDefnList
{
    messages: Punctuated<MessageDefn, Token![,]>
}

impl Parse for MessageArg
{
    fn parse(input: ParseStream) -> Result<Self>
    {
        let lookahead = input.lookahead1();
        if lookahead.peek(kw::source)
        {
            Ok(Self::Source(input.parse()?))
        }
        else if lookahead.peek(kw::target)
        {
            Ok(Self::Target(input.parse()?))
        }
        else
        {
            Ok(Self::Arg(input.parse()?))
        }
    }
}

impl Parse for MessageArgDefn
{
    fn parse(input: ParseStream) -> Result<Self>
    {
        Ok(Self {
            name: input.parse()?,
            _colon: input.parse()?,
            typename: input.parse()?,
        })
    }
}

impl Parse for MessageDefn
{
    fn parse(input: ParseStream) -> Result<Self>
    {
        let content1;
        let content2;

        // Numerics are written `903(SaslSuccess)`, plain messages just `Authenticate`
        let (numeric, typename): (Option<LitInt>, Ident) = if input.peek(LitInt)
        {
            let number: LitInt = input.parse()?;
            let inner;
            let _paren: token::Paren = parenthesized!(inner in input);
            (Some(number), inner.parse()?)
        }
        else
        {
            (None, input.parse()?)
        };

        Ok(Self {
            numeric,
            typename,
            _arrow1: input.parse()?,
            _brace: braced!(content1 in input),
            _paren: parenthesized!(content2 in content1),
            args: content2.parse_terminated(MessageArg::parse)?,
            _arrow2: content1.parse()?,
            value: content1.parse()?
        })
    }
}

impl Parse for MessageDefnList
{
    fn parse(input: ParseStream) -> Result<Self>
    {
        Ok(Self {
            messages: input.parse_terminated(MessageDefn::parse)?
        })
    }
}

pub fn define_messages(input: TokenStream) -> TokenStream
{
    let input = parse_macro_input!(input as MessageDefnList);

    let mut out = proc_macro2::TokenStream::new();

    for message in input.messages
    {
        let typename = message.typename;
        let format_str = message.value;

        let mut fn_args = Vec::new();
        let mut format_args = Vec::new();

        for arg in message.args
        {
            match arg
            {
                MessageArg::Source(_) => {
                    fn_args.push(quote!(source: &(impl crate::messages::MessageSource + ?Sized)));
                    format_args.push(quote!(source = source.format()));
                }
                MessageArg::Target(_) => {
                    fn_args.push(quote!(target: &(impl crate::messages::MessageTarget + ?Sized)));
                    format_args.push(quote!(target = target.format()));
                }
                MessageArg::Arg(arg) => {
                    let name = arg.name;
                    let argtype = arg.typename;
                    fn_args.push(quote!(#name: #argtype));
                    format_args.push(quote!(#name = #name));
                }
            }
        }

        let definition = match message.numeric
        {
            Some(number) => {
                let code = number.to_string();
                quote!(
                    #[derive(Debug)]
                    pub struct #typename;

                    impl #typename
                    {
                        pub const CODE: &'static str = #code;

                        pub fn new( #( #fn_args ),* ) -> crate::messages::UntargetedNumeric
                        {
                            crate::messages::UntargetedNumeric::new(Self::CODE, format!(#format_str #(, #format_args)* ))
                        }
                    }
                )
            }
            None => {
                quote!(
                    #[derive(Debug)]
                    pub struct #typename;

                    impl #typename
                    {
                        pub fn new( #( #fn_args ),* ) -> crate::messages::OutboundClientMessage
                        {
                            crate::messages::OutboundClientMessage::new(format!(#format_str #(, #format_args)* ))
                        }
                    }
                )
            }
        };

        out.extend(definition);
    }

    out.into()
}
