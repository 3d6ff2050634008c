use super::*;

use proc_macro2::Span;
use quote::quote;
use syn::{
    parenthesized,
    parse_macro_input,
    Result,
    Block,
    Type,
    Ident,
    token,
};
use syn::parse::{Parse, ParseStream};

struct ValidatedDefnList
{
    items: Vec<ValidatedDefn>
}

struct ValidatedDefn
{
    name: Ident,
    _paren: token::Paren,
    utype: Type,
    body: Block,
}

impl Parse for ValidatedDefnList
{
    fn parse(input: ParseStream) -> Result<Self>
    {
        let mut out = Vec::new();
        while !input.is_empty()
        {
            out.push(ValidatedDefn::parse(input)?);
        }
        Ok(Self{items: out})
    }
}

impl Parse for ValidatedDefn
{
    fn parse(input: ParseStream) -> Result<Self>
    {
        let content;

        Ok(Self {
            name: input.parse()?,
            _paren: parenthesized!(content in input),
            utype: content.parse()?,
            body: input.parse()?,
        })
    }
}

/// Expands each `Name(Underlying) { body }` item into a newtype wrapper, an
/// `InvalidNameError` type, and the conversions that route every construction
/// path through `body`.
pub fn define_validated(input: TokenStream) -> TokenStream
{
    let input = parse_macro_input!(input as ValidatedDefnList);

    let mut out = proc_macro2::TokenStream::new();

    for def in input.items
    {
        let name = def.name;
        let typename = def.utype;
        let body = def.body;

        let error = Ident::new(&format!("Invalid{}Error", name), Span::call_site());
        let error_str = format!("Invalid value for {}: {{0}}", name);

        out.extend(quote!(
            #[derive(Debug,Clone,PartialEq,Eq,Error)]
            #[error(#error_str)]
            pub struct #error(pub String);

            impl From<StringValidationError> for #error
            {
                fn from(e: StringValidationError) -> Self { Self(e.0) }
            }

            #[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,serde::Serialize,serde::Deserialize)]
            pub struct #name(#typename);

            impl #name
            {
                fn error(s: impl std::string::ToString) -> std::result::Result<(), #error>
                {
                    Err(#error (s.to_string()))
                }
            }

            impl crate::validated::Validated for #name
            {
                type Underlying = #typename;
                type Error = #error;

                fn validate(value: &#typename) -> std::result::Result<(), #error>
                #body

                fn new(arg: #typename) -> std::result::Result<Self, #error>
                {
                    Self::validate(&arg)?;
                    Ok(Self(arg))
                }

                fn value(&self) -> &Self::Underlying
                {
                    &self.0
                }

                fn convert(arg: impl std::string::ToString) -> std::result::Result<Self, #error>
                {
                    <Self as std::convert::TryFrom<String>>::try_from(arg.to_string())
                }
            }

            impl std::str::FromStr for #name
            {
                type Err = #error;

                fn from_str(arg: &str) -> std::result::Result<Self, Self::Err>
                {
                    match <#typename as std::convert::TryFrom<&str>>::try_from(arg)
                    {
                        Ok(val) => <Self as crate::validated::Validated>::new(val),
                        Err(_) => Err(#error(arg.to_string())),
                    }
                }
            }

            impl std::convert::TryFrom<#typename> for #name
            {
                type Error = #error;
                fn try_from(arg: #typename) -> std::result::Result<Self, Self::Error>
                {
                    <Self as crate::validated::Validated>::new(arg)
                }
            }

            impl std::convert::TryFrom<String> for #name
            {
                type Error = #error;
                fn try_from(arg: String) -> std::result::Result<Self, Self::Error>
                {
                    <Self as std::str::FromStr>::from_str(&arg)
                }
            }

            impl std::convert::TryFrom<&str> for #name
            {
                type Error = #error;
                fn try_from(arg: &str) -> std::result::Result<Self, Self::Error>
                {
                    <Self as std::str::FromStr>::from_str(arg)
                }
            }

            impl std::fmt::Display for #name where #typename: std::fmt::Display
            {
                fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
                {
                    self.0.fmt(f)
                }
            }

            impl std::convert::AsRef<str> for #name
            {
                fn as_ref(&self) -> &str
                {
                    self.0.as_ref()
                }
            }
        ));
    }

    out.into()
}
