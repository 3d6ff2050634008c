//! Client capability flags, as far as the SASL relay needs to see them.
//!
//! Negotiation itself (`CAP LS`/`CAP REQ`) happens elsewhere; this module only
//! provides the set type that a connection reports and the relay queries.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

macro_rules! define_capabilities {
    (
        $typename:ident
        {
            $( $cap:ident : $val:literal => $name:literal ),*
        }
    ) => {
        #[derive(Clone,Copy,Debug,PartialEq,Eq,Serialize,Deserialize)]
        #[derive(EnumIter)]
        #[repr(u64)]
        pub enum $typename
        {
            $( $cap = $val ),*
        }

        impl $typename
        {
            /// On-the-wire name of the capability
            pub fn name(self) -> &'static str
            {
                match self
                {
                    $( Self::$cap => $name ),*
                }
            }

            /// Bit used as a mask in [`ClientCapabilitySet`]
            pub fn flag(self) -> u64
            {
                self as u64
            }
        }

        impl std::fmt::Display for $typename
        {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
            {
                f.write_str(self.name())
            }
        }
    };
}

define_capabilities! (
    ClientCapability
    {
        Sasl:           0x08 => "sasl"
    }
);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCapabilitySet(u64);

impl ClientCapabilitySet
{
    pub fn new() -> Self
    {
        Self(0)
    }

    pub fn has(&self, cap: ClientCapability) -> bool
    {
        0 != self.0 & cap.flag()
    }

    pub fn set(&mut self, cap: ClientCapability)
    {
        self.0 |= cap.flag();
    }

    pub fn unset(&mut self, cap: ClientCapability)
    {
        self.0 &= !cap.flag();
    }

    pub fn iter(&self) -> impl Iterator<Item = ClientCapability> + '_
    {
        ClientCapability::iter().filter(|cap| self.has(*cap))
    }
}

/// Space-separated capability names, as in a `CAP LIST` reply
impl std::fmt::Display for ClientCapabilitySet
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
    {
        let names: Vec<_> = self.iter().map(ClientCapability::name).collect();
        f.write_str(&names.join(" "))
    }
}

impl FromIterator<ClientCapability> for ClientCapabilitySet
{
    fn from_iter<T: IntoIterator<Item = ClientCapability>>(iter: T) -> Self
    {
        let mut ret = Self::new();
        for cap in iter
        {
            ret.set(cap);
        }
        ret
    }
}
