//! Entry points for the two sides of the relay: client commands and
//! messages from agents

use crate::prelude::*;

mod authenticate;
mod encap;

pub use encap::RouteResult;
