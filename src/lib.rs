//! The transactional core of `wlr-output-management-unstable-v1`.
//!
//! Sessions observe the heads of the display through per-session proxies, propose new
//! layouts in configurations that are validated against a serial, and learn about the
//! outcome once the arbiter has decided.

#![allow(clippy::new_without_default, clippy::len_without_is_empty)]

#[macro_use]
mod macros;
pub mod backend;
pub mod client;
pub mod config;
pub mod ifs;
#[cfg(test)]
mod it;
pub mod logger;
pub mod object;
pub mod state;
pub mod utils;
pub mod wire;
