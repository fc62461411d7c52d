//! View state machines and the ports they are driven through.

pub mod create;
pub mod detail;
pub mod edit;
pub mod error;
pub mod fetch;
pub mod form;
pub mod list;
pub mod ports;
pub mod routes;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;
