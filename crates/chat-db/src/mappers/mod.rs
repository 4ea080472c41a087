//! Row to entity mappers
//!
//! Rows holding enum columns convert with `TryFrom`, since the database could
//! in principle contain a value this build does not know.

mod channel;
mod member;
mod message;
mod profile;
mod server;
