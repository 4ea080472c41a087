//! Route handlers, one module per resource

pub mod channels;
pub mod health;
pub mod invites;
pub mod members;
pub mod messages;
pub mod profile;
pub mod servers;
pub mod socket;
pub mod uploads;
