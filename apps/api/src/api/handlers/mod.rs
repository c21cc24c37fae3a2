// HTTP handlers, one module per resource

pub mod auth;
pub mod leagues;
pub mod matches;
pub mod teams;
