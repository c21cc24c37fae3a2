// Infrastructure layer module
// Contains database adapters and external service integrations

pub mod repositories;
pub mod weather;
