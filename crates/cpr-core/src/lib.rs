pub mod config;
pub mod logging;

// Resolver modules
pub mod authority;
pub mod document;
pub mod events;
pub mod filename;
pub mod fixture;
pub mod provider;
pub mod resolve;
pub mod uri;
