pub mod commands;
pub mod config;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod relay;
pub mod reply;
pub mod resolver;
pub mod telegram;
pub mod telemetry;
pub mod twitter;
