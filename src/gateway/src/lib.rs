pub mod api_server;
pub mod config;
pub mod engine;
pub mod error;
pub mod path;
pub mod server;
