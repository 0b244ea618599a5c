pub mod app;
pub mod config;
pub mod fetch;
pub mod import;
