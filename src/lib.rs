pub mod application;
pub mod commands;
pub mod github;
pub mod http;
pub mod runtime;
