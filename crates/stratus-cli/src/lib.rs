pub mod args;
pub mod commands;
pub mod context;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod output;
