pub mod cli;
pub mod config;
pub mod error;
pub mod init;
pub mod models;
pub mod project;
pub mod services;

pub use error::LorebookError;
