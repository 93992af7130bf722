pub mod advisory;
pub mod config;
pub mod error;
pub mod models;
