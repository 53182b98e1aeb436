pub mod config;
pub mod error;
pub mod guided;
pub mod sim;
pub mod types;
