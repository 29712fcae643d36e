pub mod aggregate;
pub mod board;
pub mod classify;
pub mod config;
pub mod fetch;
pub mod parse;
pub mod schema;
