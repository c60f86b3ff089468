pub mod category;
pub mod cli;
pub mod config;
pub mod db;
pub mod loader;
pub mod models;
pub mod resolver;
pub mod store;
