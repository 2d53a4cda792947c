//! Core module - engine configuration

pub mod config;

pub use config::Config;
