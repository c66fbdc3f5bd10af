//! Sonrisas Admin command-line client

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod transport;
pub mod upload;
