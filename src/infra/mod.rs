//! Infrastructure layer (adapters/implementations).
//!
//! This module contains IO-heavy integrations (HTTP, SQLite, clipboard, filesystem).

pub mod app_config;
pub mod clipboard;
pub mod db;
pub mod http;
pub mod watch;
