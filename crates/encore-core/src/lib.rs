//! # encore-core
//!
//! Core types, traits, configuration, and error handling for the Encore bot.

pub mod config;
pub mod error;
pub mod message;
pub mod traits;
