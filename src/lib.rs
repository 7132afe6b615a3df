//! AI Directory - A catalog of AI tools, repositories and models
//!
//! This library provides the core functionality of the directory: the
//! catalog store, natural-language search and the HTTP API.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
