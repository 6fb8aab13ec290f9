//! # LaneSight API Server Library
//!
//! Backend for the LaneSight marketing site: email registration, video
//! upload metadata recording, and an admin listing with summary stats.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Admin key gate and security headers
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
