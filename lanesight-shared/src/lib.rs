//! # LaneSight Shared Library
//!
//! This crate contains the types and database layer shared between the
//! LaneSight API server and any tooling built on top of it.
//!
//! ## Module Organization
//!
//! - `models`: Database models (registrations, video uploads)
//! - `db`: Connection pool and migration runner
//! - `wizard`: The registration funnel flow model used by clients

pub mod db;
pub mod models;
pub mod wizard;
