//! Costura Core Library
//!
//! This crate provides the domain layer for the Costura Conectada
//! production tracker: garment workshops, fabric cuts, production
//! batches, piece receipts and workshop payments, stored through a
//! narrow document-store client and scoped to the signed-in account.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod auth;
pub mod config;
pub mod errors;
pub mod format;
pub mod i18n;
pub mod logging;
pub mod models;
pub mod repository;
pub mod services;
pub mod session;
pub mod stats;
pub mod store;
pub mod validation;

pub use config::AppConfig;
pub use errors::DomainError;
pub use services::AppServices;
