//! HTTP implementation of the docquery backend interface.
//!
//! `docquery-core` defines the [`DocumentBackend`](docquery_core::backend::DocumentBackend)
//! trait; this crate provides the reqwest client that speaks the actual
//! backend API, plus its wire DTOs and injected configuration.

pub mod config;
pub mod dto;
pub mod http_backend;

pub use config::BackendConfig;
pub use http_backend::HttpBackend;
