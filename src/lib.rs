//! bootcamp-directory - a REST API for coding bootcamps and their courses
//!
//! - [`model`] - bootcamp and course records with their validation rules
//! - [`store`] - the record store trait and its in-memory implementation
//! - [`operations`] - use cases, response envelopes and the average cost maintainer
//! - [`query`] - filtering, sorting, projection and pagination of list endpoints
//! - [`geocoding`] - postal code and address lookup
//! - [`file_storage`] - photo persistence
//! - [`http_server`] - axum routers binding operations to HTTP

pub mod cli;
pub mod config;
pub mod file_storage;
pub mod geocoding;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod operations;
pub mod query;
pub mod seed;
pub mod store;
