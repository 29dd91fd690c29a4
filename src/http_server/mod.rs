//! # HTTP Server Module
//!
//! axum boundary for the bootcamp directory. Handlers extract path, query,
//! body and multipart input, call one operation, and turn its result into a
//! JSON response.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `{prefix}/bootcamps/*` - Bootcamp CRUD, radius search, photo upload
//! - `{prefix}/courses/*` and `{prefix}/bootcamps/:id/courses` - Course CRUD

pub mod bootcamp_routes;
pub mod course_routes;
pub mod observability_routes;
pub mod response;
pub mod server;
pub mod state;

pub use server::HttpServer;
pub use state::AppState;
