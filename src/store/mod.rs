//! # Record Store
//!
//! Persistence for the `bootcamps` and `courses` collections.
//!
//! Operations only see the [`RecordStore`] trait. Lookups of absent documents
//! return `Ok(None)`; deciding whether that is a client error is left to the
//! caller.

pub mod errors;
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::geocoding::Coordinates;
use crate::model::{Bootcamp, Course};

pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryStore;

/// Document store over bootcamps and courses
#[async_trait]
pub trait RecordStore: Send + Sync {
    // ==================
    // Bootcamps
    // ==================

    /// Insert a new bootcamp; names are unique
    async fn insert_bootcamp(&self, bootcamp: Bootcamp) -> StoreResult<Bootcamp>;

    async fn find_bootcamp(&self, id: Uuid) -> StoreResult<Option<Bootcamp>>;

    /// All bootcamps, in insertion order
    async fn list_bootcamps(&self) -> StoreResult<Vec<Bootcamp>>;

    /// Replace a stored bootcamp; `None` if it no longer exists
    async fn replace_bootcamp(&self, bootcamp: Bootcamp) -> StoreResult<Option<Bootcamp>>;

    /// Remove a bootcamp together with every course referencing it.
    /// Returns the removed bootcamp and the number of courses removed.
    async fn remove_bootcamp(&self, id: Uuid) -> StoreResult<Option<(Bootcamp, usize)>>;

    /// Bootcamps whose location lies within the spherical cap of `radius`
    /// radians around `center`
    async fn bootcamps_within(&self, center: Coordinates, radius: f64)
        -> StoreResult<Vec<Bootcamp>>;

    async fn set_bootcamp_photo(&self, id: Uuid, photo: &str) -> StoreResult<Option<Bootcamp>>;

    async fn set_average_cost(&self, id: Uuid, average_cost: f64)
        -> StoreResult<Option<Bootcamp>>;

    // ==================
    // Courses
    // ==================

    /// Insert a course; its bootcamp must exist
    async fn insert_course(&self, course: Course) -> StoreResult<Course>;

    async fn find_course(&self, id: Uuid) -> StoreResult<Option<Course>>;

    /// Courses, optionally restricted to one bootcamp, in insertion order
    async fn list_courses(&self, bootcamp: Option<Uuid>) -> StoreResult<Vec<Course>>;

    async fn replace_course(&self, course: Course) -> StoreResult<Option<Course>>;

    async fn remove_course(&self, id: Uuid) -> StoreResult<Option<Course>>;

    /// Mean tuition over the courses of a bootcamp; `None` when it has none
    async fn average_tuition(&self, bootcamp: Uuid) -> StoreResult<Option<f64>>;
}
