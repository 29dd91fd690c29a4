//! # Operations
//!
//! Bootcamp and course use cases. Every operation returns an [`ApiResult`]
//! holding the response envelope; translating it into an HTTP response is the
//! boundary's job.

pub mod aggregate;
pub mod bootcamps;
pub mod courses;
pub mod envelope;
pub mod errors;

pub use aggregate::{round_up_to_ten, AverageCostMaintainer};
pub use bootcamps::{BootcampService, PhotoUpload};
pub use courses::{CourseListing, CourseService};
pub use envelope::{Collection, Shaped, Single};
pub use errors::{ApiError, ApiResult};
