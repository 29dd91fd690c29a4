//! # Data Model
//!
//! Bootcamps, their courses, and the validation rules applied on every write.

pub mod bootcamp;
pub mod course;
pub mod validation;

pub use bootcamp::{Bootcamp, BootcampFields, BootcampSummary, Career, GeoPoint, DEFAULT_PHOTO};
pub use course::{Course, CourseDetail, CourseFields, SkillLevel};
pub use validation::{ValidationError, ValidationResult};
