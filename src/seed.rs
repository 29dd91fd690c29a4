//! # Seed Data
//!
//! Loads `bootcamps.json` and `courses.json` from a directory into a store.
//! Records carry their own ids so courses can reference their bootcamp.
//! Bootcamp addresses are geocoded best-effort, and every seeded bootcamp
//! gets its average cost computed once all courses are in.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::geocoding::Geocoder;
use crate::model::{Bootcamp, BootcampFields, Course, CourseFields, GeoPoint, ValidationError};
use crate::operations::AverageCostMaintainer;
use crate::store::{RecordStore, StoreError};

pub const BOOTCAMPS_FILE: &str = "bootcamps.json";
pub const COURSES_FILE: &str = "courses.json";

pub type SeedResult<T> = Result<T, SeedError>;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Cannot read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid seed record {id}: {source}")]
    Invalid { id: Uuid, source: ValidationError },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Deserialize)]
struct SeedBootcamp {
    id: Uuid,
    #[serde(flatten)]
    fields: BootcampFields,
}

#[derive(Debug, Deserialize)]
struct SeedCourse {
    id: Uuid,
    bootcamp: Uuid,
    #[serde(flatten)]
    fields: CourseFields,
}

/// Counts of what a seed run inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub bootcamps: usize,
    pub courses: usize,
}

/// Load the seed directory into `store`. A missing `courses.json` is allowed.
pub async fn seed_directory(
    dir: &Path,
    store: Arc<dyn RecordStore>,
    geocoder: Arc<dyn Geocoder>,
) -> SeedResult<SeedSummary> {
    let bootcamps: Vec<SeedBootcamp> = read_records(&dir.join(BOOTCAMPS_FILE))?;
    let courses_path = dir.join(COURSES_FILE);
    let courses: Vec<SeedCourse> = if courses_path.exists() {
        read_records(&courses_path)?
    } else {
        Vec::new()
    };

    let mut summary = SeedSummary::default();
    let mut seeded = Vec::with_capacity(bootcamps.len());

    for record in bootcamps {
        let mut bootcamp = Bootcamp::new(record.fields).map_err(|source| SeedError::Invalid {
            id: record.id,
            source,
        })?;
        bootcamp.id = record.id;

        match geocoder.geocode(&bootcamp.address).await {
            Ok(location) => bootcamp.location = Some(GeoPoint::from(location)),
            Err(e) => warn!(bootcamp = %bootcamp.id, error = %e, "Seed address not geocoded"),
        }

        store.insert_bootcamp(bootcamp).await?;
        seeded.push(record.id);
        summary.bootcamps += 1;
    }

    for record in courses {
        let mut course = Course::new(record.bootcamp, record.fields).map_err(|source| {
            SeedError::Invalid {
                id: record.id,
                source,
            }
        })?;
        course.id = record.id;

        store.insert_course(course).await?;
        summary.courses += 1;
    }

    let maintainer = AverageCostMaintainer::new(store);
    for id in seeded {
        maintainer.refresh(id).await;
    }

    info!(
        bootcamps = summary.bootcamps,
        courses = summary.courses,
        dir = %dir.display(),
        "Seed data loaded"
    );
    Ok(summary)
}

fn read_records<T: serde::de::DeserializeOwned>(path: &Path) -> SeedResult<Vec<T>> {
    let content = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
