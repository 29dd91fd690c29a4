//! # Course Operations

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::aggregate::AverageCostMaintainer;
use super::envelope::{Collection, Shaped, Single};
use super::errors::{ApiError, ApiResult};
use crate::model::{Course, CourseDetail, CourseFields};
use crate::query::ListQuery;
use crate::store::RecordStore;

/// Course list response: plain for one bootcamp, shaped otherwise
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CourseListing {
    Bootcamp(Collection<Course>),
    All(Shaped),
}

/// Course use cases
#[derive(Clone)]
pub struct CourseService {
    store: Arc<dyn RecordStore>,
    maintainer: AverageCostMaintainer,
}

impl CourseService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            maintainer: AverageCostMaintainer::new(store.clone()),
            store,
        }
    }

    /// Courses of one bootcamp, or every course shaped by `query`
    pub async fn list(&self, bootcamp: Option<Uuid>, query: &ListQuery) -> ApiResult<CourseListing> {
        if let Some(bootcamp_id) = bootcamp {
            let courses = self.store.list_courses(Some(bootcamp_id)).await?;
            return Ok(CourseListing::Bootcamp(Collection::new(courses)));
        }

        let records = self
            .store
            .list_courses(None)
            .await?
            .into_iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CourseListing::All(Shaped::new(query.apply(records))))
    }

    /// One course with its bootcamp's name and description
    pub async fn get_by_id(&self, id: Uuid) -> ApiResult<Single<CourseDetail>> {
        let course = self.find(id).await?;
        let owner = self.store.find_bootcamp(course.bootcamp).await?;

        Ok(Single::new(course.with_owner(owner.as_ref())))
    }

    /// Add a course to an existing bootcamp
    pub async fn create(&self, bootcamp_id: Uuid, fields: CourseFields) -> ApiResult<Single<Course>> {
        if self.store.find_bootcamp(bootcamp_id).await?.is_none() {
            return Err(ApiError::NotFound(format!(
                "No bootcamp found with the id of {}",
                bootcamp_id
            )));
        }

        let course = Course::new(bootcamp_id, fields)?;
        let course = self.store.insert_course(course).await?;
        info!(course = %course.id, bootcamp = %bootcamp_id, "Course created");

        self.maintainer.refresh(bootcamp_id).await;
        Ok(Single::new(course))
    }

    pub async fn update(&self, id: Uuid, fields: CourseFields) -> ApiResult<Single<Course>> {
        let current = self.find(id).await?;
        let next = current.merged(fields)?;

        let updated = self
            .store
            .replace_course(next)
            .await?
            .ok_or_else(|| ApiError::course_not_found(id))?;
        info!(course = %id, "Course updated");

        self.maintainer.refresh(updated.bootcamp).await;
        Ok(Single::new(updated))
    }

    /// Remove a course, then refresh its bootcamp's average without it
    pub async fn delete(&self, id: Uuid) -> ApiResult<Single<Course>> {
        let removed = self
            .store
            .remove_course(id)
            .await?
            .ok_or_else(|| ApiError::course_not_found(id))?;
        info!(course = %id, bootcamp = %removed.bootcamp, "Course deleted");

        self.maintainer.refresh(removed.bootcamp).await;
        Ok(Single::new(removed))
    }

    async fn find(&self, id: Uuid) -> ApiResult<Course> {
        self.store
            .find_course(id)
            .await?
            .ok_or_else(|| ApiError::course_not_found(id))
    }
}
