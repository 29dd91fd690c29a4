//! # In-Memory Record Store
//!
//! Both collections live behind one lock so the bootcamp cascade and the
//! course reference check see a consistent view. Guards are never held across
//! an await point.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::RecordStore;
use crate::geocoding::{angular_distance, Coordinates};
use crate::model::{Bootcamp, Course};

#[derive(Debug, Default)]
struct Collections {
    bootcamps: Vec<Bootcamp>,
    courses: Vec<Course>,
}

impl Collections {
    fn bootcamp_mut(&mut self, id: Uuid) -> Option<&mut Bootcamp> {
        self.bootcamps.iter_mut().find(|b| b.id == id)
    }

    fn name_taken(&self, name: &str, except: Uuid) -> bool {
        self.bootcamps
            .iter()
            .any(|b| b.id != except && b.name.eq_ignore_ascii_case(name))
    }
}

/// Record store kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Collections>> {
        self.data
            .read()
            .map_err(|_| StoreError::Backend("Lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Collections>> {
        self.data
            .write()
            .map_err(|_| StoreError::Backend("Lock poisoned".to_string()))
    }
}

fn duplicate_name(name: &str) -> StoreError {
    StoreError::Duplicate {
        field: "name".to_string(),
        value: name.to_string(),
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn insert_bootcamp(&self, bootcamp: Bootcamp) -> StoreResult<Bootcamp> {
        let mut data = self.write()?;
        if data.name_taken(&bootcamp.name, bootcamp.id) {
            return Err(duplicate_name(&bootcamp.name));
        }
        data.bootcamps.push(bootcamp.clone());
        Ok(bootcamp)
    }

    async fn find_bootcamp(&self, id: Uuid) -> StoreResult<Option<Bootcamp>> {
        Ok(self.read()?.bootcamps.iter().find(|b| b.id == id).cloned())
    }

    async fn list_bootcamps(&self) -> StoreResult<Vec<Bootcamp>> {
        Ok(self.read()?.bootcamps.clone())
    }

    async fn replace_bootcamp(&self, bootcamp: Bootcamp) -> StoreResult<Option<Bootcamp>> {
        let mut data = self.write()?;
        if data.name_taken(&bootcamp.name, bootcamp.id) {
            return Err(duplicate_name(&bootcamp.name));
        }
        match data.bootcamp_mut(bootcamp.id) {
            Some(slot) => {
                *slot = bootcamp.clone();
                Ok(Some(bootcamp))
            }
            None => Ok(None),
        }
    }

    async fn remove_bootcamp(&self, id: Uuid) -> StoreResult<Option<(Bootcamp, usize)>> {
        let mut data = self.write()?;
        let Some(pos) = data.bootcamps.iter().position(|b| b.id == id) else {
            return Ok(None);
        };

        let removed = data.bootcamps.remove(pos);
        let before = data.courses.len();
        data.courses.retain(|c| c.bootcamp != id);
        let cascaded = before - data.courses.len();

        Ok(Some((removed, cascaded)))
    }

    async fn bootcamps_within(
        &self,
        center: Coordinates,
        radius: f64,
    ) -> StoreResult<Vec<Bootcamp>> {
        Ok(self
            .read()?
            .bootcamps
            .iter()
            .filter(|b| {
                b.location
                    .as_ref()
                    .map(|loc| angular_distance(center, loc.position()) <= radius)
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn set_bootcamp_photo(&self, id: Uuid, photo: &str) -> StoreResult<Option<Bootcamp>> {
        let mut data = self.write()?;
        Ok(data.bootcamp_mut(id).map(|b| {
            b.photo = photo.to_string();
            b.clone()
        }))
    }

    async fn set_average_cost(
        &self,
        id: Uuid,
        average_cost: f64,
    ) -> StoreResult<Option<Bootcamp>> {
        let mut data = self.write()?;
        Ok(data.bootcamp_mut(id).map(|b| {
            b.average_cost = Some(average_cost);
            b.clone()
        }))
    }

    async fn insert_course(&self, course: Course) -> StoreResult<Course> {
        let mut data = self.write()?;
        if !data.bootcamps.iter().any(|b| b.id == course.bootcamp) {
            return Err(StoreError::MissingReference {
                collection: "bootcamp".to_string(),
                id: course.bootcamp.to_string(),
            });
        }
        data.courses.push(course.clone());
        Ok(course)
    }

    async fn find_course(&self, id: Uuid) -> StoreResult<Option<Course>> {
        Ok(self.read()?.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn list_courses(&self, bootcamp: Option<Uuid>) -> StoreResult<Vec<Course>> {
        Ok(self
            .read()?
            .courses
            .iter()
            .filter(|c| bootcamp.map_or(true, |id| c.bootcamp == id))
            .cloned()
            .collect())
    }

    async fn replace_course(&self, course: Course) -> StoreResult<Option<Course>> {
        let mut data = self.write()?;
        match data.courses.iter_mut().find(|c| c.id == course.id) {
            Some(slot) => {
                *slot = course.clone();
                Ok(Some(course))
            }
            None => Ok(None),
        }
    }

    async fn remove_course(&self, id: Uuid) -> StoreResult<Option<Course>> {
        let mut data = self.write()?;
        Ok(data
            .courses
            .iter()
            .position(|c| c.id == id)
            .map(|pos| data.courses.remove(pos)))
    }

    async fn average_tuition(&self, bootcamp: Uuid) -> StoreResult<Option<f64>> {
        let data = self.read()?;
        let tuitions: Vec<f64> = data
            .courses
            .iter()
            .filter(|c| c.bootcamp == bootcamp)
            .map(|c| c.tuition)
            .collect();

        if tuitions.is_empty() {
            return Ok(None);
        }
        Ok(Some(tuitions.iter().sum::<f64>() / tuitions.len() as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocoding::Location;
    use crate::model::{BootcampFields, Career, CourseFields, GeoPoint, SkillLevel};

    fn bootcamp(name: &str) -> Bootcamp {
        Bootcamp::new(BootcampFields {
            name: Some(name.to_string()),
            description: Some("Learn to code".to_string()),
            address: Some("1 Main St".to_string()),
            careers: Some(vec![Career::Other]),
            ..Default::default()
        })
        .unwrap()
    }

    fn course(owner: Uuid, tuition: f64) -> Course {
        Course::new(
            owner,
            CourseFields {
                title: Some("Course".to_string()),
                description: Some("About".to_string()),
                weeks: Some("4".to_string()),
                tuition: Some(tuition),
                minimum_skill: Some(SkillLevel::Advanced),
                scholarship_available: None,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_names_rejected() {
        let store = InMemoryStore::new();
        store.insert_bootcamp(bootcamp("Codemasters")).await.unwrap();

        let result = store.insert_bootcamp(bootcamp("codemasters")).await;
        assert!(matches!(result, Err(StoreError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn test_course_requires_existing_bootcamp() {
        let store = InMemoryStore::new();
        let result = store.insert_course(course(Uuid::new_v4(), 10.0)).await;
        assert!(matches!(result, Err(StoreError::MissingReference { .. })));
        assert!(store.list_courses(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_bootcamp_cascades() {
        let store = InMemoryStore::new();
        let keep = store.insert_bootcamp(bootcamp("Keep")).await.unwrap();
        let gone = store.insert_bootcamp(bootcamp("Gone")).await.unwrap();
        store.insert_course(course(keep.id, 1.0)).await.unwrap();
        store.insert_course(course(gone.id, 2.0)).await.unwrap();
        store.insert_course(course(gone.id, 3.0)).await.unwrap();

        let (removed, cascaded) = store.remove_bootcamp(gone.id).await.unwrap().unwrap();
        assert_eq!(removed.id, gone.id);
        assert_eq!(cascaded, 2);
        assert_eq!(store.list_courses(None).await.unwrap().len(), 1);
        assert!(store.remove_bootcamp(gone.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_average_tuition() {
        let store = InMemoryStore::new();
        let b = store.insert_bootcamp(bootcamp("Avg")).await.unwrap();
        assert_eq!(store.average_tuition(b.id).await.unwrap(), None);

        store.insert_course(course(b.id, 1000.0)).await.unwrap();
        store.insert_course(course(b.id, 1050.0)).await.unwrap();
        assert_eq!(store.average_tuition(b.id).await.unwrap(), Some(1025.0));
    }

    #[tokio::test]
    async fn test_bootcamps_within_cap() {
        let store = InMemoryStore::new();
        let mut near = bootcamp("Near");
        near.location = Some(GeoPoint::from(Location::at(34.10, -118.40)));
        let mut far = bootcamp("Far");
        far.location = Some(GeoPoint::from(Location::at(40.71, -74.00)));
        let unplaced = bootcamp("Unplaced");
        for b in [near, far, unplaced] {
            store.insert_bootcamp(b).await.unwrap();
        }

        let found = store
            .bootcamps_within(Coordinates::new(34.09, -118.40), 10.0 / 6378.0)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Near");
    }
}
