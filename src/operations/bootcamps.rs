//! # Bootcamp Operations

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use super::envelope::{Collection, Shaped, Single};
use super::errors::{ApiError, ApiResult};
use crate::file_storage::StorageBackend;
use crate::geocoding::{radius_radians, Geocoder};
use crate::model::{Bootcamp, BootcampFields, GeoPoint};
use crate::query::ListQuery;
use crate::store::RecordStore;

/// An uploaded file as received by the boundary
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    /// Client-side file name, used only for its extension
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl PhotoUpload {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Stored name for a bootcamp photo: `photo_<id><ext>`
    pub fn stored_name(&self, bootcamp_id: Uuid) -> String {
        let ext = Path::new(&self.file_name)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        format!("photo_{}{}", bootcamp_id, ext)
    }
}

/// Bootcamp use cases
#[derive(Clone)]
pub struct BootcampService {
    store: Arc<dyn RecordStore>,
    geocoder: Arc<dyn Geocoder>,
    files: Arc<dyn StorageBackend>,
    max_upload_bytes: u64,
}

impl BootcampService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        geocoder: Arc<dyn Geocoder>,
        files: Arc<dyn StorageBackend>,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            store,
            geocoder,
            files,
            max_upload_bytes,
        }
    }

    /// Largest accepted photo, in bytes
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    /// All bootcamps, shaped by `query`
    pub async fn list(&self, query: &ListQuery) -> ApiResult<Shaped> {
        let records = self
            .store
            .list_bootcamps()
            .await?
            .into_iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Shaped::new(query.apply(records)))
    }

    pub async fn get_by_id(&self, id: Uuid) -> ApiResult<Single<Bootcamp>> {
        let bootcamp = self.find(id).await?;
        Ok(Single::new(bootcamp))
    }

    pub async fn create(&self, fields: BootcampFields) -> ApiResult<Single<Bootcamp>> {
        let mut bootcamp = Bootcamp::new(fields)?;
        self.locate(&mut bootcamp).await;

        let bootcamp = self.store.insert_bootcamp(bootcamp).await?;
        info!(bootcamp = %bootcamp.id, name = %bootcamp.name, "Bootcamp created");

        Ok(Single::new(bootcamp))
    }

    /// Partial update; the merged document is validated like a new one
    pub async fn update(&self, id: Uuid, fields: BootcampFields) -> ApiResult<Single<Bootcamp>> {
        let current = self.find(id).await?;
        let mut next = current.merged(fields)?;
        if next.location.is_none() {
            self.locate(&mut next).await;
        }

        let updated = self
            .store
            .replace_bootcamp(next)
            .await?
            .ok_or_else(|| ApiError::bootcamp_not_found(id))?;
        info!(bootcamp = %id, "Bootcamp updated");

        Ok(Single::new(updated))
    }

    /// Remove a bootcamp and its courses; returns the removed document
    pub async fn delete(&self, id: Uuid) -> ApiResult<Single<Bootcamp>> {
        let (removed, courses) = self
            .store
            .remove_bootcamp(id)
            .await?
            .ok_or_else(|| ApiError::bootcamp_not_found(id))?;
        info!(bootcamp = %id, courses, "Bootcamp deleted");

        Ok(Single::new(removed))
    }

    /// Bootcamps within `distance` of a postal code.
    ///
    /// The angular radius is `distance / 6378`; see
    /// [`crate::geocoding::EARTH_RADIUS_KM`] for the units caveat.
    pub async fn find_within_radius(
        &self,
        postal_code: &str,
        distance: f64,
    ) -> ApiResult<Collection<Bootcamp>> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(ApiError::BadRequest(format!(
                "Invalid distance: {}",
                distance
            )));
        }

        let location = self.geocoder.geocode(postal_code).await?;
        let radius = radius_radians(distance);

        let bootcamps = self
            .store
            .bootcamps_within(location.coordinates, radius)
            .await?;

        Ok(Collection::new(bootcamps))
    }

    /// Validate and store a photo, then point the bootcamp at it.
    ///
    /// Nothing is written unless every check passes, and the bootcamp is only
    /// updated once the file store has confirmed the write.
    pub async fn upload_photo(
        &self,
        id: Uuid,
        file: Option<PhotoUpload>,
    ) -> ApiResult<Single<String>> {
        let bootcamp = self.find(id).await?;

        let file = file.ok_or_else(|| ApiError::BadRequest("Please upload a file".to_string()))?;

        if !file.content_type.starts_with("image") {
            return Err(ApiError::BadRequest(
                "Please upload an image file".to_string(),
            ));
        }

        if file.size() > self.max_upload_bytes {
            return Err(ApiError::BadRequest(format!(
                "image file bigger than {} bytes",
                self.max_upload_bytes
            )));
        }

        let name = file.stored_name(bootcamp.id);
        if let Err(e) = self.files.write(&name, &file.data).await {
            error!(bootcamp = %id, file = %name, error = %e, "Photo write failed");
            return Err(ApiError::Internal("Problem with file upload".to_string()));
        }

        self.store
            .set_bootcamp_photo(id, &name)
            .await?
            .ok_or_else(|| ApiError::bootcamp_not_found(id))?;
        info!(bootcamp = %id, file = %name, bytes = file.size(), "Photo uploaded");

        Ok(Single::new(name))
    }

    async fn find(&self, id: Uuid) -> ApiResult<Bootcamp> {
        self.store
            .find_bootcamp(id)
            .await?
            .ok_or_else(|| ApiError::bootcamp_not_found(id))
    }

    /// Geocode the address into `location`; a miss leaves it empty
    async fn locate(&self, bootcamp: &mut Bootcamp) {
        match self.geocoder.geocode(&bootcamp.address).await {
            Ok(location) => bootcamp.location = Some(GeoPoint::from(location)),
            Err(e) => {
                warn!(address = %bootcamp.address, error = %e, "Address not geocoded");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str) -> PhotoUpload {
        PhotoUpload {
            file_name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            data: vec![0; 4],
        }
    }

    #[test]
    fn test_stored_name_keeps_extension() {
        let id = Uuid::new_v4();
        assert_eq!(upload("me.jpg").stored_name(id), format!("photo_{}.jpg", id));
        assert_eq!(upload("archive.tar.gz").stored_name(id), format!("photo_{}.gz", id));
        assert_eq!(upload("noext").stored_name(id), format!("photo_{}", id));
    }

    #[test]
    fn test_stored_name_ignores_client_directories() {
        let id = Uuid::new_v4();
        assert_eq!(
            upload("../../etc/avatar.png").stored_name(id),
            format!("photo_{}.png", id)
        );
    }
}
