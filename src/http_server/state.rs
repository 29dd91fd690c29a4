//! Shared handler state

use std::sync::Arc;

use crate::config::AppConfig;
use crate::file_storage::{LocalBackend, StorageBackend};
use crate::geocoding::Geocoder;
use crate::operations::{BootcampService, CourseService};
use crate::store::RecordStore;

/// Services shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub bootcamps: BootcampService,
    pub courses: CourseService,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        geocoder: Arc<dyn Geocoder>,
        files: Arc<dyn StorageBackend>,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            bootcamps: BootcampService::new(store.clone(), geocoder, files, max_upload_bytes),
            courses: CourseService::new(store),
        }
    }

    /// Wire the upload directory and limit from `config` around a store and
    /// an already built geocoder
    pub fn from_config(
        config: &AppConfig,
        store: Arc<dyn RecordStore>,
        geocoder: Arc<dyn Geocoder>,
    ) -> Self {
        let files: Arc<dyn StorageBackend> =
            Arc::new(LocalBackend::new(config.upload.file_upload_path.clone()));

        Self::new(store, geocoder, files, config.upload.max_file_upload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploadConfig;
    use crate::geocoding::{FixedGeocoder, Location};
    use crate::store::InMemoryStore;

    #[tokio::test]
    async fn test_from_config_uses_given_geocoder() {
        let dir = tempfile::tempdir().unwrap();
        // The configured provider is MapQuest without a key; it must not be built here
        let config = AppConfig {
            upload: UploadConfig {
                max_file_upload: 2_048,
                file_upload_path: dir.path().to_path_buf(),
            },
            ..AppConfig::default()
        };
        let geocoder = FixedGeocoder::new().with("02215", Location::at(42.35, -71.1));

        let state = AppState::from_config(
            &config,
            Arc::new(InMemoryStore::new()),
            Arc::new(geocoder),
        );

        assert_eq!(state.bootcamps.max_upload_bytes(), 2_048);
        let found = state.bootcamps.find_within_radius("02215", 10.0).await.unwrap();
        assert_eq!(found.count, 0);
    }
}
