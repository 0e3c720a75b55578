//! Session lifecycle: upload → scan → wipe → purge.

mod progress;
mod purge;
mod scan;
mod upload;
mod wipe;

pub use progress::ProgressRegistry;
pub use upload::UploadInput;

use std::sync::Arc;
use wipeguard_core::ClassifierConfig;
use wipeguard_db::UploadedFileRepositoryTrait;
use wipeguard_storage::Storage;

/// Orchestrates one session's files across the metadata repository and blob storage.
#[derive(Clone)]
pub struct SessionService {
    repository: Arc<dyn UploadedFileRepositoryTrait>,
    storage: Arc<dyn Storage>,
    progress: Arc<ProgressRegistry>,
    classifier: ClassifierConfig,
    max_file_size_bytes: usize,
}

impl SessionService {
    pub fn new(
        repository: Arc<dyn UploadedFileRepositoryTrait>,
        storage: Arc<dyn Storage>,
        classifier: ClassifierConfig,
        max_file_size_bytes: usize,
    ) -> Self {
        Self {
            repository,
            storage,
            progress: Arc::new(ProgressRegistry::new()),
            classifier,
            max_file_size_bytes,
        }
    }

    pub fn progress(&self) -> &ProgressRegistry {
        &self.progress
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn repository(&self) -> &Arc<dyn UploadedFileRepositoryTrait> {
        &self.repository
    }
}
