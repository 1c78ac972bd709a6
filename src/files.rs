//! Object-store access for uploaded application files.
//!
//! Built on the `object_store` abstraction; the local filesystem is the
//! default backend, with S3/GCS/Azure available through the same
//! interface.

use crate::error::JobforgeError;
use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct FileStore {
    store: Arc<dyn ObjectStore>,
}

impl FileStore {
    /// Store rooted at a local directory, created on demand.
    pub fn local(root: &Path) -> Result<Self, JobforgeError> {
        std::fs::create_dir_all(root)?;
        Ok(Self {
            store: Arc::new(LocalFileSystem::new_with_prefix(root)?),
        })
    }

    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    fn application_key(application_id: i64) -> ObjectPath {
        ObjectPath::from(format!("applications/{application_id}/jobforge.tar.gz"))
    }

    pub async fn put_application_file(
        &self,
        application_id: i64,
        data: Bytes,
    ) -> Result<(), JobforgeError> {
        self.store
            .put(
                &Self::application_key(application_id),
                PutPayload::from(data),
            )
            .await?;
        Ok(())
    }

    /// Remove an application's stored file. Deleting an object that was
    /// never uploaded is not an error.
    pub async fn delete_application_file(&self, application_id: i64) -> Result<(), JobforgeError> {
        match self
            .store
            .delete(&Self::application_key(application_id))
            .await
        {
            Ok(()) => Ok(()),
            Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
