//! Camera Capture
//!
//! Takes a still, stores it in the photo bucket, and registers a short code
//! that the entry form can use to attach it.

use std::{io, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use karat::photos::{PhotoCode, capture_object_name};
use mockall::automock;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

use crate::domain::{
    image_codes::{ImageCodesService, ImageCodesServiceError},
    storage::{StorageService, StorageServiceError},
};

/// Content type of captured stills.
pub const CAPTURE_CONTENT_TYPE: &str = "image/jpeg";

/// Which camera to capture with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Lens {
    /// Facing the operator.
    Front,
    /// Facing away from the operator.
    #[default]
    Back,
}

impl Lens {
    /// Media facing mode for this lens.
    #[must_use]
    pub fn facing_mode(self) -> &'static str {
        match self {
            Lens::Front => "user",
            Lens::Back => "environment",
        }
    }
}

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("failed to read still from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("captured still is empty")]
    Empty,
}

/// Camera stand-in that returns a still read from disk.
#[derive(Debug, Clone)]
pub struct FileCamera {
    path: PathBuf,
}

impl FileCamera {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Camera for FileCamera {
    async fn capture(&self, lens: Lens) -> Result<Vec<u8>, CameraError> {
        debug!(facing = lens.facing_mode(), path = %self.path.display(), "capturing still");

        let bytes = fs::read(&self.path)
            .await
            .map_err(|source| CameraError::Read {
                path: self.path.clone(),
                source,
            })?;

        if bytes.is_empty() {
            return Err(CameraError::Empty);
        }

        Ok(bytes)
    }
}

#[automock]
#[async_trait]
pub trait Camera: Send + Sync {
    /// Capture a JPEG still.
    async fn capture(&self, lens: Lens) -> Result<Vec<u8>, CameraError>;
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error("failed to upload photo: {0}")]
    Upload(#[from] StorageServiceError),

    #[error("failed to register photo code: {0}")]
    Register(#[from] ImageCodesServiceError),
}

/// A stored capture and the code it was registered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub code: PhotoCode,
    pub image_name: String,
}

#[derive(Clone)]
pub struct CaptureFlow {
    camera: Arc<dyn Camera>,
    storage: Arc<dyn StorageService>,
    image_codes: Arc<dyn ImageCodesService>,
    bucket: String,
}

impl CaptureFlow {
    #[must_use]
    pub fn new(
        camera: Arc<dyn Camera>,
        storage: Arc<dyn StorageService>,
        image_codes: Arc<dyn ImageCodesService>,
        bucket: String,
    ) -> Self {
        Self {
            camera,
            storage,
            image_codes,
            bucket,
        }
    }

    /// Capture a still, upload it, and register it under a fresh code.
    ///
    /// Codes are drawn at random without checking for reuse.
    ///
    /// # Errors
    ///
    /// Returns a [`CaptureError`]; a failed upload registers nothing.
    pub async fn capture_and_register(&self, lens: Lens) -> Result<Capture, CaptureError> {
        let bytes = self.camera.capture(lens).await?;
        let name = capture_object_name(Timestamp::now().as_millisecond());

        let image_name = self
            .storage
            .upload(&self.bucket, &name, CAPTURE_CONTENT_TYPE, bytes)
            .await?;

        let code = PhotoCode::random(&mut rand::thread_rng());

        self.image_codes.register(&image_name, &code).await?;

        info!(%code, %image_name, "photo captured");

        Ok(Capture { code, image_name })
    }
}
