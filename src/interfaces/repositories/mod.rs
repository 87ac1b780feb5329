use std::sync::Arc;

use crate::errors::AppError;

pub mod experience;
pub mod project;
pub mod sqlx_repo;
pub mod static_data;

use experience::{ExperienceReader, ExperienceRepository};
use project::{ProjectReader, ProjectRepository};
use static_data::StaticDataset;

/// Storage behind one entity kind, chosen once at start-up.
///
/// The static variant only reads; the persistent variant keeps the same
/// object behind both handles so reads and writes hit one store.
pub enum Backend<R: ?Sized, W: ?Sized> {
    Static(Arc<R>),
    Persistent { reader: Arc<R>, writer: Arc<W> },
}

pub type ExperienceBackend = Backend<dyn ExperienceReader, dyn ExperienceRepository>;
pub type ProjectBackend = Backend<dyn ProjectReader, dyn ProjectRepository>;

impl<R: ?Sized, W: ?Sized> Clone for Backend<R, W> {
    fn clone(&self) -> Self {
        match self {
            Backend::Static(reader) => Backend::Static(Arc::clone(reader)),
            Backend::Persistent { reader, writer } => Backend::Persistent {
                reader: Arc::clone(reader),
                writer: Arc::clone(writer),
            },
        }
    }
}

impl<R: ?Sized, W: ?Sized> Backend<R, W> {
    pub fn reader(&self) -> &R {
        match self {
            Backend::Static(reader) => reader.as_ref(),
            Backend::Persistent { reader, .. } => reader.as_ref(),
        }
    }

    /// Write access, refused on the read-only dataset.
    pub fn writer(&self) -> Result<&W, AppError> {
        match self {
            Backend::Static(_) => Err(AppError::ReadOnly(
                "This data source is read-only; configure a database to modify records".into(),
            )),
            Backend::Persistent { writer, .. } => Ok(writer.as_ref()),
        }
    }
}

impl ExperienceBackend {
    pub fn persistent<T>(repo: Arc<T>) -> Self
    where
        T: ExperienceRepository + 'static,
    {
        Backend::Persistent {
            reader: repo.clone(),
            writer: repo,
        }
    }

    pub fn from_static(data: Arc<StaticDataset>) -> Self {
        Backend::Static(data)
    }
}

impl ProjectBackend {
    pub fn persistent<T>(repo: Arc<T>) -> Self
    where
        T: ProjectRepository + 'static,
    {
        Backend::Persistent {
            reader: repo.clone(),
            writer: repo,
        }
    }

    pub fn from_static(data: Arc<StaticDataset>) -> Self {
        Backend::Static(data)
    }
}
