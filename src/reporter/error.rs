use std::{io, path::PathBuf};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o failure on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot serialize '{0}': {1}")]
    Serialize(Uuid, #[source] serde_json::Error),
    #[error("test case '{0}' is not known to the lifecycle")]
    UnknownCase(Uuid),
    #[error("container '{0}' is not known to the lifecycle")]
    UnknownContainer(Uuid),
    #[error("invalid report model: {0}")]
    Model(String),
}

impl Error {
    pub(crate) fn io<P: Into<PathBuf>>(path: P) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}
