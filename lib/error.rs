use std::io;
use std::path::PathBuf;

/// I/O failure tagged with the operation that produced it.
#[derive(Debug, thiserror::Error)]
pub enum FioError {
    #[error("can't open {path}: {source}", path = path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("write failed: {0}")]
    Write(#[source] io::Error),
    #[error("sync failed: {0}")]
    Sync(#[source] io::Error),
    #[error("seek failed: {0}")]
    Seek(#[source] io::Error),
    #[error("read failed: {0}")]
    Read(#[source] io::Error),
    #[error("close failed: {0}")]
    Close(#[source] io::Error),
    #[error("stat failed: {0}")]
    Stat(#[source] io::Error),
    #[error("truncate failed: {0}")]
    Truncate(#[source] io::Error),
    #[error("mmap failed: {0}")]
    Map(#[source] io::Error),
    #[error("{0} is not supported by this io manager")]
    Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, FioError>;

impl FioError {
    pub fn op(&self) -> &'static str {
        match self {
            FioError::Open { .. } => "open",
            FioError::Write(_) => "write",
            FioError::Sync(_) => "sync",
            FioError::Seek(_) => "seek",
            FioError::Read(_) => "read",
            FioError::Close(_) => "close",
            FioError::Stat(_) => "stat",
            FioError::Truncate(_) => "truncate",
            FioError::Map(_) => "mmap",
            FioError::Unsupported(op) => op,
        }
    }

    pub fn kind(&self) -> io::ErrorKind {
        self.io_error().map_or(io::ErrorKind::Unsupported, |e| e.kind())
    }

    pub fn raw_os_error(&self) -> Option<i32> {
        self.io_error().and_then(|e| e.raw_os_error())
    }

    fn io_error(&self) -> Option<&io::Error> {
        match self {
            FioError::Open { source, .. } => Some(source),
            FioError::Write(e)
            | FioError::Sync(e)
            | FioError::Seek(e)
            | FioError::Read(e)
            | FioError::Close(e)
            | FioError::Stat(e)
            | FioError::Truncate(e)
            | FioError::Map(e) => Some(e),
            FioError::Unsupported(_) => None,
        }
    }
}
