use crate::error::{FioError, Result};
use crate::fio::IoManager;
use crate::sys;
use crate::utils::DATA_FILE_PERM;
use std::fs::File;
use std::io::{ErrorKind, Write};
use std::os::unix::fs::{FileExt, OpenOptionsExt};
use std::os::unix::io::IntoRawFd;
use std::path::{Path, PathBuf};

/// Standard file io: read-write, created if absent, every write appends.
pub struct FileIo {
    file: File,
    path: PathBuf,
}

impl FileIo {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::options()
            .read(true)
            .create(true)
            .append(true)
            .mode(DATA_FILE_PERM)
            .open(path)
            .map_err(|e| {
                log::error!("can't open {} error {}", path.display(), e);
                FioError::Open {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IoManager for FileIo {
    fn read(&self, buf: &mut [u8], offset: u64) -> Result<usize> {
        loop {
            match self.file.read_at(buf, offset) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::error!("can't read {} off {} size {} error {}", self.path.display(), offset, buf.len(), e);
                    return Err(FioError::Read(e));
                }
            }
        }
    }

    fn write(&self, buf: &[u8]) -> Result<usize> {
        (&self.file).write(buf).map_err(|e| {
            log::error!("can't write {} size {} error {}", self.path.display(), buf.len(), e);
            FioError::Write(e)
        })
    }

    fn sync(&self) -> Result<()> {
        self.file.sync_all().map_err(|e| {
            log::error!("can't sync file {} error {}", self.path.display(), e);
            FioError::Sync(e)
        })
    }

    fn size(&self) -> Result<u64> {
        self.file.metadata().map(|m| m.len()).map_err(|e| {
            log::error!("can't stat {} error {}", self.path.display(), e);
            FioError::Stat(e)
        })
    }

    fn close(self: Box<Self>) -> Result<()> {
        let this = *self;
        let fd = this.file.into_raw_fd();
        sys::close(fd).map_err(|e| {
            log::error!("can't close {} fd {} error {}", this.path.display(), fd, e);
            FioError::Close(e)
        })
    }
}
