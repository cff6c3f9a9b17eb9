use crate::config::SyncMode;
use crate::error::{FioError, Result};
use crate::session::{record_close, record_open, record_read, record_sync, record_write, OpenFlags, Whence};
use crate::sys;
use crate::utils::{elapsed_ns, DATA_FILE_PERM, MAX_IO_SIZE, READ_CHUNK_SIZE};
use std::cmp::min;
use std::io::{self, ErrorKind};
use std::os::unix::io::RawFd;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Exclusive owner of one open descriptor.
///
/// The descriptor is released exactly once: either by [`FileSession::close`],
/// which reports the result, or by `Drop` on every other exit path.
#[derive(Debug)]
pub struct FileSession {
    fd: RawFd,
    path: PathBuf,
}

impl FileSession {
    pub fn open<P: AsRef<Path>>(path: P, flags: OpenFlags) -> Result<Self> {
        Self::open_with_mode(path, flags, DATA_FILE_PERM)
    }

    /// the flags used by the demo: read-write, create if absent
    pub fn open_rw_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(path, OpenFlags::RDWR | OpenFlags::CREATE | OpenFlags::CLOEXEC)
    }

    pub fn open_with_mode<P: AsRef<Path>>(path: P, flags: OpenFlags, mode: u32) -> Result<Self> {
        let path = path.as_ref();
        match sys::open(path, flags.bits(), mode) {
            Ok(fd) => {
                record_open();
                log::info!("open {} fd {} flags {:?}", path.display(), fd, flags);
                Ok(Self {
                    fd,
                    path: path.to_path_buf(),
                })
            }
            Err(e) => {
                log::error!("can't open {} error {}", path.display(), e);
                Err(FioError::Open {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn raw_fd(&self) -> RawFd {
        self.fd
    }

    /// One write(2) at the cursor. The count may be short.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        let n = sys::write(self.fd, data).map_err(|e| {
            log::error!("can't write {} size {} error {}", self.path.display(), data.len(), e);
            FioError::Write(e)
        })?;
        record_write(n);
        Ok(n)
    }

    pub fn write_all(&mut self, mut data: &[u8]) -> Result<()> {
        while !data.is_empty() {
            let len = min(data.len(), MAX_IO_SIZE);
            match sys::write(self.fd, &data[..len]) {
                Ok(0) => {
                    log::error!("can't write {} error zero bytes accepted", self.path.display());
                    return Err(FioError::Write(io::Error::new(
                        ErrorKind::WriteZero,
                        "failed to write whole buffer",
                    )));
                }
                Ok(n) => {
                    record_write(n);
                    data = &data[n..];
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::error!("can't write {} error {}", self.path.display(), e);
                    return Err(FioError::Write(e));
                }
            }
        }
        Ok(())
    }

    /// fsync(2), blocks until the device acknowledges
    pub fn sync(&self) -> Result<()> {
        self.sync_with(SyncMode::Full)
    }

    pub fn sync_data(&self) -> Result<()> {
        self.sync_with(SyncMode::Data)
    }

    pub fn sync_with(&self, mode: SyncMode) -> Result<()> {
        let start = Instant::now();
        let r = match mode {
            SyncMode::Full => sys::fsync(self.fd),
            SyncMode::Data => sys::fdatasync(self.fd),
        };
        record_sync(elapsed_ns(start), r.is_ok());
        r.map_err(|e| {
            log::error!("can't sync {} error {}", self.path.display(), e);
            FioError::Sync(e)
        })
    }

    /// Moves the cursor and returns the new absolute offset. File content is
    /// untouched, seeking past the end only takes effect on the next write.
    pub fn seek(&mut self, whence: Whence) -> Result<u64> {
        let (off, w) = match whence {
            Whence::Start(off) => (self.to_off(libc::off_t::try_from(off).ok())?, libc::SEEK_SET),
            Whence::Current(off) => (self.to_off(libc::off_t::try_from(off).ok())?, libc::SEEK_CUR),
            Whence::End(off) => (self.to_off(libc::off_t::try_from(off).ok())?, libc::SEEK_END),
        };
        sys::lseek(self.fd, off, w).map_err(|e| {
            log::error!("can't seek {} to {:?} error {}", self.path.display(), whence, e);
            FioError::Seek(e)
        })
    }

    pub fn rewind(&mut self) -> Result<()> {
        self.seek(Whence::Start(0)).map(|_| ())
    }

    pub fn position(&self) -> Result<u64> {
        sys::lseek(self.fd, 0, libc::SEEK_CUR).map_err(|e| {
            log::error!("can't tell position of {} error {}", self.path.display(), e);
            FioError::Seek(e)
        })
    }

    /// One read(2) of at most `max` bytes. An empty result means end of file.
    pub fn read(&mut self, max: usize) -> Result<Vec<u8>> {
        let mut v = vec![0u8; min(max, MAX_IO_SIZE)];
        let n = sys::read(self.fd, &mut v).map_err(|e| {
            log::error!("can't read {} size {} error {}", self.path.display(), max, e);
            FioError::Read(e)
        })?;
        record_read(n);
        v.truncate(n);
        // a large request for a short file must not pin the whole buffer
        if v.capacity() > READ_CHUNK_SIZE && v.capacity() / 2 > n {
            v.shrink_to_fit();
        }
        Ok(v)
    }

    /// Reads until `max` bytes were collected or end of file was hit. The
    /// result grows with the data, `max` is only an upper bound.
    pub fn read_full(&mut self, max: usize) -> Result<Vec<u8>> {
        let mut chunk = vec![0u8; min(max, READ_CHUNK_SIZE)];
        let mut v = Vec::with_capacity(chunk.len());
        while v.len() < max {
            let want = min(max - v.len(), chunk.len());
            match sys::read(self.fd, &mut chunk[..want]) {
                Ok(0) => break,
                Ok(n) => {
                    record_read(n);
                    v.extend_from_slice(&chunk[..n]);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::error!("can't read {} after {} bytes error {}", self.path.display(), v.len(), e);
                    return Err(FioError::Read(e));
                }
            }
        }
        Ok(v)
    }

    pub fn len(&self) -> Result<u64> {
        sys::fstat_size(self.fd).map_err(|e| {
            log::error!("can't stat {} error {}", self.path.display(), e);
            FioError::Stat(e)
        })
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|n| n == 0)
    }

    pub fn set_len(&self, size: u64) -> Result<()> {
        let r = match libc::off_t::try_from(size) {
            Ok(size) => sys::ftruncate(self.fd, size),
            Err(_) => Err(io::Error::new(ErrorKind::InvalidInput, "size overflows off_t")),
        };
        r.map_err(|e| {
            log::error!("can't truncate {} to {} error {}", self.path.display(), size, e);
            FioError::Truncate(e)
        })
    }

    pub fn close(mut self) -> Result<()> {
        let fd = std::mem::replace(&mut self.fd, -1);
        Self::release(fd, &self.path).map_err(FioError::Close)
    }

    fn release(fd: RawFd, path: &Path) -> io::Result<()> {
        record_close();
        // the descriptor is gone on linux even when close(2) fails, never retry
        let r = sys::close(fd);
        match &r {
            Ok(()) => log::info!("close {} fd {}", path.display(), fd),
            Err(e) => log::error!("can't close {} fd {} error {}", path.display(), fd, e),
        }
        r
    }

    fn to_off(&self, off: Option<libc::off_t>) -> Result<libc::off_t> {
        off.ok_or_else(|| {
            log::error!("can't seek {} error offset overflows off_t", self.path.display());
            FioError::Seek(io::Error::new(ErrorKind::InvalidInput, "offset overflows off_t"))
        })
    }
}

impl Drop for FileSession {
    fn drop(&mut self) {
        if self.fd >= 0 {
            let _ = Self::release(self.fd, &self.path);
        }
    }
}
