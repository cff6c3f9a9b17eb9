use crate::error::{FioError, Result};
use crate::fio::IoManager;
use crate::utils::DATA_FILE_PERM;
use std::cmp::min;
use std::fs::File;
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::Path;

/// Read-only memory mapped file, used to load a data file quickly. The
/// mapping covers the file as it was when opened, later appends by other
/// writers are not visible.
pub struct MMapIo {
    addr: *mut libc::c_void,
    len: usize,
}

// the mapping is PROT_READ and never changes after construction
unsafe impl Send for MMapIo {}
unsafe impl Sync for MMapIo {}

impl MMapIo {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        // read-only access, so an existing data file without write permission still maps
        let file = File::options()
            .read(true)
            .custom_flags(libc::O_CREAT)
            .mode(DATA_FILE_PERM)
            .open(path)
            .map_err(|e| {
                log::error!("can't open {} error {}", path.display(), e);
                FioError::Open {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        let len = file
            .metadata()
            .map_err(|e| {
                log::error!("can't stat {} error {}", path.display(), e);
                FioError::Stat(e)
            })?
            .len() as usize;

        // mmap(2) rejects a zero length, an empty file simply maps nothing
        if len == 0 {
            return Ok(Self {
                addr: std::ptr::null_mut(),
                len: 0,
            });
        }

        let addr = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                len,
                libc::PROT_READ,
                libc::MAP_SHARED,
                file.as_raw_fd(),
                0,
            )
        };
        if addr == libc::MAP_FAILED {
            let e = io::Error::last_os_error();
            log::error!("can't mmap {} len {} error {}", path.display(), len, e);
            return Err(FioError::Map(e));
        }
        // the mapping outlives the descriptor
        drop(file);
        Ok(Self { addr, len })
    }

    fn unmap(&mut self) -> io::Result<()> {
        if self.addr.is_null() {
            return Ok(());
        }
        let r = unsafe { libc::munmap(self.addr, self.len) };
        self.addr = std::ptr::null_mut();
        if r == -1 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }
}

impl IoManager for MMapIo {
    fn read(&self, buf: &mut [u8], offset: u64) -> Result<usize> {
        if offset >= self.len as u64 {
            return Ok(0);
        }
        let off = offset as usize;
        let n = min(buf.len(), self.len - off);
        unsafe {
            let src = (self.addr as *const u8).add(off);
            std::ptr::copy_nonoverlapping(src, buf.as_mut_ptr(), n);
        }
        Ok(n)
    }

    fn write(&self, _buf: &[u8]) -> Result<usize> {
        Err(FioError::Unsupported("write"))
    }

    fn sync(&self) -> Result<()> {
        Err(FioError::Unsupported("sync"))
    }

    fn size(&self) -> Result<u64> {
        Ok(self.len as u64)
    }

    fn close(mut self: Box<Self>) -> Result<()> {
        self.unmap().map_err(|e| {
            log::error!("can't munmap len {} error {}", self.len, e);
            FioError::Close(e)
        })
    }
}

impl Drop for MMapIo {
    fn drop(&mut self) {
        if let Err(e) = self.unmap() {
            log::error!("can't munmap len {} error {}", self.len, e);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fio::FileIo;

    #[test]
    fn test_mmap_read() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("mmap-a.data");

        let fio = FileIo::new(&p).unwrap();
        fio.write(b"hello world").unwrap();

        let mio = MMapIo::new(&p).unwrap();
        assert_eq!(mio.size().unwrap(), 11);

        let mut b = [0u8; 20];
        assert_eq!(mio.read(&mut b, 0).unwrap(), 11);
        assert_eq!(&b[..11], b"hello world");
        assert_eq!(mio.read(&mut b, 6).unwrap(), 5);
        assert_eq!(&b[..5], b"world");
        assert_eq!(mio.read(&mut b, 11).unwrap(), 0);
        Box::new(mio).close().unwrap();
    }

    #[test]
    fn test_mmap_empty_and_readonly() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("mmap-b.data");

        let mio = MMapIo::new(&p).unwrap();
        assert!(p.exists());
        assert_eq!(mio.size().unwrap(), 0);

        let mut b = [0u8; 4];
        assert_eq!(mio.read(&mut b, 0).unwrap(), 0);
        assert_eq!(mio.write(b"x").unwrap_err().op(), "write");
        assert_eq!(mio.sync().unwrap_err().kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn test_mmap_read_only_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("mmap-ro.data");
        std::fs::write(&p, b"frozen").unwrap();
        std::fs::set_permissions(&p, std::fs::Permissions::from_mode(0o444)).unwrap();

        let mio = MMapIo::new(&p).unwrap();
        let mut b = [0u8; 6];
        assert_eq!(mio.read(&mut b, 0).unwrap(), 6);
        assert_eq!(&b, b"frozen");
        // opening never asks for write access, so the mode is left untouched
        let mode = std::fs::metadata(&p).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o444);
    }
}
