mod file_io;
mod mmap;

use crate::error::Result;
pub use file_io::FileIo;
pub use mmap::MMapIo;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoType {
    Standard,
    MemoryMap,
}

/// Positional file access. Reads never move a cursor, writes always append.
pub trait IoManager: Send + Sync {
    /// read into `buf` starting at `offset`, returns the bytes read, 0 at end of file
    fn read(&self, buf: &mut [u8], offset: u64) -> Result<usize>;

    /// append `buf` to the end of the file
    fn write(&self, buf: &[u8]) -> Result<usize>;

    fn sync(&self) -> Result<()>;

    fn size(&self) -> Result<u64>;

    fn close(self: Box<Self>) -> Result<()>;
}

pub fn new_io_manager<P: AsRef<Path>>(path: P, io_type: IoType) -> Result<Box<dyn IoManager>> {
    match io_type {
        IoType::Standard => Ok(Box::new(FileIo::new(path)?)),
        IoType::MemoryMap => Ok(Box::new(MMapIo::new(path)?)),
    }
}
