//! Thin wrappers over the raw descriptor calls. Every wrapper turns the C
//! `-1` convention into `io::Error::last_os_error()` and nothing else, no
//! retry on `EINTR` happens here.

use libc::{c_int, c_void, off_t};
use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::RawFd;
use std::path::Path;

trait IsMinusOne {
    fn is_minus_one(&self) -> bool;
}

macro_rules! impl_is_minus_one {
    ($($t:ident)*) => ($(impl IsMinusOne for $t {
        fn is_minus_one(&self) -> bool {
            *self == -1
        }
    })*)
}

impl_is_minus_one! { i32 i64 isize }

fn cvt<T: IsMinusOne>(r: T) -> io::Result<T> {
    if r.is_minus_one() {
        Err(io::Error::last_os_error())
    } else {
        Ok(r)
    }
}

pub fn path_to_cstring(path: &Path) -> io::Result<CString> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains an interior nul byte"))
}

pub fn open(path: &Path, flags: c_int, mode: u32) -> io::Result<RawFd> {
    let p = path_to_cstring(path)?;
    cvt(unsafe { libc::open(p.as_ptr(), flags, mode as libc::c_uint) })
}

pub fn write(fd: RawFd, buf: &[u8]) -> io::Result<usize> {
    let n = cvt(unsafe { libc::write(fd, buf.as_ptr() as *const c_void, buf.len()) })?;
    Ok(n as usize)
}

pub fn read(fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
    let n = cvt(unsafe { libc::read(fd, buf.as_mut_ptr() as *mut c_void, buf.len()) })?;
    Ok(n as usize)
}

pub fn fsync(fd: RawFd) -> io::Result<()> {
    cvt(unsafe { libc::fsync(fd) }).map(|_| ())
}

#[cfg(any(target_os = "linux", target_os = "android"))]
pub fn fdatasync(fd: RawFd) -> io::Result<()> {
    cvt(unsafe { libc::fdatasync(fd) }).map(|_| ())
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
pub fn fdatasync(fd: RawFd) -> io::Result<()> {
    fsync(fd)
}

pub fn lseek(fd: RawFd, off: off_t, whence: c_int) -> io::Result<u64> {
    let pos = cvt(unsafe { libc::lseek(fd, off, whence) })?;
    Ok(pos as u64)
}

pub fn close(fd: RawFd) -> io::Result<()> {
    cvt(unsafe { libc::close(fd) }).map(|_| ())
}

pub fn fstat_size(fd: RawFd) -> io::Result<u64> {
    let mut st = std::mem::MaybeUninit::<libc::stat>::uninit();
    cvt(unsafe { libc::fstat(fd, st.as_mut_ptr()) })?;
    let st = unsafe { st.assume_init() };
    Ok(st.st_size as u64)
}

pub fn ftruncate(fd: RawFd, size: off_t) -> io::Result<()> {
    cvt(unsafe { libc::ftruncate(fd, size) }).map(|_| ())
}
