mod file_session;
#[cfg(feature = "stats")]
mod stats;
#[cfg(not(feature = "stats"))]
mod stats {
    #[derive(Clone, Copy, Debug, Default)]
    pub struct StatsSnapshot {
        pub open_calls: u64,
        pub close_calls: u64,
        pub write_calls: u64,
        pub write_bytes: u64,
        pub read_calls: u64,
        pub read_bytes: u64,
        pub sync_calls: u64,
        pub sync_ns: u64,
        pub sync_errors: u64,
    }

    pub(crate) fn record_open() {}

    pub(crate) fn record_close() {}

    pub(crate) fn record_write(_: usize) {}

    pub(crate) fn record_read(_: usize) {}

    pub(crate) fn record_sync(_: u64, _: bool) {}

    pub fn snapshot() -> StatsSnapshot {
        StatsSnapshot::default()
    }
}

use crate::config::Options;
use crate::error::Result;
use bitflags::bitflags;
pub use file_session::FileSession;
pub(crate) use stats::{record_close, record_open, record_read, record_sync, record_write};
pub use stats::{snapshot, StatsSnapshot};
use std::path::Path;

bitflags! {
    /// Flags passed straight to open(2). An empty set opens read-only.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: libc::c_int {
        const WRONLY = libc::O_WRONLY;
        const RDWR = libc::O_RDWR;
        const CREATE = libc::O_CREAT;
        const EXCL = libc::O_EXCL;
        const TRUNC = libc::O_TRUNC;
        const APPEND = libc::O_APPEND;
        const CLOEXEC = libc::O_CLOEXEC;
        const SYNC = libc::O_SYNC;
    }
}

/// Reference point for [`FileSession::seek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    Start(u64),
    Current(i64),
    End(i64),
}

/// open -> write -> sync -> rewind -> read -> close, returning what was read back
pub fn run_scenario(path: &Path, payload: &[u8], opt: &Options) -> Result<Vec<u8>> {
    let mut s = FileSession::open_rw_create(path)?;
    s.write_all(payload)?;
    s.sync_with(opt.sync)?;
    s.rewind()?;
    let data = s.read(opt.read_max)?;
    s.close()?;
    Ok(data)
}
