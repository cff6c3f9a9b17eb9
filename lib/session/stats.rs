use std::sync::atomic::{AtomicU64, Ordering};

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

struct SessionStats {
    open_calls: AtomicU64,
    close_calls: AtomicU64,
    write_calls: AtomicU64,
    write_bytes: AtomicU64,
    read_calls: AtomicU64,
    read_bytes: AtomicU64,
    sync_calls: AtomicU64,
    sync_ns: AtomicU64,
    sync_errors: AtomicU64,
}

impl SessionStats {
    const fn new() -> Self {
        Self {
            open_calls: AtomicU64::new(0),
            close_calls: AtomicU64::new(0),
            write_calls: AtomicU64::new(0),
            write_bytes: AtomicU64::new(0),
            read_calls: AtomicU64::new(0),
            read_bytes: AtomicU64::new(0),
            sync_calls: AtomicU64::new(0),
            sync_ns: AtomicU64::new(0),
            sync_errors: AtomicU64::new(0),
        }
    }
}

static SESSION_STATS: SessionStats = SessionStats::new();

pub(crate) fn record_open() {
    SESSION_STATS.open_calls.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_close() {
    SESSION_STATS.close_calls.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_write(bytes: usize) {
    SESSION_STATS.write_calls.fetch_add(1, Ordering::Relaxed);
    SESSION_STATS.write_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
}

pub(crate) fn record_read(bytes: usize) {
    SESSION_STATS.read_calls.fetch_add(1, Ordering::Relaxed);
    SESSION_STATS.read_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
}

pub(crate) fn record_sync(ns: u64, ok: bool) {
    SESSION_STATS.sync_calls.fetch_add(1, Ordering::Relaxed);
    SESSION_STATS.sync_ns.fetch_add(ns, Ordering::Relaxed);
    if !ok {
        SESSION_STATS.sync_errors.fetch_add(1, Ordering::Relaxed);
    }
}

pub fn snapshot() -> StatsSnapshot {
    StatsSnapshot {
        open_calls: SESSION_STATS.open_calls.load(Ordering::Relaxed),
        close_calls: SESSION_STATS.close_calls.load(Ordering::Relaxed),
        write_calls: SESSION_STATS.write_calls.load(Ordering::Relaxed),
        write_bytes: SESSION_STATS.write_bytes.load(Ordering::Relaxed),
        read_calls: SESSION_STATS.read_calls.load(Ordering::Relaxed),
        read_bytes: SESSION_STATS.read_bytes.load(Ordering::Relaxed),
        sync_calls: SESSION_STATS.sync_calls.load(Ordering::Relaxed),
        sync_ns: SESSION_STATS.sync_ns.load(Ordering::Relaxed),
        sync_errors: SESSION_STATS.sync_errors.load(Ordering::Relaxed),
    }
}
