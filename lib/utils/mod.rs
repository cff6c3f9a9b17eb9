pub const DATA_FILE_PERM: u32 = 0o644;

/// linux never transfers more than this in one read(2)/write(2)
pub const MAX_IO_SIZE: usize = 0x7fff_f000;

/// scratch size for reads that loop until a byte count or end of file
pub const READ_CHUNK_SIZE: usize = 64 << 10;

pub const DEFAULT_READ_MAX: usize = 100;
pub const DEFAULT_PATH: &str = "foo.txt";
pub const DEFAULT_LOG_PATH: &str = "/tmp/fdsession.log";
pub const DEMO_PAYLOAD: &[u8] = b"GeeksforGeeks";

pub fn elapsed_ns(start: std::time::Instant) -> u64 {
    start.elapsed().as_nanos() as u64
}
