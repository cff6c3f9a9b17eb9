use fdsession::config::{Options, SyncMode};
use fdsession::fio::{new_io_manager, IoType};
use fdsession::{run_scenario, FileSession, OpenFlags, Whence};
use std::io::ErrorKind;

#[test]
fn test_scenario_foo_txt() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("foo.txt");

    let mut s = FileSession::open(&p, OpenFlags::RDWR | OpenFlags::CREATE).unwrap();
    assert_eq!(s.write(b"GeeksforGeeks").unwrap(), 13);
    s.sync().unwrap();
    assert_eq!(s.seek(Whence::Start(0)).unwrap(), 0);
    let data = s.read(100).unwrap();
    assert_eq!(data, b"GeeksforGeeks");
    s.close().unwrap();
}

#[test]
fn test_run_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("foo.txt");
    let opt = Options {
        sync: SyncMode::Data,
        ..Options::default()
    };

    assert_eq!(run_scenario(&p, b"GeeksforGeeks", &opt).unwrap(), b"GeeksforGeeks");
    assert_eq!(std::fs::read(&p).unwrap(), b"GeeksforGeeks");

    // the file is not truncated, so a second run overwrites in place
    assert_eq!(run_scenario(&p, b"geeks", &opt).unwrap(), b"geeksforGeeks");
}

#[test]
fn test_round_trip_various_sizes() {
    let dir = tempfile::tempdir().unwrap();
    for (i, len) in [0usize, 1, 13, 4096, 1 << 20].into_iter().enumerate() {
        let p = dir.path().join(format!("rt-{}", i));
        let payload: Vec<u8> = (0..len).map(|x| (x * 31 % 251) as u8).collect();

        let mut s = FileSession::open_rw_create(&p).unwrap();
        s.write_all(&payload).unwrap();
        s.sync().unwrap();
        s.rewind().unwrap();
        assert_eq!(s.read_full(len + 1).unwrap(), payload);
        s.close().unwrap();
    }
}

#[test]
fn test_rewind_after_many_writes() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = FileSession::open_rw_create(dir.path().join("a.data")).unwrap();
    for _ in 0..100 {
        s.write_all(b"abcdefgh").unwrap();
    }
    assert_eq!(s.position().unwrap(), 800);
    s.rewind().unwrap();
    assert_eq!(s.position().unwrap(), 0);
    assert_eq!(s.read(3).unwrap(), b"abc");
}

#[test]
fn test_read_past_eof() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = FileSession::open_rw_create(dir.path().join("a.data")).unwrap();
    s.write_all(b"short").unwrap();

    s.seek(Whence::Start(2)).unwrap();
    assert_eq!(s.read(100).unwrap(), b"ort");
    assert!(s.read(100).unwrap().is_empty());

    s.seek(Whence::Start(1000)).unwrap();
    assert!(s.read(100).unwrap().is_empty());
}

#[test]
fn test_sparse_gap_reads_zero() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = FileSession::open_rw_create(dir.path().join("a.data")).unwrap();
    s.write_all(b"head").unwrap();
    assert_eq!(s.seek(Whence::Current(8)).unwrap(), 12);
    // seeking alone does not grow the file
    assert_eq!(s.len().unwrap(), 4);
    s.write_all(b"tail").unwrap();
    assert_eq!(s.len().unwrap(), 16);

    s.rewind().unwrap();
    let data = s.read_full(64).unwrap();
    assert_eq!(&data[..4], b"head");
    assert_eq!(&data[4..12], &[0u8; 8]);
    assert_eq!(&data[12..], b"tail");
}

#[test]
fn test_open_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("missing").join("foo.txt");
    let e = FileSession::open_rw_create(&p).unwrap_err();
    assert_eq!(e.op(), "open");
    assert_eq!(e.kind(), ErrorKind::NotFound);
    assert!(!p.exists());
}

#[test]
fn test_drop_releases() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("a.data");
    {
        let mut s = FileSession::open_rw_create(&p).unwrap();
        s.write_all(b"dropped").unwrap();
    }
    let mut s = FileSession::open(&p, OpenFlags::empty()).unwrap();
    assert_eq!(s.read(100).unwrap(), b"dropped");
}

#[test]
fn test_session_and_io_manager_share_file() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("a.data");

    let fio = new_io_manager(&p, IoType::Standard).unwrap();
    fio.write(b"appended by fio").unwrap();
    fio.sync().unwrap();

    let mut s = FileSession::open_rw_create(&p).unwrap();
    assert_eq!(s.read(100).unwrap(), b"appended by fio");
    s.close().unwrap();

    let mio = new_io_manager(&p, IoType::MemoryMap).unwrap();
    assert_eq!(mio.size().unwrap(), 15);
    let mut b = [0u8; 8];
    assert_eq!(mio.read(&mut b, 12).unwrap(), 3);
    assert_eq!(&b[..3], b"fio");

    mio.close().unwrap();
    fio.close().unwrap();
}
