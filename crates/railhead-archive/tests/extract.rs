use std::fs;
use std::io::{self, Cursor};
use std::path::Path;

use bzip2::Compression;
use bzip2::write::BzEncoder;
use railhead_archive::{EntryKind, Error, extract_from_reader, extract_tar_bz2};

type BundleBuilder = tar::Builder<BzEncoder<Vec<u8>>>;

fn bundle(fill: impl FnOnce(&mut BundleBuilder)) -> Vec<u8> {
    let mut builder = tar::Builder::new(BzEncoder::new(Vec::new(), Compression::default()));
    fill(&mut builder);
    builder.into_inner().unwrap().finish().unwrap()
}

fn add_dir(builder: &mut BundleBuilder, path: &str, mode: u32) {
    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Directory);
    header.set_mode(mode);
    header.set_size(0);
    builder.append_data(&mut header, path, io::empty()).unwrap();
}

fn add_file(builder: &mut BundleBuilder, path: &str, mode: u32, content: &[u8]) {
    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Regular);
    header.set_mode(mode);
    header.set_size(content.len() as u64);
    builder.append_data(&mut header, path, content).unwrap();
}

fn add_symlink(builder: &mut BundleBuilder, path: &str, target: &str) {
    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Symlink);
    header.set_mode(0o777);
    header.set_size(0);
    builder.append_link(&mut header, path, target).unwrap();
}

fn temp_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("railhead-test-tar-")
        .tempdir()
        .expect("Failed to create temp dir")
}

#[cfg(unix)]
fn mode_of(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).unwrap().permissions().mode() & 0o7777
}

#[test]
fn extracts_directories_and_files() {
    let data = bundle(|b| {
        add_dir(b, "a/", 0o755);
        add_file(b, "a/b.txt", 0o644, b"hello");
    });
    let out = temp_dir();

    let report = extract_from_reader(Cursor::new(data), out.path()).unwrap();

    assert!(out.path().join("a").is_dir());
    assert_eq!(fs::read(out.path().join("a/b.txt")).unwrap(), b"hello");
    assert_eq!(report.directories(), 1);
    assert_eq!(report.files(), 1);
    assert_eq!(report.bytes_written, 5);
    assert!(report.skipped.is_empty());

    #[cfg(unix)]
    {
        assert_eq!(mode_of(&out.path().join("a")), 0o755);
        assert_eq!(mode_of(&out.path().join("a/b.txt")), 0o644);
    }
}

#[test]
fn extract_tar_bz2_reads_from_disk() {
    let data = bundle(|b| add_file(b, "motis/config.ini", 0o600, b"x=1"));
    let work = temp_dir();
    let archive = work.path().join("app.tar.bz2");
    fs::write(&archive, data).unwrap();

    let report = extract_tar_bz2(&archive, work.path()).unwrap();

    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].kind, EntryKind::File);
    assert_eq!(report.entries[0].target_path, work.path().join("motis/config.ini"));
    assert_eq!(fs::read(work.path().join("motis/config.ini")).unwrap(), b"x=1");
}

#[cfg(unix)]
#[test]
fn executable_bit_is_preserved() {
    let data = bundle(|b| {
        add_file(b, "motis", 0o755, b"#!/bin/sh\n");
        add_file(b, "readme", 0o600, b"r");
    });
    let out = temp_dir();

    extract_from_reader(Cursor::new(data), out.path()).unwrap();

    assert_eq!(mode_of(&out.path().join("motis")), 0o755);
    assert_eq!(mode_of(&out.path().join("readme")), 0o600);
}

#[test]
fn file_without_directory_entry_gets_parents() {
    let data = bundle(|b| add_file(b, "deep/nested/file.txt", 0o644, b"content"));
    let out = temp_dir();

    extract_from_reader(Cursor::new(data), out.path()).unwrap();

    assert!(out.path().join("deep/nested").is_dir());
    assert_eq!(fs::read(out.path().join("deep/nested/file.txt")).unwrap(), b"content");
}

#[test]
fn symlinks_are_skipped_without_stopping() {
    let data = bundle(|b| {
        add_file(b, "before.txt", 0o644, b"1");
        add_symlink(b, "link", "before.txt");
        add_file(b, "after.txt", 0o644, b"2");
    });
    let out = temp_dir();

    let report = extract_from_reader(Cursor::new(data), out.path()).unwrap();

    assert_eq!(fs::read(out.path().join("before.txt")).unwrap(), b"1");
    assert_eq!(fs::read(out.path().join("after.txt")).unwrap(), b"2");
    assert!(fs::symlink_metadata(out.path().join("link")).is_err());
    assert_eq!(report.files(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].entry_type, tar::EntryType::Symlink);
}

#[test]
fn re_extraction_overwrites_existing_files() {
    let out = temp_dir();
    fs::write(out.path().join("data.txt"), b"a much longer stale content").unwrap();

    let data = bundle(|b| add_file(b, "data.txt", 0o644, b"fresh"));
    extract_from_reader(Cursor::new(data), out.path()).unwrap();

    assert_eq!(fs::read(out.path().join("data.txt")).unwrap(), b"fresh");
}

#[test]
fn missing_archive_is_open_error() {
    let out = temp_dir();
    let missing = out.path().join("missing.tar.bz2");

    let err = extract_tar_bz2(&missing, out.path()).unwrap_err();

    assert!(matches!(err, Error::Open { .. }));
    assert_eq!(err.path(), Some(missing.as_path()));
}

#[test]
fn corrupt_stream_is_header_error() {
    let out = temp_dir();

    let err = extract_from_reader(Cursor::new(b"definitely not bzip2".to_vec()), out.path())
        .unwrap_err();

    assert!(matches!(err, Error::Header { .. }));
}

#[test]
fn escaping_entry_aborts_extraction() {
    let data = bundle(|b| {
        add_file(b, "ok.txt", 0o644, b"ok");

        // `append_data` refuses `..`, so write the name field directly.
        let mut header = tar::Header::new_old();
        let name = b"../evil.txt";
        header.as_old_mut().name[..name.len()].copy_from_slice(name);
        header.set_entry_type(tar::EntryType::Regular);
        header.set_mode(0o644);
        header.set_size(4);
        header.set_cksum();
        b.append(&header, &b"evil"[..]).unwrap();
    });
    let root = temp_dir();
    let out = root.path().join("out");
    fs::create_dir(&out).unwrap();

    let err = extract_from_reader(Cursor::new(data), &out).unwrap_err();

    assert!(matches!(err, Error::PathEscape { .. }));
    assert!(!root.path().join("evil.txt").exists());
    // Work done before the failure stays on disk.
    assert!(out.join("ok.txt").exists());
}

fn compress(data: &[u8]) -> Vec<u8> {
    use std::io::Write;
    let mut encoder = BzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn concatenated_bzip2_streams_are_read_to_the_end() {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, content) in [("first.txt", b"one"), ("second.txt", b"two"), ("third.txt", b"six")] {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_mode(0o644);
        header.set_size(content.len() as u64);
        builder.append_data(&mut header, name, &content[..]).unwrap();
    }
    let tar = builder.into_inner().unwrap();

    // Split after the first entry (header block + one data block), the way
    // parallel compressors cut their input.
    let (head, tail) = tar.split_at(1024);
    let mut data = compress(head);
    data.extend(compress(tail));
    let out = temp_dir();

    let report = extract_from_reader(Cursor::new(data), out.path()).unwrap();

    assert_eq!(report.files(), 3);
    assert_eq!(fs::read(out.path().join("first.txt")).unwrap(), b"one");
    assert_eq!(fs::read(out.path().join("second.txt")).unwrap(), b"two");
    assert_eq!(fs::read(out.path().join("third.txt")).unwrap(), b"six");
}

#[cfg(unix)]
#[test]
fn directory_mode_is_applied_exactly() {
    let out = temp_dir();
    fs::create_dir(out.path().join("existing")).unwrap();

    let data = bundle(|b| {
        add_dir(b, "shared/", 0o777);
        add_dir(b, "existing/", 0o700);
        add_file(b, "shared/data.txt", 0o666, b"x");
    });
    extract_from_reader(Cursor::new(data), out.path()).unwrap();

    // Both bypass the umask; the pre-existing directory is updated too.
    assert_eq!(mode_of(&out.path().join("shared")), 0o777);
    assert_eq!(mode_of(&out.path().join("existing")), 0o700);
    assert_eq!(mode_of(&out.path().join("shared/data.txt")), 0o666);
}
