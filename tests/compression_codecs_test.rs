use std::fs;
use std::io::Read;
use std::path::PathBuf;

use tarpack::{guess_compression, Archive, ArchiveError, Compression};
use tempfile::tempdir;

const ALL_CODECS: [Compression; 4] = [
    Compression::None,
    Compression::Gzip,
    Compression::Bzip2,
    Compression::Lzma,
];

fn sample_archive() -> Archive {
    let src = tempdir().unwrap();
    fs::write(src.path().join("a"), b"first file").unwrap();
    fs::create_dir(src.path().join("sub")).unwrap();
    fs::write(src.path().join("sub").join("b"), b"second file, nested").unwrap();
    Archive::from_directory(src.path()).unwrap()
}

#[test]
fn guessing_matches_known_extensions() {
    assert_eq!(guess_compression("x.tar.gz"), Compression::Gzip);
    assert_eq!(guess_compression("x.tar.bz2"), Compression::Bzip2);
    assert_eq!(guess_compression("x.tar.xz"), Compression::Lzma);
    assert_eq!(guess_compression("x.tar"), Compression::None);
    // Case-insensitive variants match identically.
    assert_eq!(guess_compression("X.TAR.GZ"), Compression::Gzip);
    assert_eq!(guess_compression("X.TAR.BZ2"), Compression::Bzip2);
    assert_eq!(guess_compression("X.TAR.XZ"), Compression::Lzma);
    assert_eq!(guess_compression("X.TAR"), Compression::None);
}

#[test]
fn serialization_is_idempotent_per_codec() {
    let mut archive = sample_archive();
    for codec in ALL_CODECS {
        archive.set_compression(codec);
        let first = archive.to_bytes().unwrap();
        let second = archive.to_bytes().unwrap();
        assert_eq!(first, second, "{} output is not deterministic", codec);
    }
}

#[test]
fn raw_tar_bytes_survive_every_codec() {
    let mut archive = sample_archive();
    for codec in ALL_CODECS {
        archive.set_compression(codec);
        let blob = archive.to_bytes().unwrap();
        let restored = Archive::from_bytes(&blob, codec).unwrap();
        assert_eq!(archive.data(), restored.data(), "{}", codec);
        assert_eq!(restored.compression(), codec);
    }
}

#[test]
fn plain_serialization_is_the_raw_buffer() {
    let archive = sample_archive();
    assert_eq!(archive.compression(), Compression::None);
    assert_eq!(archive.to_bytes().unwrap(), archive.data());
}

#[test]
fn compressed_blob_differs_from_raw_buffer() {
    let mut archive = sample_archive();
    for codec in [Compression::Gzip, Compression::Bzip2, Compression::Lzma] {
        archive.set_compression(codec);
        let blob = archive.to_bytes().unwrap();
        assert_ne!(blob.as_slice(), archive.data(), "{}", codec);
    }
}

#[test]
fn parents_precede_descendants_in_entry_order() {
    let archive = sample_archive();
    let mut names = Vec::new();
    archive
        .for_each_entry(|entry| {
            names.push(entry.path()?.into_owned());
            Ok(())
        })
        .unwrap();
    let expected: Vec<PathBuf> =
        ["a", "sub", "sub/b"].iter().map(PathBuf::from).collect();
    assert_eq!(names, expected);
}

#[test]
fn for_each_entry_reads_headers_and_content() {
    let archive = sample_archive();
    let mut seen = Vec::new();
    archive
        .for_each_entry(|entry| {
            let size = entry.header().size()?;
            let mut content = Vec::new();
            entry.read_to_end(&mut content)?;
            assert_eq!(content.len() as u64, size);
            seen.push((entry.path()?.into_owned(), content));
            Ok(())
        })
        .unwrap();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0].1, b"first file");
    assert_eq!(seen[2].1, b"second file, nested");
}

#[test]
fn for_each_entry_stops_on_callback_error() {
    let archive = sample_archive();
    let mut calls = 0;
    let result = archive.for_each_entry(|_entry| {
        calls += 1;
        Err(ArchiveError::UnknownCompression("stop".into()))
    });
    assert!(result.is_err());
    assert_eq!(calls, 1);
}

#[test]
fn reader_exposes_the_raw_tar_stream() {
    let archive = sample_archive();
    let mut reader = archive.reader();
    let count = reader.entries().unwrap().count();
    assert_eq!(count, 3);
}

#[test]
fn decoding_with_the_wrong_codec_fails() {
    let archive = sample_archive();
    let raw = archive.to_bytes().unwrap();
    for codec in [Compression::Gzip, Compression::Bzip2, Compression::Lzma] {
        assert!(Archive::from_bytes(&raw, codec).is_err(), "{}", codec);
    }
}

#[test]
fn unknown_codec_name_is_rejected() {
    let err = "snappy".parse::<Compression>().unwrap_err();
    match err {
        ArchiveError::UnknownCompression(name) => assert_eq!(name, "snappy"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn empty_directory_packs_to_an_entryless_archive() {
    let src = tempdir().unwrap();
    let archive = Archive::from_directory(src.path()).unwrap();
    assert!(!archive.is_empty(), "even an entryless tar stream has closing blocks");

    let mut names = Vec::new();
    archive
        .for_each_entry(|entry| {
            names.push(entry.path()?.into_owned());
            Ok(())
        })
        .unwrap();
    assert!(names.is_empty());

    let out = tempdir().unwrap();
    archive.to_directory(out.path().join("restored")).unwrap();
    assert!(out.path().join("restored").is_dir());
}
