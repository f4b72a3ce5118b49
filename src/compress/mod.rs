//! # Compression codecs and directory packing
//!
//! This module owns the two pieces everything else is built on:
//!
//! - **Codec dispatch**: [`Compression`] names the codecs an archive can be
//!   serialized with; [`compress_stream`] and [`decompress_stream`] map the
//!   tag to the matching stream wrapper (`flate2`, `bzip2`, `xz2`) and push
//!   the whole buffer through it.
//! - **Packing**: [`pack_directory`] walks a directory tree and serializes
//!   its contents into one linear tar stream.

use std::fmt;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use bzip2::read::BzDecoder;
use bzip2::write::BzEncoder;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use walkdir::WalkDir;
use xz2::read::XzDecoder;
use xz2::write::XzEncoder;

use crate::ArchiveError;

/// xz preset used when serializing with [`Compression::Lzma`]; matches the
/// `xz` tool's default.
const XZ_PRESET: u32 = 6;

/// The compression codecs an archive can be serialized with.
///
/// The tag describes the byte stream *outside* the tar container; the
/// in-memory archive buffer is always plain tar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Compression {
    /// Plain tar stream, no compression.
    #[default]
    None,
    /// Gzip (DEFLATE). Fast and universally supported.
    Gzip,
    /// Bzip2 (Burrows-Wheeler). Better ratio than gzip, slower.
    Bzip2,
    /// LZMA2 in an xz container. Best ratio, slowest.
    Lzma,
}

impl Compression {
    /// Canonical lowercase name of the codec.
    pub const fn name(self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Gzip => "gzip",
            Compression::Bzip2 => "bzip2",
            Compression::Lzma => "lzma",
        }
    }

    /// Conventional file suffix for a tar archive serialized with this codec.
    pub const fn extension(self) -> &'static str {
        match self {
            Compression::None => "tar",
            Compression::Gzip => "tar.gz",
            Compression::Bzip2 => "tar.bz2",
            Compression::Lzma => "tar.xz",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Compression {
    type Err = ArchiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Compression::None),
            "gzip" | "gz" => Ok(Compression::Gzip),
            "bzip2" | "bz2" => Ok(Compression::Bzip2),
            "lzma" | "xz" => Ok(Compression::Lzma),
            _ => Err(ArchiveError::UnknownCompression(s.to_string())),
        }
    }
}

/// Guesses the compression codec from a file name.
///
/// Matching is on the final extension and case-insensitive: `.xz`/`.lzma`
/// map to [`Compression::Lzma`], `.bz2`/`.bzip2` to [`Compression::Bzip2`],
/// `.gz`/`.gzip` to [`Compression::Gzip`]; anything else means no
/// compression.
pub fn guess_compression<P: AsRef<Path>>(path: P) -> Compression {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());
    match ext.as_deref() {
        Some("xz") | Some("lzma") => Compression::Lzma,
        Some("bz2") | Some("bzip2") => Compression::Bzip2,
        Some("gz") | Some("gzip") => Compression::Gzip,
        _ => Compression::None,
    }
}

/// Writes `data` through the codec selected by `codec` into `sink`,
/// finishing the codec stream explicitly.
///
/// Returns the number of payload bytes pushed through the codec, i.e. the
/// uncompressed tar size, not the compressed output size.
pub(crate) fn compress_stream<W: Write>(
    codec: Compression,
    data: &[u8],
    mut sink: W,
) -> Result<u64, ArchiveError> {
    match codec {
        Compression::None => sink.write_all(data)?,
        Compression::Gzip => {
            let mut encoder = GzEncoder::new(sink, flate2::Compression::default());
            encoder.write_all(data)?;
            encoder.finish()?;
        }
        Compression::Bzip2 => {
            let mut encoder = BzEncoder::new(sink, bzip2::Compression::default());
            encoder.write_all(data)?;
            encoder.finish()?;
        }
        Compression::Lzma => {
            let mut encoder = XzEncoder::new(sink, XZ_PRESET);
            encoder.write_all(data)?;
            encoder.finish()?;
        }
    }
    Ok(data.len() as u64)
}

/// Reads the whole of `source` through the codec selected by `codec` and
/// returns the decompressed bytes.
pub(crate) fn decompress_stream<R: Read>(
    codec: Compression,
    mut source: R,
) -> Result<Vec<u8>, ArchiveError> {
    let mut data = Vec::new();
    match codec {
        Compression::None => {
            source.read_to_end(&mut data)?;
        }
        Compression::Gzip => {
            GzDecoder::new(source).read_to_end(&mut data)?;
        }
        Compression::Bzip2 => {
            BzDecoder::new(source).read_to_end(&mut data)?;
        }
        Compression::Lzma => {
            XzDecoder::new(source).read_to_end(&mut data)?;
        }
    }
    Ok(data)
}

/// Serializes the contents of the directory at `root` into a single tar
/// stream. The root itself is not part of the stream; all entry names are
/// relative to it.
///
/// Parent directories always precede their descendants and siblings are
/// emitted in file-name order, so packing the same tree twice produces
/// identical bytes. Symlinks are never followed; the link target is recorded
/// instead of content. Fails if any walked path is unreadable or a symlink
/// target cannot be resolved.
pub fn pack_directory(root: &Path) -> Result<Vec<u8>, ArchiveError> {
    let mut builder = tar::Builder::new(Vec::new());
    builder.follow_symlinks(false);

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| ArchiveError::Io {
            source: e.into(),
            path: root.to_path_buf(),
        })?;
        if entry.depth() == 0 {
            continue;
        }
        let path = entry.path();
        let relative = path.strip_prefix(root).map_err(|_e| ArchiveError::StripPrefix {
            prefix: root.to_path_buf(),
            path: path.to_path_buf(),
        })?;
        tracing::debug!(entry = %relative.display(), "packing");

        let file_type = entry.file_type();
        if file_type.is_dir() {
            builder
                .append_dir(relative, path)
                .map_err(|e| ArchiveError::Io { source: e, path: path.to_path_buf() })?;
        } else if file_type.is_symlink() {
            let target = crate::fsx::read_link(path)
                .map_err(|e| ArchiveError::Io { source: e, path: path.to_path_buf() })?;
            let metadata = entry.metadata().map_err(|e| ArchiveError::Io {
                source: e.into(),
                path: path.to_path_buf(),
            })?;
            let mut header = tar::Header::new_gnu();
            header.set_metadata(&metadata);
            builder
                .append_link(&mut header, relative, &target)
                .map_err(|e| ArchiveError::Io { source: e, path: path.to_path_buf() })?;
        } else {
            let mut file = crate::fsx::File::open(path)
                .map_err(|e| ArchiveError::Io { source: e, path: path.to_path_buf() })?;
            builder
                .append_file(relative, &mut file)
                .map_err(|e| ArchiveError::Io { source: e, path: path.to_path_buf() })?;
        }
    }

    // into_inner finishes the stream (trailing zero blocks) before handing
    // the buffer back.
    builder
        .into_inner()
        .map_err(|e| ArchiveError::Io { source: e, path: root.to_path_buf() })
}
