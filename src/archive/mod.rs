//! # The archive value
//!
//! [`Archive`] holds an uncompressed tar stream in memory together with the
//! compression codec to apply when it is serialized. Four entry points
//! converge on that representation — a directory walk, a compressed blob, a
//! file on disk, or a plain reader — and it is consumed by extracting into a
//! directory or serializing back out to bytes or a file.

use std::io::{Read, Write};
use std::path::Path;

use crate::compress::{self, Compression};
use crate::extract;
use crate::fsx;
use crate::ArchiveError;

/// An in-memory tar archive plus the codec applied at the serialization
/// boundary.
///
/// The buffer always holds the *uncompressed* tar stream; compression only
/// happens in [`save`](Archive::save), [`to_bytes`](Archive::to_bytes) and
/// [`to_file`](Archive::to_file), and decompression when loading from a
/// source. Each value is independently owned by its caller; on any failed
/// operation it should be discarded.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    data: Vec<u8>,
    compression: Compression,
}

impl Archive {
    /// Creates an archive from the contents of `directory`.
    ///
    /// The directory itself is not part of the archive; all entry names are
    /// relative to it. The codec starts out as [`Compression::None`].
    pub fn from_directory<P: AsRef<Path>>(directory: P) -> Result<Self, ArchiveError> {
        let data = compress::pack_directory(directory.as_ref())?;
        Ok(Self { data, compression: Compression::None })
    }

    /// Loads an archive from a blob compressed with `compression`.
    pub fn from_bytes(data: &[u8], compression: Compression) -> Result<Self, ArchiveError> {
        let mut archive = Self { data: Vec::new(), compression };
        archive.load(data)?;
        Ok(archive)
    }

    /// Loads an archive from a file, guessing the codec from the file
    /// extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        let path = path.as_ref();
        let mut archive = Self {
            data: Vec::new(),
            compression: compress::guess_compression(path),
        };
        let file = fsx::File::open(path)
            .map_err(|e| ArchiveError::Io { source: e, path: path.to_path_buf() })?;
        archive.load(file)?;
        Ok(archive)
    }

    /// Decompresses `source` into the archive buffer using the archive's
    /// own codec. Returns the number of decompressed bytes.
    pub fn load<R: Read>(&mut self, source: R) -> Result<u64, ArchiveError> {
        self.data = compress::decompress_stream(self.compression, source)?;
        Ok(self.data.len() as u64)
    }

    /// Compresses the archive buffer into `sink` using the archive's own
    /// codec. Returns the number of payload (uncompressed tar) bytes
    /// written through the codec.
    pub fn save<W: Write>(&self, sink: W) -> Result<u64, ArchiveError> {
        compress::compress_stream(self.compression, &self.data, sink)
    }

    /// Serializes the archive with its codec and returns the bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ArchiveError> {
        let mut buf = Vec::new();
        self.save(&mut buf)?;
        Ok(buf)
    }

    /// Writes the archive to the file at `path`, creating or truncating it.
    ///
    /// When no codec is set the codec is guessed from the file extension for
    /// this write only; an explicit codec always wins. Returns the number of
    /// payload (uncompressed tar) bytes written through the codec.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<u64, ArchiveError> {
        let path = path.as_ref();
        let codec = match self.compression {
            Compression::None => compress::guess_compression(path),
            explicit => explicit,
        };
        let file = fsx::File::create(path)
            .map_err(|e| ArchiveError::Io { source: e, path: path.to_path_buf() })?;
        compress::compress_stream(codec, &self.data, file)
    }

    /// Extracts the archive's contents into `directory`, creating it (and
    /// missing parents) if absent.
    pub fn to_directory<P: AsRef<Path>>(&self, directory: P) -> Result<(), ArchiveError> {
        extract::unpack_into(&self.data, directory.as_ref())
    }

    /// Returns a raw tar reader over the uncompressed buffer.
    pub fn reader(&self) -> tar::Archive<&[u8]> {
        tar::Archive::new(self.data.as_slice())
    }

    /// Calls `callback` for every entry in the archive, in stream order.
    ///
    /// The [`tar::Entry`] handed to the callback exposes the entry header
    /// and reads the entry content. The first error returned by the
    /// callback, or produced by a malformed stream, aborts the iteration.
    pub fn for_each_entry<F>(&self, mut callback: F) -> Result<(), ArchiveError>
    where
        F: FnMut(&mut tar::Entry<'_, &[u8]>) -> Result<(), ArchiveError>,
    {
        let mut reader = self.reader();
        for entry in reader.entries()? {
            let mut entry = entry?;
            callback(&mut entry)?;
        }
        Ok(())
    }

    /// The raw, uncompressed tar bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The codec applied when the archive is serialized.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Sets the codec applied when the archive is serialized.
    pub fn set_compression(&mut self, compression: Compression) {
        self.compression = compression;
    }

    /// Size of the uncompressed tar stream in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the archive holds no tar data at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
