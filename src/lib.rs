//! # Tarpack Core Library
//!
//! This crate packs a directory tree into an in-memory tar stream and
//! optionally wraps it with gzip, bzip2 or xz compression at the
//! serialization boundary, and reverses the process to restore a directory
//! from a (possibly compressed) tar blob sourced from memory, a file, or a
//! stream.
//!
//! ## Key Modules
//!
//! - [`archive`]: the [`Archive`] value and its construction and
//!   serialization variants.
//! - [`compress`]: compression codec selection and directory packing.
//! - [`extract`]: restoring a directory tree from an archive.
//!
//! ## Example
//!
//! ```no_run
//! use tarpack::Archive;
//!
//! let archive = Archive::from_directory("assets")?;
//! archive.to_file("assets.tar.gz")?; // codec guessed from the extension
//!
//! let restored = Archive::from_file("assets.tar.gz")?;
//! restored.to_directory("assets_copy")?;
//! # Ok::<(), tarpack::ArchiveError>(())
//! ```

pub mod archive;
pub mod compress;
pub mod extract;

pub mod error;
pub use error::ArchiveError;

// Cross-platform filesystem wrapper
pub mod fsx;

pub use archive::Archive;
pub use compress::{guess_compression, Compression};
