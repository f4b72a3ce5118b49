//! Cross-platform filesystem wrapper.
//!
//! On Unix this transparently re-exports `std::fs` and implements the
//! permission and symlink helpers via the Unix extension traits. Elsewhere
//! the helpers degrade: permission bits are not applied and symlinks are
//! created as file symlinks where the platform has them. The rest of the
//! crate imports `crate::fsx` instead of touching the platform modules
//! directly, keeping the call-sites identical across OSes.

use std::io;
use std::path::Path;

pub use std::fs::*;

/// Set POSIX permission bits on Unix.
#[cfg(unix)]
pub fn set_unix_permissions(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

/// No-op off Unix: POSIX permission bits are not preserved.
#[cfg(not(unix))]
pub fn set_unix_permissions(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

/// Create a symbolic link at `link` pointing at `target`.
#[cfg(unix)]
pub fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

/// Create a symbolic link at `link` pointing at `target`.
#[cfg(windows)]
pub fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

/// Symbolic links are not available on this platform.
#[cfg(not(any(unix, windows)))]
pub fn symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(io::ErrorKind::Unsupported, "symbolic links are not supported here"))
}
