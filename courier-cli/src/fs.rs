//! Capability-based file access for snapshot input and report output.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Open a UTF-8 file path for reading using ambient authority.
pub(crate) fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Open the parent directory of `path` and return it with the file name.
fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, &str)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path should include a file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Report whether `path` exists and is a regular file.
pub(crate) fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Create or truncate `path` for writing. The parent directory must exist.
pub(crate) fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.create(name)
}
