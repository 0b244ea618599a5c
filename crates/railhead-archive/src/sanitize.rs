use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Normalize an entry path into a path relative to the destination.
///
/// `.` components are dropped and `..` is resolved lexically. Absolute
/// paths and paths climbing above the destination are rejected (zip-slip
/// protection). Returns `None` when nothing remains, e.g. for `./`.
pub fn sanitize_entry_path(entry_path: &Path) -> Result<Option<PathBuf>> {
    let escape = || Error::PathEscape {
        entry: entry_path.to_path_buf(),
    };

    let mut result = PathBuf::new();
    for component in entry_path.components() {
        match component {
            Component::Normal(part) => result.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    return Err(escape());
                }
            }
            Component::RootDir | Component::Prefix(_) => return Err(escape()),
        }
    }

    Ok((!result.as_os_str().is_empty()).then_some(result))
}
