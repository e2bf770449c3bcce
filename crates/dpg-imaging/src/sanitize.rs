//! Span-safe renderings of paths on the production share.
//!
//! Unit directories sit under a site-specific images root. Spans carry the
//! unit-relative part of a master-file path and tag the unit directory with
//! its name plus a digest of the root, so two sites never collide in traces.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// `<unit dir>/<file>` for a master-file path, or just the file name when
/// the path has no parent directory.
pub fn unit_relative(path: &Path) -> String {
    let Some(file) = path.file_name().and_then(|n| n.to_str()) else {
        return "<unknown>".to_string();
    };
    match path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
    {
        Some(unit) => format!("{}/{}", unit, file),
        None => file.to_string(),
    }
}

/// `<unit dir>@<root digest>` for a unit directory.
pub fn unit_dir_tag(dir: &Path) -> String {
    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>");
    let mut hasher = DefaultHasher::new();
    dir.parent().unwrap_or(Path::new("")).hash(&mut hasher);
    format!("{}@{:08x}", name, hasher.finish() as u32)
}
