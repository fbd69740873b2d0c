// src/file.rs

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Duplicate handling **only within this run**
pub fn resolve_unique_stem(
    stem: &str,                        // already sanitized, no extension
    taken: &mut HashSet<String>,
) -> String {
    // Case-insensitive, regardless of extension: "Tea" and "tea" are one name on Windows/macOS
    // First occurrence: "<stem>"
    // Subsequent:       "<stem> (N)" with N starting at 2
    let mut candidate = s!(stem);
    let mut n = 1;
    while !taken.insert(candidate.to_lowercase()) {
        n += 1;
        candidate = format!("{stem} ({n})");
    }
    candidate
}

/// Create `base`, or `base_2`, `base_3`, ... when it already exists.
pub fn create_unique_dir(base: &Path) -> io::Result<PathBuf> {
    if let Some(parent) = base.parent() {
        fs::create_dir_all(parent)?;
    }
    let name = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "directory has no name"))?;

    let mut candidate = base.to_path_buf();
    let mut n = 1;
    loop {
        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                n += 1;
                candidate = base.with_file_name(format!("{name}_{n}"));
            }
            Err(e) => return Err(e),
        }
    }
}

/// Every regular file below `root`, sorted, as (absolute, relative with `/`) pairs.
pub fn walk_files(root: &Path) -> io::Result<Vec<(PathBuf, String)>> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.is_file() {
                let rel = path
                    .strip_prefix(root)
                    .unwrap_or(&path)
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/");
                out.push((path, rel));
            }
        }
    }
    out.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(out)
}
