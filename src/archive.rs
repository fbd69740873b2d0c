// src/archive.rs
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::{error::ExportError, file::walk_files};

/// Zip every file below `src` into `dest`. Entries are prefixed with the
/// folder name so the archive unpacks into one directory.
pub fn zip_dir(src: &Path, dest: &Path) -> Result<PathBuf, ExportError> {
    let archive_err = |source| ExportError::Archive { path: dest.to_path_buf(), source };

    let files = walk_files(src).map_err(|e| ExportError::io(src, e))?;
    let out = File::create(dest).map_err(|e| ExportError::io(dest, e))?;

    let mut zip = ZipWriter::new(out);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let root = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    for (abs, rel) in &files {
        let name = if root.is_empty() { rel.clone() } else { join!(&root, "/", rel) };
        zip.start_file(name, options).map_err(archive_err)?;
        let mut input = File::open(abs).map_err(|e| ExportError::io(abs, e))?;
        io::copy(&mut input, &mut zip).map_err(|e| ExportError::io(dest, e))?;
    }
    zip.finish().map_err(archive_err)?;

    logf!("Archive: {} files → {}", files.len(), dest.display());
    Ok(dest.to_path_buf())
}
