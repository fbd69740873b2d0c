// src/images.rs
//
// Bounded worker pool: workers only fetch; the calling thread writes files.
// Names are fixed per task before any worker starts.

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
    sync::{atomic::{AtomicUsize, Ordering}, mpsc},
    thread,
    time::Duration,
};

use reqwest::Url;
use serde::Serialize;

use crate::{
    config::{consts::FALLBACK_IMAGE_EXT, options::{ImageNaming, ImageOptions}},
    core::{net::{Fetch, Fetched}, sanitize::sanitize_file_stem},
    error::ImageError,
    file::{ensure_directory, resolve_unique_stem},
    merge::MergedRow,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageTask {
    /// Row index in the merged sheet.
    pub index: usize,
    pub url: String,
    pub name: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug)]
pub struct ImageOutcome {
    pub index: usize,
    pub url: String,
    pub result: Result<PathBuf, ImageError>,
}

#[derive(Debug, Default)]
pub struct ImageReport {
    /// Sorted by `index`.
    pub outcomes: Vec<ImageOutcome>,
}

#[derive(Serialize)]
pub struct ManifestEntry {
    pub index: usize,
    pub url: String,
    pub file: Option<String>,
    pub error: Option<String>,
}

impl ImageReport {
    pub fn total(&self) -> usize { self.outcomes.len() }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&ImageOutcome, &ImageError)> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err().map(|e| (o, e)))
    }

    /// File names are relative to `dir` when possible.
    pub fn manifest(&self, dir: &Path) -> Vec<ManifestEntry> {
        self.outcomes
            .iter()
            .map(|o| {
                let (file, error) = match &o.result {
                    Ok(p) => (Some(p.strip_prefix(dir).unwrap_or(p).to_string_lossy().replace('\\', "/")), None),
                    Err(e) => (None, Some(e.to_string())),
                };
                ManifestEntry { index: o.index, url: o.url.clone(), file, error }
            })
            .collect()
    }
}

/// One task per row that has an image URL (English side preferred).
pub fn tasks_from_rows(rows: &[MergedRow]) -> Vec<ImageTask> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            Some(ImageTask {
                index,
                url: s!(row.image_url()?),
                name: row.display_name().map(|n| s!(n)),
                id: row.id().map(|i| s!(i)),
            })
        })
        .collect()
}

pub fn file_stem_for(task: &ImageTask, naming: ImageNaming) -> String {
    let by_index = format!("item_{:04}", task.index + 1);
    let name = task.name.as_deref().map(sanitize_file_stem).filter(|s| !s.is_empty());
    let id = task.id.as_deref().map(sanitize_file_stem).filter(|s| !s.is_empty());

    match naming {
        ImageNaming::Index => by_index,
        ImageNaming::ProductName => name.unwrap_or(by_index),
        ImageNaming::Id => id.map(|id| join!("item_", &id)).unwrap_or(by_index),
        ImageNaming::IdAndName => match (id, name) {
            (Some(id), Some(name)) => join!(&id, "_", &name),
            (Some(id), None) => join!("item_", &id),
            (None, Some(name)) => name,
            (None, None) => by_index,
        },
    }
}

/// Stems in task order, duplicates suffixed ` (2)`, ` (3)`.
pub fn unique_stems(tasks: &[ImageTask], naming: ImageNaming) -> Vec<String> {
    let mut taken = HashSet::new();
    tasks
        .iter()
        .map(|t| resolve_unique_stem(&file_stem_for(t, naming), &mut taken))
        .collect()
}

/// Extension from the URL path, else the Content-Type, else the bytes, else jpg.
pub fn pick_extension(url: &str, fetched: &Fetched) -> String {
    url_extension(url)
        .or_else(|| fetched.content_type.as_deref().and_then(mime_extension))
        .or_else(|| {
            image::guess_format(&fetched.bytes)
                .ok()
                .and_then(|f| f.extensions_str().first().map(|e| s!(*e)))
        })
        .unwrap_or_else(|| s!(FALLBACK_IMAGE_EXT))
}

fn url_extension(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let last = parsed.path_segments()?.next_back()?;
    let (_, ext) = last.rsplit_once('.')?;
    let ok = (1..=5).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric());
    ok.then(|| ext.to_ascii_lowercase())
}

fn mime_extension(content_type: &str) -> Option<String> {
    let mime = content_type.split(';').next()?.trim().to_ascii_lowercase();
    let ext = match mime.as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/avif" => "avif",
        "image/bmp" => "bmp",
        "image/svg+xml" => "svg",
        _ => return None,
    };
    Some(s!(ext))
}

/// Download every task into `dest`. Individual failures land in the report;
/// only an uncreatable `dest` is an error. `on_done(done, total, outcome)` runs on
/// the calling thread after each task.
pub fn download_images(
    tasks: &[ImageTask],
    dest: &Path,
    opts: &ImageOptions,
    fetcher: &dyn Fetch,
    mut on_done: impl FnMut(usize, usize, &ImageOutcome),
) -> io::Result<ImageReport> {
    ensure_directory(dest)?;
    if tasks.is_empty() {
        return Ok(ImageReport::default());
    }

    type FetchMsg = (usize, Result<Fetched, ImageError>);

    let counter = AtomicUsize::new(0);
    let pause = Duration::from_millis(opts.pause_ms);
    let workers = opts.batch_size.min(tasks.len()).max(1);
    let (tx, rx) = mpsc::channel::<FetchMsg>();

    let stems = unique_stems(tasks, opts.naming);
    let mut outcomes = Vec::with_capacity(tasks.len());

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let counter = &counter;
            scope.spawn(move || loop {
                let i = counter.fetch_add(1, Ordering::Relaxed);
                if i >= tasks.len() {
                    break;
                }
                let result = fetcher
                    .fetch_bytes(&tasks[i].url)
                    .map_err(ImageError::from)
                    .and_then(|f| if f.bytes.is_empty() { Err(ImageError::Empty) } else { Ok(f) });
                if tx.send((i, result)).is_err() {
                    break;
                }
                if !pause.is_zero() {
                    thread::sleep(pause); // be polite
                }
            });
        }
        drop(tx); // calling thread is sole receiver now

        for (i, fetched) in rx {
            let task = &tasks[i];
            let result = fetched.and_then(|f| {
                let ext = pick_extension(&task.url, &f);
                let path = dest.join(format!("{}.{ext}", stems[i]));
                fs::write(&path, &f.bytes)
                    .map(|_| path.clone())
                    .map_err(|source| ImageError::Io { path, source })
            });

            match &result {
                Ok(p) => logd!("Images: row {} → {}", task.index, p.display()),
                Err(e) => logw!("Images: row {} {}: {}", task.index, task.url, e),
            }

            let outcome = ImageOutcome { index: task.index, url: task.url.clone(), result };
            on_done(outcomes.len() + 1, tasks.len(), &outcome);
            outcomes.push(outcome);
        }
    });

    outcomes.sort_by_key(|o| o.index);
    Ok(ImageReport { outcomes })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(index: usize, name: Option<&str>, id: Option<&str>) -> ImageTask {
        ImageTask { index, url: s!("https://cdn.test/x"), name: name.map(|s| s!(s)), id: id.map(|s| s!(s)) }
    }

    #[test]
    fn stems_per_naming_mode() {
        let t = task(0, Some("Chicken / Rice"), Some("42"));
        assert_eq!(file_stem_for(&t, ImageNaming::Index), "item_0001");
        assert_eq!(file_stem_for(&t, ImageNaming::ProductName), "Chicken Rice");
        assert_eq!(file_stem_for(&t, ImageNaming::Id), "item_42");
        assert_eq!(file_stem_for(&t, ImageNaming::IdAndName), "42_Chicken Rice");
    }

    #[test]
    fn stems_fall_back_to_index() {
        let t = task(9, Some("???"), None);
        assert_eq!(file_stem_for(&t, ImageNaming::ProductName), "item_0010");
        assert_eq!(file_stem_for(&t, ImageNaming::Id), "item_0010");
        assert_eq!(file_stem_for(&t, ImageNaming::IdAndName), "item_0010");
    }

    #[test]
    fn extension_sources_in_order() {
        let none = Fetched::default();
        assert_eq!(pick_extension("https://cdn.test/a/b.JPEG?w=400", &none), "jpeg");

        let typed = Fetched { bytes: vec![], content_type: Some(s!("image/webp; charset=binary")) };
        assert_eq!(pick_extension("https://cdn.test/a/b", &typed), "webp");

        let png = Fetched { bytes: b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR".to_vec(), content_type: None };
        assert_eq!(pick_extension("https://cdn.test/a/b", &png), "png");

        assert_eq!(pick_extension("https://cdn.test/a/b.verylongext", &none), "jpg");
    }
}
