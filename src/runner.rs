// src/runner.rs
//
// Job orchestration: Pending → Fetching → Parsing → Merging → Exporting →
// DownloadingImages → Done, or Failed from wherever the first fatal error hits.
// Partial output is left on disk when a job fails.

use std::{fs, path::PathBuf};

use serde::Serialize;

use crate::{
    archive,
    config::{consts::MANIFEST_FILE, options::{AppOptions, ExportFormat}},
    core::{net::Fetch, url},
    error::{ExportError, JobError},
    export::write_spreadsheet,
    images::{self, ImageReport, ManifestEntry},
    job::{Job, JobStatus},
    menu::{Language, MenuRecordSet},
    merge::{self, Alignment, MergedRow},
    progress::Progress,
    specs::menu_data::parse_menu,
};

/// Everything a successful job produced.
#[derive(Debug)]
pub struct JobArtifacts {
    pub rows: Vec<MergedRow>,
    pub alignment: Alignment,
    pub english_items: usize,
    pub arabic_items: usize,
    pub spreadsheet: PathBuf,
    pub images: ImageReport,
    pub archive: Option<PathBuf>,
}

/// The job value handed back to the caller, plus what it produced.
#[derive(Debug)]
pub struct JobRun {
    pub job: Job,
    pub result: Result<JobArtifacts, JobError>,
}

#[derive(Serialize)]
struct Manifest<'a> {
    job: &'a Job,
    alignment: Alignment,
    english_items: usize,
    arabic_items: usize,
    rows: usize,
    images: Vec<ManifestEntry>,
}

/// Monotonic percentages, optional sink.
struct Reporter<'p> {
    sink: Option<&'p mut dyn Progress>,
    percent: u8,
}

impl Reporter<'_> {
    fn report(&mut self, percent: u8, msg: &str) {
        self.percent = self.percent.max(percent.min(100));
        if let Some(p) = self.sink.as_deref_mut() {
            p.report(self.percent, msg);
        }
    }

    /// Same percentage, new line.
    fn log(&mut self, msg: &str) {
        let pct = self.percent;
        self.report(pct, msg);
    }

    fn enter(&mut self, job: &mut Job, to: JobStatus, percent: u8, msg: &str) -> Result<(), JobError> {
        job.advance(to)?;
        if let Some(p) = self.sink.as_deref_mut() {
            p.status(to);
        }
        self.report(percent, msg);
        Ok(())
    }
}

/// Run `job` to Done or Failed. Never panics on pipeline errors; the returned
/// job carries the failure.
pub fn run(
    mut job: Job,
    opts: &AppOptions,
    fetcher: &dyn Fetch,
    progress: Option<&mut dyn Progress>,
) -> JobRun {
    let mut rep = Reporter { sink: progress, percent: 0 };
    logf!("Job: Begin url={} out={}", job.url, job.output_dir.display());

    let result = execute(&mut job, opts, fetcher, &mut rep);

    match &result {
        Ok(a) => logf!(
            "Job: OK rows={} images={}/{} sheet={}",
            a.rows.len(),
            a.images.succeeded(),
            a.images.total(),
            a.spreadsheet.display()
        ),
        Err(e) => {
            let msg = e.describe();
            loge!("Job: Failed at {:?}: {}", job.status(), msg);
            if job.fail(msg.clone()) {
                if let Some(p) = rep.sink.as_deref_mut() {
                    p.status(JobStatus::Failed);
                }
            }
            rep.log(&format!("ERROR: {msg}"));
        }
    }

    if let Some(p) = rep.sink.as_deref_mut() {
        p.finish(&job);
    }
    JobRun { job, result }
}

fn enabled_languages(opts: &AppOptions) -> Vec<Language> {
    let mut v = Vec::with_capacity(2);
    if opts.scrape.english { v.push(Language::English); }
    if opts.scrape.arabic { v.push(Language::Arabic); }
    v
}

/// `lo + (hi - lo) * done / total`
fn span(lo: u8, hi: u8, done: usize, total: usize) -> u8 {
    let total = total.max(1);
    lo + ((hi - lo) as usize * done.min(total) / total) as u8
}

fn execute(
    job: &mut Job,
    opts: &AppOptions,
    fetcher: &dyn Fetch,
    rep: &mut Reporter<'_>,
) -> Result<JobArtifacts, JobError> {
    opts.validate().map_err(JobError::Options)?;
    let languages = enabled_languages(opts);
    let first = languages[0];

    // ---------- Fetching ----------
    rep.enter(job, JobStatus::Fetching, 5, "Fetching menu pages…")?;
    let urls = url::resolve(&job.url).map_err(|source| JobError::Fetch { language: first, source })?;

    let mut pages: Vec<(Language, String)> = Vec::with_capacity(languages.len());
    for (i, &lang) in languages.iter().enumerate() {
        let page_url = urls.for_language(lang);
        rep.report(span(5, 25, i, languages.len()), &format!("Fetching {lang} menu: {page_url}"));
        let html = fetcher
            .fetch_page(page_url, lang)
            .map_err(|source| JobError::Fetch { language: lang, source })?;
        rep.report(
            span(5, 25, i + 1, languages.len()),
            &format!("Fetched {lang} page ({} KB)", html.len().div_ceil(1024)),
        );
        pages.push((lang, html));
    }

    // ---------- Parsing ----------
    rep.enter(job, JobStatus::Parsing, 30, "Extracting menu data…")?;
    let mut english = MenuRecordSet::empty(Language::English);
    let mut arabic = MenuRecordSet::empty(Language::Arabic);
    for (i, (lang, html)) in pages.iter().enumerate() {
        let set = parse_menu(html, *lang).map_err(|source| JobError::Parse { language: *lang, source })?;
        rep.report(span(30, 55, i + 1, pages.len()), &format!("Found {} items in {lang} menu", set.len()));
        match lang {
            Language::English => english = set,
            Language::Arabic => arabic = set,
        }
    }
    drop(pages);

    // ---------- Merging ----------
    rep.enter(job, JobStatus::Merging, 60, "Merging languages…")?;
    let merged = merge::merge(&english, &arabic);
    rep.log(&format!("Merged into {} rows (alignment: {:?})", merged.rows.len(), merged.alignment));

    // ---------- Exporting ----------
    rep.enter(job, JobStatus::Exporting, 65, "Writing spreadsheet…")?;
    job.claim_output_dir().map_err(|e| ExportError::io(&job.output_dir, e))?;
    let spreadsheet = job.spreadsheet_path(&opts.export);
    write_spreadsheet(&merged.rows, &spreadsheet, opts.export.format)?;
    rep.report(70, &format!("Saved {}", spreadsheet.display()));

    // ---------- Images ----------
    rep.enter(job, JobStatus::DownloadingImages, 72, "Preparing image downloads…")?;
    let images = if opts.images.enabled {
        download_step(job, &merged.rows, opts, fetcher, rep)?
    } else {
        rep.log("Image download disabled, skipping");
        ImageReport::default()
    };

    let mut artifacts = JobArtifacts {
        english_items: english.len(),
        arabic_items: arabic.len(),
        alignment: merged.alignment,
        rows: merged.rows,
        spreadsheet,
        images,
        archive: None,
    };
    write_manifest(job, &artifacts)?;

    if opts.export.archive {
        rep.report(99, "Packaging archive…");
        let path = archive::zip_dir(&job.output_dir, &job.archive_path())?;
        rep.log(&format!("Archive ready: {}", path.display()));
        artifacts.archive = Some(path);
    }

    rep.enter(job, JobStatus::Done, 100, "Done! Ready for download.")?;
    Ok(artifacts)
}

/// Replace the rows of a finished job: rewrite the spreadsheet in its
/// original format, refresh the manifest and rebuild the archive if the job
/// made one.
pub fn save_edits(job: &Job, artifacts: &mut JobArtifacts, rows: Vec<MergedRow>) -> Result<(), ExportError> {
    let format = ExportFormat::from_path(&artifacts.spreadsheet);
    write_spreadsheet(&rows, &artifacts.spreadsheet, format)?;
    logf!("Edit: saved {} rows to {}", rows.len(), artifacts.spreadsheet.display());
    artifacts.rows = rows;

    write_manifest(job, artifacts)?;
    if let Some(zip) = &artifacts.archive {
        archive::zip_dir(&job.output_dir, zip)?;
        logd!("Edit: rebuilt {}", zip.display());
    }
    Ok(())
}

fn download_step(
    job: &Job,
    rows: &[MergedRow],
    opts: &AppOptions,
    fetcher: &dyn Fetch,
    rep: &mut Reporter<'_>,
) -> Result<ImageReport, JobError> {
    let tasks = images::tasks_from_rows(rows);
    let batch = opts.images.batch_size;
    if tasks.is_empty() {
        rep.log("No image URLs in menu");
    } else {
        rep.log(&format!("Downloading {} images in batches of {batch}…", tasks.len()));
    }

    let dir = job.images_dir();
    let report = images::download_images(&tasks, &dir, &opts.images, fetcher, |done, total, outcome| {
        let pct = span(72, 98, done, total);
        if let Err(e) = &outcome.result {
            rep.report(pct, &format!("WARNING: image for row {} failed: {e}", outcome.index + 1));
        }
        if done % batch == 0 || done == total {
            rep.report(pct, &format!("Progress: {done}/{total} images processed…"));
        }
    })
    .map_err(|source| JobError::ImageDir { path: dir.clone(), source })?;

    rep.log(&format!("Finished downloading {} of {} images", report.succeeded(), report.total()));
    Ok(report)
}

fn write_manifest(job: &Job, a: &JobArtifacts) -> Result<(), ExportError> {
    let path = job.output_dir.join(MANIFEST_FILE);
    let manifest = Manifest {
        job,
        alignment: a.alignment,
        english_items: a.english_items,
        arabic_items: a.arabic_items,
        rows: a.rows.len(),
        images: a.images.manifest(&job.output_dir),
    };
    let json = serde_json::to_vec_pretty(&manifest)
        .map_err(|source| ExportError::Manifest { path: path.clone(), source })?;
    fs::write(&path, json).map_err(|e| ExportError::io(&path, e))
}
