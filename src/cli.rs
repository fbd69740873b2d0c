// src/cli.rs
use std::{env, error::Error, path::PathBuf};

use crate::{
    config::options::{AppOptions, ExportFormat, ImageNaming},
    config::consts::MAX_BATCH_SIZE,
    core::net::HttpClient,
    job::{Job, JobStatus},
    progress::Progress,
    runner,
};

const HELP: &str = "\
Usage: cli <URL> [options]

Scrapes the English and Arabic menu for URL, writes a merged spreadsheet,
downloads item images and zips the result.

Options:
  -o, --out-dir <DIR>     Parent folder for job output (default: scraped_data)
      --format <csv|tsv>  Spreadsheet format (default: csv)
      --no-english        Skip the English page
      --no-arabic         Skip the Arabic page
      --no-images         Do not download images
      --no-zip            Do not build a zip archive
  -b, --batch-size <N>    Parallel image downloads, 1-20 (default: 10)
      --naming <MODE>     Image names: index | name | id | id-name (default: index)
      --pause-ms <MS>     Pause after each image request (default: 500)
      --proxy <URL>       HTTP(S) proxy for every request
      --timeout <SECS>    Request timeout (default: 10)
  -h, --help              Show this help";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run { url: String, options: AppOptions },
    Help,
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let (url, options) = match parse_args(env::args().skip(1))? {
        Command::Help => {
            println!("{HELP}");
            return Ok(());
        }
        Command::Run { url, options } => (url, options),
    };

    let fetcher = HttpClient::new(&options.scrape)?;
    let job = Job::new(&url, options.export.out_root.clone());
    let mut prog = CliProgress;

    let run = runner::run(job, &options, &fetcher, Some(&mut prog));
    match run.result {
        Ok(a) => {
            println!("Items: {} EN / {} AR → {} rows", a.english_items, a.arabic_items, a.rows.len());
            println!("Sheet: {}", a.spreadsheet.display());
            println!("Images: {}/{} downloaded", a.images.succeeded(), a.images.total());
            if let Some(zip) = a.archive {
                println!("Archive: {}", zip.display());
            }
            Ok(())
        }
        Err(e) => Err(e.describe().into()),
    }
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, Box<dyn Error>> {
    let mut options = AppOptions::default();
    let mut url: Option<String> = None;

    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        match a.as_str() {
            "-o" | "--out-dir" => {
                options.export.out_root = PathBuf::from(args.next().ok_or("Missing output directory")?);
            }
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                options.export.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    other => return Err(format!("Unknown format: {}", other).into()),
                };
            }
            "--no-english" => options.scrape.english = false,
            "--no-arabic" => options.scrape.arabic = false,
            "--no-images" => options.images.enabled = false,
            "--no-zip" => options.export.archive = false,
            "-b" | "--batch-size" => {
                let v: usize = args.next().ok_or("Missing batch size")?.parse()?;
                if v == 0 || v > MAX_BATCH_SIZE {
                    return Err(format!("Batch size out of range (1..{})", MAX_BATCH_SIZE).into());
                }
                options.images.batch_size = v;
            }
            "--naming" => {
                let v = args.next().ok_or("Missing value for --naming")?;
                options.images.naming = ImageNaming::parse(&v)
                    .ok_or_else(|| format!("Unknown naming mode: {}", v))?;
            }
            "--pause-ms" => options.images.pause_ms = args.next().ok_or("Missing pause")?.parse()?,
            "--proxy" => options.scrape.proxy = Some(args.next().ok_or("Missing proxy URL")?),
            "--timeout" => options.scrape.timeout_secs = args.next().ok_or("Missing timeout")?.parse()?,
            "-h" | "--help" => return Ok(Command::Help),
            other if other.starts_with('-') => return Err(format!("Unknown arg: {}", other).into()),
            other => {
                if url.replace(s!(other)).is_some() {
                    return Err("Only one URL per run".into());
                }
            }
        }
    }

    let url = url.ok_or("Missing URL (see --help)")?;
    options.validate()?;
    Ok(Command::Run { url, options })
}

/// Prints progress lines to stdout.
struct CliProgress;

impl Progress for CliProgress {
    fn report(&mut self, percent: u8, msg: &str) {
        println!("[{percent:>3}%] {msg}");
    }
    fn status(&mut self, status: JobStatus) {
        if status == JobStatus::Failed {
            eprintln!("Job failed");
        }
    }
    fn finish(&mut self, job: &Job) {
        if let Some(f) = job.failure() {
            eprintln!("Stopped during {}: {}", f.stage.label(), f.message);
        } else {
            println!("Output: {}", job.output_dir.display());
        }
    }
}
