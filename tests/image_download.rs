// tests/image_download.rs
mod common;

use std::{fs, thread, time::Duration};

use common::{tmp_dir, MapFetcher, PNG};
use menu_scrape::{
    config::options::{ImageNaming, ImageOptions},
    core::net::{Fetch, Fetched},
    error::{FetchError, ImageError},
    images::{download_images, ImageTask},
    menu::Language,
    s,
};

fn task(index: usize, url: &str, name: &str) -> ImageTask {
    ImageTask { index, url: s!(url), name: Some(s!(name)), id: None }
}

fn opts(naming: ImageNaming) -> ImageOptions {
    ImageOptions { naming, batch_size: 3, pause_ms: 0, ..ImageOptions::default() }
}

/// Holds back the first image so later tasks finish before it.
struct SlowFirst(MapFetcher);

impl Fetch for SlowFirst {
    fn fetch_page(&self, url: &str, language: Language) -> Result<String, FetchError> {
        self.0.fetch_page(url, language)
    }

    fn fetch_bytes(&self, url: &str) -> Result<Fetched, FetchError> {
        if url.ends_with("/a.png") {
            thread::sleep(Duration::from_millis(150));
        }
        self.0.fetch_bytes(url)
    }
}

#[test]
fn duplicate_product_names_follow_row_order() {
    let dest = tmp_dir("dup_names").join("images");
    let fetcher = SlowFirst(
        MapFetcher::new()
            .file("https://cdn.test/a.png", PNG, None)
            .file("https://cdn.test/b.png", PNG, None)
            .file("https://cdn.test/c.png", PNG, None),
    );
    let tasks = vec![
        task(0, "https://cdn.test/a.png", "Tea"),
        task(1, "https://cdn.test/b.png", "Coffee"),
        task(2, "https://cdn.test/c.png", "tea"),
    ];

    let report = download_images(&tasks, &dest, &opts(ImageNaming::ProductName), &fetcher, |_, _, _| {}).unwrap();

    let files: Vec<_> = report.outcomes.iter().map(|o| o.result.as_ref().unwrap().clone()).collect();
    assert_eq!(files, vec![dest.join("Tea.png"), dest.join("Coffee.png"), dest.join("tea (2).png")]);
    assert!(files.iter().all(|p| p.is_file()));
}

#[test]
fn zero_byte_body_is_reported_empty() {
    let dest = tmp_dir("empty_body").join("images");
    let fetcher = MapFetcher::new()
        .file("https://cdn.test/ok.png", PNG, Some("image/png"))
        .file("https://cdn.test/blank.png", &[], Some("image/png"));
    let tasks = vec![
        task(0, "https://cdn.test/ok.png", "Ok"),
        task(1, "https://cdn.test/blank.png", "Blank"),
    ];

    let report = download_images(&tasks, &dest, &opts(ImageNaming::Index), &fetcher, |_, _, _| {}).unwrap();

    assert_eq!(report.succeeded(), 1);
    assert!(matches!(report.outcomes[1].result, Err(ImageError::Empty)));
    assert_eq!(fs::read_dir(&dest).unwrap().count(), 1);
}
