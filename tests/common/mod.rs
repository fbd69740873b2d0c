// tests/common/mod.rs
//
// Canned network for integration tests.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use menu_scrape::{
    core::net::{Fetch, Fetched},
    error::FetchError,
    menu::Language,
};

pub const EN_URL: &str = "https://menus.test/restaurant/42/cedar-grill";
pub const AR_URL: &str = "https://menus.test/ar/restaurant/42/cedar-grill";

/// 1x1 PNG.
pub const PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

/// Fresh, empty directory under the system temp dir.
pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("menu_scrape_it_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

/// Serves pages and bytes from maps; anything else is a 404.
#[derive(Default)]
pub struct MapFetcher {
    pub pages: HashMap<String, String>,
    pub files: HashMap<String, Fetched>,
    pub requested: Mutex<Vec<String>>,
}

impl MapFetcher {
    pub fn new() -> Self { Self::default() }

    pub fn page(mut self, url: &str, html: String) -> Self {
        self.pages.insert(url.to_string(), html);
        self
    }

    pub fn file(mut self, url: &str, bytes: &[u8], content_type: Option<&str>) -> Self {
        self.files.insert(
            url.to_string(),
            Fetched { bytes: bytes.to_vec(), content_type: content_type.map(str::to_string) },
        );
        self
    }

    /// Both fixture pages plus a PNG for every image they reference.
    pub fn with_fixtures() -> Self {
        let mut f = Self::new()
            .page(EN_URL, fixture("menu_en.html"))
            .page(AR_URL, fixture("menu_ar.html"));
        for url in [
            "https://cdn.menus.test/full/101.jpg",
            "https://cdn.menus.test/t/102.jpg",
            "https://cdn.menus.test/full/201.png",
            "https://cdn.menus.test/full/202.jpg",
            "https://cdn.menus.test/full/301.jpg",
        ] {
            f = f.file(url, PNG, Some("image/png"));
        }
        f
    }

    fn record(&self, url: &str) {
        self.requested.lock().unwrap().push(url.to_string());
    }
}

fn not_found(url: &str) -> FetchError {
    FetchError::Status { url: url.to_string(), status: 404 }
}

impl Fetch for MapFetcher {
    fn fetch_page(&self, url: &str, _language: Language) -> Result<String, FetchError> {
        self.record(url);
        self.pages.get(url).cloned().ok_or_else(|| not_found(url))
    }

    fn fetch_bytes(&self, url: &str) -> Result<Fetched, FetchError> {
        self.record(url);
        self.files.get(url).cloned().ok_or_else(|| not_found(url))
    }
}
