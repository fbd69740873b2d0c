// src/config/options.rs
use std::path::PathBuf;
use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub images: ImageOptions,
    pub export: ExportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            scrape: ScrapeOptions::default(),
            images: ImageOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

impl AppOptions {
    /// Reject combinations a job cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if !self.scrape.english && !self.scrape.arabic {
            return Err(s!("select at least one language to scrape"));
        }
        if self.images.batch_size == 0 || self.images.batch_size > MAX_BATCH_SIZE {
            return Err(format!("batch size must be between 1 and {MAX_BATCH_SIZE}"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub english: bool,
    pub arabic: bool,
    pub proxy: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            english: true,
            arabic: true,
            proxy: None,
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageNaming {
    /// `item_0001.jpg`, from the row position
    Index,
    ProductName,
    Id,
    IdAndName,
}

impl ImageNaming {
    pub const ALL: [ImageNaming; 4] = [
        ImageNaming::Index,
        ImageNaming::ProductName,
        ImageNaming::Id,
        ImageNaming::IdAndName,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ImageNaming::Index => "Row index",
            ImageNaming::ProductName => "Product name",
            ImageNaming::Id => "ID only",
            ImageNaming::IdAndName => "ID + product name",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "index" => Some(ImageNaming::Index),
            "name" => Some(ImageNaming::ProductName),
            "id" => Some(ImageNaming::Id),
            "id-name" => Some(ImageNaming::IdAndName),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageOptions {
    pub enabled: bool,
    pub batch_size: usize,
    pub naming: ImageNaming,
    pub pause_ms: u64,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            batch_size: DEFAULT_BATCH_SIZE,
            naming: ImageNaming::Index,
            pause_ms: IMAGE_PAUSE_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(e) if e.eq_ignore_ascii_case("tsv") => ExportFormat::Tsv,
            _ => ExportFormat::Csv,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Parent of every timestamped job folder.
    pub out_root: PathBuf,
    pub archive: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_root: PathBuf::from(DEFAULT_OUT_DIR),
            archive: true,
        }
    }
}

impl ExportOptions {
    pub fn sheet_file_name(&self) -> String {
        join!(DEFAULT_SHEET_STEM, ".", self.format.ext())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AppOptions::default().validate().is_ok());
    }

    #[test]
    fn no_language_is_rejected() {
        let mut opts = AppOptions::default();
        opts.scrape.english = false;
        opts.scrape.arabic = false;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn batch_size_bounds() {
        let mut opts = AppOptions::default();
        opts.images.batch_size = 0;
        assert!(opts.validate().is_err());
        opts.images.batch_size = MAX_BATCH_SIZE + 1;
        assert!(opts.validate().is_err());
        opts.images.batch_size = MAX_BATCH_SIZE;
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn sheet_name_follows_format() {
        let mut export = ExportOptions::default();
        assert_eq!(export.sheet_file_name(), "menu_data.csv");
        export.format = ExportFormat::Tsv;
        assert_eq!(export.sheet_file_name(), "menu_data.tsv");
    }
}
