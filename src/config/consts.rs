// src/config/consts.rs

// Net config
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// Local debug log
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "scraped_data";
pub const DEFAULT_SHEET_STEM: &str = "menu_data";
pub const IMAGES_SUBDIR: &str = "images";
pub const MANIFEST_FILE: &str = "manifest.json";
pub const UNKNOWN_RESTAURANT: &str = "unknown";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

// Image downloads
pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const MAX_BATCH_SIZE: usize = 20;
pub const IMAGE_PAUSE_MS: u64 = 500; // be polite
pub const FALLBACK_IMAGE_EXT: &str = "jpg";
