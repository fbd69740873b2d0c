// src/core/url.rs
//
// Sites serve the Arabic menu under an `/ar` path prefix; everything else is English.

use percent_encoding::percent_decode_str;
use reqwest::Url;

use crate::config::consts::UNKNOWN_RESTAURANT;
use crate::core::sanitize::slugify;
use crate::error::FetchError;
use crate::menu::Language;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageUrls {
    pub english: String,
    pub arabic: String,
    /// Folder-safe restaurant name (or "unknown").
    pub restaurant: String,
}

impl LanguageUrls {
    pub fn for_language(&self, language: Language) -> &str {
        match language {
            Language::English => &self.english,
            Language::Arabic => &self.arabic,
        }
    }
}

pub fn resolve(input: &str) -> Result<LanguageUrls, FetchError> {
    let input = input.trim();
    let invalid = |message: String| FetchError::InvalidUrl { url: s!(input), message };

    let mut url = Url::parse(input).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    url.set_fragment(None);

    let path = s!(url.path());
    let (en_path, ar_path) = if path == "/ar" || path.contains("/ar/") {
        let en = if path == "/ar" { s!("/") } else { path.replacen("/ar/", "/", 1) };
        (en, path)
    } else {
        let ar = if path == "/" { s!("/ar/") } else { join!("/ar", &path) };
        (path, ar)
    };

    let restaurant = restaurant_slug(&url);

    let mut english = url.clone();
    english.set_path(&en_path);
    let mut arabic = url;
    arabic.set_path(&ar_path);

    Ok(LanguageUrls {
        english: english.to_string(),
        arabic: arabic.to_string(),
        restaurant,
    })
}

/// `/…/restaurant/<id>/<name>/…` → slug of the decoded `<name>`.
fn restaurant_slug(url: &Url) -> String {
    let segments: Vec<&str> = url.path_segments().map(|s| s.collect()).unwrap_or_default();
    segments
        .iter()
        .position(|s| *s == "restaurant")
        .and_then(|idx| segments.get(idx + 2))
        .map(|name| slugify(&percent_decode_str(name).decode_utf8_lossy()))
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| s!(UNKNOWN_RESTAURANT))
}
