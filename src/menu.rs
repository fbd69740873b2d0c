// src/menu.rs
use std::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    English,
    Arabic,
}

impl Language {
    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }

    /// Column suffix used by the spreadsheet headers.
    pub fn column_suffix(&self) -> &'static str {
        match self {
            Language::English => "(EN)",
            Language::Arabic => "(AR)",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::English => "English",
            Language::Arabic => "Arabic",
        })
    }
}

/// One parsed menu entry. Optional fields are `None`, never `Some("")`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: Option<String>,
    pub category: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
}

impl MenuItem {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self { category: category.into(), name: name.into(), ..Default::default() }
    }
}

/// All items of one language for one job, in page order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuRecordSet {
    pub language: Language,
    pub items: Vec<MenuItem>,
}

impl MenuRecordSet {
    pub fn new(language: Language, items: Vec<MenuItem>) -> Self {
        Self { language, items }
    }

    pub fn empty(language: Language) -> Self {
        Self { language, items: Vec::new() }
    }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

/// Empty → None, otherwise trimmed.
pub(crate) fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(s!(t)) }
}
