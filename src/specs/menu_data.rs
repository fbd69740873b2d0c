// src/specs/menu_data.rs
//
// Menu pages ship their state as a JSON object under a `menuData` key, somewhere
// inside an inline <script>. We locate that key, cut out the balanced object and
// decode it. Item shape (all fields optional except `name`):
//
//   { "id": 12, "name": "...", "description": "...", "price": 18.5,
//     "originalSection": "...", "sectionName": "...",
//     "image": "<thumb url>", "originalImage": "<full url>" }

use serde_json::Value;

use crate::core::sanitize::{normalize_entities, normalize_ws};
use crate::error::ParseError;
use crate::menu::{non_empty, Language, MenuItem, MenuRecordSet};

const MARKER: &str = "menuData";

/// Nested layouts seen in the wild when there is no flat `items` array.
const SECTION_KEYS: [&str; 2] = ["sections", "categories"];

pub fn parse_menu(html: &str, language: Language) -> Result<MenuRecordSet, ParseError> {
    let mut last_err = ParseError::MissingMenuData;

    for start in object_starts(html) {
        let Some(json) = balanced_object(html, start) else {
            last_err = ParseError::Unterminated;
            continue;
        };
        match serde_json::from_str::<Value>(json) {
            Ok(menu) => {
                let items = collect_items(&menu);
                if !items.is_empty() {
                    logd!("Parse: {} → {} items ({} bytes of menuData)", language, items.len(), json.len());
                    return Ok(MenuRecordSet::new(language, items));
                }
                last_err = ParseError::NoItems;
            }
            Err(e) => last_err = ParseError::Json(e),
        }
    }

    Err(last_err)
}

/// Byte offsets of every `{` that opens a `menuData` value.
/// Quoted keys (`"menuData": {`) come first, bare keys (`menuData: {`) after.
fn object_starts(html: &str) -> Vec<usize> {
    let mut quoted = Vec::new();
    let mut bare = Vec::new();

    for (i, _) in html.match_indices(MARKER) {
        let after = i + MARKER.len();
        let before = html[..i].chars().next_back();

        let (from, is_quoted) = if before == Some('"') && html[after..].starts_with('"') {
            (after + 1, true)
        } else if before.is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '$')) {
            (after, false)
        } else {
            continue;
        };

        if let Some(open) = value_start(html, from) {
            if is_quoted { quoted.push(open) } else { bare.push(open) }
        }
    }

    quoted.extend(bare);
    quoted
}

/// `<ws> : <ws> {` starting at `from`; returns the offset of `{`.
fn value_start(s: &str, from: usize) -> Option<usize> {
    let after_colon = s[from..].trim_start().strip_prefix(':')?;
    let brace = after_colon.trim_start();
    if brace.starts_with('{') { Some(s.len() - brace.len()) } else { None }
}

/// The `{…}` starting at `start`, skipping braces inside string literals.
fn balanced_object(s: &str, start: usize) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut depth = 0usize;
    let mut in_str = false;
    let mut escaped = false;

    for (off, &b) in bytes[start..].iter().enumerate() {
        if in_str {
            if escaped { escaped = false; }
            else if b == b'\\' { escaped = true; }
            else if b == b'"' { in_str = false; }
            continue;
        }
        match b {
            b'"' => in_str = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[start..start + off + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

fn collect_items(menu: &Value) -> Vec<MenuItem> {
    if let Some(items) = menu.get("items").and_then(Value::as_array) {
        return items.iter().filter_map(|v| item_from(v, None)).collect();
    }

    let mut out = Vec::new();
    for key in SECTION_KEYS {
        let Some(sections) = menu.get(key).and_then(Value::as_array) else { continue };
        for section in sections {
            let label = text(section, "name");
            if let Some(items) = section.get("items").and_then(Value::as_array) {
                out.extend(items.iter().filter_map(|v| item_from(v, label.as_deref())));
            }
        }
        if !out.is_empty() { break; }
    }
    out
}

fn item_from(v: &Value, section: Option<&str>) -> Option<MenuItem> {
    let name = text(v, "name").map(|n| normalize_ws(&n))?;

    let category = text(v, "originalSection")
        .or_else(|| text(v, "sectionName"))
        .or_else(|| section.map(|s| s!(s)))
        .map(|c| normalize_ws(&c))
        .unwrap_or_default();

    Some(MenuItem {
        id: text(v, "id"),
        category,
        name,
        description: text(v, "description"),
        price: text(v, "price"),
        image_url: text(v, "originalImage").or_else(|| text(v, "image")),
    })
}

/// String or number field as trimmed text; null, empty and other shapes → None.
fn text(v: &Value, key: &str) -> Option<String> {
    match v.get(key)? {
        Value::String(s) => non_empty(&normalize_entities(s)),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
