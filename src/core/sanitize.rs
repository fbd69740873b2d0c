// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') {
        return s!(s);
    }
    s.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Keep letters (any script), digits, `.`, `_`, `-` and spaces; trim the rest.
/// Returns an empty string when nothing survives.
pub fn sanitize_file_stem(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_numeric() || matches!(c, '.' | '_' | '-' | ' '))
        .collect();
    normalize_ws(&kept).trim_matches('.').to_string()
}

/// Folder-safe slug: lowercase ASCII words joined by `-`.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    out.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities() {
        assert_eq!(normalize_entities("Fish&nbsp;&amp;&nbsp;Chips"), "Fish & Chips");
        assert_eq!(normalize_entities("&quot;Hot&quot; &lt;3"), "\"Hot\" <3");
        assert_eq!(normalize_entities("plain"), "plain");
    }

    #[test]
    fn file_stem_keeps_arabic_letters() {
        assert_eq!(sanitize_file_stem("شاورما دجاج"), "شاورما دجاج");
        assert_eq!(sanitize_file_stem("Burger / Fries?"), "Burger Fries");
        assert_eq!(sanitize_file_stem("../etc"), "etc");
        assert_eq!(sanitize_file_stem("***"), "");
    }

    #[test]
    fn slugs() {
        assert_eq!(slugify("Al Baik - Riyadh"), "al-baik-riyadh");
        assert_eq!(slugify("--x--"), "x");
        assert_eq!(slugify("مطعم"), "");
    }
}
