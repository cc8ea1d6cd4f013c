// src/core/sanitize.rs

use deunicode::deunicode;

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

/// Drop everything that is not a letter or digit (any script).
pub fn strip_non_alnum(s: &str) -> String {
    s.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Transliterate to ASCII, letter by letter: "Peña" → "Pena", "Łukasz" → "Lukasz",
/// "Straße" → "Strasse". Output may contain punctuation or spaces for some scripts.
pub fn to_ascii(s: &str) -> String {
    deunicode(s)
}

/// Strip a trailing sponsorship marker (`*`). Returns the clean name and whether it was there.
pub fn split_sponsor_mark(name: &str) -> (String, bool) {
    let t = name.trim();
    match t.strip_suffix('*') {
        Some(rest) => (rest.trim_end().to_string(), true),
        None => (t.to_string(), false),
    }
}

/// Filesystem-friendly stem: ASCII alphanumerics, `-` and `_`; whitespace runs become `_`.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch == '-' || ch == '_' { if !(last_us && ch == '_') { out.push(ch); } last_us = ch == '_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { fallback.to_string() } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_collapses() {
        assert_eq!(normalize_ws("  a \n\t b  "), "a b");
    }

    #[test]
    fn alnum_then_ascii() {
        assert_eq!(strip_non_alnum(&to_ascii("Peña-Ruiz 48")), "PenaRuiz48");
        assert_eq!(strip_non_alnum(&to_ascii("O\u{2019}Rourke45")), "ORourke45");
        assert_eq!(to_ascii("Ångström"), "Angstrom");
        assert_eq!(to_ascii("Søren Đorđević"), "Soren Dordevic");
    }

    #[test]
    fn sponsorship_mark() {
        assert_eq!(split_sponsor_mark("Acme Polls*"), (s!("Acme Polls"), true));
        assert_eq!(split_sponsor_mark("Acme Polls"), (s!("Acme Polls"), false));
        assert_eq!(split_sponsor_mark(" Acme Polls * "), (s!("Acme Polls"), true));
    }

    #[test]
    fn filenames() {
        assert_eq!(sanitize_filename("new hampshire", "x"), "new_hampshire");
        assert_eq!(sanitize_filename("  ", "national"), "national");
        assert_eq!(sanitize_filename("north-carolina", "x"), "north-carolina");
    }
}
