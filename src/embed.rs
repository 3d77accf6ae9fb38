//! Embed a script source file into a header as a C string constant, so the
//! native side can run it without shipping the file separately.
use std::path::Path;

/// Identifier for an embedded source: the file stem with anything outside
/// `[A-Za-z0-9_]` replaced, plus `_lua` for Lua sources.
/// `package_searcher.lua` → `package_searcher_lua`.
pub fn default_ident(path: &Path) -> String {
    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let mut ident: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if path.extension().is_some_and(|ext| ext == "lua") {
        ident.push_str("_lua");
    }
    ident
}

/// Render `source` as a string constant, one literal per source line. The
/// bytes are taken as-is, so sources need not be UTF-8.
pub fn embed_source(ident: &str, source: &[u8]) -> String {
    if source.is_empty() {
        return format!("static const char {ident}[] = \"\";\n");
    }
    let mut out = format!("static const char {ident}[] =");
    for line in source.split_inclusive(|&b| b == b'\n') {
        out.push_str("\n\t\"");
        out.push_str(&escape_c(line));
        out.push('"');
    }
    out.push_str(";\n");
    out
}

fn escape_c(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 8);
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            // octal is at most three digits, so it never swallows the next char
            0x20..=0x7e => out.push(b as char),
            _ => out.push_str(&format!("\\{b:03o}")),
        }
    }
    out
}
