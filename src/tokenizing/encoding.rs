use std::path::Path;

use regex::Regex;

// advisory encoding detection: a BOM, or a `coding:`/`coding=` declaration in
// a comment on one of the first two physical lines
pub fn detect_file_encoding(file_name: &Path) -> String {
    let bytes = std::fs::read(file_name).unwrap_or_default();
    detect_encoding(&bytes)
}

pub fn detect_encoding(bytes: &[u8]) -> String {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return String::from("utf-8");
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return String::from("utf-16be");
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return String::from("utf-16le");
    }

    let marker = Regex::new(r"coding[:=][ \t]*([^ \t]+)").unwrap();

    for line in first_two_lines(bytes) {
        if !line.starts_with('#') {
            continue;
        }
        if let Some(captures) = marker.captures(&line) {
            if let Some(name) = captures.get(1) {
                return name.as_str().to_lowercase();
            }
        }
    }

    String::from("utf-8")
}

// a CR LF (or LF CR) pair counts as a single line break
fn first_two_lines(bytes: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < bytes.len() && lines.len() < 2 {
        let c = bytes[i];
        if c == b'\n' || c == b'\r' {
            let other = if c == b'\n' { b'\r' } else { b'\n' };
            if i + 1 < bytes.len() && bytes[i + 1] == other {
                i += 1;
            }
            lines.push(std::mem::take(&mut current));
        } else {
            current.push(c as char);
        }
        i += 1;
    }

    if lines.len() < 2 && !current.is_empty() {
        lines.push(current);
    }
    lines
}
