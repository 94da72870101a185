//! `.properties` text format
//!
//! Follows the classic Java layout: `key=value`, `key: value` or
//! `key value` entries, `#`/`!` comments, backslash line continuations
//! and `\uXXXX` escapes.

use std::borrow::Cow;

use crate::application::errors::ConfigError;
use crate::domain::entities::Configuration;

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000C}')
}

/// Decode raw resource bytes. UTF-8 first, ISO-8859-1 otherwise.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}

/// Parse properties text into a fresh configuration
pub fn parse(input: &str) -> Result<Configuration, ConfigError> {
    let mut config = Configuration::new();
    for (line_no, logical) in logical_lines(input) {
        let (raw_key, raw_value) = split_entry(&logical);
        let key = unescape(raw_key, line_no)?;
        let value = unescape(raw_value, line_no)?;
        config.set(key, value);
    }
    Ok(config)
}

/// Split on `\n`, `\r` or `\r\n`
fn natural_lines(input: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(i) => {
                lines.push(&rest[..i]);
                let skip = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Join continued lines, dropping comments and blank lines.
/// Each entry carries the 1-based number of its first natural line.
fn logical_lines(input: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (idx, natural) in natural_lines(input).into_iter().enumerate() {
        let line = natural.trim_start_matches(is_blank);

        let (start, mut buf) = match current.take() {
            Some(pending) => pending,
            None => {
                if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                    continue;
                }
                (idx + 1, String::new())
            }
        };

        if continues(line) {
            buf.push_str(&line[..line.len() - 1]);
            current = Some((start, buf));
        } else {
            buf.push_str(line);
            out.push((start, buf));
        }
    }

    if let Some(pending) = current {
        out.push(pending);
    }
    out
}

/// Split a logical line into raw (still escaped) key and value
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut separator = None;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                separator = Some(c);
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                separator = Some(c);
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = match separator {
        Some(sep) => &line[key_end + sep.len_utf8()..],
        None => "",
    };

    rest = rest.trim_start_matches(is_blank);
    if matches!(separator, Some(sep) if is_blank(sep)) {
        if let Some(stripped) = rest.strip_prefix(|c: char| c == '=' || c == ':') {
            rest = stripped.trim_start_matches(is_blank);
        }
    }

    (key, rest)
}

/// Resolve backslash escapes. `\uXXXX` units are collected so surrogate
/// pairs decode into a single char.
fn unescape(raw: &str, line: usize) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    let flush = |units: &mut Vec<u16>, out: &mut String| {
        out.extend(
            char::decode_utf16(units.drain(..)).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
        );
    };

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush(&mut units, &mut out);
            out.push(c);
            continue;
        }

        let Some(next) = chars.next() else {
            break;
        };

        if next == 'u' {
            let hex: String = chars.by_ref().take(4).collect();
            if hex.chars().count() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                return Err(ConfigError::Parse {
                    line,
                    message: format!("Malformed \\uxxxx encoding: \\u{}", hex),
                });
            }
            let unit = u16::from_str_radix(&hex, 16).map_err(|e| ConfigError::Parse {
                line,
                message: format!("Malformed \\uxxxx encoding: {}", e),
            })?;
            units.push(unit);
            continue;
        }

        flush(&mut units, &mut out);
        out.push(match next {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\u{000C}',
            other => other,
        });
    }

    flush(&mut units, &mut out);
    Ok(out)
}

fn escape(text: &str, is_key: bool, out: &mut String) {
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{000C}' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            c if c.is_control() => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
            c => out.push(c),
        }
    }
}

/// Render a configuration as properties text, one sorted `key=value` per line.
/// Output parses back to the same configuration.
pub fn to_properties_string(config: &Configuration, header: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(header) = header {
        for line in natural_lines(header) {
            out.push_str("# ");
            out.push_str(line);
            out.push('\n');
        }
    }
    for (key, value) in config.iter() {
        escape(key, true, &mut out);
        out.push('=');
        escape(value, false, &mut out);
        out.push('\n');
    }
    out
}
