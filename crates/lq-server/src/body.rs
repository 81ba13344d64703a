//! Plain-text framing for request and response bodies.
//!
//! Requests carry one line per `\n`. Responses end every value with `\n`,
//! and an absent value renders as the empty body.

use std::fmt::Write;

use lq_store::TopicCount;

/// Split a request body into lines, dropping empty ones.
///
/// Bytes that are not valid UTF-8 become U+FFFD rather than failing the
/// request. A trailing `\r` is trimmed from each line. Duplicates and order
/// are kept as submitted; the store deduplicates.
pub fn parse_lines(body: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(body)
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn render_count(count: usize) -> String {
    format!("{count}\n")
}

pub fn render_line(line: Option<String>) -> String {
    match line {
        Some(mut line) => {
            line.push('\n');
            line
        }
        None => String::new(),
    }
}

pub fn render_lines(lines: &[String]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// One `"<topic> <count>"` row per entry.
pub fn render_listing(listing: &[TopicCount]) -> String {
    let mut out = String::new();
    for entry in listing {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{entry}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_drops_empty_lines() {
        assert_eq!(parse_lines(b"a\n\nb\n"), vec!["a", "b"]);
        assert!(parse_lines(b"").is_empty());
        assert!(parse_lines(b"\n\n").is_empty());
    }

    #[test]
    fn parse_keeps_duplicates_and_order() {
        assert_eq!(parse_lines(b"b\na\nb"), vec!["b", "a", "b"]);
    }

    #[test]
    fn parse_trims_carriage_returns() {
        assert_eq!(parse_lines(b"a\r\nb\r\n\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn parse_keeps_inner_whitespace() {
        assert_eq!(parse_lines(b" a b \n"), vec![" a b "]);
    }

    #[test]
    fn parse_replaces_invalid_utf8() {
        assert_eq!(parse_lines(b"a\n\xff\xfe\n"), vec!["a", "\u{fffd}\u{fffd}"]);
    }

    #[test]
    fn render_single_values() {
        assert_eq!(render_count(5), "5\n");
        assert_eq!(render_line(Some("x".into())), "x\n");
        assert_eq!(render_line(None), "");
    }

    #[test]
    fn render_many_lines() {
        assert_eq!(render_lines(&["a".into(), "b".into()]), "a\nb\n");
        assert_eq!(render_lines(&[]), "");
    }

    #[test]
    fn render_listing_rows() {
        let listing = vec![TopicCount::new("bar", 3), TopicCount::new("foo", 2)];
        assert_eq!(render_listing(&listing), "bar 3\nfoo 2\n");
    }
}
