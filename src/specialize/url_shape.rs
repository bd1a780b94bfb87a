//! `https?://[class]+` specialization: for each `http`
//! occurrence, check the optional `s`, the literal `://`, then consume a
//! maximal run from the byte class.

use crate::class::ByteClass;

#[derive(Clone, Debug)]
pub(crate) struct UrlShape {
    class: ByteClass,
}

impl UrlShape {
    /// Recognize the exact pattern `https?://[class]+` with no anchors and
    /// nothing else in the pattern.
    pub fn try_build(pattern: &str) -> Option<UrlShape> {
        let rest = pattern.strip_prefix("https?://")?;
        let class_src = rest.strip_suffix('+')?;
        let class = parse_bracket_class(class_src)?;
        Some(UrlShape { class })
    }

    pub fn is_match(&self, text: &[u8]) -> bool {
        let mut i = 0;
        while let Some(rel) = find_subslice(&text[i..], b"http") {
            let mut p = i + rel + 4;
            if text.get(p) == Some(&b's') {
                p += 1;
            }
            if text[p..].starts_with(b"://") {
                p += 3;
                let body_start = p;
                while p < text.len() && self.class.contains(text[p]) {
                    p += 1;
                }
                if p > body_start {
                    return true;
                }
            }
            i += rel + 1;
            if i >= text.len() {
                break;
            }
        }
        false
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&i| &haystack[i..i + needle.len()] == needle)
}

/// Parse a bare `[...]` class body (the literal text between `[` and `]`,
/// inclusive) into a `ByteClass`. Shares the parser's class semantics but
/// operates standalone since this runs before any automaton exists.
fn parse_bracket_class(src: &str) -> Option<ByteClass> {
    let bytes = src.as_bytes();
    if bytes.first() != Some(&b'[') || bytes.last() != Some(&b']') || bytes.len() < 3 {
        return None;
    }
    let mut i = 1;
    let end = bytes.len() - 1;
    let negate = if bytes.get(i) == Some(&b'^') {
        i += 1;
        true
    } else {
        false
    };
    let mut class = ByteClass::empty();
    let mut count = 0;
    while i < end {
        let lo = if bytes[i] == b'\\' {
            i += 1;
            if i >= end {
                return None;
            }
            let b = bytes[i];
            i += 1;
            b
        } else {
            let b = bytes[i];
            i += 1;
            b
        };
        count += 1;
        if i < end && bytes[i] == b'-' && i + 1 < end {
            i += 1;
            let hi = bytes[i];
            i += 1;
            if hi < lo {
                return None;
            }
            class.insert_range(lo, hi);
        } else {
            class.insert(lo);
        }
    }
    if count == 0 {
        return None;
    }
    if negate {
        class.negate();
    }
    Some(class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_http_and_https() {
        let m = UrlShape::try_build("https?://[a-zA-Z0-9./]+").unwrap();
        assert!(m.is_match(b"visit http://example.com/page today"));
        assert!(m.is_match(b"visit https://example.com/page today"));
        assert!(!m.is_match(b"visit ftp://example.com today"));
    }

    #[test]
    fn requires_nonempty_body() {
        let m = UrlShape::try_build("https?://[a-z]+").unwrap();
        assert!(!m.is_match(b"http://"));
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(UrlShape::try_build("http://[a-z]+").is_none());
        assert!(UrlShape::try_build("https?://[a-z]*").is_none());
    }
}
