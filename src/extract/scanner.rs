//! Marker scanning over an opaque text buffer.
//!
//! The source dumps have no formal grammar; fields are located by literal
//! anchor substrings and recovered by position. The cursor only ever moves
//! forward, so a full scan is linear and cannot loop on malformed input.

/// A forward-only cursor over a text buffer. Offsets are byte positions;
/// anchors and delimiters are ASCII, so slicing stays on char boundaries.
pub struct Cursor<'a> {
    buf: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a str) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Finds the next occurrence of `anchor` at or after the cursor,
    /// advances past it, and returns its start offset. `None` means the
    /// buffer holds no further occurrence, the normal end-of-scan signal.
    pub fn seek(&mut self, anchor: &str) -> Option<usize> {
        let at = self.buf[self.pos..].find(anchor)? + self.pos;
        self.pos = at + anchor.len();
        Some(at)
    }

    /// Like [`Cursor::seek`], but the occurrence must start before `limit`.
    /// Keeps one record's field search from bleeding into the next record;
    /// the cursor does not move on failure.
    pub fn seek_before(&mut self, anchor: &str, limit: usize) -> Option<usize> {
        let at = self.buf[self.pos..].find(anchor)? + self.pos;
        if at >= limit {
            return None;
        }
        self.pos = at + anchor.len();
        Some(at)
    }

    /// Finds the next occurrence of `anchor` without moving the cursor.
    pub fn peek(&self, anchor: &str) -> Option<usize> {
        self.buf[self.pos..].find(anchor).map(|at| at + self.pos)
    }

    /// Skips the `:` (and at most one opening `"`) separating a key anchor
    /// from its value in the key/value layout.
    pub fn skip_key_separator(&mut self) -> Option<()> {
        let colon = self.buf[self.pos..].find(':')? + self.pos;
        self.pos = colon + 1;
        while self.buf[self.pos..].starts_with(' ') {
            self.pos += 1;
        }
        if self.buf[self.pos..].starts_with('"') {
            self.pos += 1;
        }
        Some(())
    }

    /// Takes the text up to (not including) the next occurrence of any of
    /// `delims`, leaving the cursor on the delimiter.
    pub fn take_until(&mut self, delims: &[char]) -> Option<&'a str> {
        let rel = self.buf[self.pos..].find(delims)?;
        let out = &self.buf[self.pos..self.pos + rel];
        self.pos += rel;
        Some(out)
    }

    /// Rendered-markup field read: skips to the closing `>` of the current
    /// element, then returns the text strictly before the following `<`,
    /// trimmed.
    ///
    /// An embedded image right at the element boundary (`><img`) pushes the
    /// label text past the image tag; detect it and resume after the
    /// image's `currentitem` marker.
    pub fn tag_text(&mut self) -> Option<&'a str> {
        let mut gt = self.buf[self.pos..].find('>')? + self.pos;
        if self.buf[gt..].starts_with("><img") {
            let resume = self.buf[gt..].find("currentitem")? + gt;
            gt = self.buf[resume..].find('>')? + resume;
        }
        self.pos = gt + 1;
        let rel = self.buf[self.pos..].find('<')?;
        let out = self.buf[self.pos..self.pos + rel].trim();
        self.pos += rel;
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_advances_past_anchor() {
        let mut cur = Cursor::new("aaa KEY bbb KEY ccc");
        assert_eq!(cur.seek("KEY"), Some(4));
        assert_eq!(cur.seek("KEY"), Some(12));
        assert_eq!(cur.seek("KEY"), None);
        // Exhausted seek leaves the cursor where it was.
        assert_eq!(cur.pos(), 15);
    }

    #[test]
    fn test_seek_before_respects_limit() {
        let mut cur = Cursor::new("x FIELD y");
        assert_eq!(cur.seek_before("FIELD", 1), None);
        assert_eq!(cur.pos(), 0);
        assert_eq!(cur.seek_before("FIELD", 3), Some(2));
    }

    #[test]
    fn test_take_until_stops_on_any_delimiter() {
        let mut cur = Cursor::new("12345,rest");
        assert_eq!(cur.take_until(&[',', '}']), Some("12345"));
        assert_eq!(cur.pos(), 5);
    }

    #[test]
    fn test_key_separator_with_and_without_quote() {
        let mut cur = Cursor::new(r#":"text""#);
        cur.skip_key_separator().unwrap();
        assert_eq!(cur.take_until(&['"']), Some("text"));

        let mut cur = Cursor::new(": 42,");
        cur.skip_key_separator().unwrap();
        assert_eq!(cur.take_until(&[',']), Some("42"));
    }

    #[test]
    fn test_tag_text_plain() {
        let mut cur = Cursor::new(r#"class="label-x">COMM 4962</div>"#);
        assert_eq!(cur.tag_text(), Some("COMM 4962"));
    }

    #[test]
    fn test_tag_text_skips_embedded_image() {
        let markup = r#"class="label-x"><img class="icon currentitem" src="i.png">GSAS4520</div>"#;
        let mut cur = Cursor::new(markup);
        assert_eq!(cur.tag_text(), Some("GSAS4520"));
    }
}
