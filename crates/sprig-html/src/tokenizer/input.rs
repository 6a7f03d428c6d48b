//! The scanner: an incremental input buffer in front of the tokenizer.
//!
//! [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
//!
//! "Before the tokenization stage, the input stream must be preprocessed by
//! normalizing newlines. Thus, newlines in HTML DOMs are represented by U+000A
//! LF characters, and there are never any U+000D CR characters in the input
//! to the tokenization stage."
//!
//! Chunks are appended as they arrive. A CR at the end of one chunk and an LF
//! at the start of the next collapse to one LF. A byte order mark is skipped
//! only at the start of the first non-empty chunk.
//!
//! Nested writes insert markup at the cursor and push a limit. While a limit is
//! active, running into it behaves like running out of input: the tokenizer
//! suspends, and resumes in the outer stream once the limit is popped.

/// Minimum number of consumed bytes before the buffer is compacted.
const COMPACT_THRESHOLD: usize = 8 * 1024;

/// Result of asking the scanner for the next code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextChar {
    /// A code point was consumed.
    Char(char),
    /// The end of the stream was reached and no more input will arrive.
    Eof,
    /// The buffer ran dry but more input may still arrive.
    Pending,
}

/// Result of a fixed-string lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookahead {
    /// The input starts with the target.
    Match,
    /// The input cannot start with the target.
    NoMatch,
    /// The available input is a proper prefix of the target and more may arrive.
    Pending,
}

/// A tag recognised by the simple tag fast path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleTag {
    /// True for `</name>`.
    pub is_end: bool,
    /// Lowercase tag name.
    pub name: String,
    /// Bytes of input covered, excluding the `<` that was already consumed.
    pub len: usize,
}

/// The normalized input buffer and cursor.
#[derive(Debug, Default)]
pub struct InputStream {
    buffer: String,
    pos: usize,
    eof: bool,
    limits: Vec<usize>,
    seen_first_chunk: bool,
    last_was_cr: bool,
    line: usize,
    column: usize,
}

impl InputStream {
    /// Create an empty stream.
    #[must_use]
    pub fn new() -> Self {
        Self {
            line: 1,
            ..Self::default()
        }
    }

    /// Append a chunk of input at the end of the stream.
    pub fn push_chunk(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        let mut chunk = chunk;
        if !self.seen_first_chunk {
            self.seen_first_chunk = true;
            chunk = chunk.strip_prefix('\u{FEFF}').unwrap_or(chunk);
        }
        self.buffer.reserve(chunk.len());
        let mut last_was_cr = self.last_was_cr;
        for c in chunk.chars() {
            match c {
                '\r' => {
                    self.buffer.push('\n');
                    last_was_cr = true;
                }
                '\n' if last_was_cr => last_was_cr = false,
                c => {
                    self.buffer.push(c);
                    last_was_cr = false;
                }
            }
        }
        self.last_was_cr = last_was_cr;
    }

    /// Declare that no more chunks will be pushed.
    pub const fn set_eof(&mut self) {
        self.eof = true;
    }

    /// True once [`Self::set_eof`] has been called.
    #[must_use]
    pub const fn is_eof_declared(&self) -> bool {
        self.eof
    }

    /// Insert markup at the cursor, ahead of everything not yet consumed.
    /// Limits at or past the cursor move with the text they guard.
    ///
    /// Returns the number of bytes inserted.
    pub fn insert_at_cursor(&mut self, markup: &str) -> usize {
        let normalized = normalize_newlines(markup);
        let len = normalized.len();
        self.buffer.insert_str(self.pos, &normalized);
        for limit in &mut self.limits {
            if *limit >= self.pos {
                *limit += len;
            }
        }
        len
    }

    /// Stop scanning `len` bytes past the cursor until the limit is popped.
    pub fn push_limit(&mut self, len: usize) {
        let end = (self.pos + len).min(self.end());
        self.limits.push(end);
    }

    /// Remove the innermost limit.
    pub fn pop_limit(&mut self) {
        let popped = self.limits.pop();
        debug_assert!(popped.is_some(), "pop_limit without a matching push_limit");
    }

    /// Number of active limits.
    #[must_use]
    pub fn limit_depth(&self) -> usize {
        self.limits.len()
    }

    /// True when a later call may still produce input beyond what is buffered.
    #[must_use]
    pub fn more_input_possible(&self) -> bool {
        !self.eof || !self.limits.is_empty()
    }

    fn end(&self) -> usize {
        self.limits.last().copied().unwrap_or(self.buffer.len())
    }

    /// The unconsumed input up to the active limit.
    #[must_use]
    pub fn available(&self) -> &str {
        &self.buffer[self.pos..self.end()]
    }

    /// Peek at the next code point without consuming it.
    #[must_use]
    pub fn peek(&self) -> NextChar {
        match self.available().chars().next() {
            Some(c) => NextChar::Char(c),
            None if self.more_input_possible() => NextChar::Pending,
            None => NextChar::Eof,
        }
    }

    /// Consume the next code point.
    pub fn next_char(&mut self) -> NextChar {
        let next = self.peek();
        if let NextChar::Char(c) = next {
            self.pos += c.len_utf8();
            self.track(c);
            self.compact();
        }
        next
    }

    /// Consume `len` bytes that the caller has already inspected.
    pub fn advance(&mut self, len: usize) {
        let end = (self.pos + len).min(self.end());
        let (line, column) = self.buffer[self.pos..end]
            .chars()
            .fold((self.line, self.column), |(line, column), c| {
                if c == '\n' { (line + 1, 0) } else { (line, column + 1) }
            });
        self.line = line;
        self.column = column;
        self.pos = end;
        self.compact();
    }

    /// Consume the longest run of code points for which `stop` is false.
    pub fn take_run(&mut self, stop: impl Fn(char) -> bool) -> &str {
        let start = self.pos;
        let len = self
            .available()
            .find(|c: char| stop(c))
            .unwrap_or_else(|| self.available().len());
        for c in self.buffer[start..start + len].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        self.pos = start + len;
        &self.buffer[start..start + len]
    }

    /// Compare the upcoming input with `target` without consuming it.
    #[must_use]
    pub fn lookahead(&self, target: &str, case_insensitive: bool) -> Lookahead {
        let available = self.available();
        let mut ours = available.chars();
        for expected in target.chars() {
            match ours.next() {
                Some(c) if c == expected => {}
                Some(c) if case_insensitive && c.eq_ignore_ascii_case(&expected) => {}
                Some(_) => return Lookahead::NoMatch,
                None if self.more_input_possible() => return Lookahead::Pending,
                None => return Lookahead::NoMatch,
            }
        }
        Lookahead::Match
    }

    /// Recognise `/?[a-z][a-z0-9]*>` at the cursor. Anything else, including a
    /// candidate cut off by the end of the buffer, is left to the full path.
    #[must_use]
    pub fn match_simple_tag(&self) -> Option<SimpleTag> {
        let bytes = self.available().as_bytes();
        let is_end = bytes.first() == Some(&b'/');
        let start = usize::from(is_end);
        if !bytes.get(start)?.is_ascii_lowercase() {
            return None;
        }
        let name_len = bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
            .count();
        if bytes.get(start + name_len) != Some(&b'>') {
            return None;
        }
        let name = self.available()[start..start + name_len].to_string();
        Some(SimpleTag {
            is_end,
            name,
            len: start + name_len + 1,
        })
    }

    /// Line and column of the last consumed code point, 1-based.
    #[must_use]
    pub const fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    const fn track(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    fn compact(&mut self) {
        if self.limits.is_empty() && self.pos >= COMPACT_THRESHOLD {
            let _ = self.buffer.drain(..self.pos);
            self.pos = 0;
        }
    }
}

/// Normalize CRLF and lone CR to LF within a single string.
#[must_use]
pub fn normalize_newlines(input: &str) -> String {
    if !input.contains('\r') {
        return input.to_string();
    }
    input.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(stream: &mut InputStream) -> String {
        let mut out = String::new();
        while let NextChar::Char(c) = stream.next_char() {
            out.push(c);
        }
        out
    }

    #[test]
    fn test_crlf_split_across_chunks() {
        let mut stream = InputStream::new();
        stream.push_chunk("a\r");
        stream.push_chunk("\nb\rc");
        stream.set_eof();
        assert_eq!(drain(&mut stream), "a\nb\nc");
    }

    #[test]
    fn test_bom_only_skipped_on_first_chunk() {
        let mut stream = InputStream::new();
        stream.push_chunk("");
        stream.push_chunk("\u{FEFF}x");
        stream.push_chunk("\u{FEFF}y");
        stream.set_eof();
        assert_eq!(drain(&mut stream), "x\u{FEFF}y");
    }

    #[test]
    fn test_pending_until_eof() {
        let mut stream = InputStream::new();
        stream.push_chunk("a");
        assert_eq!(stream.next_char(), NextChar::Char('a'));
        assert_eq!(stream.next_char(), NextChar::Pending);
        stream.set_eof();
        assert_eq!(stream.next_char(), NextChar::Eof);
    }

    #[test]
    fn test_lookahead_defers_partial_match() {
        let mut stream = InputStream::new();
        stream.push_chunk("DOC");
        assert_eq!(stream.lookahead("DOCTYPE", true), Lookahead::Pending);
        stream.push_chunk("type");
        assert_eq!(stream.lookahead("DOCTYPE", true), Lookahead::Match);
        assert_eq!(stream.lookahead("DOCTYPE", false), Lookahead::NoMatch);
    }

    #[test]
    fn test_lookahead_resolves_at_eof() {
        let mut stream = InputStream::new();
        stream.push_chunk("--");
        stream.set_eof();
        assert_eq!(stream.lookahead("--", false), Lookahead::Match);
        assert_eq!(stream.lookahead("---", false), Lookahead::NoMatch);
    }

    #[test]
    fn test_limit_hides_outer_input() {
        let mut stream = InputStream::new();
        stream.push_chunk("outer");
        stream.set_eof();
        let len = stream.insert_at_cursor("in");
        stream.push_limit(len);
        assert_eq!(drain(&mut stream), "in");
        assert_eq!(stream.next_char(), NextChar::Pending);
        stream.pop_limit();
        assert_eq!(drain(&mut stream), "outer");
    }

    #[test]
    fn test_simple_tag_match() {
        let mut stream = InputStream::new();
        stream.push_chunk("/h1>rest");
        assert_eq!(
            stream.match_simple_tag(),
            Some(SimpleTag {
                is_end: true,
                name: "h1".to_string(),
                len: 4,
            })
        );
        let mut partial = InputStream::new();
        partial.push_chunk("div");
        assert_eq!(partial.match_simple_tag(), None);
        let mut upper = InputStream::new();
        upper.push_chunk("DIV>");
        assert_eq!(upper.match_simple_tag(), None);
    }

    #[test]
    fn test_position_tracks_lines() {
        let mut stream = InputStream::new();
        stream.push_chunk("ab\ncd");
        stream.advance(4);
        assert_eq!(stream.position(), (2, 1));
    }
}
