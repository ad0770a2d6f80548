use std::io::BufRead;
use std::str::FromStr;

use crate::error::{ImportError, ImportResult, RecordError};

/// Whitespace separated tokens over a buffered reader.
///
/// Tokens are taken from one line at a time; [`Tokenizer::next_token`] moves on to the following
/// lines when the current one is used up. The reader is owned, so dropping the tokenizer releases
/// the underlying file on every path out of a parser.
pub(crate) struct Tokenizer<R> {
    reader: R,
    line: String,
    cursor: usize,
    line_number: usize,
}

impl<R: BufRead> Tokenizer<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            cursor: 0,
            line_number: 0,
        }
    }

    /// Line of the last token handed out, 1-based.
    pub(crate) fn line_number(&self) -> usize {
        self.line_number
    }

    // reads the next line once the current one is exhausted, returns false at the end of input
    fn fill(&mut self) -> ImportResult<bool> {
        while self.cursor >= self.line.len() {
            self.line.clear();
            self.cursor = 0;
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(false);
            }
            self.line_number += 1;

            let trimmed = self.line.trim_end_matches(&['\r', '\n'][..]).len();
            self.line.truncate(trimmed);
        }

        Ok(true)
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.line[self.cursor..];
        self.cursor += rest.len() - rest.trim_start().len();
    }

    pub(crate) fn next_token(&mut self) -> ImportResult<Option<&str>> {
        loop {
            if !self.fill()? {
                return Ok(None);
            }
            self.skip_whitespace();
            if self.cursor < self.line.len() {
                break;
            }
        }

        let rest = &self.line[self.cursor..];
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let start = self.cursor;
        self.cursor += len;
        Ok(Some(&self.line[start..start + len]))
    }

    /// Parses the next token, `what` names the expected value in errors.
    pub(crate) fn parse_next<T>(&mut self, what: &'static str) -> ImportResult<T>
    where
        T: FromStr,
        T::Err: Into<RecordError>,
    {
        let parsed = match self.next_token()? {
            Some(token) => token.parse::<T>().map_err(Into::into),
            None => Err(RecordError::Missing(what)),
        };
        parsed.map_err(|source| self.malformed(source))
    }

    /// Hands out what is left of the current line and moves past it.
    pub(crate) fn rest_of_line(&mut self) -> &str {
        let start = self.cursor.min(self.line.len());
        self.cursor = self.line.len();
        self.line[start..].trim()
    }

    pub(crate) fn skip_line(&mut self) {
        self.cursor = self.line.len();
    }

    /// Skips `count` bytes of input without interpreting them.
    pub(crate) fn skip_bytes(&mut self, count: usize) -> ImportResult<()> {
        if !self.fill()? {
            return Err(self.malformed(RecordError::Header));
        }
        let end = self.cursor + count;
        if end > self.line.len() || !self.line.is_char_boundary(end) {
            return Err(self.malformed(RecordError::Header));
        }
        self.cursor = end;
        Ok(())
    }

    pub(crate) fn malformed(&self, source: RecordError) -> ImportError {
        ImportError::MalformedRecord {
            line: self.line_number,
            source,
        }
    }
}
