use std::{ops::Range, rc::Rc};

/// A single point in a source text.
///
/// Positions are value types: they are copied freely and never shared
/// mutably, because tokens and syntax nodes each need an independent
/// snapshot of where they begin and end. `line` and `column` are 1-based;
/// `index` is the byte offset into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Byte offset into the source text.
    pub index:  usize,
    /// 1-based line number.
    pub line:   usize,
    /// 1-based column number, counted in characters.
    pub column: usize,
}

/// A half-open region of source text, delimited by two [`Position`]s.
///
/// Every token carries the span it was lexed from, and every syntax node
/// carries the union of its children's spans. Diagnostics use spans to
/// point at the offending text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Where the region begins.
    pub start: Position,
    /// Where the region ends (exclusive).
    pub end:   Position,
}

impl Span {
    /// Creates a span from two positions.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns the smallest span covering both `self` and `other`.
    ///
    /// Used by the parser to stamp a node with the union of its children's
    /// spans.
    #[must_use]
    pub const fn to(self, other: Self) -> Self {
        Self { start: self.start,
               end:   other.end, }
    }
}

/// One unit of source text, shared by the lexer, the parser and every
/// diagnostic produced from it.
///
/// Alongside the raw text, a `Source` precomputes the byte offset of each
/// line start so that byte offsets reported by the lexer can be converted
/// into line/column positions without rescanning.
#[derive(Debug)]
pub struct Source {
    /// Display name of the source, e.g. a file path or `<script>`.
    pub name:    String,
    /// The raw source text.
    pub text:    String,
    line_starts: Vec<usize>,
}

impl Source {
    /// Wraps a source text, computing its line index.
    ///
    /// Returns an `Rc` because the source is shared between tokens' origin,
    /// diagnostics and the evaluator.
    #[must_use]
    pub fn new(name: &str, text: &str) -> Rc<Self> {
        let mut line_starts = vec![0];
        for (index, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(index + 1);
            }
        }
        Rc::new(Self { name: name.to_string(),
                       text: text.to_string(),
                       line_starts })
    }

    /// Converts a byte offset into a [`Position`].
    ///
    /// Advancing over a newline resets the column and increments the line;
    /// any other character advances the column. Columns are counted in
    /// characters, not bytes.
    ///
    /// # Example
    /// ```
    /// use rill::span::Source;
    ///
    /// let source = Source::new("demo.rill", "1 + 2\nx");
    /// let position = source.position_at(6);
    ///
    /// assert_eq!(position.line, 2);
    /// assert_eq!(position.column, 1);
    /// ```
    #[must_use]
    pub fn position_at(&self, offset: usize) -> Position {
        let line = self.line_starts
                       .partition_point(|&start| start <= offset)
                       .saturating_sub(1);
        let line_start = self.line_starts[line];
        let column = self.text
                         .get(line_start..offset)
                         .map_or(offset - line_start, |prefix| prefix.chars().count());
        Position { index:  offset,
                   line:   line + 1,
                   column: column + 1, }
    }

    /// Converts a byte range into a [`Span`].
    #[must_use]
    pub fn span_at(&self, range: Range<usize>) -> Span {
        Span::new(self.position_at(range.start), self.position_at(range.end))
    }

    /// Returns a zero-width span at the very end of the text.
    ///
    /// Used for end-of-input diagnostics, where there is no token left to
    /// point at.
    #[must_use]
    pub fn end_span(&self) -> Span {
        let end = self.position_at(self.text.len());
        Span::new(end, end)
    }

    /// Returns the text of a 1-based line, without its trailing newline.
    #[must_use]
    pub fn line_text(&self, line: usize) -> &str {
        let Some(&start) = self.line_starts.get(line.wrapping_sub(1)) else {
            return "";
        };
        let end = self.line_starts
                      .get(line)
                      .map_or(self.text.len(), |&next| next);
        self.text[start..end].trim_end_matches(['\n', '\r'])
    }

    /// Renders the source lines covered by `span` with a caret underline
    /// beneath the offending region.
    ///
    /// Multi-line spans underline from the start column to the end of each
    /// intermediate line. A zero-width span still produces one caret so the
    /// position stays visible.
    #[must_use]
    pub fn underline(&self, span: Span) -> String {
        let mut out = String::new();
        for line in span.start.line..=span.end.line {
            let text = self.line_text(line);
            let col_start = if line == span.start.line { span.start.column } else { 1 };
            let col_end = if line == span.end.line {
                span.end.column
            } else {
                text.chars().count() + 1
            };
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(text);
            out.push('\n');
            out.push_str(&" ".repeat(col_start.saturating_sub(1)));
            out.push_str(&"^".repeat(col_end.saturating_sub(col_start).max(1)));
        }
        out
    }
}
