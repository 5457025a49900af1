//! Text Measurement
//!
//! Utilities for measuring and wrapping text in terminal cells.
//!
//! Widths come from `unicode-width`, one grapheme cluster at a time:
//! - ASCII characters: 1 cell
//! - CJK characters and most emoji: 2 cells
//! - Combining marks and control characters: 0 cells

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::primitives::Span;

/// Display width of one grapheme cluster, clamped to 2 cells.
pub fn grapheme_width(grapheme: &str) -> u16 {
    if grapheme.chars().all(char::is_control) {
        return 0;
    }
    (UnicodeWidthStr::width(grapheme) as u16).min(2)
}

/// Display width of a string in terminal cells.
pub fn string_width(s: &str) -> u16 {
    s.graphemes(true)
        .map(grapheme_width)
        .fold(0u16, u16::saturating_add)
}

// =============================================================================
// Styled wrapping
// =============================================================================

/// A run of text on one line, tagged with the span it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub span: usize,
    pub text: String,
}

/// One wrapped line of styled text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledLine {
    pub fragments: Vec<Fragment>,
    pub width: u16,
}

impl StyledLine {
    fn push(&mut self, span: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        self.width = self.width.saturating_add(string_width(text));
        match self.fragments.last_mut() {
            Some(last) if last.span == span => last.text.push_str(text),
            _ => self.fragments.push(Fragment {
                span,
                text: text.to_string(),
            }),
        }
    }

    pub fn plain(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

enum Token<'a> {
    Break,
    Space(Vec<(usize, &'a str)>),
    Word(Vec<(usize, &'a str)>),
}

/// Split spans into words, space runs and hard breaks. A word that
/// continues across a span boundary stays one word. `\r\n` is one break.
fn tokenize(spans: &[Span]) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for (index, span) in spans.iter().enumerate() {
        for (n, piece) in span.text.split('\n').enumerate() {
            if n > 0 {
                tokens.push(Token::Break);
            }
            let piece = piece.strip_suffix('\r').unwrap_or(piece);
            let mut start = 0;
            let mut in_space = None;
            for (i, ch) in piece.char_indices() {
                let space = ch == ' ' || ch == '\t';
                if in_space.is_some_and(|s| s != space) {
                    push_piece(&mut tokens, index, &piece[start..i], in_space == Some(true));
                    start = i;
                }
                in_space = Some(space);
            }
            if let Some(space) = in_space {
                push_piece(&mut tokens, index, &piece[start..], space);
            }
        }
    }
    tokens
}

fn push_piece<'a>(tokens: &mut Vec<Token<'a>>, span: usize, text: &'a str, space: bool) {
    match (tokens.last_mut(), space) {
        (Some(Token::Space(parts)), true) | (Some(Token::Word(parts)), false) => {
            parts.push((span, text));
        }
        (_, true) => tokens.push(Token::Space(vec![(span, text)])),
        (_, false) => tokens.push(Token::Word(vec![(span, text)])),
    }
}

fn parts_width(parts: &[(usize, &str)]) -> u16 {
    parts
        .iter()
        .map(|(_, t)| string_width(t))
        .fold(0u16, u16::saturating_add)
}

/// Word-wrap styled spans to `max_width` cells.
///
/// `None` disables wrapping; only `\n` breaks lines. Words longer than the
/// width are broken between graphemes. Spaces at a soft break are dropped.
pub fn wrap_spans(spans: &[Span], max_width: Option<u16>) -> Vec<StyledLine> {
    let tokens = tokenize(spans);
    if tokens.is_empty() {
        return Vec::new();
    }

    let limit = max_width.map(|w| w.max(1));
    let mut lines = Vec::new();
    let mut line = StyledLine::default();
    let mut pending: Vec<(usize, &str)> = Vec::new();
    let mut soft_start = false;

    for token in tokens {
        match token {
            Token::Break => {
                lines.push(std::mem::take(&mut line));
                pending.clear();
                soft_start = false;
            }
            Token::Space(parts) => {
                if !(soft_start && line.width == 0) {
                    pending.extend(parts);
                }
            }
            Token::Word(parts) => {
                let word = parts_width(&parts);
                let spaces = parts_width(&pending);
                let fits = limit.is_none_or(|max| line.width + spaces + word <= max);

                if fits {
                    for (span, text) in pending.drain(..) {
                        line.push(span, text);
                    }
                    for (span, text) in parts {
                        line.push(span, text);
                    }
                    continue;
                }

                pending.clear();
                if line.width > 0 {
                    lines.push(std::mem::take(&mut line));
                    soft_start = true;
                }

                let max = limit.unwrap_or(u16::MAX);
                for (span, text) in parts {
                    for g in text.graphemes(true) {
                        let w = grapheme_width(g);
                        if line.width > 0 && line.width + w > max {
                            lines.push(std::mem::take(&mut line));
                        }
                        line.push(span, g);
                    }
                }
            }
        }
    }
    lines.push(line);
    lines
}

/// Width of the widest unbreakable word, the min-content width.
pub fn longest_word(spans: &[Span]) -> u16 {
    tokenize(spans)
        .iter()
        .filter_map(|t| match t {
            Token::Word(parts) => Some(parts_width(parts)),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

/// Wrapped size of styled text: (widest line, line count).
pub fn measure_spans(spans: &[Span], max_width: Option<u16>) -> (u16, u16) {
    let lines = wrap_spans(spans, max_width);
    let width = lines.iter().map(|l| l.width).max().unwrap_or(0);
    (width, lines.len() as u16)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::span;
    use crate::types::Rgba;

    fn plain(spans: &[Span], width: Option<u16>) -> Vec<String> {
        wrap_spans(spans, width).iter().map(StyledLine::plain).collect()
    }

    #[test]
    fn test_string_width() {
        assert_eq!(string_width("Hello"), 5);
        assert_eq!(string_width("日本"), 4);
        assert_eq!(string_width("e\u{301}"), 1);
        assert_eq!(string_width(""), 0);
    }

    #[test]
    fn test_wrap_words() {
        let spans = [span("the quick brown fox", Rgba::WHITE)];
        assert_eq!(plain(&spans, Some(10)), vec!["the quick", "brown fox"]);
    }

    #[test]
    fn test_wrap_hard_breaks() {
        let spans = [span("> A \n> B", Rgba::WHITE)];
        assert_eq!(plain(&spans, None), vec!["> A", "> B"]);
    }

    #[test]
    fn test_wrap_crlf_breaks() {
        let spans = [span("> A\r\n> B\r\n", Rgba::WHITE)];
        assert_eq!(plain(&spans, None), vec!["> A", "> B", ""]);
    }

    #[test]
    fn test_wrap_long_word() {
        let spans = [span("abcdefgh", Rgba::WHITE)];
        assert_eq!(plain(&spans, Some(3)), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_word_across_spans_stays_together() {
        let spans = [span("ab ", Rgba::WHITE), span("cd", Rgba::GRAY), span("ef", Rgba::BLACK)];
        let lines = wrap_spans(&spans, Some(5));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].plain(), "cdef");
        assert_eq!(lines[1].fragments.len(), 2);
        assert_eq!(lines[1].fragments[0].span, 1);
    }

    #[test]
    fn test_measure() {
        let spans = [span("one two three", Rgba::WHITE)];
        assert_eq!(measure_spans(&spans, Some(8)), (7, 2));
        assert_eq!(measure_spans(&[], Some(8)), (0, 0));
        assert_eq!(longest_word(&spans), 5);
    }
}
