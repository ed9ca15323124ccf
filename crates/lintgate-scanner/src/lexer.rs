//! Marker lexer for linter output lines
//!
//! Only the markers matter; every other character is skipped, so a marker is
//! found wherever it occurs as a substring.

use logos::Logos;

/// Markers recognised in a single line of linter output
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Marker {
    #[token(":")]
    Colon,

    /// Error classification (`Error`, also inside `TypeError:` and friends)
    #[token("Error")]
    Error,

    #[token("errcheck")]
    Errcheck,

    #[token("staticcheck")]
    Staticcheck,

    /// Issue summary (`N issues:`); carries its own colon
    #[token("issues:")]
    IssuesSummary,

    /// Anything else (ignored)
    #[regex(r"[^\n]", logos::skip, priority = 1)]
    Other,
}

impl Marker {
    /// Whether this marker contributes the colon the issue heuristic requires
    #[must_use]
    pub const fn has_colon(self) -> bool {
        matches!(self, Self::Colon | Self::IssuesSummary)
    }

    /// Whether this marker names an error class or a known linter
    #[must_use]
    pub const fn is_issue_marker(self) -> bool {
        matches!(self, Self::Error | Self::Errcheck | Self::Staticcheck)
    }
}

/// Iterates the markers of one line
pub struct MarkerLexer<'input> {
    lexer: logos::Lexer<'input, Marker>,
}

impl<'input> MarkerLexer<'input> {
    #[must_use]
    pub fn new(line: &'input str) -> Self {
        Self {
            lexer: Marker::lexer(line),
        }
    }
}

impl Iterator for MarkerLexer<'_> {
    type Item = Marker;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.lexer.next()? {
                Ok(marker) => return Some(marker),
                // Stray newlines; callers split lines first
                Err(()) => {}
            }
        }
    }
}

/// Summary of the markers found on one line
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LineMarkers {
    pub colon: bool,
    pub issue_marker: bool,
}

impl LineMarkers {
    #[must_use]
    pub fn scan(line: &str) -> Self {
        MarkerLexer::new(line).fold(Self::default(), |acc, marker| Self {
            colon: acc.colon || marker.has_colon(),
            issue_marker: acc.issue_marker || marker.is_issue_marker(),
        })
    }
}
