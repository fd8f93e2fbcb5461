//! The three orderings of the tip collection.

use std::fmt;

/// Requested ordering for a tip listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListSection {
    /// Random sample, shuffled
    Feed,
    /// Most-liked first
    Trending,
    /// Most-recent first
    New,
}

impl ListSection {
    /// Canonical lowercase name as it appears in URLs
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Trending => "trending",
            Self::New => "new",
        }
    }

    /// Parse a section name; `None` for anything unrecognized
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "feed" => Some(Self::Feed),
            "trending" => Some(Self::Trending),
            "new" => Some(Self::New),
            _ => None,
        }
    }
}

impl fmt::Display for ListSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
