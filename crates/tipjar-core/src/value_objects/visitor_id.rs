//! Opaque anonymous per-browser identity token.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Anonymous identity for a browser, minted server-side on first reaction.
///
/// Never linked to an account; its only purpose is keying reaction ledger
/// entries. The client holds it in a long-lived cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitorId(Uuid);

impl VisitorId {
    /// Mint a fresh anonymous identity.
    pub fn mint() -> Self {
        Self(Uuid::new_v4())
    }

    #[inline]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// The wrapped UUID, for binding as a Postgres `UUID` column.
    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Parse the cookie's hyphenated string form.
    pub fn parse(s: &str) -> Result<Self, VisitorIdParseError> {
        Uuid::parse_str(s).map(Self).map_err(|_| VisitorIdParseError)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("visitor ids are hyphenated uuids")]
pub struct VisitorIdParseError;

impl fmt::Display for VisitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for VisitorId {
    type Err = VisitorIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VisitorId::parse(s)
    }
}
