//! Anonymous visitor identity extractor
//!
//! Reads the long-lived identity cookie that keys the reaction ledger.

use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tipjar_core::VisitorId;

/// Cookie that carries the anonymous per-browser identity
pub const VISITOR_COOKIE: &str = "tipjar_visitor";

/// Anonymous visitor identity read from the request cookies
///
/// Listings use this to annotate tips with the viewer's own reactions. An
/// absent or unparseable cookie reads as no identity; only the reaction
/// endpoint ever mints a fresh one.
#[derive(Debug, Clone, Copy)]
pub struct VisitorIdentity(pub Option<VisitorId>);

impl VisitorIdentity {
    /// Read the identity out of a cookie jar
    pub fn from_jar(jar: &CookieJar) -> Self {
        let visitor = jar
            .get(VISITOR_COOKIE)
            .and_then(|cookie| VisitorId::parse(cookie.value()).ok());
        Self(visitor)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for VisitorIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state).await?;
        Ok(Self::from_jar(&jar))
    }
}

/// Build the identity cookie for a freshly minted visitor
///
/// Permanent-class lifetime so ledger keys stay stable across visits. The
/// value is opaque and carries no account linkage.
pub fn visitor_cookie(visitor_id: VisitorId) -> Cookie<'static> {
    Cookie::build((VISITOR_COOKIE, visitor_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .permanent()
        .build()
}
