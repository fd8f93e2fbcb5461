//! # tipjar-core
//!
//! The domain: tip and reaction entities, their value objects, the content
//! safety filter, and the repository traits the storage crates implement.
//! Nothing in this crate touches a database, a socket, or a web framework.

pub mod entities;
pub mod error;
pub mod safety;
pub mod traits;
pub mod value_objects;

pub use entities::{Reaction, ReactionChange, ReactionKind, ReactionOutcome, Tip};
pub use error::DomainError;
pub use traits::{ReactionRepository, RepoResult, TipRepository};
pub use value_objects::{
    ListSection, TipId, TipIdGenerator, TipIdParseError, VisitorId, VisitorIdParseError,
};
