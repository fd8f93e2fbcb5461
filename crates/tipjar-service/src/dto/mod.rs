//! Request and response payloads, plus the entity-to-DTO mapping.

pub mod mappers;
pub mod requests;
pub mod responses;

pub use mappers::AnnotatedTip;
pub use requests::CreateTipRequest;
pub use responses::{
    FrontPageResponse, HealthResponse, ReactionStatusResponse, ReadinessResponse, TipResponse,
};
