//! # tipjar-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    CreateTipRequest, FrontPageResponse, HealthResponse, ReactionStatusResponse,
    ReadinessResponse, TipResponse,
};
pub use services::{
    DailyPickService, ReactionService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, TipService,
};
