//! Service layer: validation, ranking, and orchestration on top of the
//! repositories and stores.

pub mod context;
pub mod daily_pick;
pub mod error;
pub mod reaction;
pub mod tip;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use daily_pick::DailyPickService;
pub use error::{ServiceError, ServiceResult};
pub use reaction::ReactionService;
pub use tip::TipService;
