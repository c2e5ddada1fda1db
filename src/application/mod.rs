//! Application layer - orchestration between ports and the domain.

mod coordinator;

pub use coordinator::{
    ConversationUpdateCoordinator, UpdateOutcome, DEFAULT_MAX_CONFLICT_RETRIES,
};
