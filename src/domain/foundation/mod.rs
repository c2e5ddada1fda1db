//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types, and event transport
//! that form the vocabulary of the Deskflow domain.

mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{EventEnvelope, EventId};
pub use ids::{ActivityId, ConversationId, IdentityId, TeamId};
pub use state_machine::StateMachine;
pub use timestamp::{Timestamp, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};
