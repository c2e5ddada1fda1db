//! Team directory port.
//!
//! Supplies the scheduling record (weekly attendance, off-days) for the
//! team a conversation is assigned to. Read-only from the engine's point
//! of view; consulted only when a business-hours metric is computed.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TeamId};
use crate::domain::scheduling::Team;

/// Port for looking up team scheduling records.
#[async_trait]
pub trait TeamDirectory: Send + Sync {
    /// Fetch a team by id. `Ok(None)` means the team is unknown, which
    /// degrades business-hours metrics but never fails an update.
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;
}
