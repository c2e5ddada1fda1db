//! In-memory team directory.
//!
//! # Panics
//!
//! Methods panic if internal locks are poisoned. Acceptable for test
//! code; production deployments read teams from the platform directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, TeamId};
use crate::domain::scheduling::Team;
use crate::ports::TeamDirectory;

/// In-memory team lookup.
#[derive(Default)]
pub struct InMemoryTeamDirectory {
    teams: RwLock<HashMap<TeamId, Team>>,
}

impl InMemoryTeamDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding the given teams.
    pub fn with_teams(teams: impl IntoIterator<Item = Team>) -> Self {
        let directory = Self::new();
        {
            let mut map = directory
                .teams
                .write()
                .expect("InMemoryTeamDirectory: lock poisoned");
            for team in teams {
                map.insert(team.id, team);
            }
        }
        directory
    }

    /// Adds or replaces a team.
    pub fn put(&self, team: Team) {
        self.teams
            .write()
            .expect("InMemoryTeamDirectory: lock poisoned")
            .insert(team.id, team);
    }
}

#[async_trait]
impl TeamDirectory for InMemoryTeamDirectory {
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        Ok(self
            .teams
            .read()
            .expect("InMemoryTeamDirectory: lock poisoned")
            .get(id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scheduling::WeeklySchedule;

    #[tokio::test]
    async fn unknown_team_is_none() {
        let directory = InMemoryTeamDirectory::new();
        assert!(directory.get(&TeamId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let directory = InMemoryTeamDirectory::new();
        let team = Team::new(TeamId::new(), "support", WeeklySchedule::default());
        let id = team.id;

        directory.put(team.clone());
        assert_eq!(directory.get(&id).await.unwrap(), Some(team));
    }
}
