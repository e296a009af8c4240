//! Database: the whole persisted snapshot (league scope plus tournaments) and scope lookup.

use crate::models::error::LeagueError;
use crate::models::scope::Scope;
use crate::models::tournament::{Tournament, TournamentId};
use serde::{Deserialize, Serialize};

/// Identifies one scope inside the database.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ScopeKey {
    /// The flat single-league page.
    League,
    Category {
        tournament: TournamentId,
        category: String,
    },
}

/// Everything the app persists, stored as one snapshot.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub league: Scope,
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
}

impl Database {
    pub fn tournament(&self, id: TournamentId) -> Result<&Tournament, LeagueError> {
        self.tournaments
            .iter()
            .find(|t| t.id == id)
            .ok_or(LeagueError::TournamentNotFound(id))
    }

    pub fn tournament_mut(&mut self, id: TournamentId) -> Result<&mut Tournament, LeagueError> {
        self.tournaments
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(LeagueError::TournamentNotFound(id))
    }

    /// Resolve a scope. The league always exists; categories must have been created.
    pub fn scope(&self, key: &ScopeKey) -> Result<&Scope, LeagueError> {
        match key {
            ScopeKey::League => Ok(&self.league),
            ScopeKey::Category {
                tournament,
                category,
            } => self
                .tournament(*tournament)?
                .category(category)
                .map(|c| &c.scope)
                .ok_or_else(|| LeagueError::CategoryNotFound(category.clone())),
        }
    }

    pub fn scope_mut(&mut self, key: &ScopeKey) -> Result<&mut Scope, LeagueError> {
        match key {
            ScopeKey::League => Ok(&mut self.league),
            ScopeKey::Category {
                tournament,
                category,
            } => self
                .tournament_mut(*tournament)?
                .category_mut(category)
                .map(|c| &mut c.scope)
                .ok_or_else(|| LeagueError::CategoryNotFound(category.clone())),
        }
    }

    /// Destructive reset of one scope's teams and matches. Nothing else is touched.
    pub fn clear_scope(&mut self, key: &ScopeKey, confirmed: bool) -> Result<(), LeagueError> {
        if !confirmed {
            return Err(LeagueError::ConfirmationRequired);
        }
        self.scope_mut(key)?.clear();
        log::info!("Cleared teams and matches of {:?}", key);
        Ok(())
    }

    /// Destructive reset of every category of a tournament.
    pub fn clear_tournament(
        &mut self,
        id: TournamentId,
        confirmed: bool,
    ) -> Result<(), LeagueError> {
        if !confirmed {
            return Err(LeagueError::ConfirmationRequired);
        }
        self.tournament_mut(id)?.clear_categories();
        log::info!("Cleared all categories of tournament {}", id);
        Ok(())
    }
}
