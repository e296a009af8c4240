//! Scope: the teams, schedule and point rule of one league or tournament category.

use crate::models::error::LeagueError;
use crate::models::fixture::{Match, MatchId};
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};

/// Points awarded to each side of a decided match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct PointRule {
    pub win: i32,
    pub draw: i32,
    pub loss: i32,
}

impl Default for PointRule {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

/// Boundary within which team names are unique and one schedule is generated.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scope {
    /// Teams in registration order. Ranking never reorders this list.
    pub teams: Vec<Team>,
    /// Current schedule; replaced wholesale when regenerated.
    pub matches: Vec<Match>,
    pub point_rule: PointRule,
}

impl Scope {
    /// Empty scope using the given point rule.
    pub fn new(point_rule: PointRule) -> Self {
        Self {
            point_rule,
            ..Self::default()
        }
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Register a team. Names are trimmed and must be unique (case-insensitive).
    pub fn add_team(
        &mut self,
        name: impl Into<String>,
        logo: Option<String>,
    ) -> Result<TeamId, LeagueError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(LeagueError::EmptyTeamName);
        }
        let lowered = name_trimmed.to_lowercase();
        let is_duplicate = self.teams.iter().any(|t| t.name.to_lowercase() == lowered);
        if is_duplicate {
            return Err(LeagueError::DuplicateTeamName(name_trimmed.to_string()));
        }
        let team = Team::new(name_trimmed, logo);
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }

    /// Drop every team and match. The point rule is kept.
    pub fn clear(&mut self) {
        self.teams.clear();
        self.matches.clear();
    }

    /// Distinct round numbers present in the schedule, ascending.
    pub fn rounds(&self) -> Vec<u32> {
        let mut rounds: Vec<u32> = self.matches.iter().map(|m| m.round).collect();
        rounds.sort_unstable();
        rounds.dedup();
        rounds
    }

    pub fn played_matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| m.score.is_played())
    }
}
