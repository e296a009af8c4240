//! Match and Score for the round-robin schedule.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Result state of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Score {
    /// Not played yet.
    #[default]
    Scheduled,
    Played { home_goals: u32, away_goals: u32 },
}

impl Score {
    pub fn is_played(&self) -> bool {
        matches!(self, Score::Played { .. })
    }

    /// `"2 - 1"` once played, `"Pending"` before.
    pub fn display(&self) -> String {
        match self {
            Score::Scheduled => "Pending".to_string(),
            Score::Played {
                home_goals,
                away_goals,
            } => format!("{} - {}", home_goals, away_goals),
        }
    }
}

/// A single fixture between two teams of the same scope.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// 1-based round number.
    pub round: u32,
    pub home: TeamId,
    pub away: TeamId,
    #[serde(default)]
    pub score: Score,
}

impl Match {
    pub fn new(round: u32, home: TeamId, away: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            home,
            away,
            score: Score::Scheduled,
        }
    }

    /// True if `team` plays in this match, on either side.
    pub fn involves(&self, team: TeamId) -> bool {
        self.home == team || self.away == team
    }
}
