//! Team and TeamStats data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in matches and lookups).
pub type TeamId = Uuid;

/// Aggregate statistics of a team. Derived from the match list, never edited directly.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: i64,
}

impl TeamStats {
    /// Record one played match from this team's point of view. Totals saturate instead of wrapping.
    pub(crate) fn add_match(&mut self, scored: u32, conceded: u32) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
    }

    pub(crate) fn add_win(&mut self, points: i32) {
        self.won = self.won.saturating_add(1);
        self.points = self.points.saturating_add(i64::from(points));
    }

    pub(crate) fn add_draw(&mut self, points: i32) {
        self.drawn = self.drawn.saturating_add(1);
        self.points = self.points.saturating_add(i64::from(points));
    }

    pub(crate) fn add_loss(&mut self, points: i32) {
        self.lost = self.lost.saturating_add(1);
        self.points = self.points.saturating_add(i64::from(points));
    }

    pub(crate) fn settle_goal_difference(&mut self) {
        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
    }
}

/// A team registered in a scope.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Logo URL shown next to the name; `None` when the user left it blank.
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub stats: TeamStats,
}

impl Team {
    /// Create a new team with zeroed statistics. A blank logo is stored as `None`.
    pub fn new(name: impl Into<String>, logo: Option<String>) -> Self {
        let logo = logo
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            logo,
            stats: TeamStats::default(),
        }
    }
}
