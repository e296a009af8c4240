//! Tournament and Category: the multi-tournament variant, where each category is its own scope.

use crate::logic::recompute_standings;
use crate::models::error::LeagueError;
use crate::models::scope::{PointRule, Scope};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Editable details of a tournament (create and update share this shape).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentDetails {
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub point_rule: PointRule,
}

impl TournamentDetails {
    /// Trim the name and check it is present and that the date range is ordered.
    fn validated(mut self) -> Result<Self, LeagueError> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(LeagueError::EmptyTournamentName);
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(LeagueError::InvalidDateRange);
            }
        }
        Ok(self)
    }
}

/// A named category inside a tournament, with its own teams and schedule.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub scope: Scope,
}

/// A tournament: single round robin, one leg, split into categories.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Shared by every category.
    pub point_rule: PointRule,
    pub created_at: DateTime<Utc>,
    pub categories: Vec<Category>,
}

impl Tournament {
    /// Create a new tournament without categories.
    pub fn new(details: TournamentDetails) -> Result<Self, LeagueError> {
        let details = details.validated()?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: details.name,
            start_date: details.start_date,
            end_date: details.end_date,
            point_rule: details.point_rule,
            created_at: Utc::now(),
            categories: Vec::new(),
        })
    }

    /// Replace name, dates and point rule. Categories are kept and their
    /// standings follow the new rule.
    pub fn update_details(&mut self, details: TournamentDetails) -> Result<(), LeagueError> {
        let details = details.validated()?;
        self.name = details.name;
        self.start_date = details.start_date;
        self.end_date = details.end_date;
        if self.point_rule != details.point_rule {
            self.point_rule = details.point_rule;
            for category in &mut self.categories {
                category.scope.point_rule = details.point_rule;
                recompute_standings(&mut category.scope);
            }
        }
        Ok(())
    }

    /// Case-insensitive lookup by category name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        let wanted = name.trim().to_lowercase();
        self.categories
            .iter()
            .find(|c| c.name.to_lowercase() == wanted)
    }

    pub fn category_mut(&mut self, name: &str) -> Option<&mut Category> {
        let wanted = name.trim().to_lowercase();
        self.categories
            .iter_mut()
            .find(|c| c.name.to_lowercase() == wanted)
    }

    /// Add an empty category. Names are trimmed and must be unique (case-insensitive).
    pub fn add_category(&mut self, name: impl Into<String>) -> Result<(), LeagueError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(LeagueError::EmptyCategoryName);
        }
        if self.category(name_trimmed).is_some() {
            return Err(LeagueError::DuplicateCategoryName(name_trimmed.to_string()));
        }
        self.categories.push(Category {
            name: name_trimmed.to_string(),
            scope: Scope::new(self.point_rule),
        });
        Ok(())
    }

    /// Remove teams and matches from every category; category names stay.
    pub fn clear_categories(&mut self) {
        for category in &mut self.categories {
            category.scope.clear();
        }
    }
}
