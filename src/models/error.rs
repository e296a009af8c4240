//! Validation errors returned by league commands.

use crate::models::fixture::MatchId;
use crate::models::tournament::TournamentId;

/// Broad class of a [`LeagueError`], used to pick the HTTP status.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidInput,
    InsufficientTeams,
    NotFound,
}

/// Errors that can occur during league operations. None of them leave partial changes behind.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// Team name is empty after trimming.
    EmptyTeamName,
    /// A team with this name already exists in the scope (case-insensitive).
    DuplicateTeamName(String),
    /// Goals must be whole numbers from 0 to `MAX_GOALS`.
    InvalidGoals,
    /// Fewer than two teams when generating a schedule.
    InsufficientTeams { found: usize },
    /// Tournament name is empty after trimming.
    EmptyTournamentName,
    /// End date lies before the start date.
    InvalidDateRange,
    /// Category name is empty after trimming.
    EmptyCategoryName,
    /// A category with this name already exists in the tournament (case-insensitive).
    DuplicateCategoryName(String),
    /// Destructive clear requested without confirmation.
    ConfirmationRequired,
    TournamentNotFound(TournamentId),
    CategoryNotFound(String),
    MatchNotFound(MatchId),
}

impl LeagueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LeagueError::InsufficientTeams { .. } => ErrorKind::InsufficientTeams,
            LeagueError::TournamentNotFound(_)
            | LeagueError::CategoryNotFound(_)
            | LeagueError::MatchNotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::InvalidInput,
        }
    }
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::EmptyTeamName => write!(f, "Team name cannot be empty"),
            LeagueError::DuplicateTeamName(name) => write!(f, "Team \"{}\" already exists", name),
            LeagueError::InvalidGoals => write!(
                f,
                "Enter a valid result (whole numbers from 0 to {})",
                crate::logic::MAX_GOALS
            ),
            LeagueError::InsufficientTeams { found } => write!(
                f,
                "At least 2 teams are needed to generate the fixture (found {})",
                found
            ),
            LeagueError::EmptyTournamentName => write!(f, "Tournament name is required"),
            LeagueError::InvalidDateRange => write!(f, "End date cannot be before start date"),
            LeagueError::EmptyCategoryName => write!(f, "Category name cannot be empty"),
            LeagueError::DuplicateCategoryName(name) => {
                write!(f, "Category \"{}\" already exists", name)
            }
            LeagueError::ConfirmationRequired => {
                write!(f, "Clearing teams and matches must be confirmed")
            }
            LeagueError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            LeagueError::CategoryNotFound(name) => write!(f, "Category \"{}\" not found", name),
            LeagueError::MatchNotFound(_) => write!(f, "Match not found"),
        }
    }
}

impl std::error::Error for LeagueError {}
