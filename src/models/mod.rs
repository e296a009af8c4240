//! Data structures for the league manager: teams, matches, scopes, tournaments.

mod database;
mod error;
mod fixture;
mod scope;
mod team;
mod tournament;

pub use database::{Database, ScopeKey};
pub use error::{ErrorKind, LeagueError};
pub use fixture::{Match, MatchId, Score};
pub use scope::{PointRule, Scope};
pub use team::{Team, TeamId, TeamStats};
pub use tournament::{Category, Tournament, TournamentDetails, TournamentId};
