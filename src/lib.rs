//! Round-robin league manager web app: library with models, business logic and persistence.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::ServerConfig;
pub use logic::{
    apply_results, fixture_rows, generate_fixture, parse_goals, rank, recompute_standings,
    record_result, round_robin, set_point_rule, standings_csv, standings_table, FixtureRow,
    StandingRow, MAX_GOALS,
};
pub use models::{
    Category, Database, ErrorKind, LeagueError, Match, MatchId, PointRule, Score, Scope, ScopeKey,
    Team, TeamId, TeamStats, Tournament, TournamentDetails, TournamentId,
};
pub use store::{stage, CommitError, JsonStore, StoreError};
