//! League business logic: fixture generation, result entry, standings.

mod export;
mod fixture;
mod results;
mod standings;

pub use export::standings_csv;
pub use fixture::{fixture_rows, generate_fixture, round_robin, FixtureRow};
pub use results::{parse_goals, record_result, set_point_rule, MAX_GOALS};
pub use standings::{
    apply_results, compare_stats, rank, recompute_standings, standings_table, StandingRow,
};
