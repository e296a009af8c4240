//! CSV export of the standings table.

use crate::logic::standings::standings_table;
use crate::models::Scope;

const HEADER: [&str; 11] = [
    "position", "team", "played", "won", "drawn", "lost", "goals_for", "goals_against",
    "goal_difference", "points", "logo",
];

/// Standings of the scope as CSV bytes, header first, one row per team in ranked order.
pub fn standings_csv(scope: &Scope) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(HEADER)?;
    for row in standings_table(scope) {
        let s = row.stats;
        wtr.write_record([
            row.position.to_string(),
            row.name,
            s.played.to_string(),
            s.won.to_string(),
            s.drawn.to_string(),
            s.lost.to_string(),
            s.goals_for.to_string(),
            s.goals_against.to_string(),
            s.goal_difference.to_string(),
            s.points.to_string(),
            row.logo.unwrap_or_default(),
        ])?;
    }
    wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}
