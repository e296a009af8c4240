//! Result entry and point-rule changes, both followed by a standings recomputation.

use crate::logic::standings::recompute_standings;
use crate::models::{LeagueError, MatchId, PointRule, Scope, Score};
use serde_json::Value;

/// Highest goal count accepted for one side of a match.
pub const MAX_GOALS: u32 = 999;

/// Parse a goal count as sent by a form or a JSON client.
///
/// Accepts integers from 0 to [`MAX_GOALS`] and strings holding one (surrounding whitespace
/// allowed). Missing, negative, fractional, oversized and non-numeric values are rejected.
pub fn parse_goals(value: Option<&Value>) -> Result<u32, LeagueError> {
    let goals = match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    goals
        .filter(|g| *g <= u64::from(MAX_GOALS))
        .and_then(|g| u32::try_from(g).ok())
        .ok_or(LeagueError::InvalidGoals)
}

/// Store the score of an existing match and refresh the standings.
pub fn record_result(
    scope: &mut Scope,
    match_id: MatchId,
    home_goals: u32,
    away_goals: u32,
) -> Result<(), LeagueError> {
    if home_goals > MAX_GOALS || away_goals > MAX_GOALS {
        return Err(LeagueError::InvalidGoals);
    }
    let m = scope
        .get_match_mut(match_id)
        .ok_or(LeagueError::MatchNotFound(match_id))?;
    m.score = Score::Played {
        home_goals,
        away_goals,
    };
    log::info!(
        "Recorded result {} - {} for match {} (round {})",
        home_goals,
        away_goals,
        match_id,
        m.round
    );
    recompute_standings(scope);
    Ok(())
}

/// Change how many points a win, draw and loss are worth, and refresh the standings.
pub fn set_point_rule(scope: &mut Scope, rule: PointRule) {
    scope.point_rule = rule;
    recompute_standings(scope);
}
