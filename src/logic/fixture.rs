//! Fixture generation: single round robin by the circle method, plus the fixture view.

use crate::logic::standings::recompute_standings;
use crate::models::{LeagueError, Match, MatchId, Scope, Score, TeamId};
use serde::Serialize;

/// Build a single round-robin schedule for `teams`, in list order.
///
/// 1. Odd team counts get a bye slot appended, so the working list has even length `n`.
/// 2. Each of the `n - 1` rounds pairs position `i` with position `n - 1 - i`.
/// 3. Pairings with the bye produce no match; the lower position plays at home.
/// 4. Between rounds the last entry moves to index 1 while index 0 stays fixed.
///
/// Every unordered pair meets exactly once: `len * (len - 1) / 2` matches in total.
pub fn round_robin(teams: &[TeamId]) -> Result<Vec<Match>, LeagueError> {
    if teams.len() < 2 {
        return Err(LeagueError::InsufficientTeams { found: teams.len() });
    }

    let mut slots: Vec<Option<TeamId>> = teams.iter().copied().map(Some).collect();
    if slots.len() % 2 != 0 {
        slots.push(None);
    }

    let n = slots.len();
    let rounds = n - 1;
    let per_round = n / 2;
    let mut matches = Vec::with_capacity(teams.len() * (teams.len() - 1) / 2);

    for r in 0..rounds {
        let round = (r + 1) as u32;
        for i in 0..per_round {
            if let (Some(home), Some(away)) = (slots[i], slots[n - 1 - i]) {
                matches.push(Match::new(round, home, away));
            }
        }
        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }

    Ok(matches)
}

/// Replace the scope's schedule with a fresh round robin. Previous results are discarded.
pub fn generate_fixture(scope: &mut Scope) -> Result<(), LeagueError> {
    let ids: Vec<TeamId> = scope.teams.iter().map(|t| t.id).collect();
    let matches = round_robin(&ids)?;
    log::info!(
        "Generated fixture: {} teams, {} matches over {} rounds",
        ids.len(),
        matches.len(),
        matches.iter().map(|m| m.round).max().unwrap_or(0)
    );
    scope.matches = matches;
    recompute_standings(scope);
    Ok(())
}

/// One schedule line with team names resolved, for display.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FixtureRow {
    pub id: MatchId,
    pub round: u32,
    pub home: String,
    pub away: String,
    pub score: Score,
    /// `"2 - 1"` or `"Pending"`.
    pub result: String,
}

/// Schedule of the scope, optionally only one round. Unknown team ids show as `"?"`.
pub fn fixture_rows(scope: &Scope, round: Option<u32>) -> Vec<FixtureRow> {
    let name_of = |id: TeamId| {
        scope
            .team(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| "?".to_string())
    };
    scope
        .matches
        .iter()
        .filter(|m| round.map_or(true, |r| m.round == r))
        .map(|m| FixtureRow {
            id: m.id,
            round: m.round,
            home: name_of(m.home),
            away: name_of(m.away),
            score: m.score,
            result: m.score.display(),
        })
        .collect()
}
