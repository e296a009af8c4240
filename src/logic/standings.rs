//! Standings: replay played matches into team statistics and rank the table.

use crate::models::{Match, PointRule, Scope, Score, Team, TeamId, TeamStats};
use serde::Serialize;
use std::cmp::Ordering;

/// Recompute every team's statistics from scratch.
///
/// Returns the number of played matches that were skipped because a team id did not resolve.
/// Running it twice on the same input gives the same statistics.
pub fn apply_results(teams: &mut [Team], matches: &[Match], rule: PointRule) -> usize {
    for team in teams.iter_mut() {
        team.stats = TeamStats::default();
    }

    let mut skipped = 0;
    for m in matches {
        let Some((home_goals, away_goals)) = played_goals(m) else {
            continue;
        };
        let home = teams.iter().position(|t| t.id == m.home);
        let away = teams.iter().position(|t| t.id == m.away);
        let (Some(home), Some(away)) = (home, away) else {
            log::warn!(
                "Skipping match {} in round {}: team {} or {} is not registered",
                m.id,
                m.round,
                m.home,
                m.away
            );
            skipped += 1;
            continue;
        };

        teams[home].stats.add_match(home_goals, away_goals);
        teams[away].stats.add_match(away_goals, home_goals);
        match home_goals.cmp(&away_goals) {
            Ordering::Greater => {
                teams[home].stats.add_win(rule.win);
                teams[away].stats.add_loss(rule.loss);
            }
            Ordering::Less => {
                teams[away].stats.add_win(rule.win);
                teams[home].stats.add_loss(rule.loss);
            }
            Ordering::Equal => {
                teams[home].stats.add_draw(rule.draw);
                teams[away].stats.add_draw(rule.draw);
            }
        }
    }

    for team in teams.iter_mut() {
        team.stats.settle_goal_difference();
    }
    skipped
}

fn played_goals(m: &Match) -> Option<(u32, u32)> {
    match m.score {
        Score::Played {
            home_goals,
            away_goals,
        } => Some((home_goals, away_goals)),
        Score::Scheduled => None,
    }
}

/// Recompute the statistics of every team in the scope using its point rule.
pub fn recompute_standings(scope: &mut Scope) {
    let skipped = apply_results(&mut scope.teams, &scope.matches, scope.point_rule);
    log::debug!(
        "Recomputed standings for {} teams ({} played matches, {} skipped)",
        scope.teams.len(),
        scope.played_matches().count(),
        skipped
    );
}

/// Ranking order: points, then goal difference, then goals for, all descending.
pub fn compare_stats(a: &TeamStats, b: &TeamStats) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

/// Teams in ranked order. Full ties keep registration order (stable sort).
pub fn rank(teams: &[Team]) -> Vec<&Team> {
    let mut ranked: Vec<&Team> = teams.iter().collect();
    ranked.sort_by(|a, b| compare_stats(&a.stats, &b.stats));
    ranked
}

/// One line of the standings table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StandingRow {
    /// 1-based.
    pub position: usize,
    pub team_id: TeamId,
    pub name: String,
    pub logo: Option<String>,
    #[serde(flatten)]
    pub stats: TeamStats,
}

/// Ranked table of the scope, from the statistics currently stored on its teams.
pub fn standings_table(scope: &Scope) -> Vec<StandingRow> {
    rank(&scope.teams)
        .into_iter()
        .enumerate()
        .map(|(i, t)| StandingRow {
            position: i + 1,
            team_id: t.id,
            name: t.name.clone(),
            logo: t.logo.clone(),
            stats: t.stats,
        })
        .collect()
}
