//! Integration tests for standings: statistics replay, ranking, result entry and CSV export.

use league_manager_web::{
    apply_results, generate_fixture, parse_goals, rank, recompute_standings, record_result,
    set_point_rule, standings_csv, standings_table, LeagueError, Match, PointRule, Score, Scope,
    Team, TeamId, MAX_GOALS,
};
use serde_json::json;
use uuid::Uuid;

fn scope_with_teams(names: &[&str]) -> Scope {
    let mut scope = Scope::default();
    for name in names {
        scope.add_team(*name, None).unwrap();
    }
    scope
}

fn id_of(scope: &Scope, name: &str) -> TeamId {
    scope.teams.iter().find(|t| t.name == name).unwrap().id
}

fn team<'a>(scope: &'a Scope, name: &str) -> &'a Team {
    scope.teams.iter().find(|t| t.name == name).unwrap()
}

fn match_between(scope: &Scope, a: &str, b: &str) -> Match {
    let (a, b) = (id_of(scope, a), id_of(scope, b));
    scope
        .matches
        .iter()
        .find(|m| m.involves(a) && m.involves(b))
        .cloned()
        .unwrap()
}

/// Record a score given from `home_name`'s point of view, whichever side the schedule put it on.
fn play(scope: &mut Scope, home_name: &str, home_goals: u32, away_name: &str, away_goals: u32) {
    let m = match_between(scope, home_name, away_name);
    if m.home == id_of(scope, home_name) {
        record_result(scope, m.id, home_goals, away_goals).unwrap();
    } else {
        record_result(scope, m.id, away_goals, home_goals).unwrap();
    }
}

#[test]
fn four_team_scenario() {
    let mut scope = scope_with_teams(&["A", "B", "C", "D"]);
    generate_fixture(&mut scope).unwrap();
    assert_eq!(scope.matches.len(), 6);
    assert_eq!(scope.rounds().len(), 3);
    for round in scope.rounds() {
        assert_eq!(scope.matches.iter().filter(|m| m.round == round).count(), 2);
    }

    play(&mut scope, "A", 2, "B", 1);
    play(&mut scope, "C", 0, "D", 0);

    let a = team(&scope, "A").stats;
    assert_eq!((a.played, a.won, a.drawn, a.lost), (1, 1, 0, 0));
    assert_eq!((a.goals_for, a.goals_against, a.goal_difference, a.points), (2, 1, 1, 3));
    let b = team(&scope, "B").stats;
    assert_eq!((b.played, b.lost, b.points, b.goal_difference), (1, 1, 0, -1));
    for name in ["C", "D"] {
        let s = team(&scope, name).stats;
        assert_eq!((s.played, s.drawn, s.points), (1, 1, 1));
    }

    let table = standings_table(&scope);
    let order: Vec<&str> = table
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(order, vec!["A", "C", "D", "B"]);
}

#[test]
fn away_win_goes_to_the_away_side() {
    let mut scope = scope_with_teams(&["Home", "Away"]);
    generate_fixture(&mut scope).unwrap();
    let id = scope.matches[0].id;
    record_result(&mut scope, id, 0, 3).unwrap();

    let home = team(&scope, "Home").stats;
    let away = team(&scope, "Away").stats;
    assert_eq!((home.lost, home.points, home.goal_difference), (1, 0, -3));
    assert_eq!((away.won, away.points, away.goal_difference), (1, 3, 3));
}

#[test]
fn recompute_is_idempotent() {
    let mut scope = scope_with_teams(&["A", "B", "C", "D", "E"]);
    generate_fixture(&mut scope).unwrap();
    let ids: Vec<_> = scope.matches.iter().map(|m| m.id).collect();
    for (i, id) in ids.iter().enumerate().take(6) {
        record_result(&mut scope, *id, (i % 3) as u32, ((i + 1) % 2) as u32).unwrap();
    }

    recompute_standings(&mut scope);
    let first = scope.clone();
    let first_table = standings_table(&scope);
    recompute_standings(&mut scope);
    assert_eq!(scope, first);
    assert_eq!(standings_table(&scope), first_table);
}

#[test]
fn played_sum_is_twice_the_played_matches_and_goal_difference_holds() {
    let mut scope = scope_with_teams(&["A", "B", "C", "D", "E", "F"]);
    generate_fixture(&mut scope).unwrap();
    let ids: Vec<_> = scope.matches.iter().map(|m| m.id).collect();
    for (i, id) in ids.iter().enumerate().step_by(2) {
        record_result(&mut scope, *id, (i % 4) as u32, (i % 3) as u32).unwrap();
    }

    let played_matches = scope.played_matches().count() as u32;
    let total_played: u32 = scope.teams.iter().map(|t| t.stats.played).sum();
    assert_eq!(total_played, 2 * played_matches);
    for t in &scope.teams {
        assert_eq!(
            t.stats.goal_difference,
            i64::from(t.stats.goals_for) - i64::from(t.stats.goals_against)
        );
    }
}

#[test]
fn rank_orders_by_points_then_goal_difference() {
    let mut teams: Vec<Team> = ["X", "Y", "Z"].iter().map(|n| Team::new(*n, None)).collect();
    for (t, (points, gd)) in teams.iter_mut().zip([(10, 2), (10, 5), (7, 1)]) {
        t.stats.points = points;
        t.stats.goal_difference = gd;
    }
    let order: Vec<(i64, i64)> = rank(&teams)
        .iter()
        .map(|t| (t.stats.points, t.stats.goal_difference))
        .collect();
    assert_eq!(order, vec![(10, 5), (10, 2), (7, 1)]);
}

#[test]
fn goals_for_breaks_ties_then_registration_order() {
    let mut teams: Vec<Team> = ["First", "Second", "Third"]
        .iter()
        .map(|n| Team::new(*n, None))
        .collect();
    for t in teams.iter_mut() {
        t.stats.points = 4;
        t.stats.goal_difference = 1;
    }
    teams[0].stats.goals_for = 3;
    teams[1].stats.goals_for = 3;
    teams[2].stats.goals_for = 5;

    let order: Vec<&str> = rank(&teams).iter().map(|t| t.name.as_str()).collect();
    assert_eq!(order, vec!["Third", "First", "Second"]);
    // Ranking never reorders the registration list itself.
    assert_eq!(teams[0].name, "First");
}

#[test]
fn match_with_unknown_team_is_skipped() {
    let mut scope = scope_with_teams(&["A", "B"]);
    generate_fixture(&mut scope).unwrap();
    let id = scope.matches[0].id;
    record_result(&mut scope, id, 1, 0).unwrap();

    let mut orphan = Match::new(1, id_of(&scope, "A"), Uuid::new_v4());
    orphan.score = Score::Played {
        home_goals: 5,
        away_goals: 0,
    };
    scope.matches.push(orphan);

    let skipped = apply_results(&mut scope.teams, &scope.matches, scope.point_rule);
    assert_eq!(skipped, 1);
    let a = team(&scope, "A").stats;
    assert_eq!(a.played, 1);
    assert_eq!(a.goals_for + team(&scope, "B").stats.goals_for, 1);
}

#[test]
fn point_rule_change_recomputes_points() {
    let mut scope = scope_with_teams(&["A", "B", "C"]);
    generate_fixture(&mut scope).unwrap();
    play(&mut scope, "A", 1, "B", 0);
    play(&mut scope, "B", 2, "C", 2);

    set_point_rule(
        &mut scope,
        PointRule {
            win: 2,
            draw: 1,
            loss: -1,
        },
    );
    assert_eq!(team(&scope, "A").stats.points, 2);
    assert_eq!(team(&scope, "B").stats.points, 0);
    assert_eq!(team(&scope, "C").stats.points, 1);
}

#[test]
fn unknown_match_is_not_found_and_changes_nothing() {
    let mut scope = scope_with_teams(&["A", "B"]);
    generate_fixture(&mut scope).unwrap();
    let before = scope.clone();
    let missing = Uuid::new_v4();
    assert_eq!(
        record_result(&mut scope, missing, 1, 1),
        Err(LeagueError::MatchNotFound(missing))
    );
    assert_eq!(scope, before);
}

#[test]
fn parse_goals_accepts_only_non_negative_whole_numbers() {
    assert_eq!(parse_goals(Some(&json!(2))), Ok(2));
    assert_eq!(parse_goals(Some(&json!(0))), Ok(0));
    assert_eq!(parse_goals(Some(&json!("3"))), Ok(3));
    assert_eq!(parse_goals(Some(&json!(" 4 "))), Ok(4));

    let rejected = [
        json!(-1),
        json!(1.5),
        json!("abc"),
        json!("-2"),
        json!(""),
        json!(null),
        json!([1]),
    ];
    for bad in rejected {
        assert_eq!(parse_goals(Some(&bad)), Err(LeagueError::InvalidGoals), "{bad}");
    }
    assert_eq!(parse_goals(None), Err(LeagueError::InvalidGoals));
}

#[test]
fn oversized_goal_counts_are_rejected() {
    assert_eq!(parse_goals(Some(&json!(MAX_GOALS))), Ok(MAX_GOALS));
    assert_eq!(parse_goals(Some(&json!("999"))), Ok(999));
    let oversized = [
        json!(1000),
        json!("1000"),
        json!(4294967295u64),
        json!(u64::MAX),
        json!("4294967296"),
    ];
    for bad in oversized {
        assert_eq!(parse_goals(Some(&bad)), Err(LeagueError::InvalidGoals), "{bad}");
    }

    let mut scope = scope_with_teams(&["A", "B", "C"]);
    generate_fixture(&mut scope).unwrap();
    let before = scope.clone();
    let id = scope.matches[0].id;
    assert_eq!(
        record_result(&mut scope, id, u32::MAX, 0),
        Err(LeagueError::InvalidGoals)
    );
    assert_eq!(
        record_result(&mut scope, id, 0, MAX_GOALS + 1),
        Err(LeagueError::InvalidGoals)
    );
    assert_eq!(scope, before);
}

#[test]
fn huge_stored_scores_saturate_instead_of_overflowing() {
    let mut scope = scope_with_teams(&["A", "B", "C"]);
    generate_fixture(&mut scope).unwrap();
    let a = id_of(&scope, "A");
    for m in scope.matches.iter_mut().filter(|m| m.involves(a)) {
        let a_home = m.home == a;
        m.score = Score::Played {
            home_goals: if a_home { u32::MAX } else { 0 },
            away_goals: if a_home { 0 } else { u32::MAX },
        };
    }

    recompute_standings(&mut scope);
    let stats = team(&scope, "A").stats;
    assert_eq!(stats.played, 2);
    assert_eq!(stats.won, 2);
    assert_eq!(stats.goals_for, u32::MAX);
    assert_eq!(stats.goal_difference, i64::from(u32::MAX));
}

#[test]
fn csv_export_lists_ranked_rows() {
    let mut scope = Scope::default();
    scope.add_team("Eagles", Some("https://img/eagles.png".into())).unwrap();
    scope.add_team("Hawks", None).unwrap();
    generate_fixture(&mut scope).unwrap();
    play(&mut scope, "Hawks", 2, "Eagles", 0);

    let csv = String::from_utf8(standings_csv(&scope).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "position,team,played,won,drawn,lost,goals_for,goals_against,goal_difference,points,logo"
    );
    assert_eq!(lines[1], "1,Hawks,1,1,0,0,2,0,2,3,");
    assert_eq!(lines[2], "2,Eagles,1,0,0,1,0,2,-2,0,https://img/eagles.png");
}
