//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! The database snapshot lives in DATA_FILE (default data/league.json).

use actix_files::Files;
use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use league_manager_web::{
    fixture_rows, generate_fixture, parse_goals, record_result, set_point_rule, stage,
    standings_csv, standings_table, CommitError, Database, ErrorKind, FixtureRow, JsonStore,
    LeagueError, MatchId, PointRule, Scope, ScopeKey, ServerConfig, StandingRow, StoreError, Team,
    Tournament, TournamentDetails, TournamentId,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Live database plus the file it is persisted to.
struct AppState {
    store: JsonStore,
    db: Database,
}

/// Commands are serialised by the async write lock; each one runs to completion before the next.
type SharedState = Data<RwLock<AppState>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Everything the page needs to render one scope.
#[derive(Serialize)]
struct ScopeView<'a> {
    point_rule: PointRule,
    teams: &'a [Team],
    standings: Vec<StandingRow>,
    rounds: Vec<u32>,
    fixture: Vec<FixtureRow>,
}

impl<'a> ScopeView<'a> {
    fn new(scope: &'a Scope) -> Self {
        Self {
            point_rule: scope.point_rule,
            teams: &scope.teams,
            standings: standings_table(scope),
            rounds: scope.rounds(),
            fixture: fixture_rows(scope, None),
        }
    }
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
    #[serde(default)]
    logo: Option<String>,
}

/// Goals stay raw JSON so that strings from forms and bad values get a proper validation message.
#[derive(Deserialize)]
struct RecordResultBody {
    #[serde(default)]
    home_goals: Option<serde_json::Value>,
    #[serde(default)]
    away_goals: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ClearBody {
    #[serde(default)]
    confirm: bool,
}

#[derive(Deserialize)]
struct AddCategoryBody {
    name: String,
}

#[derive(Deserialize)]
struct RoundQuery {
    round: Option<u32>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and category name
#[derive(Deserialize)]
struct CategoryPath {
    id: TournamentId,
    category: String,
}

impl CategoryPath {
    fn key(&self) -> ScopeKey {
        ScopeKey::Category {
            tournament: self.id,
            category: self.category.clone(),
        }
    }
}

#[derive(Deserialize)]
struct LeagueMatchPath {
    match_id: MatchId,
}

#[derive(Deserialize)]
struct CategoryMatchPath {
    id: TournamentId,
    category: String,
    match_id: MatchId,
}

impl CategoryMatchPath {
    fn key(&self) -> ScopeKey {
        ScopeKey::Category {
            tournament: self.id,
            category: self.category.clone(),
        }
    }
}

fn league_error(e: &LeagueError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::InvalidInput | ErrorKind::InsufficientTeams => {
            HttpResponse::BadRequest().json(body)
        }
    }
}

fn commit_error(e: CommitError) -> HttpResponse {
    match e {
        CommitError::Rejected(e) => league_error(&e),
        CommitError::Store(e) => {
            log::error!("Could not persist snapshot: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

/// Apply `command` to a copy of the database, write the snapshot on the blocking pool, then
/// swap the copy in. The caller holds the write lock throughout, so commands never interleave.
async fn commit<T>(
    app: &mut AppState,
    command: impl FnOnce(&mut Database) -> Result<T, LeagueError>,
) -> Result<T, CommitError> {
    let (next, out) = stage(&app.db, command)?;
    let store = app.store.clone();
    let saved = tokio::task::spawn_blocking(move || store.save(&next).map(|()| next))
        .await
        .map_err(|e| StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    app.db = saved?;
    Ok(out)
}

/// Answer with a read-only view of one scope.
async fn read_scope(
    state: &SharedState,
    key: &ScopeKey,
    render: impl FnOnce(&Scope) -> HttpResponse,
) -> HttpResponse {
    let app = state.read().await;
    match app.db.scope(key) {
        Ok(scope) => render(scope),
        Err(e) => league_error(&e),
    }
}

/// Run a command against one scope, persist, and answer with the refreshed scope view.
async fn mutate_scope(
    state: &SharedState,
    key: &ScopeKey,
    command: impl FnOnce(&mut Scope) -> Result<(), LeagueError>,
) -> HttpResponse {
    let mut app = state.write().await;
    if let Err(e) = commit(&mut app, |db| command(db.scope_mut(key)?)).await {
        return commit_error(e);
    }
    match app.db.scope(key) {
        Ok(scope) => HttpResponse::Ok().json(ScopeView::new(scope)),
        Err(e) => league_error(&e),
    }
}

/// Run a command against one tournament, persist, and answer with the tournament.
async fn mutate_tournament(
    state: &SharedState,
    id: TournamentId,
    command: impl FnOnce(&mut Database) -> Result<(), LeagueError>,
) -> HttpResponse {
    let mut app = state.write().await;
    if let Err(e) = commit(&mut app, command).await {
        return commit_error(e);
    }
    match app.db.tournament(id) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => league_error(&e),
    }
}

async fn add_team(state: &SharedState, key: &ScopeKey, body: AddTeamBody) -> HttpResponse {
    mutate_scope(state, key, |scope| {
        scope.add_team(body.name, body.logo).map(|id| {
            log::info!("Added team {} to {:?}", id, key);
        })
    })
    .await
}

async fn record(
    state: &SharedState,
    key: &ScopeKey,
    match_id: MatchId,
    body: &RecordResultBody,
) -> HttpResponse {
    let goals = parse_goals(body.home_goals.as_ref())
        .and_then(|home| parse_goals(body.away_goals.as_ref()).map(|away| (home, away)));
    let (home, away) = match goals {
        Ok(goals) => goals,
        Err(e) => return league_error(&e),
    };
    mutate_scope(state, key, |scope| record_result(scope, match_id, home, away)).await
}

async fn fixture(state: &SharedState, key: &ScopeKey, round: Option<u32>) -> HttpResponse {
    read_scope(state, key, |scope| {
        HttpResponse::Ok().json(fixture_rows(scope, round))
    })
    .await
}

async fn standings(state: &SharedState, key: &ScopeKey) -> HttpResponse {
    read_scope(state, key, |scope| {
        HttpResponse::Ok().json(standings_table(scope))
    })
    .await
}

async fn csv_download(state: &SharedState, key: &ScopeKey) -> HttpResponse {
    read_scope(state, key, |scope| match standings_csv(scope) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"standings.csv\""))
            .body(bytes),
        Err(e) => {
            log::error!("Could not write standings CSV: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    })
    .await
}

async fn clear(state: &SharedState, key: &ScopeKey, body: Option<Json<ClearBody>>) -> HttpResponse {
    let confirmed = body.map(|b| b.confirm).unwrap_or_default();
    let mut app = state.write().await;
    if let Err(e) = commit(&mut app, |db| db.clear_scope(key, confirmed)).await {
        return commit_error(e);
    }
    match app.db.scope(key) {
        Ok(scope) => HttpResponse::Ok().json(ScopeView::new(scope)),
        Err(e) => league_error(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "league-manager-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

// ---- League scope ----

#[get("/api/league")]
async fn api_get_league(state: SharedState) -> HttpResponse {
    read_scope(&state, &ScopeKey::League, |scope| {
        HttpResponse::Ok().json(ScopeView::new(scope))
    })
    .await
}

#[post("/api/league/teams")]
async fn api_league_add_team(state: SharedState, body: Json<AddTeamBody>) -> HttpResponse {
    add_team(&state, &ScopeKey::League, body.into_inner()).await
}

/// Change the league point rule; standings are recomputed immediately.
#[put("/api/league/points")]
async fn api_league_set_points(state: SharedState, body: Json<PointRule>) -> HttpResponse {
    let rule = body.into_inner();
    mutate_scope(&state, &ScopeKey::League, |scope| {
        set_point_rule(scope, rule);
        Ok(())
    })
    .await
}

/// Generate the fixture (replaces any existing schedule and its results).
#[post("/api/league/fixture/generate")]
async fn api_league_generate(state: SharedState) -> HttpResponse {
    mutate_scope(&state, &ScopeKey::League, generate_fixture).await
}

#[get("/api/league/fixture")]
async fn api_league_fixture(state: SharedState, query: Query<RoundQuery>) -> HttpResponse {
    fixture(&state, &ScopeKey::League, query.round).await
}

#[put("/api/league/matches/{match_id}/result")]
async fn api_league_record_result(
    state: SharedState,
    path: Path<LeagueMatchPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    record(&state, &ScopeKey::League, path.match_id, &body).await
}

#[get("/api/league/standings")]
async fn api_league_standings(state: SharedState) -> HttpResponse {
    standings(&state, &ScopeKey::League).await
}

#[get("/api/league/standings.csv")]
async fn api_league_standings_csv(state: SharedState) -> HttpResponse {
    csv_download(&state, &ScopeKey::League).await
}

/// Remove every league team and match. Body must carry `"confirm": true`.
#[post("/api/league/clear")]
async fn api_league_clear(state: SharedState, body: Option<Json<ClearBody>>) -> HttpResponse {
    clear(&state, &ScopeKey::League, body).await
}

// ---- Tournaments ----

#[get("/api/tournaments")]
async fn api_list_tournaments(state: SharedState) -> HttpResponse {
    let app = state.read().await;
    HttpResponse::Ok().json(&app.db.tournaments)
}

#[post("/api/tournaments")]
async fn api_create_tournament(state: SharedState, body: Json<TournamentDetails>) -> HttpResponse {
    let mut app = state.write().await;
    let details = body.into_inner();
    let created = commit(&mut app, |db| {
        let tournament = Tournament::new(details)?;
        let id = tournament.id;
        log::info!("Created tournament {} ({})", tournament.name, id);
        db.tournaments.push(tournament);
        Ok(id)
    })
    .await;
    match created {
        Ok(id) => match app.db.tournament(id) {
            Ok(t) => HttpResponse::Ok().json(t),
            Err(e) => league_error(&e),
        },
        Err(e) => commit_error(e),
    }
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    let app = state.read().await;
    match app.db.tournament(path.id) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => league_error(&e),
    }
}

/// Edit name, dates and point rule. Categories and their teams are kept.
#[put("/api/tournaments/{id}")]
async fn api_update_tournament(
    state: SharedState,
    path: Path<TournamentPath>,
    body: Json<TournamentDetails>,
) -> HttpResponse {
    let id = path.id;
    let details = body.into_inner();
    mutate_tournament(&state, id, |db| db.tournament_mut(id)?.update_details(details)).await
}

#[post("/api/tournaments/{id}/categories")]
async fn api_add_category(
    state: SharedState,
    path: Path<TournamentPath>,
    body: Json<AddCategoryBody>,
) -> HttpResponse {
    let id = path.id;
    let name = body.into_inner().name;
    mutate_tournament(&state, id, |db| db.tournament_mut(id)?.add_category(name)).await
}

/// Remove teams and matches from every category of the tournament.
/// Body must carry `"confirm": true`.
#[post("/api/tournaments/{id}/clear")]
async fn api_clear_tournament(
    state: SharedState,
    path: Path<TournamentPath>,
    body: Option<Json<ClearBody>>,
) -> HttpResponse {
    let id = path.id;
    let confirmed = body.map(|b| b.confirm).unwrap_or_default();
    mutate_tournament(&state, id, |db| db.clear_tournament(id, confirmed)).await
}

// ---- Category scopes ----

#[get("/api/tournaments/{id}/categories/{category}")]
async fn api_get_category(state: SharedState, path: Path<CategoryPath>) -> HttpResponse {
    read_scope(&state, &path.key(), |scope| {
        HttpResponse::Ok().json(ScopeView::new(scope))
    })
    .await
}

#[post("/api/tournaments/{id}/categories/{category}/teams")]
async fn api_category_add_team(
    state: SharedState,
    path: Path<CategoryPath>,
    body: Json<AddTeamBody>,
) -> HttpResponse {
    add_team(&state, &path.key(), body.into_inner()).await
}

#[post("/api/tournaments/{id}/categories/{category}/fixture/generate")]
async fn api_category_generate(state: SharedState, path: Path<CategoryPath>) -> HttpResponse {
    mutate_scope(&state, &path.key(), generate_fixture).await
}

#[get("/api/tournaments/{id}/categories/{category}/fixture")]
async fn api_category_fixture(
    state: SharedState,
    path: Path<CategoryPath>,
    query: Query<RoundQuery>,
) -> HttpResponse {
    fixture(&state, &path.key(), query.round).await
}

#[put("/api/tournaments/{id}/categories/{category}/matches/{match_id}/result")]
async fn api_category_record_result(
    state: SharedState,
    path: Path<CategoryMatchPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    record(&state, &path.key(), path.match_id, &body).await
}

#[get("/api/tournaments/{id}/categories/{category}/standings")]
async fn api_category_standings(state: SharedState, path: Path<CategoryPath>) -> HttpResponse {
    standings(&state, &path.key()).await
}

#[get("/api/tournaments/{id}/categories/{category}/standings.csv")]
async fn api_category_standings_csv(state: SharedState, path: Path<CategoryPath>) -> HttpResponse {
    csv_download(&state, &path.key()).await
}

#[post("/api/tournaments/{id}/categories/{category}/clear")]
async fn api_category_clear(
    state: SharedState,
    path: Path<CategoryPath>,
    body: Option<Json<ClearBody>>,
) -> HttpResponse {
    clear(&state, &path.key(), body).await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let store = JsonStore::new(&config.data_file);
    let db = store.load().map_err(|e| {
        log::error!("Cannot read {}: {}", store.path().display(), e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(AppState { store, db }));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_get_league)
            .service(api_league_add_team)
            .service(api_league_set_points)
            .service(api_league_generate)
            .service(api_league_fixture)
            .service(api_league_record_result)
            .service(api_league_standings_csv)
            .service(api_league_standings)
            .service(api_league_clear)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_update_tournament)
            .service(api_add_category)
            .service(api_clear_tournament)
            .service(api_get_category)
            .service(api_category_add_team)
            .service(api_category_generate)
            .service(api_category_fixture)
            .service(api_category_record_result)
            .service(api_category_standings_csv)
            .service(api_category_standings)
            .service(api_category_clear)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
