//! Single binary web server: JSON API over one in-memory Swiss tournament.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. See `swiss_tournament_web::config` for the
//! environment variables (HOST, PORT, TOTAL_ROUNDS, FINISH_POLICY, PAIRING_SEED, ...).

use actix_web::{
    delete, get, post, put,
    web::{self, Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use swiss_tournament_web::{
    finish_tournament, import_players, record_results, round_report_csv, set_match_result,
    start_round, ConsistencyWarning, MatchResult, PlayerSummary, RoundState, ServerConfig,
    Tournament, TournamentError, TournamentSettings, DEFAULT_RATING,
};

/// The tournament and the random source used for pairing. One lock guards both, so every
/// mutation runs to completion before any reader sees the tournament.
struct Engine {
    tournament: Tournament,
    rng: StdRng,
}

type AppState = Data<RwLock<Engine>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct TournamentResponse<'a> {
    state: RoundState,
    tournament: &'a Tournament,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

#[derive(Serialize)]
struct PlayersResponse {
    active: Vec<PlayerSummary>,
    removed: Vec<PlayerSummary>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default = "default_rating")]
    rating: u32,
}

fn default_rating() -> u32 {
    DEFAULT_RATING
}

#[derive(Deserialize)]
struct SetRatingBody {
    rating: u32,
}

#[derive(Deserialize)]
struct SetResultBody {
    result: MatchResult,
}

#[derive(Deserialize, Default)]
struct SubmitResultsBody {
    #[serde(default)]
    results: HashMap<usize, MatchResult>,
}

/// Path segment: player name (e.g. /api/players/{name})
#[derive(Deserialize)]
struct PlayerPath {
    name: String,
}

/// Path segment: board index in the current round
#[derive(Deserialize)]
struct BoardPath {
    index: usize,
}

/// Path segment: archived round number (1-based)
#[derive(Deserialize)]
struct RoundPath {
    number: u32,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    if e.is_not_found() {
        HttpResponse::NotFound().json(body)
    } else {
        HttpResponse::BadRequest().json(body)
    }
}

fn tournament_response(t: &Tournament, warning: Option<ConsistencyWarning>) -> HttpResponse {
    HttpResponse::Ok().json(TournamentResponse {
        state: t.state(),
        tournament: t,
        warning: warning.map(|w| w.to_string()),
    })
}

fn read(state: &AppState) -> Result<RwLockReadGuard<'_, Engine>, HttpResponse> {
    state.read().map_err(|_| lock_error())
}

fn write(state: &AppState) -> Result<RwLockWriteGuard<'_, Engine>, HttpResponse> {
    state.write().map_err(|_| lock_error())
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "swiss-tournament-web",
    })
}

#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    match read(&state) {
        Ok(g) => tournament_response(&g.tournament, None),
        Err(resp) => resp,
    }
}

/// Replace name/date/location/total rounds/finish policy (not while a round is in progress).
#[put("/api/tournament/settings")]
async fn api_update_settings(state: AppState, body: Json<TournamentSettings>) -> HttpResponse {
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let t = &mut g.tournament;
    match t.update_settings(body.into_inner()) {
        Ok(()) => tournament_response(t, None),
        Err(e) => error_response(&e),
    }
}

/// Restart: same players, fresh scores, no rounds.
#[post("/api/tournament/restart")]
async fn api_restart(state: AppState) -> HttpResponse {
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let t = &mut g.tournament;
    match t.restart() {
        Ok(()) => tournament_response(t, None),
        Err(e) => error_response(&e),
    }
}

/// Clear: no players, no rounds, settings kept.
#[post("/api/tournament/clear")]
async fn api_clear(state: AppState) -> HttpResponse {
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let t = &mut g.tournament;
    match t.clear() {
        Ok(()) => tournament_response(t, None),
        Err(e) => error_response(&e),
    }
}

/// Finish by hand (manual finish policy only).
#[post("/api/tournament/finish")]
async fn api_finish(state: AppState) -> HttpResponse {
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let t = &mut g.tournament;
    match finish_tournament(t) {
        Ok(()) => tournament_response(t, None),
        Err(e) => error_response(&e),
    }
}

#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    match read(&state) {
        Ok(g) => HttpResponse::Ok().json(PlayersResponse {
            active: g.tournament.active_players(),
            removed: g.tournament.removed_players(),
        }),
        Err(resp) => resp,
    }
}

#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let t = &mut g.tournament;
    match t.add_player(&body.name, body.rating) {
        Ok(()) => tournament_response(t, None),
        Err(e) => error_response(&e),
    }
}

/// Register players from a CSV body with a `name,rating` header.
#[post("/api/players/import")]
async fn api_import_players(state: AppState, body: Bytes) -> HttpResponse {
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let t = &mut g.tournament;
    match import_players(t, &body[..]) {
        Ok(_) => tournament_response(t, None),
        Err(e) => error_response(&e),
    }
}

/// Soft-remove a player (can be restored later).
#[delete("/api/players/{name}")]
async fn api_remove_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let t = &mut g.tournament;
    match t.remove_player(&path.name) {
        Ok(warning) => tournament_response(t, warning),
        Err(e) => error_response(&e),
    }
}

#[post("/api/players/{name}/restore")]
async fn api_restore_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let t = &mut g.tournament;
    match t.restore_player(&path.name) {
        Ok(()) => tournament_response(t, None),
        Err(e) => error_response(&e),
    }
}

#[put("/api/players/{name}/rating")]
async fn api_set_rating(state: AppState, path: Path<PlayerPath>, body: Json<SetRatingBody>) -> HttpResponse {
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let t = &mut g.tournament;
    match t.set_player_rating(&path.name, body.rating) {
        Ok(warning) => tournament_response(t, warning),
        Err(e) => error_response(&e),
    }
}

/// Pair the next round.
#[post("/api/rounds")]
async fn api_start_round(state: AppState) -> HttpResponse {
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let Engine { tournament, rng } = &mut *g;
    match start_round(tournament, rng) {
        Ok(()) => tournament_response(tournament, None),
        Err(e) => error_response(&e),
    }
}

/// Boards of the round in progress.
#[get("/api/rounds/current")]
async fn api_current_round(state: AppState) -> HttpResponse {
    let g = match read(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match g.tournament.active_round() {
        Some(round) => HttpResponse::Ok().json(round),
        None => error_response(&TournamentError::IllegalState("no round in progress")),
    }
}

/// Enter one board's result without committing the round.
#[put("/api/rounds/current/results/{index}")]
async fn api_set_result(state: AppState, path: Path<BoardPath>, body: Json<SetResultBody>) -> HttpResponse {
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let t = &mut g.tournament;
    match set_match_result(t, path.index, body.result) {
        Ok(()) => tournament_response(t, None),
        Err(e) => error_response(&e),
    }
}

/// Commit the round; optional body `{"results": {"0": "white_win", ...}}` fills remaining boards.
#[post("/api/rounds/current/submit")]
async fn api_submit_results(state: AppState, body: Option<Json<SubmitResultsBody>>) -> HttpResponse {
    let results = body.map(|b| b.into_inner()).unwrap_or_default().results;
    let mut g = match write(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let t = &mut g.tournament;
    match record_results(t, &results) {
        Ok(()) => tournament_response(t, None),
        Err(e) => error_response(&e),
    }
}

#[get("/api/standings")]
async fn api_standings(state: AppState) -> HttpResponse {
    match read(&state) {
        Ok(g) => HttpResponse::Ok().json(g.tournament.standings()),
        Err(resp) => resp,
    }
}

#[get("/api/rounds/{number:\\d+}")]
async fn api_get_round(state: AppState, path: Path<RoundPath>) -> HttpResponse {
    let g = match read(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match g.tournament.round(path.number) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => error_response(&e),
    }
}

/// Pairings and standings of an archived round as CSV.
#[get("/api/rounds/{number:\\d+}/report.csv")]
async fn api_round_report(state: AppState, path: Path<RoundPath>) -> HttpResponse {
    let g = match read(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let csv = g.tournament.round(path.number).and_then(round_report_csv);
    match csv {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"round_{}.csv\"", path.number),
            ))
            .body(body),
        Err(e) => error_response(&e),
    }
}

fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_get_tournament)
        .service(api_update_settings)
        .service(api_restart)
        .service(api_clear)
        .service(api_finish)
        .service(api_list_players)
        .service(api_import_players)
        .service(api_add_player)
        .service(api_remove_player)
        .service(api_restore_player)
        .service(api_set_rating)
        .service(api_start_round)
        .service(api_current_round)
        .service(api_set_result)
        .service(api_submit_results)
        .service(api_standings)
        .service(api_get_round)
        .service(api_round_report);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let rng = match config.pairing_seed {
        Some(seed) => {
            log::info!("Pairing with fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let tournament = Tournament::new(config.tournament.clone());
    log::info!(
        "Tournament '{}' ({} rounds, {:?} finish)",
        tournament.settings.name,
        tournament.settings.total_rounds,
        tournament.settings.finish_policy
    );

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(Engine { tournament, rng }));

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(bind)?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};

    fn test_state() -> AppState {
        let settings = TournamentSettings {
            total_rounds: 3,
            ..TournamentSettings::default()
        };
        Data::new(RwLock::new(Engine {
            tournament: Tournament::new(settings),
            rng: StdRng::seed_from_u64(7),
        }))
    }

    #[actix_web::test]
    async fn play_one_round_over_http() {
        let state = test_state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        for (name, rating) in [("Anna", 1500), ("Ben", 1400)] {
            let req = test::TestRequest::post()
                .uri("/api/players")
                .set_json(serde_json::json!({ "name": name, "rating": rating }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::post().uri("/api/rounds").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/rounds/current/submit")
            .set_json(serde_json::json!({ "results": { "0": "draw" } }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/standings").to_request();
        let standings: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(standings[0]["score"], 0.5);
        assert_eq!(standings[1]["score"], 0.5);

        let req = test::TestRequest::get().uri("/api/rounds/1/report.csv").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn submit_without_results_is_rejected() {
        let state = test_state();
        {
            let mut g = state.write().unwrap();
            g.tournament.add_player("Anna", 1500).unwrap();
            g.tournament.add_player("Ben", 1400).unwrap();
        }
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::post().uri("/api/rounds").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::post().uri("/api/rounds/current/submit").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.read().unwrap().tournament.history().len(), 0);
    }

    #[actix_web::test]
    async fn unknown_round_and_player_are_not_found() {
        let app = test::init_service(App::new().app_data(test_state()).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/rounds/4").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete().uri("/api/players/Nobody").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn clear_empties_the_tournament() {
        let state = test_state();
        {
            let mut g = state.write().unwrap();
            g.tournament.add_player("Anna", 1500).unwrap();
            g.tournament.add_player("Ben", 1400).unwrap();
        }
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::post().uri("/api/tournament/clear").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["state"], "idle");

        let g = state.read().unwrap();
        assert!(g.tournament.registry().is_empty());
        assert_eq!(g.tournament.settings.total_rounds, 3);
    }
}
