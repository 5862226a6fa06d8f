//! Single binary JSON API over the bracket engine with an in-memory store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Engine settings come from BRACKET_* env vars (see `EngineConfig::from_env`).

use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_engine::{
    parse_competitors_csv, CaptainDirectory, Competitor, Engine, EngineConfig, MemoryStore,
    RegionalHostDirectory, ReporterDirectory, ReportingMode, SubmitterId, TournamentError,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Engine plus the concrete roster snapshots the reporter directory reads.
struct AppContext {
    engine: Engine<MemoryStore>,
    captains: Arc<CaptainDirectory>,
    hosts: Arc<RegionalHostDirectory>,
}

type AppState = Data<AppContext>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct OpenTournamentBody {
    game_id: String,
    #[serde(default = "default_capacity")]
    capacity: u32,
}

fn default_capacity() -> u32 {
    16
}

#[derive(Deserialize)]
struct RegisterBody {
    competitor: Competitor,
}

#[derive(Deserialize, Default)]
struct GenerateBracketBody {
    /// Seeding order; defaults to the tournament's registration order.
    competitors: Option<Vec<Competitor>>,
}

#[derive(Deserialize)]
struct SubmitResultBody {
    submitter: SubmitterId,
    winner: Competitor,
    #[serde(default)]
    notes: String,
}

#[derive(Deserialize)]
struct ResolveConflictBody {
    adjudicator: SubmitterId,
    winner: Competitor,
}

#[derive(Deserialize)]
struct ConfirmScheduleBody {
    submitter: SubmitterId,
    start_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct CaptainBody {
    competitor: Competitor,
    captain: SubmitterId,
}

#[derive(Deserialize)]
struct RegionBody {
    competitor: Competitor,
    region: String,
}

#[derive(Deserialize)]
struct HostBody {
    region: String,
    host: SubmitterId,
}

#[derive(Deserialize)]
struct IdPath {
    id: Uuid,
}

/// Map engine errors to HTTP status codes with a JSON `{ "error": ... }` body.
fn error_response(e: TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::NotFound(_) => HttpResponse::NotFound().json(body),
        TournamentError::Unauthorized(_) => HttpResponse::Forbidden().json(body),
        TournamentError::DuplicateSubmission(_)
        | TournamentError::AlreadyFinalized
        | TournamentError::PreconditionFailed(_) => HttpResponse::Conflict().json(body),
        TournamentError::InvalidWinner(_) | TournamentError::InvalidImport(_) => {
            HttpResponse::BadRequest().json(body)
        }
        TournamentError::Store(_) => HttpResponse::InternalServerError().json(body),
    }
}

fn respond<T: serde::Serialize>(result: Result<T, TournamentError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-engine",
    })
}

/// Open a tournament for registration.
#[post("/api/tournaments")]
async fn api_open_tournament(state: AppState, body: Json<OpenTournamentBody>) -> HttpResponse {
    respond(
        state
            .engine
            .open_tournament(body.game_id.trim(), body.capacity),
    )
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.engine.tournament(path.id))
}

/// Register one competitor.
#[post("/api/tournaments/{id}/registrations")]
async fn api_register(state: AppState, path: Path<IdPath>, body: Json<RegisterBody>) -> HttpResponse {
    respond(state.engine.register_competitor(path.id, body.competitor))
}

/// Register a `kind,id` CSV roster in file order. Stops at the first rejected row.
#[post("/api/tournaments/{id}/registrations/csv")]
async fn api_register_csv(state: AppState, path: Path<IdPath>, body: String) -> HttpResponse {
    let competitors = match parse_competitors_csv(body.as_bytes()) {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };
    let mut last = state.engine.tournament(path.id);
    for competitor in competitors {
        last = state.engine.register_competitor(path.id, competitor);
        if last.is_err() {
            break;
        }
    }
    respond(last)
}

/// Generate the bracket (once).
#[post("/api/tournaments/{id}/bracket")]
async fn api_generate_bracket(
    state: AppState,
    path: Path<IdPath>,
    body: Option<Json<GenerateBracketBody>>,
) -> HttpResponse {
    let requested = body.and_then(|b| b.into_inner().competitors);
    let competitors = match requested {
        Some(list) => list,
        None => match state.engine.tournament(path.id) {
            Ok(t) => t.entrants,
            Err(e) => return error_response(e),
        },
    };
    respond(state.engine.generate_bracket(path.id, competitors))
}

/// Bracket with all its matches.
#[get("/api/brackets/{id}")]
async fn api_get_bracket(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let bracket = match state.engine.bracket(path.id) {
        Ok(b) => b,
        Err(e) => return error_response(e),
    };
    match state.engine.bracket_matches(path.id) {
        Ok(matches) => HttpResponse::Ok().json(serde_json::json!({
            "bracket": bracket,
            "matches": matches,
        })),
        Err(e) => error_response(e),
    }
}

#[get("/api/matches/{id}")]
async fn api_get_match(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.engine.game_match(path.id))
}

/// Submit a result claim for a match.
#[post("/api/matches/{id}/results")]
async fn api_submit_result(
    state: AppState,
    path: Path<IdPath>,
    body: Json<SubmitResultBody>,
) -> HttpResponse {
    let body = body.into_inner();
    respond(
        state
            .engine
            .submit_result(path.id, body.submitter, body.winner, body.notes),
    )
}

/// Settle a conflicted match (adjudicator authorization happens upstream).
#[post("/api/matches/{id}/resolve")]
async fn api_resolve_conflict(
    state: AppState,
    path: Path<IdPath>,
    body: Json<ResolveConflictBody>,
) -> HttpResponse {
    let body = body.into_inner();
    respond(
        state
            .engine
            .resolve_conflict(path.id, body.adjudicator, body.winner),
    )
}

/// Confirm a start time for a match.
#[post("/api/matches/{id}/schedule")]
async fn api_confirm_schedule(
    state: AppState,
    path: Path<IdPath>,
    body: Json<ConfirmScheduleBody>,
) -> HttpResponse {
    let body = body.into_inner();
    respond(
        state
            .engine
            .confirm_schedule(path.id, body.submitter, body.start_at)
            .map(|scheduled| serde_json::json!({ "scheduled": scheduled })),
    )
}

#[put("/api/rosters/captains")]
async fn api_assign_captain(state: AppState, body: Json<CaptainBody>) -> HttpResponse {
    let body = body.into_inner();
    state.captains.assign(body.competitor, body.captain);
    HttpResponse::NoContent().finish()
}

#[put("/api/rosters/regions")]
async fn api_set_region(state: AppState, body: Json<RegionBody>) -> HttpResponse {
    let body = body.into_inner();
    state.hosts.set_region(body.competitor, body.region);
    HttpResponse::NoContent().finish()
}

#[put("/api/rosters/hosts")]
async fn api_add_host(state: AppState, body: Json<HostBody>) -> HttpResponse {
    let body = body.into_inner();
    state.hosts.add_host(body.region, body.host);
    HttpResponse::NoContent().finish()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);

    let config = EngineConfig::from_env();
    log::info!(
        "Starting server at http://{}:{} ({:?}, {} reporters, {:?} seeding)",
        bind.0,
        bind.1,
        config.reporting_mode,
        config.required_reporters,
        config.seeding
    );

    let captains = Arc::new(CaptainDirectory::new());
    let hosts = Arc::new(RegionalHostDirectory::new());
    let directory: Arc<dyn ReporterDirectory> = match config.reporting_mode {
        ReportingMode::SelfReport => captains.clone(),
        ReportingMode::HostConfirmation => hosts.clone(),
    };
    let state = Data::new(AppContext {
        engine: Engine::new(MemoryStore::new(), directory, config),
        captains,
        hosts,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(1 << 20))
            .service(api_health)
            .service(api_open_tournament)
            .service(api_get_tournament)
            .service(api_register)
            .service(api_register_csv)
            .service(api_generate_bracket)
            .service(api_get_bracket)
            .service(api_get_match)
            .service(api_submit_result)
            .service(api_resolve_conflict)
            .service(api_confirm_schedule)
            .service(api_assign_captain)
            .service(api_set_region)
            .service(api_add_host)
    })
    .bind(bind)?
    .run()
    .await
}
