// Request handlers and route wiring.
//
// Each handler is stateless: lock the connection, look up, validate,
// mutate, serialize. Nothing survives between requests except the
// connection itself.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::Value;
use std::sync::{Arc, Mutex};

use crate::db;
use crate::error::ApiError;
use crate::serialize::{self, HeroSummary, PowerSummary};
use crate::validation::{validate_description, validate_strength};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }
}

/// PATCH /powers/:id body. Updatable fields are whitelisted here; anything
/// else in the request body is ignored. `description` stays a raw JSON
/// value so a non-string is reported as a validation failure instead of a
/// deserialization error, and an explicit `null` stays distinguishable
/// from a missing key (null must fail validation, missing is a no-op).
#[derive(Debug, Deserialize)]
pub struct UpdatePowerRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Value>,
}

/// Wraps any present value (including `null`) in `Some`; only an absent
/// key falls through to the `default` of `None`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// POST /hero_powers body. All fields optional so that missing ones fall
/// through to the same 400/404 responses as invalid ones.
#[derive(Debug, Deserialize)]
pub struct CreateHeroPowerRequest {
    pub strength: Option<String>,
    pub hero_id: Option<i64>,
    pub power_id: Option<i64>,
}

/// GET /heroes - all heroes, without their associations
pub async fn list_heroes(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let conn = state.db.lock().unwrap();

    let heroes: Vec<HeroSummary> = db::get_all_heroes(&conn)?
        .into_iter()
        .map(|hero| hero.into())
        .collect();

    Ok(Json(heroes))
}

/// GET /heroes/:id - one hero with its hero_powers expanded
pub async fn get_hero(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = state.db.lock().unwrap();

    let hero = db::get_hero(&conn, id)?.ok_or(ApiError::NotFound("Hero"))?;
    let detail = serialize::hero_detail(&conn, hero)?;

    Ok(Json(detail))
}

/// GET /powers - all powers, without their associations
pub async fn list_powers(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let conn = state.db.lock().unwrap();

    let powers: Vec<PowerSummary> = db::get_all_powers(&conn)?
        .into_iter()
        .map(|power| power.into())
        .collect();

    Ok(Json(powers))
}

/// GET /powers/:id - one power
pub async fn get_power(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = state.db.lock().unwrap();

    let power = db::get_power(&conn, id)?.ok_or(ApiError::NotFound("Power"))?;

    Ok(Json(PowerSummary::from(power)))
}

/// PATCH /powers/:id - partial update of name/description
///
/// The description rule is checked here as well as in the db layer: the
/// handler-level check turns the common failure into a clean 400 before
/// anything touches the store.
pub async fn update_power(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdatePowerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = state.db.lock().unwrap();

    if db::get_power(&conn, id)?.is_none() {
        return Err(ApiError::NotFound("Power"));
    }

    let description = match &body.description {
        Some(value) => {
            let text = value.as_str().ok_or(ApiError::Validation)?;
            validate_description(text).map_err(|_| ApiError::Validation)?;
            Some(text)
        }
        None => None,
    };

    let power = db::update_power(&conn, id, body.name.as_deref(), description)?
        .ok_or(ApiError::NotFound("Power"))?;

    Ok(Json(PowerSummary::from(power)))
}

/// POST /hero_powers - associate a hero with a power
pub async fn create_hero_power(
    State(state): State<AppState>,
    Json(body): Json<CreateHeroPowerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = state.db.lock().unwrap();

    let strength = body.strength.as_deref().ok_or(ApiError::InvalidStrength)?;
    validate_strength(strength).map_err(|_| ApiError::InvalidStrength)?;

    let (Some(hero_id), Some(power_id)) = (body.hero_id, body.power_id) else {
        return Err(ApiError::NotFound("Hero or Power"));
    };

    let hero = db::get_hero(&conn, hero_id)?;
    let power = db::get_power(&conn, power_id)?;
    if hero.is_none() || power.is_none() {
        return Err(ApiError::NotFound("Hero or Power"));
    }

    let hero_power = db::insert_hero_power(&conn, hero_id, power_id, strength)?;
    let record = serialize::hero_power_record(&conn, hero_power)?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/heroes", get(list_heroes))
        .route("/heroes/:id", get(get_hero))
        .route("/powers", get(list_powers))
        .route("/powers/:id", get(get_power).patch(update_power))
        .route("/hero_powers", post(create_hero_power))
        .with_state(state)
}
