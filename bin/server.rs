// Hero Powers API - server entry point.
//
// Bootstrap only: open the database, make sure the schema exists, seed a
// few rows on an empty store, and serve the router. All behavior lives in
// the library.

use anyhow::{Context, Result};
use hero_powers_api::{db, handlers, AppState};
use rusqlite::Connection;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let db_path = std::env::var("DB_PATH").unwrap_or_else(|_| "heroes.db".to_string());
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Failed to open database at {db_path}"))?;
    db::setup_database(&conn)?;
    tracing::info!(%db_path, "database ready");

    if db::count_heroes(&conn)? == 0 {
        seed(&conn)?;
        tracing::info!("seeded demo data into empty database");
    }

    let state = AppState::new(conn);
    let app = handlers::router(state).layer(CorsLayer::permissive());

    let port = std::env::var("PORT").unwrap_or_else(|_| "5555".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Demo rows so a fresh database has something to serve. Everything goes
/// through the validated write path.
fn seed(conn: &Connection) -> Result<()> {
    let kamala = db::insert_hero(conn, "Kamala Khan", "Ms. Marvel")?;
    let doreen = db::insert_hero(conn, "Doreen Green", "Squirrel Girl")?;
    db::insert_hero(conn, "Gwen Stacy", "Spider-Gwen")?;

    let strength = db::insert_power(
        conn,
        "super strength",
        "gives the wielder super-human strengths",
    )?;
    let flight = db::insert_power(
        conn,
        "flight",
        "gives the wielder the ability to fly through the skies at supersonic speed",
    )?;
    db::insert_power(
        conn,
        "super human senses",
        "allows the wielder to use her senses at a super-human level",
    )?;
    db::insert_power(
        conn,
        "elasticity",
        "can stretch the human body to extreme lengths",
    )?;

    db::insert_hero_power(conn, kamala.id, strength.id, "Strong")?;
    db::insert_hero_power(conn, doreen.id, flight.id, "Average")?;

    Ok(())
}
