// Persistence layer over SQLite.
//
// Every function takes an explicit `&Connection`; nothing is cached across
// calls. Write functions run the validation rules before touching the store,
// so a violation aborts with no partial application.

use crate::models::{Hero, HeroPower, Power};
use crate::validation::{validate_description, validate_strength};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

/// Create the schema if it does not exist yet.
pub fn setup_database(conn: &Connection) -> Result<()> {
    // WAL for crash recovery; foreign keys are off by default in SQLite
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS heroes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            super_name TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS powers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS hero_powers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            strength TEXT NOT NULL,
            hero_id INTEGER NOT NULL REFERENCES heroes(id),
            power_id INTEGER NOT NULL REFERENCES powers(id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_hero_powers_hero ON hero_powers(hero_id)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_hero_powers_power ON hero_powers(power_id)",
        [],
    )?;

    Ok(())
}

// ============================================================================
// Heroes
// ============================================================================

pub fn insert_hero(conn: &Connection, name: &str, super_name: &str) -> Result<Hero> {
    conn.execute(
        "INSERT INTO heroes (name, super_name) VALUES (?1, ?2)",
        params![name, super_name],
    )
    .context("Failed to insert hero")?;

    Ok(Hero {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        super_name: super_name.to_string(),
    })
}

/// All heroes, ordered by primary key so list responses are deterministic.
pub fn get_all_heroes(conn: &Connection) -> Result<Vec<Hero>> {
    let mut stmt = conn.prepare("SELECT id, name, super_name FROM heroes ORDER BY id")?;

    let heroes = stmt
        .query_map([], |row| {
            Ok(Hero {
                id: row.get(0)?,
                name: row.get(1)?,
                super_name: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(heroes)
}

pub fn get_hero(conn: &Connection, id: i64) -> Result<Option<Hero>> {
    conn.query_row(
        "SELECT id, name, super_name FROM heroes WHERE id = ?1",
        params![id],
        |row| {
            Ok(Hero {
                id: row.get(0)?,
                name: row.get(1)?,
                super_name: row.get(2)?,
            })
        },
    )
    .optional()
    .context("Failed to query hero")
}

// ============================================================================
// Powers
// ============================================================================

pub fn insert_power(conn: &Connection, name: &str, description: &str) -> Result<Power> {
    validate_description(description)?;

    conn.execute(
        "INSERT INTO powers (name, description) VALUES (?1, ?2)",
        params![name, description],
    )
    .context("Failed to insert power")?;

    Ok(Power {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        description: description.to_string(),
    })
}

pub fn get_all_powers(conn: &Connection) -> Result<Vec<Power>> {
    let mut stmt = conn.prepare("SELECT id, name, description FROM powers ORDER BY id")?;

    let powers = stmt
        .query_map([], |row| {
            Ok(Power {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(powers)
}

pub fn get_power(conn: &Connection, id: i64) -> Result<Option<Power>> {
    conn.query_row(
        "SELECT id, name, description FROM powers WHERE id = ?1",
        params![id],
        |row| {
            Ok(Power {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
            })
        },
    )
    .optional()
    .context("Failed to query power")
}

/// Partial update of a power. Only `name` and `description` are updatable;
/// a `None` field is left untouched. The description rule runs before any
/// write, so an invalid value leaves the row exactly as it was.
pub fn update_power(
    conn: &Connection,
    id: i64,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<Option<Power>> {
    let Some(mut power) = get_power(conn, id)? else {
        return Ok(None);
    };

    if let Some(description) = description {
        validate_description(description)?;
        power.description = description.to_string();
    }
    if let Some(name) = name {
        power.name = name.to_string();
    }

    conn.execute(
        "UPDATE powers SET name = ?1, description = ?2 WHERE id = ?3",
        params![power.name, power.description, power.id],
    )
    .context("Failed to update power")?;

    Ok(Some(power))
}

// ============================================================================
// Hero powers
// ============================================================================

/// Create a hero/power association. Strength is validated here; existence of
/// both referenced rows is checked by the caller (and backstopped by the
/// foreign key constraints).
pub fn insert_hero_power(
    conn: &Connection,
    hero_id: i64,
    power_id: i64,
    strength: &str,
) -> Result<HeroPower> {
    validate_strength(strength)?;

    conn.execute(
        "INSERT INTO hero_powers (strength, hero_id, power_id) VALUES (?1, ?2, ?3)",
        params![strength, hero_id, power_id],
    )
    .context("Failed to insert hero power")?;

    Ok(HeroPower {
        id: conn.last_insert_rowid(),
        strength: strength.to_string(),
        hero_id,
        power_id,
    })
}

/// Associations for one hero, ordered by primary key.
pub fn get_hero_powers_for_hero(conn: &Connection, hero_id: i64) -> Result<Vec<HeroPower>> {
    let mut stmt = conn.prepare(
        "SELECT id, strength, hero_id, power_id
         FROM hero_powers
         WHERE hero_id = ?1
         ORDER BY id",
    )?;

    let hero_powers = stmt
        .query_map(params![hero_id], |row| {
            Ok(HeroPower {
                id: row.get(0)?,
                strength: row.get(1)?,
                hero_id: row.get(2)?,
                power_id: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(hero_powers)
}

pub fn count_heroes(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM heroes", [], |row| row.get(0))?;
    Ok(count)
}
