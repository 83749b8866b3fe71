// Response shapes for the JSON API.
//
// Serialization is explicit per entity type instead of walking fields
// reflectively. Cycle avoidance falls out of the types: a summary never
// carries its `hero_powers` collection, and a `HeroPowerRecord` nests
// summaries only, so Hero -> HeroPower -> Hero can never recurse.

use crate::db;
use crate::models::{Hero, HeroPower, Power};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

/// Hero without its associations. Used for list views and nesting.
#[derive(Debug, Serialize)]
pub struct HeroSummary {
    pub id: i64,
    pub name: String,
    pub super_name: String,
}

/// Power without its associations. Used for list views, the PATCH
/// response and nesting.
#[derive(Debug, Serialize)]
pub struct PowerSummary {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// A hero/power association with one level of nested summaries.
#[derive(Debug, Serialize)]
pub struct HeroPowerRecord {
    pub id: i64,
    pub hero_id: i64,
    pub power_id: i64,
    pub strength: String,
    pub hero: HeroSummary,
    pub power: PowerSummary,
}

/// Single-hero view: the summary fields plus the hero's associations.
#[derive(Debug, Serialize)]
pub struct HeroDetail {
    pub id: i64,
    pub name: String,
    pub super_name: String,
    pub hero_powers: Vec<HeroPowerRecord>,
}

impl From<Hero> for HeroSummary {
    fn from(hero: Hero) -> Self {
        Self {
            id: hero.id,
            name: hero.name,
            super_name: hero.super_name,
        }
    }
}

impl From<Power> for PowerSummary {
    fn from(power: Power) -> Self {
        Self {
            id: power.id,
            name: power.name,
            description: power.description,
        }
    }
}

/// Expand an association with its hero and power summaries. Both rows are
/// guaranteed to exist by the foreign key constraints; a dangling reference
/// here means the store is corrupt, so it surfaces as an error rather than
/// a hole in the payload.
pub fn hero_power_record(conn: &Connection, hero_power: HeroPower) -> Result<HeroPowerRecord> {
    let hero = db::get_hero(conn, hero_power.hero_id)?
        .with_context(|| format!("hero_power {} references missing hero", hero_power.id))?;
    let power = db::get_power(conn, hero_power.power_id)?
        .with_context(|| format!("hero_power {} references missing power", hero_power.id))?;

    Ok(HeroPowerRecord {
        id: hero_power.id,
        hero_id: hero_power.hero_id,
        power_id: hero_power.power_id,
        strength: hero_power.strength,
        hero: hero.into(),
        power: power.into(),
    })
}

/// Assemble the GET /heroes/:id payload: hero fields plus every
/// association, each expanded one level deep.
pub fn hero_detail(conn: &Connection, hero: Hero) -> Result<HeroDetail> {
    let hero_powers = db::get_hero_powers_for_hero(conn, hero.id)?
        .into_iter()
        .map(|hp| hero_power_record(conn, hp))
        .collect::<Result<Vec<_>>>()?;

    Ok(HeroDetail {
        id: hero.id,
        name: hero.name,
        super_name: hero.super_name,
        hero_powers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{insert_hero, insert_hero_power, insert_power, setup_database};

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        conn
    }

    #[test]
    fn test_summaries_have_no_back_references() {
        let hero = Hero {
            id: 1,
            name: "Kamala Khan".to_string(),
            super_name: "Ms. Marvel".to_string(),
        };

        let value = serde_json::to_value(HeroSummary::from(hero)).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("hero_powers"));
        assert_eq!(obj.len(), 3);
    }

    #[test]
    fn test_hero_detail_nests_one_level() {
        let conn = test_conn();
        let hero = insert_hero(&conn, "Kamala Khan", "Ms. Marvel").unwrap();
        let power = insert_power(
            &conn,
            "elasticity",
            "can stretch the human body to extreme lengths",
        )
        .unwrap();
        insert_hero_power(&conn, hero.id, power.id, "Average").unwrap();

        let detail = hero_detail(&conn, hero.clone()).unwrap();
        assert_eq!(detail.hero_powers.len(), 1);

        let value = serde_json::to_value(&detail).unwrap();
        let nested = &value["hero_powers"][0];
        assert_eq!(nested["strength"], "Average");
        assert_eq!(nested["hero"]["super_name"], "Ms. Marvel");
        assert_eq!(nested["power"]["name"], "elasticity");
        // nested summaries must not carry their own associations back
        assert!(nested["hero"].get("hero_powers").is_none());
        assert!(nested["power"].get("hero_powers").is_none());
    }

    #[test]
    fn test_hero_detail_empty_associations() {
        let conn = test_conn();
        let hero = insert_hero(&conn, "Doreen Green", "Squirrel Girl").unwrap();

        let detail = hero_detail(&conn, hero).unwrap();
        assert!(detail.hero_powers.is_empty());
    }
}
