// Entity models: Hero, Power and the HeroPower association.
//
// These mirror the three tables one-to-one. Relationship traversal
// (Hero -> HeroPowers, HeroPower -> Hero/Power) is done with indexed
// reads in the db layer rather than by embedding collections here;
// keeping the structs flat is what makes the serializers in
// `serialize.rs` unable to recurse in the first place.

use serde::{Deserialize, Serialize};

/// A hero row. `id` is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: i64,
    pub name: String,
    pub super_name: String,
}

/// A power row. `description` is constrained by `validation::validate_description`
/// on every write path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Power {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Association row of the Hero <-> Power many-to-many relationship,
/// carrying `strength` on the edge. Both foreign keys are non-nullable
/// and must reference existing rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroPower {
    pub id: i64,
    pub strength: String,
    pub hero_id: i64,
    pub power_id: i64,
}
