// Hero Powers API - Core Library
// Models, validation, serialization and handlers for the hero/power service.

pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod serialize;
pub mod validation;

// Re-export commonly used types
pub use db::{
    count_heroes, get_all_heroes, get_all_powers, get_hero, get_hero_powers_for_hero, get_power,
    insert_hero, insert_hero_power, insert_power, setup_database, update_power,
};
pub use error::ApiError;
pub use handlers::{router, AppState};
pub use models::{Hero, HeroPower, Power};
pub use serialize::{HeroDetail, HeroPowerRecord, HeroSummary, PowerSummary};
pub use validation::{
    validate_description, validate_strength, ValidationError, MIN_DESCRIPTION_LEN, VALID_STRENGTHS,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
