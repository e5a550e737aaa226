use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Preference {
    pub id: i32,
    pub user_id: i32,
    pub api_code: String,
    pub enabled: bool,
}

/// A dashboard sector gated by a preference flag.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ApiSector {
    pub code: &'static str,
    pub title: &'static str,
}

/// Sectors provisioned for every new account, enabled by default.
pub const DEFAULT_SECTORS: &[ApiSector] = &[
    ApiSector { code: "apod", title: "Astronomy Picture of the Day" },
    ApiSector { code: "mars", title: "Mars Weather" },
    ApiSector { code: "neo", title: "Near Earth Objects" },
    ApiSector { code: "donki", title: "DONKI Coronal Mass Ejections" },
    ApiSector { code: "images", title: "NASA Image Library" },
];

pub fn default_codes() -> Vec<String> {
    DEFAULT_SECTORS.iter().map(|s| s.code.to_string()).collect()
}
