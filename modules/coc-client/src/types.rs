use serde::{Deserialize, Serialize};

/// A player profile as returned by `/players/{tag}`.
///
/// Everything beyond the tag is optional: the API omits sections freely
/// (no builder base, no league, no heroes on low-level accounts) and new
/// fields appear between API versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub tag: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub town_hall_level: Option<i64>,
    #[serde(default)]
    pub trophies: Option<i64>,
    #[serde(default)]
    pub best_trophies: Option<i64>,
    #[serde(default)]
    pub war_stars: Option<i64>,
    #[serde(default)]
    pub attack_wins: Option<i64>,
    #[serde(default)]
    pub defense_wins: Option<i64>,
    #[serde(default)]
    pub donations: Option<i64>,
    #[serde(default)]
    pub donations_received: Option<i64>,
    #[serde(default)]
    pub clan_capital_contributions: Option<i64>,
    #[serde(default)]
    pub builder_hall_level: Option<i64>,
    #[serde(default)]
    pub builder_base_trophies: Option<i64>,
    #[serde(default)]
    pub versus_battle_wins: Option<i64>,
    #[serde(default)]
    pub league: Option<League>,
    #[serde(default)]
    pub heroes: Vec<Hero>,
    #[serde(default)]
    pub troops: Vec<Troop>,
    #[serde(default)]
    pub hero_equipment: Vec<Equipment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

/// Hero entry from the profile's `heroes` array. `village` distinguishes
/// home-village heroes from builder-base ones (Battle Machine, Battle
/// Copter).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub name: String,
    pub level: i64,
    #[serde(default)]
    pub village: Option<String>,
}

/// Troop entry — the API lists pets here, not in a dedicated section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Troop {
    pub name: String,
    pub level: i64,
    #[serde(default)]
    pub village: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub name: String,
    pub level: i64,
}

/// One member from `/clans/{tag}/members`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanMember {
    pub tag: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub trophies: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanMemberList {
    pub items: Vec<ClanMember>,
}

/// Error body the API returns on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
