use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// --- Hero slots ---

/// The five home-village hero slots. A closed set: the ingestion boundary
/// maps API unit names onto these; anything else is not a home hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeroSlot {
    #[serde(rename = "bk")]
    BarbarianKing,
    #[serde(rename = "aq")]
    ArcherQueen,
    #[serde(rename = "gw")]
    GrandWarden,
    #[serde(rename = "rc")]
    RoyalChampion,
    #[serde(rename = "mp")]
    MinionPrince,
}

impl HeroSlot {
    pub const ALL: [HeroSlot; 5] = [
        HeroSlot::BarbarianKing,
        HeroSlot::ArcherQueen,
        HeroSlot::GrandWarden,
        HeroSlot::RoyalChampion,
        HeroSlot::MinionPrince,
    ];

    /// Short key used in delta maps (`hero_bk`, `hero_aq`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            HeroSlot::BarbarianKing => "bk",
            HeroSlot::ArcherQueen => "aq",
            HeroSlot::GrandWarden => "gw",
            HeroSlot::RoyalChampion => "rc",
            HeroSlot::MinionPrince => "mp",
        }
    }
}

impl std::fmt::Display for HeroSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeroSlot::BarbarianKing => write!(f, "Barbarian King"),
            HeroSlot::ArcherQueen => write!(f, "Archer Queen"),
            HeroSlot::GrandWarden => write!(f, "Grand Warden"),
            HeroSlot::RoyalChampion => write!(f, "Royal Champion"),
            HeroSlot::MinionPrince => write!(f, "Minion Prince"),
        }
    }
}

// --- Canonical player state ---

/// A player's metrics as observed on one day. Immutable snapshot, produced
/// by the ingestion boundary from a raw API profile.
///
/// Every numeric field is optional: the API omits fields freely and an
/// absent field on one day is common and expected, not exceptional. Absent
/// means "unknown" — the derivation skips it, it never errors.
///
/// Level maps are `BTreeMap` so any serialization of this record is
/// key-ordered, which the snapshot-hash contract depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalPlayerState {
    pub tag: String,
    pub day: NaiveDate,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub town_hall: Option<i64>,
    #[serde(default)]
    pub trophies: Option<i64>,
    #[serde(default)]
    pub donations: Option<i64>,
    #[serde(default)]
    pub donations_received: Option<i64>,
    #[serde(default)]
    pub war_stars: Option<i64>,
    #[serde(default)]
    pub attack_wins: Option<i64>,
    #[serde(default)]
    pub defense_wins: Option<i64>,
    /// Lifetime clan capital contribution counter (cumulative).
    #[serde(default)]
    pub capital_contributions: Option<i64>,
    /// Legend league attacks used on this day, when known.
    #[serde(default)]
    pub legend_attacks: Option<i64>,
    #[serde(default)]
    pub builder_hall: Option<i64>,
    #[serde(default)]
    pub builder_wins: Option<i64>,
    #[serde(default)]
    pub builder_trophies: Option<i64>,
    /// League label as reported by the API (e.g. "Crystal League I").
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub heroes: BTreeMap<HeroSlot, i64>,
    #[serde(default)]
    pub pets: BTreeMap<String, i64>,
    #[serde(default)]
    pub equipment: BTreeMap<String, i64>,
}

impl CanonicalPlayerState {
    /// An empty (all-unknown) state for a player on a day.
    pub fn new(tag: impl Into<String>, day: NaiveDate) -> Self {
        Self {
            tag: tag.into(),
            day,
            name: None,
            town_hall: None,
            trophies: None,
            donations: None,
            donations_received: None,
            war_stars: None,
            attack_wins: None,
            defense_wins: None,
            capital_contributions: None,
            legend_attacks: None,
            builder_hall: None,
            builder_wins: None,
            builder_trophies: None,
            league: None,
            heroes: BTreeMap::new(),
            pets: BTreeMap::new(),
            equipment: BTreeMap::new(),
        }
    }

    pub fn hero_level(&self, slot: HeroSlot) -> Option<i64> {
        self.heroes.get(&slot).copied()
    }
}
