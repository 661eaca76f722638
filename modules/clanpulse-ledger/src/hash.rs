//! Snapshot content hashing for change detection.
//!
//! The ingestor compares the hash of today's normalized state against the
//! previously stored one to decide whether anything meaningful changed. The
//! binding contract is a stable serialization: identical logical states must
//! hash identically regardless of where the data came from, so the hashed
//! view is a fixed-shape struct (field order fixed by declaration) whose
//! maps are `BTreeMap` (key order fixed by Ord).

use std::collections::BTreeMap;

use serde::Serialize;
use sha2::{Digest, Sha256};

use clanpulse_common::{CanonicalPlayerState, HeroSlot};

/// The core fields of a snapshot — what "the player's state" means for
/// change detection. Excludes the observation day and cosmetic fields
/// (`name`), and never includes deltas or events.
#[derive(Serialize)]
struct CoreFields<'a> {
    tag: &'a str,
    town_hall: Option<i64>,
    trophies: Option<i64>,
    donations: Option<i64>,
    donations_received: Option<i64>,
    war_stars: Option<i64>,
    attack_wins: Option<i64>,
    defense_wins: Option<i64>,
    capital_contributions: Option<i64>,
    legend_attacks: Option<i64>,
    builder_hall: Option<i64>,
    builder_wins: Option<i64>,
    builder_trophies: Option<i64>,
    league: Option<&'a str>,
    heroes: &'a BTreeMap<HeroSlot, i64>,
    pets: &'a BTreeMap<String, i64>,
    equipment: &'a BTreeMap<String, i64>,
}

/// Hex sha256 of the canonical serialization of a snapshot's core fields.
pub fn snapshot_hash(state: &CanonicalPlayerState) -> String {
    let core = CoreFields {
        tag: &state.tag,
        town_hall: state.town_hall,
        trophies: state.trophies,
        donations: state.donations,
        donations_received: state.donations_received,
        war_stars: state.war_stars,
        attack_wins: state.attack_wins,
        defense_wins: state.defense_wins,
        capital_contributions: state.capital_contributions,
        legend_attacks: state.legend_attacks,
        builder_hall: state.builder_hall,
        builder_wins: state.builder_wins,
        builder_trophies: state.builder_trophies,
        league: state.league.as_deref(),
        heroes: &state.heroes,
        pets: &state.pets,
        equipment: &state.equipment,
    };
    // Serializing a plain struct of scalars and BTreeMaps cannot fail.
    let bytes = serde_json::to_vec(&core).expect("core fields serialize");
    hex::encode(Sha256::digest(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    #[test]
    fn identical_core_fields_hash_identically() {
        let mut a = CanonicalPlayerState::new("#ABC123", day());
        a.trophies = Some(3200);
        a.heroes.insert(HeroSlot::ArcherQueen, 75);
        let mut b = a.clone();
        // Non-core differences: observation day and display name.
        b.day = day().succ_opt().unwrap();
        b.name = Some("Zap".to_string());
        assert_eq!(snapshot_hash(&a), snapshot_hash(&b));
    }

    #[test]
    fn core_field_change_changes_hash() {
        let mut a = CanonicalPlayerState::new("#ABC123", day());
        a.trophies = Some(3200);
        let mut b = a.clone();
        b.trophies = Some(3201);
        assert_ne!(snapshot_hash(&a), snapshot_hash(&b));
    }

    #[test]
    fn map_insertion_order_is_irrelevant() {
        let mut a = CanonicalPlayerState::new("#ABC123", day());
        a.pets.insert("Electro Owl".to_string(), 10);
        a.pets.insert("L.A.S.S.I".to_string(), 15);
        let mut b = CanonicalPlayerState::new("#ABC123", day());
        b.pets.insert("L.A.S.S.I".to_string(), 15);
        b.pets.insert("Electro Owl".to_string(), 10);
        assert_eq!(snapshot_hash(&a), snapshot_hash(&b));
    }

    #[test]
    fn unknown_vs_known_field_differ() {
        let a = CanonicalPlayerState::new("#ABC123", day());
        let mut b = a.clone();
        b.war_stars = Some(0);
        assert_ne!(snapshot_hash(&a), snapshot_hash(&b));
    }
}
