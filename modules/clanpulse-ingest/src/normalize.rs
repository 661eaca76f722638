//! Raw profile → canonical snapshot.
//!
//! This is the validation boundary: open-ended API payloads become the
//! closed canonical shape the derivation works on. Unknown hero names,
//! builder-base heroes, and absent sections all degrade to "unknown" here,
//! so nothing downstream has to handle them.

use chrono::NaiveDate;

use clanpulse_common::{CanonicalPlayerState, HeroSlot};
use coc_client::PlayerProfile;

/// Home-village pets as of the current game version. The API lists them in
/// the `troops` array, so they are recognized by name.
const PET_NAMES: [&str; 11] = [
    "L.A.S.S.I",
    "Electro Owl",
    "Mighty Yak",
    "Unicorn",
    "Frosty",
    "Diggy",
    "Poison Lizard",
    "Phoenix",
    "Spirit Fox",
    "Angry Jelly",
    "Sneezy",
];

fn hero_slot(name: &str) -> Option<HeroSlot> {
    match name {
        "Barbarian King" => Some(HeroSlot::BarbarianKing),
        "Archer Queen" => Some(HeroSlot::ArcherQueen),
        "Grand Warden" => Some(HeroSlot::GrandWarden),
        "Royal Champion" => Some(HeroSlot::RoyalChampion),
        "Minion Prince" => Some(HeroSlot::MinionPrince),
        _ => None,
    }
}

/// Normalize a raw API profile into the canonical state for `day`.
/// Total: missing or unrecognized data becomes unknown, never an error.
pub fn normalize_profile(profile: &PlayerProfile, day: NaiveDate) -> CanonicalPlayerState {
    let mut state = CanonicalPlayerState::new(&profile.tag, day);
    state.name = profile.name.clone();
    state.town_hall = profile.town_hall_level;
    state.trophies = profile.trophies;
    state.donations = profile.donations;
    state.donations_received = profile.donations_received;
    state.war_stars = profile.war_stars;
    state.attack_wins = profile.attack_wins;
    state.defense_wins = profile.defense_wins;
    state.capital_contributions = profile.clan_capital_contributions;
    state.builder_hall = profile.builder_hall_level;
    state.builder_wins = profile.versus_battle_wins;
    state.builder_trophies = profile.builder_base_trophies;
    state.league = profile.league.as_ref().map(|l| l.name.clone());
    // The profile endpoint has no per-day legend attack count; that would
    // come from the legend season endpoints. Left unknown.
    state.legend_attacks = None;

    for hero in &profile.heroes {
        // Builder-base heroes (Battle Machine, Battle Copter) carry
        // village = "builderBase" and are not home slots.
        if hero.village.as_deref() == Some("builderBase") {
            continue;
        }
        if let Some(slot) = hero_slot(&hero.name) {
            state.heroes.insert(slot, hero.level);
        }
    }

    for troop in &profile.troops {
        if PET_NAMES.contains(&troop.name.as_str()) {
            state.pets.insert(troop.name.clone(), troop.level);
        }
    }

    for equipment in &profile.hero_equipment {
        state.equipment.insert(equipment.name.clone(), equipment.level);
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use coc_client::{Equipment, Hero, League, Troop};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    fn profile() -> PlayerProfile {
        serde_json::from_str(r##"{"tag":"#ABC123"}"##).unwrap()
    }

    #[test]
    fn flat_fields_carry_over() {
        let mut p = profile();
        p.name = Some("Zap".to_string());
        p.town_hall_level = Some(14);
        p.trophies = Some(3300);
        p.clan_capital_contributions = Some(120_000);
        p.league = Some(League {
            id: Some(29000020),
            name: "Master League I".to_string(),
        });

        let state = normalize_profile(&p, day());
        assert_eq!(state.tag, "#ABC123");
        assert_eq!(state.town_hall, Some(14));
        assert_eq!(state.capital_contributions, Some(120_000));
        assert_eq!(state.league.as_deref(), Some("Master League I"));
        assert!(state.legend_attacks.is_none());
    }

    #[test]
    fn builder_heroes_are_excluded_from_home_slots() {
        let mut p = profile();
        p.heroes = vec![
            Hero {
                name: "Barbarian King".to_string(),
                level: 80,
                village: Some("home".to_string()),
            },
            Hero {
                name: "Battle Machine".to_string(),
                level: 30,
                village: Some("builderBase".to_string()),
            },
        ];

        let state = normalize_profile(&p, day());
        assert_eq!(state.hero_level(HeroSlot::BarbarianKing), Some(80));
        assert_eq!(state.heroes.len(), 1);
    }

    #[test]
    fn unknown_hero_names_are_dropped() {
        let mut p = profile();
        p.heroes = vec![Hero {
            name: "Goblin Overlord".to_string(),
            level: 5,
            village: Some("home".to_string()),
        }];

        let state = normalize_profile(&p, day());
        assert!(state.heroes.is_empty());
    }

    #[test]
    fn pets_are_picked_out_of_troops() {
        let mut p = profile();
        p.troops = vec![
            Troop {
                name: "Barbarian".to_string(),
                level: 12,
                village: Some("home".to_string()),
            },
            Troop {
                name: "Electro Owl".to_string(),
                level: 10,
                village: Some("home".to_string()),
            },
        ];

        let state = normalize_profile(&p, day());
        assert_eq!(state.pets.get("Electro Owl"), Some(&10));
        assert!(!state.pets.contains_key("Barbarian"));
    }

    #[test]
    fn equipment_keyed_by_name() {
        let mut p = profile();
        p.hero_equipment = vec![Equipment {
            name: "Giant Gauntlet".to_string(),
            level: 18,
        }];

        let state = normalize_profile(&p, day());
        assert_eq!(state.equipment.get("Giant Gauntlet"), Some(&18));
    }

    #[test]
    fn empty_profile_normalizes_to_all_unknown() {
        let state = normalize_profile(&profile(), day());
        assert!(state.trophies.is_none());
        assert!(state.heroes.is_empty());
        assert!(state.pets.is_empty());
        assert!(state.equipment.is_empty());
    }
}
