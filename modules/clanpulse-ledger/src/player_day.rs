//! Player-day derivation: pure reduction of two adjacent snapshots into one
//! ledger row.
//!
//! `derive_player_day` is total over its input domain — unknown fields are
//! skipped, never errors — and has no I/O, so the ingestor can fan it out
//! across players freely. The caller owns chronological ordering: `prev`
//! must be the same player's immediately preceding observation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use clanpulse_common::{compare_ranked_leagues, is_top_league, CanonicalPlayerState, HeroSlot};

use crate::events::{notability, DayEvent};
use crate::hash::snapshot_hash;

/// A trophy swing of this magnitude in one day is a notable day on its own.
pub const TROPHY_SWING: i64 = 100;

/// Daily donations at or above this mark an active donor day.
pub const DONATIONS_ACTIVE: i64 = 50;

/// War stars at or above this mark a strong war day.
pub const WAR_PERF_STARS: i64 = 4;

/// Builder-base wins gained in one day that count as a win streak.
pub const BUILDER_WIN_STREAK: i64 = 3;

/// Builder trophy swing magnitude that counts as builder activity.
pub const BUILDER_TROPHY_SWING: i64 = 30;

/// One derived ledger row per (player, day). Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDayRow {
    pub tag: String,
    pub day: NaiveDate,
    pub state: CanonicalPlayerState,
    /// Signed per-field movement since the previous observation. Only fields
    /// known on both days with a non-zero difference appear.
    pub deltas: BTreeMap<String, i64>,
    /// Deduplicated set of fired activity flags.
    pub events: BTreeSet<DayEvent>,
    /// Count of distinct event categories fired.
    pub notability: u32,
    /// Content hash of the core current-state fields, for change detection.
    pub snapshot_hash: String,
}

/// The fixed list of tracked numeric fields, in delta-key order.
fn tracked(state: &CanonicalPlayerState) -> [(&'static str, Option<i64>); 11] {
    [
        ("trophies", state.trophies),
        ("donations", state.donations),
        ("donations_received", state.donations_received),
        ("war_stars", state.war_stars),
        ("attack_wins", state.attack_wins),
        ("defense_wins", state.defense_wins),
        ("capital_contributions", state.capital_contributions),
        ("legend_attacks", state.legend_attacks),
        ("builder_hall", state.builder_hall),
        ("builder_wins", state.builder_wins),
        ("builder_trophies", state.builder_trophies),
    ]
}

fn positive(deltas: &BTreeMap<String, i64>, key: &str) -> bool {
    deltas.get(key).is_some_and(|d| *d > 0)
}

/// Derive one ledger row from the previous day's state (if any) and the
/// current day's state.
///
/// With `prev = None` (first-ever observation) no deltas exist and only
/// events evaluated against the current state alone can fire.
pub fn derive_player_day(
    prev: Option<&CanonicalPlayerState>,
    curr: &CanonicalPlayerState,
) -> PlayerDayRow {
    let mut deltas: BTreeMap<String, i64> = BTreeMap::new();
    let mut events: BTreeSet<DayEvent> = BTreeSet::new();

    if let Some(prev) = prev {
        for ((key, curr_val), (_, prev_val)) in tracked(curr).into_iter().zip(tracked(prev)) {
            if let (Some(c), Some(p)) = (curr_val, prev_val) {
                let delta = c - p;
                if delta != 0 {
                    deltas.insert(key.to_string(), delta);
                }
            }
        }

        if deltas.get("trophies").is_some_and(|d| d.abs() >= TROPHY_SWING) {
            events.insert(DayEvent::TrophiesBigDelta);
        }

        if let (Some(c), Some(p)) = (curr.town_hall, prev.town_hall) {
            if c > p {
                deltas.insert("th_level".to_string(), c - p);
                events.insert(DayEvent::ThLevelUp);
            }
        }

        if curr.league != prev.league {
            events.insert(DayEvent::LeagueChange);
            match compare_ranked_leagues(curr.league.as_deref(), prev.league.as_deref()) {
                Some(rank_delta) if rank_delta > 0 => {
                    events.insert(DayEvent::LeaguePromotion);
                }
                Some(rank_delta) if rank_delta < 0 => {
                    events.insert(DayEvent::LeagueDemotion);
                }
                _ => {}
            }
            let now_top = curr.league.as_deref().is_some_and(is_top_league);
            let was_top = prev.league.as_deref().is_some_and(is_top_league);
            if now_top && !was_top {
                events.insert(DayEvent::LegendReentry);
            }
        }

        for slot in HeroSlot::ALL {
            if let (Some(c), Some(p)) = (curr.hero_level(slot), prev.hero_level(slot)) {
                if c > p {
                    deltas.insert(format!("hero_{}", slot.key()), c - p);
                    events.insert(DayEvent::HeroLevelUp);
                }
            }
        }

        // Structural change, not delta-based: the maps carry sparse levels
        // keyed by unit name, so any inequality counts.
        if curr.pets != prev.pets {
            events.insert(DayEvent::PetLevelUp);
        }
        if curr.equipment != prev.equipment {
            events.insert(DayEvent::EquipmentUpgrade);
        }

        if positive(&deltas, "war_stars")
            || positive(&deltas, "attack_wins")
            || positive(&deltas, "defense_wins")
        {
            events.insert(DayEvent::WarActivity);
        }

        let builder_hall_up =
            matches!((curr.builder_hall, prev.builder_hall), (Some(c), Some(p)) if c > p);
        let builder_win_streak = deltas
            .get("builder_wins")
            .is_some_and(|d| *d >= BUILDER_WIN_STREAK);
        let builder_trophy_swing = deltas
            .get("builder_trophies")
            .is_some_and(|d| d.abs() >= BUILDER_TROPHY_SWING);
        if builder_hall_up || builder_win_streak || builder_trophy_swing {
            events.insert(DayEvent::BuilderActivity);
        }
    }

    // Absolute-value events — evaluated against the current state alone,
    // so they can fire on a first observation too.
    if curr.donations.is_some_and(|d| d >= DONATIONS_ACTIVE) {
        events.insert(DayEvent::DonationsThreshold);
    }
    if curr.war_stars.is_some_and(|s| s >= WAR_PERF_STARS) {
        events.insert(DayEvent::WarPerfDay);
    }
    if curr.capital_contributions.is_some_and(|c| c > 0) {
        events.insert(DayEvent::CapitalActivity);
    }
    if curr.legend_attacks.is_some_and(|a| a > 0) {
        events.insert(DayEvent::LegendActivity);
    }

    let notability = notability(&events);
    let snapshot_hash = snapshot_hash(curr);

    PlayerDayRow {
        tag: curr.tag.clone(),
        day: curr.day,
        state: curr.clone(),
        deltas,
        events,
        notability,
        snapshot_hash,
    }
}
