//! Timeline and period-summary builders — pure functions over stored ledger
//! rows, shared by the feed surface and reporting jobs.
//!
//! Rows are expected in chronological order (the store's range read returns
//! them that way). Notability drives which days surface: a day with events
//! across several categories outranks a day of repeated same-category noise.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use clanpulse_common::HeroSlot;

use crate::events::DayEvent;
use crate::player_day::PlayerDayRow;

/// One surfaced day in a player's activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub day: NaiveDate,
    pub notability: u32,
    pub events: Vec<DayEvent>,
    /// Human-readable one-liners, one per rendered event.
    pub headlines: Vec<String>,
}

/// Build a feed from ledger rows, keeping days at or above `min_notability`.
pub fn build_timeline(rows: &[PlayerDayRow], min_notability: u32) -> Vec<TimelineEntry> {
    rows.iter()
        .filter(|row| row.notability >= min_notability && !row.events.is_empty())
        .map(|row| TimelineEntry {
            day: row.day,
            notability: row.notability,
            events: row.events.iter().copied().collect(),
            headlines: describe_events(row),
        })
        .collect()
}

/// Render each fired event as a one-liner, using the row's deltas and state
/// for the concrete numbers.
pub fn describe_events(row: &PlayerDayRow) -> Vec<String> {
    let mut lines = Vec::new();
    for event in &row.events {
        match event {
            DayEvent::TrophiesBigDelta => {
                if let Some(d) = row.deltas.get("trophies") {
                    lines.push(format!("{d:+} trophies"));
                }
            }
            DayEvent::ThLevelUp => {
                if let Some(th) = row.state.town_hall {
                    lines.push(format!("Town Hall {th}"));
                }
            }
            DayEvent::LeagueChange => {
                // Promotion/demotion render the label themselves.
                if !row.events.contains(&DayEvent::LeaguePromotion)
                    && !row.events.contains(&DayEvent::LeagueDemotion)
                {
                    if let Some(league) = &row.state.league {
                        lines.push(format!("now in {league}"));
                    }
                }
            }
            DayEvent::LeaguePromotion => {
                if let Some(league) = &row.state.league {
                    lines.push(format!("promoted to {league}"));
                }
            }
            DayEvent::LeagueDemotion => {
                if let Some(league) = &row.state.league {
                    lines.push(format!("demoted to {league}"));
                }
            }
            DayEvent::LegendReentry => lines.push("back in Legend League".to_string()),
            DayEvent::HeroLevelUp => {
                for slot in HeroSlot::ALL {
                    if let Some(d) = row.deltas.get(&format!("hero_{}", slot.key())) {
                        lines.push(format!("{slot} {d:+}"));
                    }
                }
            }
            DayEvent::PetLevelUp => lines.push("pet leveled up".to_string()),
            DayEvent::EquipmentUpgrade => lines.push("equipment upgraded".to_string()),
            DayEvent::DonationsThreshold => {
                if let Some(d) = row.state.donations {
                    lines.push(format!("{d} troops donated"));
                }
            }
            DayEvent::WarPerfDay => {
                if let Some(stars) = row.state.war_stars {
                    lines.push(format!("{stars} war stars"));
                }
            }
            DayEvent::CapitalActivity => lines.push("contributed to the clan capital".to_string()),
            DayEvent::LegendActivity => {
                if let Some(attacks) = row.state.legend_attacks {
                    lines.push(format!("{attacks} legend attacks"));
                }
            }
            DayEvent::WarActivity => lines.push("fought in war".to_string()),
            DayEvent::BuilderActivity => lines.push("active in the builder base".to_string()),
        }
    }
    lines
}

/// Net movement over a span of ledger rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub days: usize,
    /// Days with at least one fired event.
    pub active_days: usize,
    /// Summed per-day deltas, keyed like `PlayerDayRow::deltas`.
    pub net: BTreeMap<String, i64>,
    pub most_notable_day: Option<NaiveDate>,
    /// Days per event category, keyed by category name.
    pub category_days: BTreeMap<String, u32>,
}

/// Aggregate a chronological span of rows into one summary.
pub fn summarize_period(rows: &[PlayerDayRow]) -> PeriodSummary {
    let mut summary = PeriodSummary {
        days: rows.len(),
        ..Default::default()
    };

    let mut best: Option<(u32, NaiveDate)> = None;
    for row in rows {
        if !row.events.is_empty() {
            summary.active_days += 1;
        }
        for (key, delta) in &row.deltas {
            *summary.net.entry(key.clone()).or_insert(0) += delta;
        }
        let categories: std::collections::BTreeSet<_> =
            row.events.iter().map(|e| e.category()).collect();
        for category in categories {
            *summary
                .category_days
                .entry(category.as_str().to_string())
                .or_insert(0) += 1;
        }
        // Ties keep the earlier day.
        if best.map(|(n, _)| row.notability > n).unwrap_or(row.notability > 0) {
            best = Some((row.notability, row.day));
        }
    }
    summary.most_notable_day = best.map(|(_, day)| day);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player_day::derive_player_day;
    use clanpulse_common::CanonicalPlayerState;

    fn state(day: NaiveDate) -> CanonicalPlayerState {
        CanonicalPlayerState::new("#ABC123", day)
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
    }

    /// Three-day fixture: quiet day, trophy push day, hero + league day.
    fn rows() -> Vec<PlayerDayRow> {
        let mut day1 = state(d(1));
        day1.trophies = Some(3000);
        day1.league = Some("Master League III".to_string());
        day1.heroes.insert(HeroSlot::ArcherQueen, 80);

        let mut day2 = day1.clone();
        day2.day = d(2);
        day2.trophies = Some(3150);

        let mut day3 = day2.clone();
        day3.day = d(3);
        day3.trophies = Some(3210);
        day3.league = Some("Master League II".to_string());
        day3.heroes.insert(HeroSlot::ArcherQueen, 81);

        vec![
            derive_player_day(None, &day1),
            derive_player_day(Some(&day1), &day2),
            derive_player_day(Some(&day2), &day3),
        ]
    }

    #[test]
    fn timeline_honors_min_notability() {
        let rows = rows();
        let all = build_timeline(&rows, 1);
        assert_eq!(all.len(), 2, "quiet first day is excluded");
        let busy = build_timeline(&rows, 2);
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].day, d(3));
    }

    #[test]
    fn promotion_headline_renders_label() {
        let rows = rows();
        let entries = build_timeline(&rows, 2);
        assert!(entries[0]
            .headlines
            .iter()
            .any(|h| h == "promoted to Master League II"));
        assert!(entries[0].headlines.iter().any(|h| h == "Archer Queen +1"));
        // Plain league_change line is suppressed when promotion renders.
        assert!(!entries[0].headlines.iter().any(|h| h.starts_with("now in")));
    }

    #[test]
    fn trophy_headline_carries_sign() {
        let rows = rows();
        let entries = build_timeline(&rows, 1);
        assert!(entries[0].headlines.iter().any(|h| h == "+150 trophies"));
    }

    #[test]
    fn summary_nets_out_daily_deltas() {
        let summary = summarize_period(&rows());
        assert_eq!(summary.days, 3);
        assert_eq!(summary.active_days, 2);
        assert_eq!(summary.net.get("trophies"), Some(&210));
        assert_eq!(summary.net.get("hero_aq"), Some(&1));
    }

    #[test]
    fn summary_picks_most_notable_day() {
        let summary = summarize_period(&rows());
        assert_eq!(summary.most_notable_day, Some(d(3)));
    }

    #[test]
    fn summary_counts_category_days_not_events() {
        let summary = summarize_period(&rows());
        assert_eq!(summary.category_days.get("trophies"), Some(&1));
        assert_eq!(summary.category_days.get("league"), Some(&1));
        assert_eq!(summary.category_days.get("progression"), Some(&1));
    }

    #[test]
    fn empty_span_summarizes_to_defaults() {
        let summary = summarize_period(&[]);
        assert_eq!(summary.days, 0);
        assert_eq!(summary.active_days, 0);
        assert!(summary.net.is_empty());
        assert!(summary.most_notable_day.is_none());
    }
}
