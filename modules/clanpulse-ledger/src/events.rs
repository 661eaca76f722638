use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A discrete activity flag fired for one (player, day) pair when a delta or
/// absolute value crosses its threshold or a categorical field changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayEvent {
    TrophiesBigDelta,
    ThLevelUp,
    LeagueChange,
    LeaguePromotion,
    LeagueDemotion,
    LegendReentry,
    HeroLevelUp,
    PetLevelUp,
    EquipmentUpgrade,
    DonationsThreshold,
    WarPerfDay,
    CapitalActivity,
    LegendActivity,
    WarActivity,
    BuilderActivity,
}

impl DayEvent {
    pub fn tag(&self) -> &'static str {
        match self {
            DayEvent::TrophiesBigDelta => "trophies_big_delta",
            DayEvent::ThLevelUp => "th_level_up",
            DayEvent::LeagueChange => "league_change",
            DayEvent::LeaguePromotion => "league_promotion",
            DayEvent::LeagueDemotion => "league_demotion",
            DayEvent::LegendReentry => "legend_reentry",
            DayEvent::HeroLevelUp => "hero_level_up",
            DayEvent::PetLevelUp => "pet_level_up",
            DayEvent::EquipmentUpgrade => "equipment_upgrade",
            DayEvent::DonationsThreshold => "donations_threshold",
            DayEvent::WarPerfDay => "war_perf_day",
            DayEvent::CapitalActivity => "capital_activity",
            DayEvent::LegendActivity => "legend_activity",
            DayEvent::WarActivity => "war_activity",
            DayEvent::BuilderActivity => "builder_activity",
        }
    }

    /// Inverse of `tag()`. Unknown tags (from a newer writer) are `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "trophies_big_delta" => Some(DayEvent::TrophiesBigDelta),
            "th_level_up" => Some(DayEvent::ThLevelUp),
            "league_change" => Some(DayEvent::LeagueChange),
            "league_promotion" => Some(DayEvent::LeaguePromotion),
            "league_demotion" => Some(DayEvent::LeagueDemotion),
            "legend_reentry" => Some(DayEvent::LegendReentry),
            "hero_level_up" => Some(DayEvent::HeroLevelUp),
            "pet_level_up" => Some(DayEvent::PetLevelUp),
            "equipment_upgrade" => Some(DayEvent::EquipmentUpgrade),
            "donations_threshold" => Some(DayEvent::DonationsThreshold),
            "war_perf_day" => Some(DayEvent::WarPerfDay),
            "capital_activity" => Some(DayEvent::CapitalActivity),
            "legend_activity" => Some(DayEvent::LegendActivity),
            "war_activity" => Some(DayEvent::WarActivity),
            "builder_activity" => Some(DayEvent::BuilderActivity),
            _ => None,
        }
    }

    /// Fixed event → category lookup. Notability counts distinct categories,
    /// so two events in the same category surface a day only once.
    pub fn category(&self) -> EventCategory {
        match self {
            DayEvent::TrophiesBigDelta => EventCategory::Trophies,
            DayEvent::ThLevelUp
            | DayEvent::HeroLevelUp
            | DayEvent::PetLevelUp
            | DayEvent::EquipmentUpgrade => EventCategory::Progression,
            DayEvent::LeagueChange
            | DayEvent::LeaguePromotion
            | DayEvent::LeagueDemotion
            | DayEvent::LegendReentry => EventCategory::League,
            DayEvent::DonationsThreshold => EventCategory::Donations,
            DayEvent::WarPerfDay | DayEvent::WarActivity => EventCategory::War,
            DayEvent::CapitalActivity => EventCategory::Capital,
            DayEvent::LegendActivity => EventCategory::Legend,
            DayEvent::BuilderActivity => EventCategory::Builder,
        }
    }
}

impl std::fmt::Display for DayEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Trophies,
    League,
    Progression,
    Donations,
    War,
    Capital,
    Legend,
    Builder,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Trophies => "trophies",
            EventCategory::League => "league",
            EventCategory::Progression => "progression",
            EventCategory::Donations => "donations",
            EventCategory::War => "war",
            EventCategory::Capital => "capital",
            EventCategory::Legend => "legend",
            EventCategory::Builder => "builder",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Number of distinct categories represented among the fired events.
/// Not the raw event count.
pub fn notability(events: &BTreeSet<DayEvent>) -> u32 {
    events
        .iter()
        .map(DayEvent::category)
        .collect::<BTreeSet<_>>()
        .len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for event in [
            DayEvent::TrophiesBigDelta,
            DayEvent::ThLevelUp,
            DayEvent::LeagueChange,
            DayEvent::LeaguePromotion,
            DayEvent::LeagueDemotion,
            DayEvent::LegendReentry,
            DayEvent::HeroLevelUp,
            DayEvent::PetLevelUp,
            DayEvent::EquipmentUpgrade,
            DayEvent::DonationsThreshold,
            DayEvent::WarPerfDay,
            DayEvent::CapitalActivity,
            DayEvent::LegendActivity,
            DayEvent::WarActivity,
            DayEvent::BuilderActivity,
        ] {
            assert_eq!(DayEvent::from_tag(event.tag()), Some(event));
        }
    }

    #[test]
    fn serde_tag_matches_tag_fn() {
        let json = serde_json::to_string(&DayEvent::TrophiesBigDelta).unwrap();
        assert_eq!(json, format!("\"{}\"", DayEvent::TrophiesBigDelta.tag()));
        let json = serde_json::to_string(&DayEvent::ThLevelUp).unwrap();
        assert_eq!(json, format!("\"{}\"", DayEvent::ThLevelUp.tag()));
    }

    #[test]
    fn unknown_tag_is_none() {
        assert_eq!(DayEvent::from_tag("season_reset"), None);
    }

    #[test]
    fn notability_counts_categories_not_events() {
        let events: BTreeSet<DayEvent> =
            [DayEvent::WarPerfDay, DayEvent::WarActivity].into_iter().collect();
        assert_eq!(notability(&events), 1);

        let events: BTreeSet<DayEvent> = [
            DayEvent::WarPerfDay,
            DayEvent::WarActivity,
            DayEvent::HeroLevelUp,
            DayEvent::ThLevelUp,
            DayEvent::DonationsThreshold,
        ]
        .into_iter()
        .collect();
        assert_eq!(notability(&events), 3); // war, progression, donations
    }

    #[test]
    fn notability_of_empty_set_is_zero() {
        assert_eq!(notability(&BTreeSet::new()), 0);
    }

    #[test]
    fn league_events_share_one_category() {
        let events: BTreeSet<DayEvent> = [
            DayEvent::LeagueChange,
            DayEvent::LeaguePromotion,
            DayEvent::LegendReentry,
        ]
        .into_iter()
        .collect();
        assert_eq!(notability(&events), 1);
    }
}
