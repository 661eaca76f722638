//! The ranked trophy-league ladder.
//!
//! League movement classification (promotion, demotion, legend re-entry)
//! compares positions in this fixed ordering. Labels the API reports that are
//! not on the ladder ("Unranked", future leagues) rank as unknown and never
//! classify as promotion or demotion.

/// Ranked leagues in ascending order. Index = rank.
const RANKED_LADDER: [&str; 22] = [
    "Bronze League III",
    "Bronze League II",
    "Bronze League I",
    "Silver League III",
    "Silver League II",
    "Silver League I",
    "Gold League III",
    "Gold League II",
    "Gold League I",
    "Crystal League III",
    "Crystal League II",
    "Crystal League I",
    "Master League III",
    "Master League II",
    "Master League I",
    "Champion League III",
    "Champion League II",
    "Champion League I",
    "Titan League III",
    "Titan League II",
    "Titan League I",
    "Legend League",
];

/// Position of a league label on the ladder. `None` for unranked/unknown.
pub fn league_rank(label: &str) -> Option<u32> {
    RANKED_LADDER
        .iter()
        .position(|l| *l == label)
        .map(|i| i as u32)
}

/// Signed rank delta between two league labels: positive = promotion,
/// negative = demotion. `None` when either side is unranked or unknown.
pub fn compare_ranked_leagues(curr: Option<&str>, prev: Option<&str>) -> Option<i64> {
    let curr_rank = league_rank(curr?)?;
    let prev_rank = league_rank(prev?)?;
    Some(curr_rank as i64 - prev_rank as i64)
}

/// Whether a label is the top tier of the ladder (Legend League).
pub fn is_top_league(label: &str) -> bool {
    label == RANKED_LADDER[RANKED_LADDER.len() - 1]
}
