//! Daily ingest run: roster → profiles → canonical snapshots → ledger rows.
//!
//! Players are independent, so profile fetches and derivations fan out with
//! `buffer_unordered`. Chronological ordering only matters within a single
//! player, and the store's `latest_row_before` supplies that player's `prev`
//! side, so concurrency across players is safe.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};
use uuid::Uuid;

use clanpulse_ledger::{derive_player_day, snapshot_hash, PlayerDayRow, PlayerDayStore};

use crate::normalize::normalize_profile;
use crate::source::PlayerSource;

/// Stats from one ingest run.
#[derive(Debug, Default)]
pub struct IngestStats {
    pub players_seen: u32,
    pub players_unchanged: u32,
    pub players_failed: u32,
    pub rows_written: u32,
    pub first_observations: u32,
    pub events_fired: u32,
    pub by_category: BTreeMap<String, u32>,
}

impl std::fmt::Display for IngestStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Ingest Run Complete ===")?;
        writeln!(f, "Players seen:       {}", self.players_seen)?;
        writeln!(f, "Players unchanged:  {}", self.players_unchanged)?;
        writeln!(f, "Players failed:     {}", self.players_failed)?;
        writeln!(f, "Rows written:       {}", self.rows_written)?;
        writeln!(f, "First observations: {}", self.first_observations)?;
        writeln!(f, "Events fired:       {}", self.events_fired)?;
        writeln!(f, "\nBy category:")?;
        for (category, count) in &self.by_category {
            writeln!(f, "  {category}: {count}")?;
        }
        Ok(())
    }
}

enum MemberOutcome {
    Written { row: PlayerDayRow, first: bool },
    Unchanged,
    Failed,
}

/// Nothing meaningful changed since the stored row: skip storage entirely.
fn should_skip(prev: Option<&PlayerDayRow>, curr_hash: &str) -> bool {
    prev.is_some_and(|p| p.snapshot_hash == curr_hash)
}

pub struct Ingestor {
    source: Box<dyn PlayerSource>,
    store: PlayerDayStore,
    concurrency: usize,
}

impl Ingestor {
    pub fn new(source: Box<dyn PlayerSource>, store: PlayerDayStore, concurrency: usize) -> Self {
        Self {
            source,
            store,
            concurrency: concurrency.max(1),
        }
    }

    /// Ingest every current clan member for today (UTC).
    pub async fn run(&self, clan_tag: &str) -> Result<IngestStats> {
        self.run_for_day(clan_tag, Utc::now().date_naive()).await
    }

    /// Ingest every current clan member for a given ledger day.
    pub async fn run_for_day(&self, clan_tag: &str, day: NaiveDate) -> Result<IngestStats> {
        let run_id = Uuid::new_v4();
        let members = self.source.clan_members(clan_tag).await?;
        info!(
            %run_id,
            clan = clan_tag,
            members = members.len(),
            day = %day,
            "Ingest run starting"
        );

        let outcomes: Vec<MemberOutcome> = stream::iter(members)
            .map(|member| self.ingest_member(member.tag, day, run_id))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut stats = IngestStats::default();
        for outcome in outcomes {
            stats.players_seen += 1;
            match outcome {
                MemberOutcome::Written { row, first } => {
                    stats.rows_written += 1;
                    if first {
                        stats.first_observations += 1;
                    }
                    stats.events_fired += row.events.len() as u32;
                    for event in &row.events {
                        *stats
                            .by_category
                            .entry(event.category().as_str().to_string())
                            .or_insert(0) += 1;
                    }
                }
                MemberOutcome::Unchanged => stats.players_unchanged += 1,
                MemberOutcome::Failed => stats.players_failed += 1,
            }
        }

        info!(
            %run_id,
            written = stats.rows_written,
            unchanged = stats.players_unchanged,
            failed = stats.players_failed,
            "Ingest run complete"
        );
        Ok(stats)
    }

    async fn ingest_member(&self, tag: String, day: NaiveDate, run_id: Uuid) -> MemberOutcome {
        match self.try_ingest(&tag, day).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(%run_id, player = %tag, error = %e, "Player ingest failed");
                MemberOutcome::Failed
            }
        }
    }

    async fn try_ingest(&self, tag: &str, day: NaiveDate) -> Result<MemberOutcome> {
        let profile = self.source.player(tag).await?;
        let curr = normalize_profile(&profile, day);

        let prev_row = self.store.latest_row_before(tag, day).await?;
        if should_skip(prev_row.as_ref(), &snapshot_hash(&curr)) {
            debug!(player = tag, "Snapshot unchanged, skipping");
            return Ok(MemberOutcome::Unchanged);
        }

        let first = prev_row.is_none();
        let row = derive_player_day(prev_row.as_ref().map(|r| &r.state), &curr);
        self.store.upsert_row(&row).await?;
        debug!(
            player = tag,
            day = %day,
            events = row.events.len(),
            notability = row.notability,
            "Ledger row written"
        );
        Ok(MemberOutcome::Written { row, first })
    }
}
