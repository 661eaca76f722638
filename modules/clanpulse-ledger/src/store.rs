//! PlayerDayStore — the day-level ledger table in Postgres.
//!
//! One row per (player, day), immutable in meaning: the upsert exists so a
//! re-run of the same ingest day converges to the same row, not to mutate
//! history. Reads come back in chronological order, which the timeline
//! builders rely on.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::warn;

use clanpulse_common::CanonicalPlayerState;

use crate::events::DayEvent;
use crate::player_day::PlayerDayRow;

/// Day-level ledger of derived player rows.
#[derive(Clone)]
pub struct PlayerDayStore {
    pool: PgPool,
}

type DayRowTuple = (
    String,
    NaiveDate,
    Json<CanonicalPlayerState>,
    Json<BTreeMap<String, i64>>,
    Vec<String>,
    i32,
    String,
);

impl PlayerDayStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the ledger table if it does not exist. Safe to call on every
    /// startup.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS player_day (
                player_tag    TEXT NOT NULL,
                day           DATE NOT NULL,
                state         JSONB NOT NULL,
                deltas        JSONB NOT NULL,
                events        TEXT[] NOT NULL,
                notability    INT NOT NULL,
                snapshot_hash TEXT NOT NULL,
                PRIMARY KEY (player_tag, day)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Idempotent upsert keyed on (player_tag, day). Re-deriving the same
    /// day overwrites with identical content.
    pub async fn upsert_row(&self, row: &PlayerDayRow) -> Result<()> {
        let events: Vec<String> = row.events.iter().map(|e| e.tag().to_string()).collect();
        sqlx::query(
            r#"
            INSERT INTO player_day (player_tag, day, state, deltas, events, notability, snapshot_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (player_tag, day) DO UPDATE SET
                state = EXCLUDED.state,
                deltas = EXCLUDED.deltas,
                events = EXCLUDED.events,
                notability = EXCLUDED.notability,
                snapshot_hash = EXCLUDED.snapshot_hash
            "#,
        )
        .bind(&row.tag)
        .bind(row.day)
        .bind(Json(&row.state))
        .bind(Json(&row.deltas))
        .bind(&events)
        .bind(row.notability as i32)
        .bind(&row.snapshot_hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// The player's most recent ledger row strictly before `day` — the
    /// `prev` side of the next derivation and the hash to dedup against.
    pub async fn latest_row_before(&self, tag: &str, day: NaiveDate) -> Result<Option<PlayerDayRow>> {
        let row = sqlx::query_as::<_, DayRowTuple>(
            r#"
            SELECT player_tag, day, state, deltas, events, notability, snapshot_hash
            FROM player_day
            WHERE player_tag = $1 AND day < $2
            ORDER BY day DESC
            LIMIT 1
            "#,
        )
        .bind(tag)
        .bind(day)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(from_tuple))
    }

    /// Chronological range read for timeline/summary builders. Bounds are
    /// inclusive.
    pub async fn rows_for_player(
        &self,
        tag: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PlayerDayRow>> {
        let rows = sqlx::query_as::<_, DayRowTuple>(
            r#"
            SELECT player_tag, day, state, deltas, events, notability, snapshot_hash
            FROM player_day
            WHERE player_tag = $1 AND day >= $2 AND day <= $3
            ORDER BY day ASC
            "#,
        )
        .bind(tag)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(from_tuple).collect())
    }
}

fn from_tuple(
    (tag, day, Json(state), Json(deltas), event_tags, notability, snapshot_hash): DayRowTuple,
) -> PlayerDayRow {
    let mut events = BTreeSet::new();
    for t in &event_tags {
        match DayEvent::from_tag(t) {
            Some(event) => {
                events.insert(event);
            }
            // A newer writer's tag this build doesn't know. Keep the row.
            None => warn!(tag = %tag, day = %day, event = %t, "Unknown event tag in ledger"),
        }
    }
    PlayerDayRow {
        tag,
        day,
        state,
        deltas,
        events,
        notability: notability as u32,
        snapshot_hash,
    }
}
