// src/board.rs
//
// One display cycle: fan the five feed fetches out concurrently, join them
// all (no partial rendering), then classify and aggregate. A generation
// counter invalidates cycles that were superseded while in flight so a slow
// response can never overwrite a newer board.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::task::JoinError;
use tracing::{info, instrument, warn};

use crate::aggregate::{aggregate, TeamBoard};
use crate::classify::classify_roster;
use crate::config::BoardConfig;
use crate::fetch::feeds;
use crate::parse::{
    CardiacAttendings, ChurchillAttendings, RoleBuckets, ThoracicAttendings, VascularAttendings,
};
use crate::schema::FeedKind;

/// Everything one display cycle produces. `None` for a specialty feed means
/// "no data" (missing credential or failed fetch); a present snapshot with
/// empty slots means the feed answered but left roles unassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub date: NaiveDate,
    pub teams: TeamBoard,
    pub churchill: Option<ChurchillAttendings>,
    pub vascular: Option<VascularAttendings>,
    pub thoracic: Option<ThoracicAttendings>,
    pub cardiac: Option<CardiacAttendings>,
}

impl BoardSnapshot {
    /// The consumer's "show the unavailable message" signal.
    pub fn teams_unavailable(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Pure classify+aggregate step, independent of any transport.
pub fn assemble(
    date: NaiveDate,
    roster: RoleBuckets,
    churchill: Option<ChurchillAttendings>,
    vascular: Option<VascularAttendings>,
    thoracic: Option<ThoracicAttendings>,
    cardiac: Option<CardiacAttendings>,
) -> BoardSnapshot {
    let teams = aggregate(classify_roster(&roster));
    BoardSnapshot {
        date,
        teams,
        churchill,
        vascular,
        thoracic,
        cardiac,
    }
}

/// Monotone cycle counter: beginning a new cycle invalidates every one
/// still in flight.
struct CycleGate(AtomicU64);

impl CycleGate {
    fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.0.load(Ordering::SeqCst) == generation
    }
}

pub struct Dashboard {
    client: Client,
    config: BoardConfig,
    gate: CycleGate,
}

impl Dashboard {
    pub fn new(config: BoardConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: BoardConfig) -> Self {
        Self {
            client,
            config,
            gate: CycleGate::new(),
        }
    }

    /// Run one display cycle for `date`. Returns `None` when a newer cycle
    /// began while this one was in flight; the stale result must be
    /// discarded, not rendered.
    #[instrument(level = "info", skip(self))]
    pub async fn load(&self, date: NaiveDate) -> Option<BoardSnapshot> {
        let generation = self.gate.begin();

        let Some(credential) = self.config.credential.clone() else {
            warn!("no credential configured; serving empty board");
            return self.finish(
                generation,
                assemble(date, RoleBuckets::new(), None, None, None, None),
            );
        };

        macro_rules! spawn_feed {
            ($fetch:ident) => {{
                let client = self.client.clone();
                let base = self.config.base_url.clone();
                let cred = credential.clone();
                tokio::spawn(async move { feeds::$fetch(&client, &base, &cred, date).await })
            }};
        }

        let roster = spawn_feed!(fetch_roster);
        let churchill = spawn_feed!(fetch_churchill);
        let vascular = spawn_feed!(fetch_vascular);
        let thoracic = spawn_feed!(fetch_thoracic);
        let cardiac = spawn_feed!(fetch_cardiac);

        // Fan-in: the cycle renders only once every feed has settled.
        let (roster, churchill, vascular, thoracic, cardiac) =
            futures::join!(roster, churchill, vascular, thoracic, cardiac);

        let roster = joined(FeedKind::Roster, roster).unwrap_or_default();
        let snapshot = assemble(
            date,
            roster,
            joined(FeedKind::Churchill, churchill),
            joined(FeedKind::Vascular, vascular),
            joined(FeedKind::Thoracic, thoracic),
            joined(FeedKind::Cardiac, cardiac),
        );
        info!(
            teams_unavailable = snapshot.teams_unavailable(),
            "display cycle complete"
        );
        self.finish(generation, snapshot)
    }

    fn finish(&self, generation: u64, snapshot: BoardSnapshot) -> Option<BoardSnapshot> {
        if !self.gate.is_current(generation) {
            warn!(generation, "discarding superseded display cycle");
            return None;
        }
        Some(snapshot)
    }
}

fn joined<T>(kind: FeedKind, result: Result<Option<T>, JoinError>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!(feed = %kind, "feed task failed: {err}");
            None
        }
    }
}
