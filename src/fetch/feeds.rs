// src/fetch/feeds.rs
//
// One authorized text fetch per feed. Every feed is fault-isolated: a
// transport failure or non-2xx status is logged and becomes `None` for that
// feed alone, never an error for the cycle.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::{header::AUTHORIZATION, Client};
use tracing::warn;
use url::Url;

use crate::fetch::urls::feed_url;
use crate::parse::{
    parse_cardiac, parse_churchill, parse_roster, parse_thoracic, parse_vascular,
    CardiacAttendings, ChurchillAttendings, RoleBuckets, ThoracicAttendings, VascularAttendings,
};
use crate::schema::FeedKind;

async fn fetch_feed_text(
    client: &Client,
    base: &Url,
    credential: &str,
    kind: FeedKind,
    date: NaiveDate,
) -> Result<String> {
    let url = feed_url(base, kind, date)?;
    let resp = client
        .get(url.clone())
        .header(AUTHORIZATION, format!("Basic {credential}"))
        .send()
        .await
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("fetching {kind} feed"))?;
    resp.text()
        .await
        .with_context(|| format!("reading {kind} feed body"))
}

fn downgrade<T>(kind: FeedKind, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(feed = %kind, "feed unavailable: {err:#}");
            None
        }
    }
}

/// General roster feed. A failed fetch yields `None`; the consumer treats it
/// as an empty board.
pub async fn fetch_roster(
    client: &Client,
    base: &Url,
    credential: &str,
    date: NaiveDate,
) -> Option<RoleBuckets> {
    let text = downgrade(
        FeedKind::Roster,
        fetch_feed_text(client, base, credential, FeedKind::Roster, date).await,
    )?;
    Some(parse_roster(&text))
}

/// Churchill parses whatever body arrives; only a fetch-level failure is
/// `None`, so a present-but-sparse snapshot keeps its per-slot emptiness.
pub async fn fetch_churchill(
    client: &Client,
    base: &Url,
    credential: &str,
    date: NaiveDate,
) -> Option<ChurchillAttendings> {
    let text = downgrade(
        FeedKind::Churchill,
        fetch_feed_text(client, base, credential, FeedKind::Churchill, date).await,
    )?;
    Some(parse_churchill(&text))
}

/// Vascular treats an empty body, and a snapshot with neither attending nor
/// fellow, the same as a failed fetch.
pub async fn fetch_vascular(
    client: &Client,
    base: &Url,
    credential: &str,
    date: NaiveDate,
) -> Option<VascularAttendings> {
    let text = downgrade(
        FeedKind::Vascular,
        fetch_feed_text(client, base, credential, FeedKind::Vascular, date).await,
    )?;
    if text.trim().is_empty() {
        warn!(feed = %FeedKind::Vascular, "empty feed body");
        return None;
    }
    let parsed = parse_vascular(&text);
    if !parsed.has_assignments() {
        warn!(feed = %FeedKind::Vascular, "no recognized assignments");
        return None;
    }
    Some(parsed)
}

/// Thoracic distinguishes a failed fetch (`None`) from a present snapshot
/// with unassigned slots; only an empty body collapses into failure.
pub async fn fetch_thoracic(
    client: &Client,
    base: &Url,
    credential: &str,
    date: NaiveDate,
) -> Option<ThoracicAttendings> {
    let text = downgrade(
        FeedKind::Thoracic,
        fetch_feed_text(client, base, credential, FeedKind::Thoracic, date).await,
    )?;
    if text.trim().is_empty() {
        warn!(feed = %FeedKind::Thoracic, "empty feed body");
        return None;
    }
    Some(parse_thoracic(&text))
}

/// Same contract as the thoracic feed.
pub async fn fetch_cardiac(
    client: &Client,
    base: &Url,
    credential: &str,
    date: NaiveDate,
) -> Option<CardiacAttendings> {
    let text = downgrade(
        FeedKind::Cardiac,
        fetch_feed_text(client, base, credential, FeedKind::Cardiac, date).await,
    )?;
    if text.trim().is_empty() {
        warn!(feed = %FeedKind::Cardiac, "empty feed body");
        return None;
    }
    Some(parse_cardiac(&text))
}
