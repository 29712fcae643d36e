// src/fetch/urls.rs

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use url::Url;

use crate::schema::FeedKind;

/// Build the endpoint URL for one feed on one display date.
///
/// The backend routes live under `api/` and take the date as discrete
/// day/month/year query parameters; the feed's own year offset is applied
/// here so callers always pass the display date.
pub fn feed_url(base: &Url, kind: FeedKind, date: NaiveDate) -> Result<Url> {
    let mut url = base
        .join(&format!("api/{}", kind.path()))
        .with_context(|| format!("joining {} onto {base}", kind.path()))?;
    url.query_pairs_mut()
        .append_pair("day", &date.day().to_string())
        .append_pair("month", &date.month().to_string())
        .append_pair("year", &(date.year() + kind.year_offset()).to_string());
    Ok(url)
}
