use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use oncallboard::{board::Dashboard, config};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,oncallboard=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) config + display date ────────────────────────────────────
    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "oncallboard.yaml".into());
    let date = match args.next() {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("invalid date {raw:?}, expected YYYY-MM-DD"))?,
        None => Local::now().date_naive(),
    };
    let config = config::load(Path::new(&config_path))?;
    info!(base = %config.base_url, %date, "running display cycle");

    // ─── 3) run one display cycle ────────────────────────────────────
    let dashboard = Dashboard::new(config);
    let snapshot = dashboard
        .load(date)
        .await
        .context("display cycle was superseded")?;
    if snapshot.teams_unavailable() {
        warn!(%date, "roster schedule unavailable");
    }

    // ─── 4) emit the board ───────────────────────────────────────────
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
