// src/parse/specialty.rs
//
// Fixed-shape attending snapshots for the specialty feeds. These are exact
// role-label lookups per feed vocabulary; only Churchill has a repeating
// field and only Cardiac gates matches on a division column.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::parse::tokenize::split_fields;
use crate::schema::{FeedKind, FeedSchema, HEADER_LINES};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueAppShift {
    pub name: String,
    /// Absent when the feed row was too short to carry start/end columns.
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurchillAttendings {
    pub day: Option<String>,
    pub night: Option<String>,
    pub backup: Option<String>,
    pub pancreatitis: Option<String>,
    pub blue_app: Vec<BlueAppShift>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VascularAttendings {
    pub attending: Option<String>,
    pub fellow: Option<String>,
}

impl VascularAttendings {
    /// The upstream consumer treats a snapshot with neither slot filled the
    /// same as a failed fetch.
    pub fn has_assignments(&self) -> bool {
        self.attending.is_some() || self.fellow.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThoracicAttendings {
    pub attending: Option<String>,
    pub fellow: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardiacAttendings {
    pub attending: Option<String>,
    pub fellow: Option<String>,
}

/// Walk the data rows of one specialty document, handing each tokenized row's
/// (division, name, role, time) to the feed-specific matcher.
fn for_each_row(text: &str, schema: &FeedSchema, mut row: impl FnMut(RowView<'_>)) {
    for line in text.lines().skip(HEADER_LINES) {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_fields(line);
        if fields.len() < schema.min_fields {
            trace!(fields = fields.len(), "skipping short specialty row");
            continue;
        }
        let time = match (schema.start_pos, schema.end_pos) {
            (Some(s), Some(e)) if fields.len() > e => Some(format!("{}-{}", fields[s], fields[e])),
            _ => None,
        };
        row(RowView {
            division: schema.division_pos.map(|p| fields[p].as_str()),
            name: &fields[schema.name_pos],
            role: &fields[schema.role_pos],
            time,
        });
    }
}

struct RowView<'a> {
    division: Option<&'a str>,
    name: &'a str,
    role: &'a str,
    time: Option<String>,
}

fn fill(slot: &mut Option<String>, name: &str) {
    if !name.is_empty() {
        *slot = Some(name.to_string());
    }
}

pub fn parse_churchill(text: &str) -> ChurchillAttendings {
    let mut attendings = ChurchillAttendings::default();
    for_each_row(text, FeedKind::Churchill.schema(), |row| match row.role {
        "Churchill Day" => fill(&mut attendings.day, row.name),
        "Churchill Night" => fill(&mut attendings.night, row.name),
        "Backup" => fill(&mut attendings.backup, row.name),
        "Pancreatitis" => fill(&mut attendings.pancreatitis, row.name),
        role if role.to_lowercase().contains("blue app") => {
            attendings.blue_app.push(BlueAppShift {
                name: row.name.to_string(),
                time: row.time,
            });
        }
        _ => {}
    });
    attendings
}

pub fn parse_vascular(text: &str) -> VascularAttendings {
    let mut attendings = VascularAttendings::default();
    for_each_row(text, FeedKind::Vascular.schema(), |row| match row.role {
        "MGH Surgeon On-Call" => fill(&mut attendings.attending, row.name),
        "MGH Fellow On-Call" => fill(&mut attendings.fellow, row.name),
        _ => {}
    });
    attendings
}

pub fn parse_thoracic(text: &str) -> ThoracicAttendings {
    let mut attendings = ThoracicAttendings::default();
    for_each_row(text, FeedKind::Thoracic.schema(), |row| match row.role {
        "MGH & MD Connect" => fill(&mut attendings.attending, row.name),
        "Fellow On Call (24 hr)" => fill(&mut attendings.fellow, row.name),
        _ => {}
    });
    attendings
}

/// Cardiac is the one feed whose rows carry a leading division column; a role
/// label only counts under its own division.
pub fn parse_cardiac(text: &str) -> CardiacAttendings {
    let mut attendings = CardiacAttendings::default();
    for_each_row(text, FeedKind::Cardiac.schema(), |row| {
        match (row.division, row.role) {
            (Some("Attendings"), "General Cardiac Call") => {
                fill(&mut attendings.attending, row.name)
            }
            (Some("Resident"), "In House Fellow") => fill(&mut attendings.fellow, row.name),
            _ => {}
        }
    });
    attendings
}
