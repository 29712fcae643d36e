// src/schema/mod.rs
//
// Feed identities and their declared column layouts. Adding a feed is a data
// change here, not new parsing code.

use serde::{Deserialize, Serialize};

/// Every feed discards this many leading lines as header/metadata,
/// regardless of content.
pub const HEADER_LINES: usize = 5;

/// One upstream source of schedule text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedKind {
    /// The general roster feed covering every service.
    Roster,
    Churchill,
    Vascular,
    Thoracic,
    Cardiac,
}

impl FeedKind {
    pub const ALL: [FeedKind; 5] = [
        FeedKind::Roster,
        FeedKind::Churchill,
        FeedKind::Vascular,
        FeedKind::Thoracic,
        FeedKind::Cardiac,
    ];

    /// Endpoint path segment under `/api/`.
    pub fn path(self) -> &'static str {
        match self {
            FeedKind::Roster => "schedule",
            FeedKind::Churchill => "churchill",
            FeedKind::Vascular => "vascular",
            FeedKind::Thoracic => "thoracic",
            FeedKind::Cardiac => "cardiac",
        }
    }

    /// The roster upstream takes the previous calendar year in its URL;
    /// every other feed takes the year as-is.
    pub fn year_offset(self) -> i32 {
        match self {
            FeedKind::Roster => -1,
            _ => 0,
        }
    }

    pub fn schema(self) -> &'static FeedSchema {
        match self {
            FeedKind::Roster => &ROSTER_SCHEMA,
            FeedKind::Churchill => &CHURCHILL_SCHEMA,
            FeedKind::Vascular => &VASCULAR_SCHEMA,
            FeedKind::Thoracic => &THORACIC_SCHEMA,
            FeedKind::Cardiac => &CARDIAC_SCHEMA,
        }
    }
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Declared column layout for one feed: which tokenized positions hold what,
/// and how many fields a row must have to count at all.
#[derive(Debug, Clone)]
pub struct FeedSchema {
    pub min_fields: usize,
    pub name_pos: usize,
    pub role_pos: usize,
    /// Leading division discriminator (Cardiac only).
    pub division_pos: Option<usize>,
    pub start_pos: Option<usize>,
    pub end_pos: Option<usize>,
}

pub static ROSTER_SCHEMA: FeedSchema = FeedSchema {
    min_fields: 9,
    name_pos: 0,
    role_pos: 3,
    division_pos: None,
    start_pos: Some(7),
    end_pos: Some(8),
};

// Churchill rows are accepted at 4 fields; start/end are read only when the
// row is long enough, so short rows still fill the single-value slots.
pub static CHURCHILL_SCHEMA: FeedSchema = FeedSchema {
    min_fields: 4,
    name_pos: 0,
    role_pos: 3,
    division_pos: None,
    start_pos: Some(7),
    end_pos: Some(8),
};

pub static VASCULAR_SCHEMA: FeedSchema = FeedSchema {
    min_fields: 4,
    name_pos: 0,
    role_pos: 3,
    division_pos: None,
    start_pos: None,
    end_pos: None,
};

pub static THORACIC_SCHEMA: FeedSchema = FeedSchema {
    min_fields: 4,
    name_pos: 0,
    role_pos: 3,
    division_pos: None,
    start_pos: None,
    end_pos: None,
};

pub static CARDIAC_SCHEMA: FeedSchema = FeedSchema {
    min_fields: 4,
    name_pos: 1,
    role_pos: 3,
    division_pos: Some(0),
    start_pos: None,
    end_pos: None,
};
