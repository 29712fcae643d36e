// src/parse/mod.rs

pub mod roster;
pub mod specialty;
pub mod tokenize;

use serde::{Deserialize, Serialize};

pub use roster::parse_roster;
pub use specialty::{
    parse_cardiac, parse_churchill, parse_thoracic, parse_vascular, BlueAppShift,
    CardiacAttendings, ChurchillAttendings, ThoracicAttendings, VascularAttendings,
};
pub use tokenize::split_fields;

/// One scheduled physician as parsed from the roster feed. Immutable once
/// parsed; classification only ever attaches a derived display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    /// The free-text assignment label, exactly as the feed spells it.
    pub role: String,
    /// `"<start>-<end>"` using the literal feed time tokens.
    pub time: String,
}

impl MemberRecord {
    /// Identity for overnight deduplication.
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.name, &self.time)
    }
}

/// Roster rows grouped by their exact role label.
///
/// Label order is first-seen feed order and members keep feed row order
/// within a label; classification depends on both, so this is a keyed
/// sequence rather than a sorted map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBuckets {
    entries: Vec<(String, Vec<MemberRecord>)>,
}

impl RoleBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: &str, member: MemberRecord) {
        if let Some(idx) = self.entries.iter().position(|(label, _)| label == role) {
            self.entries[idx].1.push(member);
        } else {
            self.entries.push((role.to_string(), vec![member]));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MemberRecord])> {
        self.entries
            .iter()
            .map(|(label, members)| (label.as_str(), members.as_slice()))
    }

    /// Members under an exact label, feed order.
    pub fn get(&self, label: &str) -> Option<&[MemberRecord]> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, m)| m.as_slice())
    }

    /// First member's name under a case-insensitively matched label.
    pub fn first_name_ignore_case(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(label))
            .and_then(|(_, members)| members.first())
            .map(|m| m.name.as_str())
    }
}
