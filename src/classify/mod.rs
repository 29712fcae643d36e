// src/classify/mod.rs
//
// Buckets role-keyed roster records into per-service boards. Classification
// attaches display labels but never touches a member's name or time; the
// aggregate module owns ordering and emission.

pub mod rules;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parse::{MemberRecord, RoleBuckets};
use self::rules::{contains_any, display_label};

/// Team-number plus optional A/B suffix inside a Baker label.
static BAKER_TEAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)baker\s*(\d+[ab]?)").expect("baker team pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    Pit,
    Baker,
    Churchill,
    Thoracic,
    Vascular,
    Pediatrics,
    Transplant,
}

/// A roster member with its derived display role attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedMember {
    pub name: String,
    pub time: String,
    /// The raw feed label the member arrived under.
    pub source_role: String,
    pub display_role: String,
}

impl ClassifiedMember {
    fn new(member: &MemberRecord, display_role: String) -> Self {
        Self {
            name: member.name.clone(),
            time: member.time.clone(),
            source_role: member.role.clone(),
            display_role,
        }
    }

    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.name, &self.time)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayNightBoard {
    pub day: Vec<ClassifiedMember>,
    pub night: Vec<ClassifiedMember>,
}

impl DayNightBoard {
    pub fn is_empty(&self) -> bool {
        self.day.is_empty() && self.night.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakerBoard {
    /// Document-level flag: one weekend/holiday label anywhere switches the
    /// whole Baker display to the single-day layout.
    pub weekend_mode: bool,
    /// Weekday teams keyed by extracted team number ("1", "2A", ...), in
    /// first-seen order; the aggregator sorts the keys.
    pub teams: Vec<(String, Vec<ClassifiedMember>)>,
    pub weekend_day: Vec<ClassifiedMember>,
    pub overnight: Vec<ClassifiedMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurchillBoard {
    pub red: Vec<ClassifiedMember>,
    pub white: Vec<ClassifiedMember>,
    pub green: Vec<ClassifiedMember>,
    pub overnight: Vec<ClassifiedMember>,
    /// Name of the team carrying the On Call badge, from the separate
    /// "Churchill Team On Call" lookup.
    pub on_call_team: Option<String>,
}

/// Everything the classifier derives from one roster parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterBoard {
    pub baker: BakerBoard,
    pub churchill: ChurchillBoard,
    pub pit: DayNightBoard,
    pub thoracic: DayNightBoard,
    pub vascular: DayNightBoard,
    pub pediatrics: DayNightBoard,
    pub transplant: DayNightBoard,
    pub breast: Option<ClassifiedMember>,
}

/// Run every family's predicate over every raw label and bucket the members.
pub fn classify_roster(buckets: &RoleBuckets) -> RosterBoard {
    let mut board = RosterBoard::default();

    for (label, members) in buckets.iter() {
        let lower = label.to_lowercase();
        for family in rules::FAMILY_RULES {
            if !contains_any(&lower, family.keywords) {
                continue;
            }
            match family.service {
                Service::Baker => classify_baker(&mut board.baker, &lower, members),
                Service::Churchill => classify_churchill(&mut board.churchill, &lower, members),
                Service::Pit => classify_pit(&mut board.pit, members),
                Service::Thoracic => classify_thoracic(&mut board.thoracic, label, members),
                Service::Vascular => classify_vascular(&mut board.vascular, &lower, members),
                Service::Pediatrics => classify_pediatrics(&mut board.pediatrics, label, members),
                Service::Transplant => classify_transplant(&mut board.transplant, label, members),
            }
        }
    }

    board.breast = buckets
        .get(rules::BREAST_LABEL)
        .and_then(|members| members.first())
        .map(|m| ClassifiedMember::new(m, "Senior".to_string()));

    board.churchill.on_call_team = buckets
        .first_name_ignore_case(rules::CHURCHILL_ON_CALL_LABEL)
        .map(str::to_string);

    debug!(
        weekend = board.baker.weekend_mode,
        baker_teams = board.baker.teams.len(),
        "classified roster"
    );
    board
}

fn classify_baker(board: &mut BakerBoard, label_lower: &str, members: &[MemberRecord]) {
    let overnight = contains_any(label_lower, rules::BAKER_OVERNIGHT_KEYWORDS);

    if contains_any(label_lower, rules::WEEKEND_KEYWORDS) {
        board.weekend_mode = true;
        if overnight {
            push_overnight(&mut board.overnight, members);
        } else {
            for member in members {
                let display = display_label(rules::BAKER_WEEKEND_RENAMES, &member.role, None);
                board.weekend_day.push(ClassifiedMember::new(member, display));
            }
        }
        return;
    }

    if overnight {
        push_overnight(&mut board.overnight, members);
        return;
    }

    // Labels without a team number contribute nothing to the weekday layout.
    let Some(team) = extract_team_number(label_lower) else {
        return;
    };
    let existing = board.teams.iter().position(|(key, _)| *key == team);
    let idx = match existing {
        Some(idx) => idx,
        None => {
            board.teams.push((team, Vec::new()));
            board.teams.len() - 1
        }
    };
    let bucket = &mut board.teams[idx].1;
    for member in members {
        let display = display_label(rules::BAKER_TEAM_LABELS, &member.role, Some("Intern"));
        bucket.push(ClassifiedMember::new(member, display));
    }
}

fn push_overnight(overnight: &mut Vec<ClassifiedMember>, members: &[MemberRecord]) {
    for member in members {
        let display = display_label(rules::BAKER_OVERNIGHT_LABELS, &member.role, Some("Intern"));
        overnight.push(ClassifiedMember::new(member, display));
    }
}

/// "baker 2a" -> "2A"; None when the label names no team.
fn extract_team_number(label: &str) -> Option<String> {
    let caps = BAKER_TEAM_RE.captures(label)?;
    let mut team = caps[1].to_string();
    team.make_ascii_uppercase();
    Some(team)
}

fn classify_churchill(board: &mut ChurchillBoard, label_lower: &str, members: &[MemberRecord]) {
    let Some(bucket) = churchill_bucket(board, label_lower) else {
        // e.g. the on-call lookup label; it joins no team card.
        return;
    };
    for member in members {
        let display = display_label(rules::CHURCHILL_LABELS, &member.role, Some("Senior"));
        bucket.push(ClassifiedMember::new(member, display));
    }
}

fn churchill_bucket<'a>(
    board: &'a mut ChurchillBoard,
    label_lower: &str,
) -> Option<&'a mut Vec<ClassifiedMember>> {
    if contains_any(label_lower, rules::CHURCHILL_OVERNIGHT_KEYWORDS) {
        return Some(&mut board.overnight);
    }
    let (_, team) = rules::CHURCHILL_COLOR_TEAMS
        .iter()
        .find(|(keyword, _)| label_lower.contains(keyword))?;
    match *team {
        "Red" => Some(&mut board.red),
        "White" => Some(&mut board.white),
        "Green" => Some(&mut board.green),
        _ => None,
    }
}

fn classify_pit(board: &mut DayNightBoard, members: &[MemberRecord]) {
    for member in members {
        let lower = member.role.to_lowercase();
        let display = display_label(rules::PIT_LABELS, &member.role, Some("Junior"));
        let classified = ClassifiedMember::new(member, display);
        if lower.contains("night") {
            board.night.push(classified);
        } else {
            board.day.push(classified);
        }
    }
}

// The remaining families show the first member of each label only.

fn classify_thoracic(board: &mut DayNightBoard, label: &str, members: &[MemberRecord]) {
    let Some(member) = members.first() else { return };
    let display = display_label(rules::THORACIC_LABELS, label, None);
    let classified = ClassifiedMember::new(member, display);
    if label.to_lowercase().contains("night float") {
        board.night.push(classified);
    } else {
        board.day.push(classified);
    }
}

fn classify_vascular(board: &mut DayNightBoard, label_lower: &str, members: &[MemberRecord]) {
    // Pager entries and night consult entries are dropped entirely.
    if label_lower.contains("pager")
        || (label_lower.contains("consult") && label_lower.contains("night"))
    {
        return;
    }
    let Some(member) = members.first() else { return };
    if label_lower.contains("night float") {
        board
            .night
            .push(ClassifiedMember::new(member, "Night Float".to_string()));
    } else if label_lower.contains("consult resident day") {
        board
            .day
            .push(ClassifiedMember::new(member, "Consult".to_string()));
    }
    // Anything else vascular is not displayed.
}

fn classify_pediatrics(board: &mut DayNightBoard, label: &str, members: &[MemberRecord]) {
    let Some(member) = members.first() else { return };
    let display = display_label(rules::PEDIATRICS_LABELS, label, None);
    let classified = ClassifiedMember::new(member, display);
    if label.to_lowercase().contains("night") {
        board.night.push(classified);
    } else {
        board.day.push(classified);
    }
}

fn classify_transplant(board: &mut DayNightBoard, label: &str, members: &[MemberRecord]) {
    let Some(member) = members.first() else { return };
    let display = display_label(rules::TRANSPLANT_LABELS, label, None);
    let classified = ClassifiedMember::new(member, display);
    if label.to_lowercase().contains("night") {
        board.night.push(classified);
    } else {
        board.day.push(classified);
    }
}
