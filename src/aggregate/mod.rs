// src/aggregate/mod.rs
//
// Turns classified per-service boards into the final ordered team groups.
// All ordering here is deterministic: stable sorts over explicit keys.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::classify::{
    rules, BakerBoard, ChurchillBoard, ClassifiedMember, DayNightBoard, RosterBoard, Service,
};

/// A named display bucket, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamGroup {
    pub title: String,
    pub night: bool,
    pub on_call: bool,
    pub members: Vec<ClassifiedMember>,
}

impl TeamGroup {
    fn day(title: impl Into<String>, members: Vec<ClassifiedMember>) -> Self {
        Self {
            title: title.into(),
            night: false,
            on_call: false,
            members,
        }
    }

    fn night(title: impl Into<String>, members: Vec<ClassifiedMember>) -> Self {
        Self {
            title: title.into(),
            night: true,
            on_call: false,
            members,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSection {
    pub service: Service,
    pub groups: Vec<TeamGroup>,
}

/// The complete display board for one cycle. Empty sections are omitted;
/// an empty board is the consumer's "schedule unavailable" signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamBoard {
    pub sections: Vec<TeamSection>,
}

impl TeamBoard {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, service: Service) -> Option<&TeamSection> {
        self.sections.iter().find(|s| s.service == service)
    }
}

/// Assemble the final board: Pit, Baker, Churchill, Thoracic, Vascular,
/// Pediatrics, Transplant, only non-empty groups, deterministic member order.
pub fn aggregate(board: RosterBoard) -> TeamBoard {
    let RosterBoard {
        baker,
        churchill,
        pit,
        thoracic,
        vascular,
        pediatrics,
        transplant,
        breast,
    } = board;

    let sections = [
        day_night_section(Service::Pit, pit),
        baker_section(baker, breast),
        churchill_section(churchill),
        day_night_section(Service::Thoracic, thoracic),
        day_night_section(Service::Vascular, vascular),
        day_night_section(Service::Pediatrics, pediatrics),
        day_night_section(Service::Transplant, transplant),
    ];

    TeamBoard {
        sections: sections.into_iter().flatten().collect(),
    }
}

fn day_night_section(service: Service, board: DayNightBoard) -> Option<TeamSection> {
    let mut groups = Vec::new();
    if !board.day.is_empty() {
        groups.push(TeamGroup::day("Day", board.day));
    }
    if !board.night.is_empty() {
        groups.push(TeamGroup::night("Night", board.night));
    }
    section(service, groups)
}

fn baker_section(
    mut board: BakerBoard,
    breast: Option<ClassifiedMember>,
) -> Option<TeamSection> {
    let mut groups = Vec::new();

    if board.weekend_mode {
        if !board.weekend_day.is_empty() {
            board
                .weekend_day
                .sort_by_key(|m| rules::weekend_priority(&m.display_role));
            groups.push(TeamGroup::day("Baker Day", board.weekend_day));
        }
    } else {
        board.teams.sort_by_key(|(key, _)| team_sort_key(key));
        for (key, mut members) in board.teams {
            members.sort_by_key(|m| !role_contains(m, &["chief"]));
            groups.push(TeamGroup::day(format!("Baker {key}"), members));
        }
        if let Some(member) = breast {
            groups.push(TeamGroup::day("Breast", vec![member]));
        }
    }

    if !board.overnight.is_empty() {
        board.overnight.sort_by_key(|m| !role_contains(m, &["boss"]));
        groups.push(TeamGroup::night("Baker Overnight", board.overnight));
    }

    section(Service::Baker, groups)
}

fn churchill_section(board: ChurchillBoard) -> Option<TeamSection> {
    let ChurchillBoard {
        red,
        white,
        green,
        mut overnight,
        on_call_team,
    } = board;

    // A physician listed under two overlapping overnight labels counts once.
    let mut seen: HashSet<(String, String)> = HashSet::new();
    overnight.retain(|m| seen.insert((m.name.clone(), m.time.clone())));

    let mut groups = Vec::new();
    for (name, mut members) in [
        ("Red", red),
        ("White", white),
        ("Green", green),
        ("Overnight", overnight),
    ] {
        if members.is_empty() {
            continue;
        }
        members.sort_by_key(|m| !role_contains(m, &["senior", "chief"]));
        let on_call = on_call_team
            .as_deref()
            .is_some_and(|team| team.eq_ignore_ascii_case(name));
        groups.push(TeamGroup {
            title: format!("Churchill {name}"),
            night: name == "Overnight",
            on_call,
            members,
        });
    }

    section(Service::Churchill, groups)
}

fn section(service: Service, groups: Vec<TeamGroup>) -> Option<TeamSection> {
    if groups.is_empty() {
        None
    } else {
        Some(TeamSection { service, groups })
    }
}

fn role_contains(member: &ClassifiedMember, keywords: &[&str]) -> bool {
    let lower = member.source_role.to_lowercase();
    keywords.iter().any(|kw| lower.contains(kw))
}

/// Numeric team id ascending; on ties the bare number sorts before 'A',
/// which sorts before 'B'.
fn team_sort_key(key: &str) -> (u32, u8) {
    let digits: String = key.chars().take_while(|c| c.is_ascii_digit()).collect();
    let number = digits.parse().unwrap_or(u32::MAX);
    let suffix = match key.chars().find(|c| c.is_ascii_alphabetic()) {
        Some('A') => 1,
        Some('B') => 2,
        _ => 0,
    };
    (number, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_roster;
    use crate::parse::{MemberRecord, RoleBuckets};

    fn buckets(rows: &[(&str, &str, &str)]) -> RoleBuckets {
        let mut buckets = RoleBuckets::new();
        for (name, role, time) in rows {
            buckets.push(
                role,
                MemberRecord {
                    name: name.to_string(),
                    role: role.to_string(),
                    time: time.to_string(),
                },
            );
        }
        buckets
    }

    fn board(rows: &[(&str, &str, &str)]) -> TeamBoard {
        aggregate(classify_roster(&buckets(rows)))
    }

    #[test]
    fn baker_teams_sort_numerically_with_a_before_b() {
        let board = board(&[
            ("Dr. J", "Baker 10 Chief", "0700-1900"),
            ("Dr. B", "Baker 2B Chief", "0700-1900"),
            ("Dr. A", "Baker 2A Chief", "0700-1900"),
            ("Dr. O", "Baker 1 Chief", "0700-1900"),
        ]);
        let titles: Vec<_> = board
            .section(Service::Baker)
            .unwrap()
            .groups
            .iter()
            .map(|g| g.title.as_str())
            .collect();
        assert_eq!(titles, ["Baker 1", "Baker 2A", "Baker 2B", "Baker 10"]);
    }

    #[test]
    fn baker_chief_leads_each_weekday_team() {
        let board = board(&[
            ("Dr. I", "Baker 3 Intern", "0700-1900"),
            ("Dr. C", "Baker 3 Chief", "0700-1900"),
        ]);
        let team = &board.section(Service::Baker).unwrap().groups[0];
        let names: Vec<_> = team.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Dr. C", "Dr. I"]);
    }

    #[test]
    fn weekend_mode_emits_one_day_card_in_priority_order() {
        let board = board(&[
            ("Dr. S", "Baker Weekend Intern Short", "0700-1200"),
            ("Dr. U", "Baker Weekend Utility", "0700-1900"),
            ("Dr. O", "Baker Weekend On Call", "0700-1900"),
            ("Dr. L", "Baker Weekend Intern Long", "0700-1900"),
            ("Dr. R", "Baker Weekend Rounding", "0700-1900"),
            ("Dr. C", "Baker 4 Chief", "0700-1900"),
            ("Dr. X", "Breast", "0700-1900"),
        ]);
        let groups = &board.section(Service::Baker).unwrap().groups;
        // Numbered teams and Breast are suppressed in the weekend layout.
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title, "Baker Day");
        let roles: Vec<_> = groups[0]
            .members
            .iter()
            .map(|m| m.display_role.as_str())
            .collect();
        assert_eq!(
            roles,
            [
                "On Call Senior",
                "Rounding Senior",
                "Long Intern",
                "Short Intern",
                "Baker Weekend Utility"
            ]
        );
    }

    #[test]
    fn boss_leads_the_baker_overnight_card() {
        let board = board(&[
            ("Dr. N", "Baker Night Float", "1900-0700"),
            ("Dr. B", "Baker BOSS", "1900-0700"),
        ]);
        let groups = &board.section(Service::Baker).unwrap().groups;
        let overnight = groups.last().unwrap();
        assert!(overnight.night);
        assert_eq!(overnight.members[0].display_role, "BOSS");
        assert_eq!(overnight.members[1].name, "Dr. N");
    }

    #[test]
    fn breast_follows_the_numbered_teams_on_weekdays() {
        let board = board(&[
            ("Dr. C", "Baker 1 Chief", "0700-1900"),
            ("Dr. X", "Breast", "0700-1900"),
        ]);
        let titles: Vec<_> = board
            .section(Service::Baker)
            .unwrap()
            .groups
            .iter()
            .map(|g| g.title.as_str())
            .collect();
        assert_eq!(titles, ["Baker 1", "Breast"]);
    }

    #[test]
    fn churchill_emits_non_empty_teams_in_fixed_order() {
        let board = board(&[
            ("Dr. G", "Churchill Green Intern", "0700-1900"),
            ("Dr. R", "Churchill Red Senior", "0700-1900"),
            ("Dr. N", "Churchill Night", "1900-0700"),
        ]);
        let titles: Vec<_> = board
            .section(Service::Churchill)
            .unwrap()
            .groups
            .iter()
            .map(|g| g.title.as_str())
            .collect();
        assert_eq!(
            titles,
            ["Churchill Red", "Churchill Green", "Churchill Overnight"]
        );
    }

    #[test]
    fn churchill_overnight_dedupes_by_name_and_time() {
        let board = board(&[
            ("Dr. N", "Churchill Night", "1900-0700"),
            ("Dr. N", "CNF", "1900-0700"),
            ("Dr. N", "CNF", "0700-1900"),
        ]);
        let overnight = board
            .section(Service::Churchill)
            .unwrap()
            .groups
            .last()
            .unwrap()
            .members
            .clone();
        // Same name+time collapses; a different time is a distinct entry.
        assert_eq!(overnight.len(), 2);
    }

    #[test]
    fn churchill_senior_sorts_ahead_and_badge_lands_on_named_team() {
        let board = board(&[
            ("Dr. I", "Churchill White Intern", "0700-1900"),
            ("Dr. S", "Churchill White Senior", "0700-1900"),
            ("white", "Churchill Team On Call", "0700-1900"),
        ]);
        let white = &board.section(Service::Churchill).unwrap().groups[0];
        assert_eq!(white.title, "Churchill White");
        assert!(white.on_call);
        assert_eq!(white.members[0].name, "Dr. S");
    }

    #[test]
    fn day_night_families_emit_only_non_empty_cards() {
        let board = board(&[("Dr. A", "Pedi Night Senior", "1900-0700")]);
        let groups = &board.section(Service::Pediatrics).unwrap().groups;
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title, "Night");
        assert!(groups[0].night);
    }

    #[test]
    fn empty_roster_is_the_unavailable_signal() {
        assert!(board(&[]).is_empty());
    }

    #[test]
    fn team_sort_key_handles_bare_and_suffixed_ids() {
        let mut keys = vec!["10", "2B", "2", "2A", "1"];
        keys.sort_by_key(|k| team_sort_key(k));
        assert_eq!(keys, ["1", "2", "2A", "2B", "10"]);
    }
}
