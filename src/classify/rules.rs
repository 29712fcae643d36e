// src/classify/rules.rs
//
// The classification rule set as data. Family membership and display labels
// are ordered substring tables evaluated case-insensitively; changing a rule
// is an edit here, not new classifier code.

use super::Service;

/// One service family and the substrings that claim a raw role label for it.
pub struct FamilyRule {
    pub service: Service,
    pub keywords: &'static [&'static str],
}

/// Every family's test runs against every label; a label may feed more than
/// one family. Do not short-circuit on first match.
pub static FAMILY_RULES: &[FamilyRule] = &[
    FamilyRule {
        service: Service::Baker,
        keywords: &["baker"],
    },
    FamilyRule {
        service: Service::Churchill,
        keywords: &["churchill", "cnf"],
    },
    FamilyRule {
        service: Service::Pit,
        keywords: &["pit"],
    },
    FamilyRule {
        service: Service::Thoracic,
        keywords: &["thoracic"],
    },
    FamilyRule {
        service: Service::Vascular,
        keywords: &["vascular"],
    },
    FamilyRule {
        service: Service::Pediatrics,
        keywords: &["pedi"],
    },
    FamilyRule {
        service: Service::Transplant,
        keywords: &["txp", "burn and transplant"],
    },
];

/// Ordered display-label table: first row whose keywords hit wins.
pub struct LabelRule {
    pub any: &'static [&'static str],
    pub label: &'static str,
}

pub static BAKER_TEAM_LABELS: &[LabelRule] = &[LabelRule {
    any: &["chief"],
    label: "Chief",
}];

pub static BAKER_OVERNIGHT_LABELS: &[LabelRule] = &[LabelRule {
    any: &["boss"],
    label: "BOSS",
}];

/// Weekend roster labels are renamed to standardized display roles; the
/// renamed role doubles as the weekend-day sort key.
pub static BAKER_WEEKEND_RENAMES: &[LabelRule] = &[
    LabelRule {
        any: &["on call"],
        label: "On Call Senior",
    },
    LabelRule {
        any: &["rounding"],
        label: "Rounding Senior",
    },
    LabelRule {
        any: &["intern long"],
        label: "Long Intern",
    },
    LabelRule {
        any: &["intern short"],
        label: "Short Intern",
    },
];

pub static CHURCHILL_LABELS: &[LabelRule] = &[LabelRule {
    any: &["intern"],
    label: "Intern",
}];

pub static PIT_LABELS: &[LabelRule] = &[LabelRule {
    any: &["senior"],
    label: "Senior",
}];

pub static THORACIC_LABELS: &[LabelRule] = &[
    LabelRule {
        any: &["consult"],
        label: "Consult",
    },
    LabelRule {
        any: &["intern"],
        label: "Intern",
    },
    LabelRule {
        any: &["night float"],
        label: "Night Float",
    },
];

pub static PEDIATRICS_LABELS: &[LabelRule] = &[
    LabelRule {
        any: &["senior"],
        label: "Senior",
    },
    LabelRule {
        any: &["intern"],
        label: "Intern",
    },
];

pub static TRANSPLANT_LABELS: &[LabelRule] = &[
    LabelRule {
        any: &["senior"],
        label: "Senior",
    },
    LabelRule {
        any: &["intern"],
        label: "Intern",
    },
    LabelRule {
        any: &["burn and transplant night"],
        label: "Senior",
    },
];

pub static VASCULAR_LABELS: &[LabelRule] = &[
    LabelRule {
        any: &["night float"],
        label: "Night Float",
    },
    LabelRule {
        any: &["consult resident day"],
        label: "Consult",
    },
];

/// Baker labels that route to the overnight card.
pub static BAKER_OVERNIGHT_KEYWORDS: &[&str] = &["night float", "overnight", "boss"];

/// Any Baker label containing one of these flips the whole Baker display
/// into weekend mode.
pub static WEEKEND_KEYWORDS: &[&str] = &["weekend", "holiday"];

/// Churchill labels that route to the overnight card (deduped downstream).
pub static CHURCHILL_OVERNIGHT_KEYWORDS: &[&str] = &["night", "cnf"];

pub static CHURCHILL_COLOR_TEAMS: &[(&str, &str)] =
    &[("red", "Red"), ("white", "White"), ("green", "Green")];

/// Raw label whose first member names the Churchill team currently on call.
pub static CHURCHILL_ON_CALL_LABEL: &str = "churchill team on call";

/// Single-member pass-through team, weekday Baker layout only.
pub static BREAST_LABEL: &str = "Breast";

/// Fixed ordering for the Baker weekend day card; unknown roles sort last.
pub static WEEKEND_ROLE_PRIORITY: &[(&str, u8)] = &[
    ("On Call Senior", 1),
    ("Rounding Senior", 2),
    ("Long Intern", 3),
    ("Short Intern", 4),
];

pub const WEEKEND_PRIORITY_UNKNOWN: u8 = 99;

pub fn contains_any(label_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| label_lower.contains(kw))
}

/// First matching label from an ordered table; `default` of `None` falls back
/// to the raw role text.
pub fn display_label(rules: &[LabelRule], role: &str, default: Option<&'static str>) -> String {
    let lower = role.to_lowercase();
    for rule in rules {
        if contains_any(&lower, rule.any) {
            return rule.label.to_string();
        }
    }
    match default {
        Some(label) => label.to_string(),
        None => role.to_string(),
    }
}

pub fn weekend_priority(display_role: &str) -> u8 {
    WEEKEND_ROLE_PRIORITY
        .iter()
        .find(|(role, _)| *role == display_role)
        .map(|(_, priority)| *priority)
        .unwrap_or(WEEKEND_PRIORITY_UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_tables_are_first_match() {
        // "thoracic night float consult" hits the consult row before the
        // night float row.
        assert_eq!(
            display_label(THORACIC_LABELS, "Thoracic Night Float Consult", None),
            "Consult"
        );
    }

    #[test]
    fn unmatched_labels_fall_back_as_configured() {
        assert_eq!(display_label(PIT_LABELS, "Pit Junior AM", Some("Junior")), "Junior");
        assert_eq!(
            display_label(PEDIATRICS_LABELS, "Pedi Surg", None),
            "Pedi Surg"
        );
    }

    #[test]
    fn weekend_priorities_cover_the_fixed_roles() {
        assert_eq!(weekend_priority("On Call Senior"), 1);
        assert_eq!(weekend_priority("Short Intern"), 4);
        assert_eq!(weekend_priority("Visiting"), WEEKEND_PRIORITY_UNKNOWN);
    }
}
