// src/parse/roster.rs

use tracing::{debug, trace};

use crate::parse::tokenize::split_fields;
use crate::parse::{MemberRecord, RoleBuckets};
use crate::schema::{FeedKind, HEADER_LINES};

/// Header label that sometimes survives past the fixed skip when the feed
/// pads its preamble differently.
const HEADER_ROLE_LABEL: &str = "Assignment name";

/// Parse the general roster feed into role-keyed buckets.
///
/// The first five lines are always metadata and discarded. Rows that are
/// blank, too short, or missing a name or role are skipped without aborting
/// the rest of the feed.
pub fn parse_roster(text: &str) -> RoleBuckets {
    let schema = FeedKind::Roster.schema();
    let mut buckets = RoleBuckets::new();

    for line in text.lines().skip(HEADER_LINES) {
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(line);
        if fields.len() < schema.min_fields {
            trace!(fields = fields.len(), "skipping short roster row");
            continue;
        }

        let name = &fields[schema.name_pos];
        let role = &fields[schema.role_pos];
        if name.is_empty() || role.is_empty() || role == HEADER_ROLE_LABEL {
            continue;
        }

        let start = schema.start_pos.map(|p| fields[p].as_str()).unwrap_or("");
        let end = schema.end_pos.map(|p| fields[p].as_str()).unwrap_or("");
        buckets.push(
            role,
            MemberRecord {
                name: name.clone(),
                role: role.clone(),
                time: format!("{start}-{end}"),
            },
        );
    }

    debug!(roles = buckets.len(), "parsed roster feed");
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAD: &str = "meta\nmeta\nmeta\nmeta\nmeta\n";

    fn feed(rows: &[&str]) -> String {
        format!("{PAD}{}", rows.join("\n"))
    }

    #[test]
    fn short_documents_yield_nothing() {
        for text in ["", "a\nb", "a\nb\nc\nd\ne"] {
            assert!(parse_roster(text).is_empty());
        }
    }

    #[test]
    fn header_block_is_discarded_even_when_row_shaped() {
        // Five header lines that would individually tokenize fine.
        let text = "\"x\",\"\",\"\",\"y\",\"\",\"\",\"\",\"1\",\"2\"\n".repeat(5);
        assert!(parse_roster(&text).is_empty());
    }

    #[test]
    fn time_is_the_literal_tokens_joined() {
        let text = feed(&[r#""Dr. X","","","Churchill Night","","","","0700","1900""#]);
        let buckets = parse_roster(&text);
        let members = buckets.get("Churchill Night").unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Dr. X");
        assert_eq!(members[0].time, "0700-1900");
    }

    #[test]
    fn residual_header_rows_and_blanks_are_skipped() {
        let text = feed(&[
            r#""","","","Baker 2 Chief","","","","0700","1900""#,
            r#""Dr. A","","","","","","","0700","1900""#,
            r#""Dr. B","","","Assignment name","","","","0700","1900""#,
            "   ",
            r#""Dr. C","","","Baker 2 Chief","","","","0700","1900""#,
        ]);
        let buckets = parse_roster(&text);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets.get("Baker 2 Chief").unwrap()[0].name, "Dr. C");
    }

    #[test]
    fn rows_under_nine_fields_are_skipped() {
        let text = feed(&[r#""Dr. A","","","Baker 2","","","","0700""#]);
        assert!(parse_roster(&text).is_empty());
    }

    #[test]
    fn members_keep_feed_row_order_within_a_label() {
        let text = feed(&[
            r#""Dr. A","","","Pit Senior","","","","0700","1900""#,
            r#""Dr. B","","","Pit Senior","","","","1900","0700""#,
        ]);
        let buckets = parse_roster(&text);
        let names: Vec<_> = buckets
            .get("Pit Senior")
            .unwrap()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, ["Dr. A", "Dr. B"]);
    }

    #[test]
    fn parsing_twice_is_structurally_equal() {
        let text = feed(&[
            r#""Dr. A","","","Baker 1 Chief","","","","0700","1900""#,
            r#""Dr. B","","","Pit Senior","","","","1900","0700""#,
        ]);
        assert_eq!(parse_roster(&text), parse_roster(&text));
    }
}
