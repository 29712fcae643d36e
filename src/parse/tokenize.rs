// src/parse/tokenize.rs

/// Trim whitespace + strip outer quotes if present.
pub fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Split one raw line into trimmed, quote-stripped fields.
///
/// Commas inside double-quoted spans do not split. An unbalanced quote means
/// the line does not match the expected pattern and yields no fields at all;
/// minimum-count enforcement is the caller's, per feed schema.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut raw: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                field.push(ch);
            }
            ',' if !in_quotes => raw.push(std::mem::take(&mut field)),
            _ => field.push(ch),
        }
    }
    if in_quotes {
        return Vec::new();
    }
    raw.push(field);

    raw.iter().map(|f| clean_field(f)).collect()
}
