//! Extraction of structured recommendations from model output.
//!
//! Models wrap their JSON in markdown fences more often than not, so
//! extraction first looks for a ```json fence, then a bare ``` fence,
//! and finally falls back to the raw text.
//!
//! The two public entry points deliberately diverge on decode failure:
//! [`parse_records`] (questionnaire pipeline) degrades to no matches,
//! while [`render_display`] (chat pipeline) passes the model's prose
//! through unchanged so a conversational answer is never discarded.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use tracing::warn;

use campusmatch_types::{CollegeRecord, NO_INPUT_MESSAGE, NO_MATCHES_MESSAGE};

/// Extract the JSON payload from possibly-fenced model output.
///
/// Precedence: a ```json fence, then any ``` fence, then the raw text.
/// An unterminated fence yields everything after the opener.
pub fn extract_json_block(raw: &str) -> &str {
    if let Some(start) = raw.find("```json") {
        let rest = &raw[start + 7..];
        let end = rest.find("```").unwrap_or(rest.len());
        return rest[..end].trim();
    }
    if let Some(start) = raw.find("```") {
        let rest = &raw[start + 3..];
        let end = rest.find("```").unwrap_or(rest.len());
        return rest[..end].trim();
    }
    raw.trim()
}

/// Parse model output into college records.
///
/// Decode failure is downgraded to an empty list: the questionnaire
/// pipeline treats it as "no matches" rather than an error.
pub fn parse_records(raw: &str) -> Vec<CollegeRecord> {
    let payload = extract_json_block(raw);
    match serde_json::from_str::<Vec<CollegeRecord>>(payload) {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, chars = payload.len(), "model output did not decode as records");
            Vec::new()
        }
    }
}

/// Render model output as display-ready text.
///
/// Decodable record arrays become an aligned text table; empty arrays
/// and known sentinel echoes become the no-matches message; anything
/// else is returned verbatim.
pub fn render_display(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NO_MATCHES_MESSAGE || trimmed == NO_INPUT_MESSAGE {
        return NO_MATCHES_MESSAGE.to_string();
    }

    let payload = extract_json_block(raw);
    match serde_json::from_str::<Vec<CollegeRecord>>(payload) {
        Ok(records) if records.is_empty() => NO_MATCHES_MESSAGE.to_string(),
        Ok(records) => records_table(&records),
        Err(_) => raw.to_string(),
    }
}

/// Format records as an aligned text table, columns taken from the
/// first record's key order.
pub fn records_table(records: &[CollegeRecord]) -> String {
    let Some(first) = records.first() else {
        return NO_MATCHES_MESSAGE.to_string();
    };

    let columns: Vec<&String> = first.keys().collect();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(columns.iter().map(|c| c.as_str()));

    for record in records {
        table.add_row(columns.iter().map(|col| match record.get(col.as_str()) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }));
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FENCED: &str = "Here you go:\n```json\n[{\"College\": \"MIT Pune\", \"Rank\": 34}]\n```\nHope that helps!";

    #[test]
    fn extracts_json_fence() {
        assert_eq!(
            extract_json_block(FENCED),
            "[{\"College\": \"MIT Pune\", \"Rank\": 34}]"
        );
    }

    #[test]
    fn extracts_bare_fence() {
        let raw = "```\n[1, 2]\n```";
        assert_eq!(extract_json_block(raw), "[1, 2]");
    }

    #[test]
    fn json_fence_wins_over_bare_fence() {
        let raw = "```\nignored\n```\n```json\n[]\n```";
        assert_eq!(extract_json_block(raw), "[]");
    }

    #[test]
    fn unterminated_fence_takes_rest() {
        let raw = "```json\n[{\"College\": \"X\"}]";
        assert_eq!(extract_json_block(raw), "[{\"College\": \"X\"}]");
    }

    #[test]
    fn unfenced_text_passes_through() {
        assert_eq!(extract_json_block("  [1]  "), "[1]");
    }

    #[test]
    fn parse_records_success() {
        let records = parse_records(FENCED);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["College"], "MIT Pune");
        assert_eq!(records[0]["Rank"], 34);

        // The same array without a fence decodes identically.
        let bare = parse_records("[{\"College\": \"MIT Pune\", \"Rank\": 34}]");
        assert_eq!(bare, records);
    }

    #[test]
    fn parse_records_failure_is_empty() {
        assert!(parse_records("Sorry, I can't help with that.").is_empty());
        assert!(parse_records("```json\n{not valid\n```").is_empty());
    }

    #[test]
    fn parse_records_object_instead_of_array_is_empty() {
        assert!(parse_records("{\"College\": \"X\"}").is_empty());
    }

    #[test]
    fn render_display_table_for_records() {
        let out = render_display(FENCED);
        assert!(out.contains("College"));
        assert!(out.contains("MIT Pune"));
        assert!(out.contains("34"));
    }

    #[test]
    fn render_display_empty_array_is_no_matches() {
        assert_eq!(render_display("```json\n[]\n```"), NO_MATCHES_MESSAGE);
    }

    #[test]
    fn render_display_blank_is_no_matches() {
        assert_eq!(render_display("   "), NO_MATCHES_MESSAGE);
        assert_eq!(render_display(NO_MATCHES_MESSAGE), NO_MATCHES_MESSAGE);
    }

    #[test]
    fn render_display_prose_passes_through_unchanged() {
        let prose = "Pune has several strong options for CSE aspirants.";
        assert_eq!(render_display(prose), prose);
    }

    #[test]
    fn table_preserves_first_record_column_order() {
        let records = parse_records(
            "```json\n[{\"College\": \"A\", \"Location\": \"Pune\", \"Rank\": 1}]\n```",
        );
        let out = records_table(&records);
        let college_pos = out.find("College").unwrap();
        let location_pos = out.find("Location").unwrap();
        assert!(college_pos < location_pos);
    }
}
