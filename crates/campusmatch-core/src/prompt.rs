//! Prompt construction.
//!
//! Both interaction modes pin the model to the same contract: analyze
//! the supplied dataset, apply location-proximity fallback, and answer
//! with a JSON array of college records using the canonical field
//! names. The wizard variant carries a small dataset sample; the chat
//! variant carries the whole dataset plus worked examples.

use campusmatch_types::Session;

/// The exact field list the model is instructed to emit, matching the
/// canonical table columns.
const OUTPUT_FIELDS: &str = "College, Type, Location, Rank, Branches, \
     Highest Package (Lakhs), Average Package (Lakhs), \
     Annual Tuition Fees (Lakhs), Annual Hostel Fees (Lakhs), \
     Student Satisfaction (/10), Hostel, Facilities, Placements, \
     Scholarships, Exams, Cutoff, 12th Marks Required (%)";

/// Build the user-turn prompt from collected questionnaire answers.
///
/// Blank (skipped) answers are omitted entirely, so the model only
/// sees preferences the student actually expressed.
pub fn preference_prompt(session: &Session) -> String {
    let user_info: Vec<String> = session
        .responses
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| format!("- {key}: {value}"))
        .collect();

    format!(
        "Student preferences:\n{}\n\nBased on this information, recommend suitable colleges in India.",
        user_info.join("\n")
    )
}

/// System prompt for the questionnaire mode, carrying a dataset sample.
pub fn wizard_system_prompt(sample_json: &str) -> String {
    format!(
        "You are a helpful college recommendation assistant.\n\
         \n\
         You are provided with a list of colleges and their attributes. Your job is to \
         analyze the student's preferences and return the best-matching colleges in a \
         structured JSON format.\n\
         \n\
         - The dataset has a field named \"Location\", which refers to the city, town, or \
         region where the college is situated.\n\
         - When the student mentions a location, match it against this \"Location\" field \
         in the dataset.\n\
         - Prioritize colleges located in the exact city or town mentioned by the student \
         (e.g., if the student enters 'Jaipur', first look for colleges in Jaipur).\n\
         - If no or very few colleges match that exact location, suggest colleges from \
         nearby or neighboring cities within the same state or geographical region.\n\
         - Do not suggest colleges that are geographically distant unless no reasonable \
         nearby matches are available.\n\
         - Apply geographic reasoning to recognize districts, towns, or regions even if \
         not exact matches.\n\
         - Understand synonyms, abbreviations, and alternate names for branches (e.g., \
         CSE = Computer Science), and interpret vague or misspelled inputs appropriately.\n\
         - Ensure fairness in recommendation: select colleges based on match quality, not \
         just rank. Consider preferences such as location, branch, rank, and cost.\n\
         \n\
         Output must be a JSON array only, with these exact fields per object:\n\
         {OUTPUT_FIELDS}\n\
         \n\
         - Use 2 decimal places for all monetary values, expressed in lakhs (INR).\n\
         - Only use the dataset provided below to generate results.\n\
         \n\
         College Dataset:\n\
         {sample_json}"
    )
}

/// System prompt for the freeform chat mode, carrying the full dataset
/// and a worked example.
pub fn chat_system_prompt(dataset_json: &str) -> String {
    format!(
        "You are a helpful college recommendation assistant.\n\
         \n\
         Your task is to analyze the student's message and return the best-matching \
         colleges in a structured JSON format.\n\
         \n\
         Instructions:\n\
         - You are provided with a list of colleges and their attributes in JSON.\n\
         - Recommend colleges that match the student's city or town exactly.\n\
         - If none are found, look for colleges in nearby cities within the same state.\n\
         - If still none are found, return top colleges in the state or region as a \
         fallback.\n\
         - Be flexible with misspellings, vague, or colloquial location names.\n\
         - Weigh relevance to branch, location proximity, tuition cost, and satisfaction, \
         not just rank.\n\
         - Return the output strictly as a JSON array of objects, with no extra \
         explanation or intro text, using these exact fields per object:\n\
         {OUTPUT_FIELDS}\n\
         \n\
         Example:\n\
         Student message: \"I want colleges in Pune for computer science.\"\n\
         Expected output:\n\
         ```json\n\
         [\n\
           {{\n\
             \"College\": \"MIT Pune\",\n\
             \"Type\": \"Private\",\n\
             \"Location\": \"Pune\",\n\
             \"Rank\": 34,\n\
             \"Branches\": \"Computer Science, IT\",\n\
             \"Highest Package (Lakhs)\": 18.0,\n\
             \"Average Package (Lakhs)\": 6.2,\n\
             \"Annual Tuition Fees (Lakhs)\": 6.5,\n\
             \"Annual Hostel Fees (Lakhs)\": 1.2,\n\
             \"Student Satisfaction (/10)\": 8.2,\n\
             \"Hostel\": \"Available\",\n\
             \"Facilities\": \"Library, Labs, Wi-Fi\",\n\
             \"Placements\": \"Strong in CS\",\n\
             \"Scholarships\": \"Merit-based and Need-based\",\n\
             \"Exams\": \"JEE, MHT-CET\",\n\
             \"Cutoff\": 88,\n\
             \"12th Marks Required (%)\": 75\n\
           }}\n\
         ]\n\
         ```\n\
         \n\
         Now analyze the following college dataset and respond in the above format:\n\
         {dataset_json}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(answers: &[(&str, &str)]) -> Session {
        let mut session = Session::new();
        for (key, value) in answers {
            session.record_answer(*key, *value);
        }
        session
    }

    #[test]
    fn preference_prompt_lists_answers_as_bullets() {
        let session = session_with(&[
            ("location", "Pune"),
            ("branch", "CSE"),
            ("12th Marks Required (%)", "85"),
        ]);
        let prompt = preference_prompt(&session);
        assert!(prompt.contains("- location: Pune"));
        assert!(prompt.contains("- branch: CSE"));
        assert!(prompt.contains("- 12th Marks Required (%): 85"));
        assert!(prompt.contains("recommend suitable colleges in India"));
    }

    #[test]
    fn preference_prompt_omits_blank_answers() {
        let session = session_with(&[("location", "Pune"), ("branch", ""), ("marks", "  ")]);
        let prompt = preference_prompt(&session);
        assert!(prompt.contains("- location: Pune"));
        assert!(!prompt.contains("- branch"));
        assert!(!prompt.contains("- marks"));
    }

    #[test]
    fn wizard_prompt_embeds_sample_and_fields() {
        let prompt = wizard_system_prompt(r#"[{"College":"MIT Pune"}]"#);
        assert!(prompt.contains(r#"[{"College":"MIT Pune"}]"#));
        assert!(prompt.contains("Highest Package (Lakhs)"));
        assert!(prompt.contains("12th Marks Required (%)"));
        assert!(prompt.contains("exact city or town"));
    }

    #[test]
    fn chat_prompt_has_fallback_ladder_and_example() {
        let prompt = chat_system_prompt("[]");
        assert!(prompt.contains("nearby cities within the same state"));
        assert!(prompt.contains("state or region as a fallback"));
        assert!(prompt.contains("```json"));
        assert!(prompt.contains("MIT Pune"));
        assert!(prompt.ends_with("[]"));
    }

    #[test]
    fn chat_prompt_demands_array_only_output() {
        let prompt = chat_system_prompt("[]");
        assert!(prompt.contains("strictly as a JSON array"));
        assert!(prompt.contains("no extra explanation"));
    }
}
