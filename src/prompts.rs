//! Prompt templates for the narrative analysis model.
//!
//! Each instrument gets its own framing; both ask for a Markdown report
//! with one heading per section.

use crate::instruments::{Instrument, TraitLabel};
use crate::scoring::ScoreVector;

const DISC_SECTIONS: &str = r#"The analysis should include:
1.  **Primary Profile:** A summary of the primary personality type (the one with the highest score). If two scores are very close, describe the blend.
2.  **Key Strengths:** A bulleted list of key strengths associated with this profile.
3.  **Potential Challenges:** A bulleted list of potential areas for growth or challenges.
4.  **Interaction Style:** How this personality type tends to interact with others in a team or social setting.
5.  **Summary:** A brief, encouraging closing statement."#;

const HERRMANN_SECTIONS: &str = r#"The analysis should include:
1.  **Primary Thinking Style:** A summary of the primary quadrant (the one with the highest score). If scores are close, describe the blend of styles.
2.  **Key Characteristics:** A bulleted list of key characteristics and preferences associated with this profile.
3.  **Potential Blind Spots:** A bulleted list of potential challenges or areas where this thinking style might be less comfortable.
4.  **Problem-Solving Approach:** How this thinking style typically approaches problems and decisions.
5.  **Summary:** A brief, empowering closing statement about leveraging their unique cognitive strengths."#;

const FORMAT_INSTRUCTION: &str =
    "Format the entire response in Markdown. Use headings for each section.";

/// Build the analysis prompt for `scores`.
pub fn analysis_prompt(scores: &ScoreVector) -> String {
    let listed = scores
        .iter()
        .map(|(label, value)| format!("{}: {}", score_name(label), value))
        .collect::<Vec<_>>()
        .join(", ");

    match scores.instrument() {
        Instrument::Disc => format!(
            "You are an expert in DISC personality assessments. Based on the following scores ({}), please provide a detailed personality analysis.\n\n{}\n\n{}",
            listed, DISC_SECTIONS, FORMAT_INSTRUCTION
        ),
        Instrument::Herrmann => format!(
            "You are an expert in the Herrmann Brain Dominance Instrument (HBDI). Based on the following scores ({}), please provide a detailed analysis of the user's thinking style.\n\n{}\n\n{}",
            listed, HERRMANN_SECTIONS, FORMAT_INSTRUCTION
        ),
    }
}

fn score_name(label: TraitLabel) -> String {
    match label.colour() {
        Some(colour) => format!("{}/{}", label.name(), colour),
        None => label.name().to_string(),
    }
}
