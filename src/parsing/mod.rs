// src/parsing/mod.rs
//! Field parsing — deriving fixed-shape structured fields from the model's
//! free-text answer via pattern matching.
//!
//! The prompt asks the model for labeled subject-line options and an email
//! body between a fixed salutation and a fixed closing phrase. The parser
//! holds the other side of that bargain: collect what matches, tolerate what
//! doesn't. A missing marker yields empty fields, never an error.

use crate::constants::{BODY_CLOSING, BODY_OPENING, NAME_PLACEHOLDER, SUBJECT_SLOTS};
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches one subject-option line, e.g. `Subject Option 2: Quick question`
/// or `Subject 2: Quick question`. The keywords are case-sensitive; the
/// captured text runs to end-of-line.
static SUBJECT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Subject (?:Option )?(\d+): (.*)").expect("subject pattern is valid"));

/// Captures the email body between the salutation and the closing phrase
/// (or end-of-text). `(?s)` lets the body span lines.
static BODY_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?s){}(.*?)(?:{}|$)",
        regex::escape(BODY_OPENING),
        regex::escape(BODY_CLOSING)
    ))
    .expect("body pattern is valid")
});

/// Fixed-shape result of parsing a copy-generation answer.
///
/// `subjects` always holds exactly [`SUBJECT_SLOTS`] entries, blank-padded:
/// a fixed-arity contract the output columns rely on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFields {
    pub subjects: Vec<String>,
    pub body: String,
}

/// Result of parsing a research answer: the whole text, untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchFields {
    pub research_text: String,
}

/// Parsed fields for either run mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedFields {
    Copy(CopyFields),
    Research(ResearchFields),
}

/// Parses subject-line options and an email body out of the model's answer.
///
/// Subjects are collected in document order, NOT reordered by their numeric
/// label: the model occasionally misnumbers its options, and document order
/// is what a human skimming the answer would read.
pub fn parse_copy(text: &str) -> CopyFields {
    let mut subjects: Vec<String> = SUBJECT_LINE
        .captures_iter(text)
        .take(SUBJECT_SLOTS)
        .map(|captures| captures[2].trim().to_string())
        .collect();

    subjects.resize(SUBJECT_SLOTS, String::new());

    let body = BODY_SPAN
        .captures(text)
        .map(|captures| captures[1].trim().to_string())
        .unwrap_or_default();

    log::debug!(
        "Parsed {} subject(s) and a body of {} chars",
        subjects.iter().filter(|s| !s.is_empty()).count(),
        body.len()
    );

    CopyFields { subjects, body }
}

/// Research answers carry no markers; the entire text is the result.
pub fn parse_research(text: &str) -> ResearchFields {
    ResearchFields {
        research_text: text.to_string(),
    }
}

/// Replaces every literal `[Target]` in the body with the contact's first
/// name, the token before the first whitespace in the full name. With no
/// name available the placeholder stays literal, so a human editing the
/// sheet can spot the rows that still need attention.
pub fn personalize(body: &str, contact_name: &str) -> String {
    match contact_name.split_whitespace().next() {
        Some(first_name) => body.replace(NAME_PLACEHOLDER, first_name),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn two_subjects_are_blank_padded_to_four() {
        let fields = parse_copy("Subject 1: A\nSubject 2: B");
        assert_eq!(fields.subjects, vec!["A", "B", "", ""]);
    }

    #[test]
    fn option_keyword_is_accepted() {
        let fields = parse_copy("Subject Option 1: Quick intro\nSubject Option 2: Hello");
        assert_eq!(fields.subjects[0], "Quick intro");
        assert_eq!(fields.subjects[1], "Hello");
    }

    #[test]
    fn five_subjects_truncate_to_first_four_in_document_order() {
        let text = "Subject 9: first\nSubject 1: second\nSubject 2: third\n\
                    Subject 3: fourth\nSubject 4: fifth";
        let fields = parse_copy(text);
        // Document order wins over the numeric labels.
        assert_eq!(fields.subjects, vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn subject_text_is_trimmed() {
        let fields = parse_copy("Subject 1:   padded text   \nnext line");
        assert_eq!(fields.subjects[0], "padded text");
    }

    #[test]
    fn body_stops_before_closing_phrase_and_is_trimmed() {
        let text = "Hey [Target], Thanks for chatting.\nCall me anytime";
        let fields = parse_copy(text);
        assert_eq!(fields.body, "Thanks for chatting.");
    }

    #[test]
    fn body_runs_to_end_of_text_without_closing_phrase() {
        let text = "Subject 1: A\nHey [Target],\nGreat to meet you.\nBest,\nSam";
        let fields = parse_copy(text);
        assert_eq!(fields.body, "Great to meet you.\nBest,\nSam");
    }

    #[test]
    fn missing_salutation_yields_empty_body() {
        let fields = parse_copy("Subject 1: A\nNo greeting here at all.");
        assert_eq!(fields.body, "");
    }

    #[test]
    fn empty_text_yields_all_blank_fields() {
        let fields = parse_copy("");
        assert_eq!(fields.subjects, vec!["", "", "", ""]);
        assert_eq!(fields.body, "");
    }

    #[test]
    fn research_text_passes_through_unmodified() {
        let text = "  Everything the model said,\nexactly as said.  ";
        assert_eq!(parse_research(text).research_text, text);
    }

    #[test]
    fn personalize_uses_first_name_token() {
        let body = "Hi [Target], nice to meet you";
        assert_eq!(personalize(body, "Maria Lopez"), "Hi Maria, nice to meet you");
    }

    #[test]
    fn personalize_replaces_every_occurrence() {
        let body = "[Target], this one's for you, [Target].";
        assert_eq!(
            personalize(body, "Maria Lopez"),
            "Maria, this one's for you, Maria."
        );
    }

    #[test]
    fn personalize_keeps_placeholder_without_a_name() {
        let body = "Hi [Target], nice to meet you";
        assert_eq!(personalize(body, ""), body);
        assert_eq!(personalize(body, "   "), body);
    }
}
