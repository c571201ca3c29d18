use serde::{Deserialize, Serialize};
use srsforge_document::ExpandedDocument;

/// The request body of `POST /api/generate-srs`.
///
/// Each section is flattened into `Label: value` lines joined by newlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePayload {
    pub cover: String,
    pub introduction: String,
    pub general_description: String,
    pub specific_requirements: String,
}

impl RemotePayload {
    pub fn from_document(doc: &ExpandedDocument) -> Self {
        let cover = doc.cover();
        let intro = doc.introduction();
        let general = doc.general_description();
        let specific = doc.specific_requirements();

        let definitions = intro
            .definitions()
            .iter()
            .map(|d| format!("{} = {}", d.term(), d.meaning()))
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            cover: block(&[
                ("Title", cover.title()),
                ("Project", cover.project_name()),
                ("Description", cover.description()),
                ("Members", &cover.members().join(", ")),
                ("Date", &cover.display_date()),
            ]),
            introduction: block(&[
                ("Purpose", intro.purpose()),
                ("Scope", intro.scope()),
                ("Definitions", &definitions),
                ("References", intro.references()),
            ]),
            general_description: block(&[
                ("Product Perspective", general.product_perspective()),
                ("Product Functions", general.product_functions()),
                ("User Characteristics", general.user_characteristics()),
                ("Constraints", general.general_constraints()),
                ("Assumptions/Dependencies", general.assumptions_dependencies()),
            ]),
            specific_requirements: block(&[
                ("Functional Requirements", &specific.functional_requirements().join(" | ")),
                ("External Interfaces", specific.external_interface_requirements()),
                (
                    "Non-Functional Requirements",
                    &specific.non_functional_requirements().join(" | "),
                ),
            ]),
        }
    }
}

fn block(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use srsforge_document::{RawInput, expand_on};

    fn payload() -> RemotePayload {
        let raw = RawInput::new("Demo", "Tracks things.", vec!["Ann".into(), "Bo".into()]).unwrap();
        RemotePayload::from_document(&expand_on(&raw, NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()))
    }

    #[test]
    fn cover_lines_are_labeled_and_unindented() {
        let cover = payload().cover;
        let lines: Vec<&str> = cover.lines().collect();
        assert_eq!(lines[0], "Title: Software Requirements Specification (SRS)");
        assert_eq!(lines[1], "Project: Demo");
        assert_eq!(lines[3], "Members: Ann, Bo");
        assert_eq!(lines[4], "Date: 3/9/2025");
        assert!(!cover.starts_with(char::is_whitespace));
    }

    #[test]
    fn lists_use_their_own_separators() {
        let payload = payload();
        assert!(payload.introduction.contains("Definitions: SRS = "));
        assert!(payload.introduction.contains("; DBMS = Database Management System; KYC = "));

        let functional = payload.specific_requirements.lines().next().unwrap();
        assert!(functional.starts_with("Functional Requirements: FR-1:"));
        assert_eq!(functional.matches(" | ").count(), 4);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(payload()).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 4);
        for key in ["cover", "introduction", "generalDescription", "specificRequirements"] {
            assert!(json[key].is_string(), "missing {key}");
        }
    }
}
