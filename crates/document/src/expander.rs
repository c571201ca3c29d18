use crate::expanded::{Cover, Definition, ExpandedDocument, GeneralDescription, Introduction, SpecificRequirements};
use crate::raw::RawInput;
use crate::templates;
use chrono::{Local, NaiveDate};

/// Expands `raw` into a full SRS stamped with today's local date.
pub fn expand(raw: &RawInput) -> ExpandedDocument {
    expand_on(raw, Local::now().date_naive())
}

/// Expands `raw` with an explicit generation date.
///
/// Output depends only on the arguments. Blank fields fall back to fixed
/// placeholder text, so expansion cannot fail.
pub fn expand_on(raw: &RawInput, date: NaiveDate) -> ExpandedDocument {
    let name = non_blank_or(raw.project_name(), templates::UNTITLED_PROJECT);
    let description = non_blank_or(raw.description(), templates::NO_DESCRIPTION);

    let mut members: Vec<String> = raw.filtered_members().into_iter().map(str::to_owned).collect();
    if members.is_empty() {
        members.push(templates::NO_MEMBERS.to_string());
    }

    log::debug!("Expanding SRS for '{}' with {} member(s), dated {}", name, members.len(), date);

    ExpandedDocument {
        cover: Cover {
            title: templates::TITLE.to_string(),
            project_name: name.to_string(),
            description: description.to_string(),
            members,
            date,
        },
        introduction: Introduction {
            purpose: templates::purpose(name),
            scope: templates::scope(name, description),
            definitions: templates::DEFINITIONS
                .iter()
                .map(|(term, meaning)| Definition {
                    term: term.to_string(),
                    meaning: meaning.to_string(),
                })
                .collect(),
            references: templates::REFERENCES.to_string(),
        },
        general_description: GeneralDescription {
            product_perspective: templates::product_perspective(name),
            product_functions: templates::PRODUCT_FUNCTIONS.to_string(),
            user_characteristics: templates::USER_CHARACTERISTICS.to_string(),
            general_constraints: templates::GENERAL_CONSTRAINTS.to_string(),
            assumptions_dependencies: templates::ASSUMPTIONS_DEPENDENCIES.to_string(),
        },
        specific_requirements: SpecificRequirements {
            functional_requirements: templates::FUNCTIONAL_REQUIREMENTS.iter().map(|s| s.to_string()).collect(),
            external_interface_requirements: templates::EXTERNAL_INTERFACES.to_string(),
            non_functional_requirements: templates::NON_FUNCTIONAL_REQUIREMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
    }
}

fn non_blank_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    match value.trim() {
        "" => fallback,
        trimmed => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    fn example() -> RawInput {
        RawInput::new(
            "Smart Attendance Management System",
            "A responsive web application to automate college attendance using enrollment numbers, with monthly PDF/XLSX reports and role-based access for students, faculty, and admin.",
            vec!["Vraj Adhia".into(), "John Doe".into(), "Jane Smith".into()],
        )
        .unwrap()
    }

    #[test]
    fn example_project_expands_fully() {
        let doc = expand_on(&example(), date());
        let cover = doc.cover();
        assert_eq!(cover.title(), "Software Requirements Specification (SRS)");
        assert_eq!(cover.members(), ["Vraj Adhia", "John Doe", "Jane Smith"]);
        assert_eq!(cover.display_date(), "3/7/2025");

        let frs = doc.specific_requirements().functional_requirements();
        assert_eq!(frs.len(), 5);
        for (i, fr) in frs.iter().enumerate() {
            assert!(fr.starts_with(&format!("FR-{}:", i + 1)), "{fr}");
        }
        let nfrs = doc.specific_requirements().non_functional_requirements();
        assert_eq!(nfrs.len(), 4);
        assert!(nfrs[3].starts_with("NFR-4:"));

        assert!(doc
            .introduction()
            .purpose()
            .contains("for the \"Smart Attendance Management System\" project. This SRS captures"));
        assert!(doc
            .introduction()
            .scope()
            .starts_with("The Smart Attendance Management System aims to A responsive web application"));
        assert!(doc
            .general_description()
            .product_perspective()
            .starts_with("Smart Attendance Management System is a standalone web-based system"));
    }

    #[test]
    fn blank_fields_use_fallbacks() {
        let raw = RawInput::new("   ", "", vec!["".into(), "  ".into()]).unwrap();
        let doc = expand_on(&raw, date());
        assert_eq!(doc.cover().project_name(), "Untitled Project");
        assert_eq!(doc.cover().description(), "No description provided.");
        assert_eq!(doc.cover().members(), ["(No members)"]);
        assert!(doc.introduction().scope().contains("aims to No description provided. This SRS"));
    }

    #[test]
    fn inputs_are_trimmed() {
        let raw = RawInput::new("  Demo  ", " Does things. ", vec![" Ann ".into()]).unwrap();
        let doc = expand_on(&raw, date());
        assert_eq!(doc.cover().project_name(), "Demo");
        assert_eq!(doc.cover().description(), "Does things.");
        assert_eq!(doc.cover().members(), ["Ann"]);
    }

    #[test]
    fn expansion_is_deterministic_apart_from_date() {
        let first = expand_on(&example(), date());
        let second = expand_on(&example(), date());
        assert_eq!(first, second);

        let later = expand_on(&example(), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_ne!(first.cover().date(), later.cover().date());
        assert_eq!(first.introduction(), later.introduction());
        assert_eq!(first.specific_requirements(), later.specific_requirements());
    }

    #[test]
    fn definitions_keep_order() {
        let doc = expand_on(&example(), date());
        let terms: Vec<&str> = doc.introduction().definitions().iter().map(|d| d.term()).collect();
        assert_eq!(terms, ["SRS", "DBMS", "KYC"]);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let doc = expand_on(&example(), date());
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["cover"]["projectName"], "Smart Attendance Management System");
        assert_eq!(json["cover"]["date"], "3/7/2025");
        assert_eq!(json["introduction"]["definitions"][1]["term"], "DBMS");
        assert!(json["generalDescription"]["assumptionsDependencies"].is_string());
        assert_eq!(
            json["specificRequirements"]["functionalRequirements"].as_array().unwrap().len(),
            5
        );
    }
}
