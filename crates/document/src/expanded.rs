//! The canonical four-section SRS document tree.
//!
//! Values are built once by the expander and exposed read-only.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

const DATE_FORMAT: &str = "%-m/%-d/%Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedDocument {
    pub(crate) cover: Cover,
    pub(crate) introduction: Introduction,
    pub(crate) general_description: GeneralDescription,
    pub(crate) specific_requirements: SpecificRequirements,
}

impl ExpandedDocument {
    pub fn cover(&self) -> &Cover {
        &self.cover
    }

    pub fn introduction(&self) -> &Introduction {
        &self.introduction
    }

    pub fn general_description(&self) -> &GeneralDescription {
        &self.general_description
    }

    pub fn specific_requirements(&self) -> &SpecificRequirements {
        &self.specific_requirements
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cover {
    pub(crate) title: String,
    pub(crate) project_name: String,
    pub(crate) description: String,
    pub(crate) members: Vec<String>,
    #[serde(serialize_with = "serialize_display_date")]
    pub(crate) date: NaiveDate,
}

impl Cover {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Never empty; holds a placeholder when no members were given.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The generation date as `M/D/YYYY`.
    pub fn display_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

fn serialize_display_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(DATE_FORMAT))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub(crate) term: String,
    pub(crate) meaning: String,
}

impl Definition {
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn meaning(&self) -> &str {
        &self.meaning
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Introduction {
    pub(crate) purpose: String,
    pub(crate) scope: String,
    pub(crate) definitions: Vec<Definition>,
    pub(crate) references: String,
}

impl Introduction {
    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn references(&self) -> &str {
        &self.references
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralDescription {
    pub(crate) product_perspective: String,
    pub(crate) product_functions: String,
    pub(crate) user_characteristics: String,
    pub(crate) general_constraints: String,
    pub(crate) assumptions_dependencies: String,
}

impl GeneralDescription {
    pub fn product_perspective(&self) -> &str {
        &self.product_perspective
    }

    pub fn product_functions(&self) -> &str {
        &self.product_functions
    }

    pub fn user_characteristics(&self) -> &str {
        &self.user_characteristics
    }

    pub fn general_constraints(&self) -> &str {
        &self.general_constraints
    }

    pub fn assumptions_dependencies(&self) -> &str {
        &self.assumptions_dependencies
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificRequirements {
    pub(crate) functional_requirements: Vec<String>,
    pub(crate) external_interface_requirements: String,
    pub(crate) non_functional_requirements: Vec<String>,
}

impl SpecificRequirements {
    pub fn functional_requirements(&self) -> &[String] {
        &self.functional_requirements
    }

    pub fn external_interface_requirements(&self) -> &str {
        &self.external_interface_requirements
    }

    pub fn non_functional_requirements(&self) -> &[String] {
        &self.non_functional_requirements
    }
}
