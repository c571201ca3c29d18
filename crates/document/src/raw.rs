use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on contributor names a project may list.
pub const MAX_MEMBERS: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Too many members: {count} given, at most {max} allowed")]
    TooManyMembers { count: usize, max: usize },

    #[error("No member at index {index} (list has {len})")]
    MemberIndexOutOfRange { index: usize, len: usize },
}

/// The handful of user-supplied fields an SRS is expanded from.
///
/// Member slots may be blank while editing; blanks are dropped at expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawInputDef")]
pub struct RawInput {
    project_name: String,
    description: String,
    members: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInputDef {
    #[serde(default)]
    project_name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    members: Vec<String>,
}

impl TryFrom<RawInputDef> for RawInput {
    type Error = InputError;

    fn try_from(def: RawInputDef) -> Result<Self, Self::Error> {
        RawInput::new(def.project_name, def.description, def.members)
    }
}

impl RawInput {
    pub fn new(
        project_name: impl Into<String>,
        description: impl Into<String>,
        members: Vec<String>,
    ) -> Result<Self, InputError> {
        check_capacity(members.len())?;
        Ok(Self {
            project_name: project_name.into(),
            description: description.into(),
            members,
        })
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// All member slots, including blank ones.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn can_add_member(&self) -> bool {
        self.members.len() < MAX_MEMBERS
    }

    pub fn push_member(&mut self, name: impl Into<String>) -> Result<(), InputError> {
        check_capacity(self.members.len() + 1)?;
        self.members.push(name.into());
        Ok(())
    }

    pub fn set_member(&mut self, index: usize, name: impl Into<String>) -> Result<(), InputError> {
        let len = self.members.len();
        let slot = self
            .members
            .get_mut(index)
            .ok_or(InputError::MemberIndexOutOfRange { index, len })?;
        *slot = name.into();
        Ok(())
    }

    pub fn remove_member(&mut self, index: usize) -> Option<String> {
        (index < self.members.len()).then(|| self.members.remove(index))
    }

    /// Trimmed, non-blank member names in their original order.
    pub fn filtered_members(&self) -> Vec<&str> {
        self.members
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .collect()
    }
}

fn check_capacity(count: usize) -> Result<(), InputError> {
    if count > MAX_MEMBERS {
        return Err(InputError::TooManyMembers {
            count,
            max: MAX_MEMBERS,
        });
    }
    Ok(())
}
