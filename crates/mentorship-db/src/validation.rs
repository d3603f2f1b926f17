//! Write-time validation
//!
//! Every roster write accepts only the validated types defined here, so the
//! column constraints are checked before any statement reaches the store.

use thiserror::Error;

use crate::schema::{
    MEMBER_FULLNAME_MAX, MENTOR_FULLNAME_MAX, SPECIALIZATION_MAX, TEAM_PROJECT_MAX,
};

/// A rejected field value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing { field }
            | ValidationError::Empty { field }
            | ValidationError::TooLong { field, .. } => field,
        }
    }
}

/// Declarative constraint for one string column
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub max_len: usize,
}

pub const MENTOR_FULLNAME: FieldRule = FieldRule {
    field: "fullname",
    max_len: MENTOR_FULLNAME_MAX,
};

pub const SPECIALIZATION: FieldRule = FieldRule {
    field: "specialization",
    max_len: SPECIALIZATION_MAX,
};

pub const TEAM_PROJECT: FieldRule = FieldRule {
    field: "project",
    max_len: TEAM_PROJECT_MAX,
};

pub const MEMBER_FULLNAME: FieldRule = FieldRule {
    field: "members",
    max_len: MEMBER_FULLNAME_MAX,
};

impl FieldRule {
    /// Check the value is not blank and fits the limit, counted in characters
    pub fn check(&self, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: self.field });
        }

        let actual = value.chars().count();
        if actual > self.max_len {
            return Err(ValidationError::TooLong {
                field: self.field,
                max: self.max_len,
                actual,
            });
        }
        Ok(())
    }

    /// Non-null column: the value must be present
    pub fn required(&self, value: Option<String>) -> Result<String, ValidationError> {
        let value = value.ok_or(ValidationError::Missing { field: self.field })?;
        self.check(&value)?;
        Ok(value)
    }

    /// Patch field: absent means unchanged
    pub fn optional(&self, value: Option<String>) -> Result<Option<String>, ValidationError> {
        if let Some(ref v) = value {
            self.check(v)?;
        }
        Ok(value)
    }
}

/// Validated fields for a new mentor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMentor {
    pub fullname: String,
    pub specialization: String,
}

impl NewMentor {
    pub fn validate(
        fullname: Option<String>,
        specialization: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            fullname: MENTOR_FULLNAME.required(fullname)?,
            specialization: SPECIALIZATION.required(specialization)?,
        })
    }
}

/// Validated partial update of a mentor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentorChanges {
    pub fullname: Option<String>,
    pub specialization: Option<String>,
}

impl MentorChanges {
    pub fn validate(
        fullname: Option<String>,
        specialization: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            fullname: MENTOR_FULLNAME.optional(fullname)?,
            specialization: SPECIALIZATION.optional(specialization)?,
        })
    }
}

/// Validated fields for a new team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub project: String,
    pub specialization: String,
}

impl NewTeam {
    pub fn validate(
        project: Option<String>,
        specialization: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            project: TEAM_PROJECT.required(project)?,
            specialization: SPECIALIZATION.required(specialization)?,
        })
    }
}

/// Validated partial update of a team
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamChanges {
    pub project: Option<String>,
    pub specialization: Option<String>,
}

impl TeamChanges {
    pub fn validate(
        project: Option<String>,
        specialization: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            project: TEAM_PROJECT.optional(project)?,
            specialization: SPECIALIZATION.optional(specialization)?,
        })
    }
}

/// Validated member list; repeated names collapse to their first occurrence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberNames(Vec<String>);

impl MemberNames {
    pub fn validate(names: Vec<String>) -> Result<Self, ValidationError> {
        let mut unique: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            MEMBER_FULLNAME.check(&name)?;
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Ok(Self(unique))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
