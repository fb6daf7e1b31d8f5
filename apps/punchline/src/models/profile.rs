use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Maximum number of comedians a profile may list as influences.
pub const MAX_INFLUENCES: usize = 3;

/// Comedic voice requested for the routine. The label is what the prompt echoes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComedyStyle {
    #[default]
    #[serde(rename = "Observational")]
    Observational,
    #[serde(rename = "Self-Deprecating")]
    SelfDeprecating,
    #[serde(rename = "Dark/Edgy")]
    Dark,
    #[serde(rename = "Absurdist")]
    Absurdist,
    #[serde(rename = "Clean/Family Friendly")]
    Clean,
    #[serde(rename = "Deadpan")]
    Deadpan,
}

impl ComedyStyle {
    pub const ALL: [ComedyStyle; 6] = [
        ComedyStyle::Observational,
        ComedyStyle::SelfDeprecating,
        ComedyStyle::Dark,
        ComedyStyle::Absurdist,
        ComedyStyle::Clean,
        ComedyStyle::Deadpan,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ComedyStyle::Observational => "Observational",
            ComedyStyle::SelfDeprecating => "Self-Deprecating",
            ComedyStyle::Dark => "Dark/Edgy",
            ComedyStyle::Absurdist => "Absurdist",
            ComedyStyle::Clean => "Clean/Family Friendly",
            ComedyStyle::Deadpan => "Deadpan",
        }
    }
}

impl fmt::Display for ComedyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComedyStyle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComedyStyle::ALL
            .into_iter()
            .find(|style| style.label() == s.trim())
            .ok_or_else(|| AppError::Validation(format!("Unknown comedy style '{s}'")))
    }
}

/// Everything the user tells the coach about themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: String,
    pub occupation: String,
    pub hometown: String,
    /// Comma separated in the UI, passed through untouched.
    pub topics: String,
    /// Free-form biography.
    pub context: String,
    pub style: ComedyStyle,
    /// Ordered, distinct, at most `MAX_INFLUENCES`.
    pub influences: Vec<String>,
}

/// The scalar fields a form edit can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Age,
    Occupation,
    Hometown,
    Topics,
    Context,
    Style,
}

impl ProfileField {
    /// Fields the form marks `required`. Topics is the only optional text field.
    pub const REQUIRED: [ProfileField; 5] = [
        ProfileField::Name,
        ProfileField::Age,
        ProfileField::Occupation,
        ProfileField::Hometown,
        ProfileField::Context,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Age => "age",
            ProfileField::Occupation => "occupation",
            ProfileField::Hometown => "hometown",
            ProfileField::Topics => "topics",
            ProfileField::Context => "context",
            ProfileField::Style => "style",
        }
    }
}

impl FromStr for ProfileField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(ProfileField::Name),
            "age" => Ok(ProfileField::Age),
            "occupation" => Ok(ProfileField::Occupation),
            "hometown" => Ok(ProfileField::Hometown),
            "topics" => Ok(ProfileField::Topics),
            "context" => Ok(ProfileField::Context),
            "style" => Ok(ProfileField::Style),
            other => Err(AppError::Validation(format!("Unknown profile field '{other}'"))),
        }
    }
}

impl UserProfile {
    /// Text value of a scalar field. `Style` yields its label.
    pub fn field(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Age => &self.age,
            ProfileField::Occupation => &self.occupation,
            ProfileField::Hometown => &self.hometown,
            ProfileField::Topics => &self.topics,
            ProfileField::Context => &self.context,
            ProfileField::Style => self.style.label(),
        }
    }

    /// Influences joined for display and prompting, or `None` when there are none.
    pub fn influences_joined(&self) -> Option<String> {
        if self.influences.is_empty() {
            None
        } else {
            Some(self.influences.join(", "))
        }
    }
}
