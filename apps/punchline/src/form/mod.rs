//! Form controller. Owns the profile being edited and enforces the influence limit.
//!
//! No network access and no semantic validation: `submit` only checks that the fields the
//! form marks required are filled in.

pub mod presets;

use tracing::debug;

use crate::errors::AppError;
use crate::form::presets::{is_known_comedian, DEMO_PROFILES};
use crate::models::{ProfileField, UserProfile, MAX_INFLUENCES};

/// What a call to `toggle_influence` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfluenceToggle {
    Added,
    Removed,
    /// Already at `MAX_INFLUENCES`; nothing changed.
    LimitReached,
    /// Not on the roster; nothing changed.
    UnknownComedian,
}

#[derive(Debug, Clone, Default)]
pub struct FormController {
    profile: UserProfile,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Sets one scalar field. A bad style label leaves the profile untouched.
    pub fn update_field(&mut self, field: ProfileField, value: &str) -> Result<(), AppError> {
        match field {
            ProfileField::Name => self.profile.name = value.to_string(),
            ProfileField::Age => self.profile.age = value.to_string(),
            ProfileField::Occupation => self.profile.occupation = value.to_string(),
            ProfileField::Hometown => self.profile.hometown = value.to_string(),
            ProfileField::Topics => self.profile.topics = value.to_string(),
            ProfileField::Context => self.profile.context = value.to_string(),
            ProfileField::Style => self.profile.style = value.parse()?,
        }
        Ok(())
    }

    /// Same as `update_field`, addressed by the form's field name (`"name"`, `"style"`, ...).
    pub fn update_named_field(&mut self, name: &str, value: &str) -> Result<(), AppError> {
        let field: ProfileField = name.parse()?;
        self.update_field(field, value)
    }

    pub fn toggle_influence(&mut self, name: &str) -> InfluenceToggle {
        let influences = &mut self.profile.influences;

        if let Some(pos) = influences.iter().position(|c| c == name) {
            influences.remove(pos);
            return InfluenceToggle::Removed;
        }
        if !is_known_comedian(name) {
            return InfluenceToggle::UnknownComedian;
        }
        if influences.len() >= MAX_INFLUENCES {
            return InfluenceToggle::LimitReached;
        }
        influences.push(name.to_string());
        InfluenceToggle::Added
    }

    /// Whether the chip for `name` is clickable: selected ones always are, others only below the limit.
    pub fn can_select(&self, name: &str) -> bool {
        self.is_selected(name) || self.profile.influences.len() < MAX_INFLUENCES
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.profile.influences.iter().any(|c| c == name)
    }

    pub fn selected_count(&self) -> usize {
        self.profile.influences.len()
    }

    /// Replaces the whole profile. Nothing from the previous state survives.
    ///
    /// Influences are deduplicated in order and capped at `MAX_INFLUENCES`.
    pub fn load_preset(&mut self, mut profile: UserProfile) {
        let requested = profile.influences.len();
        let mut kept: Vec<String> = Vec::with_capacity(MAX_INFLUENCES);
        for name in std::mem::take(&mut profile.influences) {
            if kept.len() == MAX_INFLUENCES {
                break;
            }
            if !kept.contains(&name) {
                kept.push(name);
            }
        }
        if kept.len() < requested {
            debug!(
                "Preset influences trimmed from {} to {}",
                requested,
                kept.len()
            );
        }
        profile.influences = kept;
        self.profile = profile;
    }

    pub fn load_demo(&mut self, index: usize) -> Result<(), AppError> {
        let demo = DEMO_PROFILES
            .get(index)
            .ok_or_else(|| AppError::Validation(format!("No demo profile at index {index}")))?;
        debug!("Loading demo profile '{}'", demo.title);
        self.load_preset(demo.to_profile());
        Ok(())
    }

    pub fn missing_required_fields(&self) -> Vec<ProfileField> {
        ProfileField::REQUIRED
            .into_iter()
            .filter(|&field| self.profile.field(field).is_empty())
            .collect()
    }

    /// Hands a copy of the profile to the caller if every required field is filled.
    pub fn submit(&self) -> Result<UserProfile, AppError> {
        let missing = self.missing_required_fields();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(ProfileField::as_str).collect();
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                names.join(", ")
            )));
        }
        Ok(self.profile.clone())
    }
}
