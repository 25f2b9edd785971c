//! UserProfile - the single local user's identity, interests, and saved pathways.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{InterestWeight, PathwayId, Timestamp, UserId, ValidationError};

/// Interest weights captured by the wizard, keyed by domain name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedInterests {
    pub tech_domains: BTreeMap<String, InterestWeight>,
    pub industry_domains: BTreeMap<String, InterestWeight>,
    pub captured_at: Timestamp,
}

impl CapturedInterests {
    pub fn empty() -> Self {
        Self {
            tech_domains: BTreeMap::new(),
            industry_domains: BTreeMap::new(),
            captured_at: Timestamp::now(),
        }
    }

    /// Weight for a tech domain label, matched case-insensitively.
    pub fn tech_weight(&self, label: &str) -> Option<InterestWeight> {
        lookup(&self.tech_domains, label)
    }

    /// Weight for an industry label, matched case-insensitively.
    pub fn industry_weight(&self, label: &str) -> Option<InterestWeight> {
        lookup(&self.industry_domains, label)
    }
}

fn lookup(map: &BTreeMap<String, InterestWeight>, label: &str) -> Option<InterestWeight> {
    map.get(label).copied().or_else(|| {
        map.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(label))
            .map(|(_, w)| *w)
    })
}

/// Achievement counters shown on the profile page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievements {
    pub pathways_started: u32,
    pub courses_completed: u32,
    pub skills_acquired: u32,
    pub day_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub captured_interests: CapturedInterests,
    pub saved_pathways: Vec<PathwayId>,
    pub achievements: Achievements,
}

impl UserProfile {
    /// Creates a fresh profile with no interests and nothing saved.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let email = email.into();
        validate_name(&name)?;
        validate_email(&email)?;
        Ok(Self {
            id,
            name,
            email,
            captured_interests: CapturedInterests::empty(),
            saved_pathways: Vec::new(),
            achievements: Achievements::default(),
        })
    }

    pub fn has_saved(&self, id: &PathwayId) -> bool {
        self.saved_pathways.contains(id)
    }

    /// Appends a saved pathway id. Returns false if it was already present.
    pub fn add_saved_pathway(&mut self, id: PathwayId) -> bool {
        if self.has_saved(&id) {
            return false;
        }
        self.saved_pathways.push(id);
        true
    }

    /// Removes a saved pathway id. Returns false if it was absent.
    pub fn remove_saved_pathway(&mut self, id: &PathwayId) -> bool {
        let before = self.saved_pathways.len();
        self.saved_pathways.retain(|p| p != id);
        before != self.saved_pathways.len()
    }

    /// Shallow-merges the provided fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a blank name or malformed email; the
    /// profile is left untouched in that case.
    pub fn apply(&mut self, update: ProfileUpdate) -> Result<(), ValidationError> {
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(email) = &update.email {
            validate_email(email)?;
        }

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(interests) = update.captured_interests {
            self.captured_interests = interests;
        }
        if let Some(achievements) = update.achievements {
            self.achievements = achievements;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ValidationError::invalid_format("email", "expected user@domain")),
    }
}

/// Partial profile update. `None` fields are left unchanged.
///
/// Saved pathways are managed through save/remove operations only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_interests: Option<CapturedInterests>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Achievements>,
}

impl ProfileUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_captured_interests(mut self, interests: CapturedInterests) -> Self {
        self.captured_interests = Some(interests);
        self
    }

    pub fn with_achievements(mut self, achievements: Achievements) -> Self {
        self.achievements = Some(achievements);
        self
    }
}
