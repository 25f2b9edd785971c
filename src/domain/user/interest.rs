//! Interest capture - ratings gathered by the multi-step interest wizard.
//!
//! Ratings attach either to a whole domain or to one of its subdomains.
//! A domain-level rating and a subdomain-level rating for the same domain
//! never coexist: recording one replaces the other.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::CapturedInterests;
use crate::domain::foundation::{InterestRating, InterestWeight, Timestamp};

/// Which half of the wizard a rating came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestType {
    Tech,
    Industry,
}

/// What a rating is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "lowercase")]
pub enum InterestTarget {
    Domain { domain: String },
    Subdomain { domain: String, subdomain: String },
}

impl InterestTarget {
    pub fn domain(domain: impl Into<String>) -> Self {
        InterestTarget::Domain {
            domain: domain.into(),
        }
    }

    pub fn subdomain(domain: impl Into<String>, subdomain: impl Into<String>) -> Self {
        InterestTarget::Subdomain {
            domain: domain.into(),
            subdomain: subdomain.into(),
        }
    }

    /// The top-level domain this target belongs to.
    pub fn domain_name(&self) -> &str {
        match self {
            InterestTarget::Domain { domain } | InterestTarget::Subdomain { domain, .. } => domain,
        }
    }

    fn is_domain_level(&self) -> bool {
        matches!(self, InterestTarget::Domain { .. })
    }
}

/// A single captured rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInterest {
    pub target: InterestTarget,
    pub interest_type: InterestType,
    pub rating: InterestRating,
}

impl UserInterest {
    pub fn new(target: InterestTarget, interest_type: InterestType, rating: InterestRating) -> Self {
        Self {
            target,
            interest_type,
            rating,
        }
    }
}

/// Working set of ratings while the wizard is open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestCapture {
    interests: Vec<UserInterest>,
}

impl InterestCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a rating, replacing any rating it conflicts with.
    ///
    /// Conflicts are: the same target, a domain-level rating when a subdomain
    /// is rated, or any subdomain ratings when the domain itself is rated.
    /// A rating of `None` clears the target.
    pub fn set(&mut self, interest: UserInterest) {
        let domain = interest.target.domain_name().to_string();
        let kind = interest.interest_type;
        let incoming_is_domain = interest.target.is_domain_level();

        self.interests.retain(|existing| {
            if existing.interest_type != kind || existing.target.domain_name() != domain {
                return true;
            }
            if existing.target == interest.target {
                return false;
            }
            // Only sibling subdomains may coexist.
            !(incoming_is_domain || existing.target.is_domain_level())
        });

        if interest.rating != InterestRating::None {
            self.interests.push(interest);
        }
    }

    pub fn rating_for(&self, target: &InterestTarget, kind: InterestType) -> Option<InterestRating> {
        self.interests
            .iter()
            .find(|i| &i.target == target && i.interest_type == kind)
            .map(|i| i.rating)
    }

    pub fn interests(&self) -> &[UserInterest] {
        &self.interests
    }

    pub fn is_empty(&self) -> bool {
        self.interests.is_empty()
    }

    /// Collapses the ratings into per-domain profile weights.
    ///
    /// Subdomain ratings roll up into their parent domain; the strongest rating wins.
    pub fn to_captured_interests(&self, captured_at: Timestamp) -> CapturedInterests {
        let mut tech: BTreeMap<String, InterestWeight> = BTreeMap::new();
        let mut industry: BTreeMap<String, InterestWeight> = BTreeMap::new();

        for interest in &self.interests {
            let bucket = match interest.interest_type {
                InterestType::Tech => &mut tech,
                InterestType::Industry => &mut industry,
            };
            let weight = interest.rating.to_weight();
            bucket
                .entry(interest.target.domain_name().to_string())
                .and_modify(|w| *w = (*w).max(weight))
                .or_insert(weight);
        }

        CapturedInterests {
            tech_domains: tech,
            industry_domains: industry,
            captured_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tech(target: InterestTarget, rating: InterestRating) -> UserInterest {
        UserInterest::new(target, InterestType::Tech, rating)
    }

    #[test]
    fn subdomain_rating_replaces_domain_rating() {
        let mut capture = InterestCapture::new();
        capture.set(tech(InterestTarget::domain("AI/ML"), InterestRating::Curious));
        capture.set(tech(
            InterestTarget::subdomain("AI/ML", "Computer Vision"),
            InterestRating::Passionate,
        ));

        assert_eq!(capture.interests().len(), 1);
        assert!(capture
            .rating_for(&InterestTarget::domain("AI/ML"), InterestType::Tech)
            .is_none());
    }

    #[test]
    fn domain_rating_replaces_all_subdomain_ratings() {
        let mut capture = InterestCapture::new();
        capture.set(tech(InterestTarget::subdomain("Web", "Frontend"), InterestRating::Interested));
        capture.set(tech(InterestTarget::subdomain("Web", "Backend"), InterestRating::Curious));
        assert_eq!(capture.interests().len(), 2);

        capture.set(tech(InterestTarget::domain("Web"), InterestRating::Passionate));
        assert_eq!(capture.interests().len(), 1);
        assert_eq!(
            capture.rating_for(&InterestTarget::domain("Web"), InterestType::Tech),
            Some(InterestRating::Passionate)
        );
    }

    #[test]
    fn same_domain_name_in_other_type_is_independent() {
        let mut capture = InterestCapture::new();
        capture.set(tech(InterestTarget::domain("Finance"), InterestRating::Curious));
        capture.set(UserInterest::new(
            InterestTarget::subdomain("Finance", "Banking"),
            InterestType::Industry,
            InterestRating::Interested,
        ));
        assert_eq!(capture.interests().len(), 2);
    }

    #[test]
    fn none_rating_clears_target() {
        let mut capture = InterestCapture::new();
        capture.set(tech(InterestTarget::domain("Cloud"), InterestRating::Interested));
        capture.set(tech(InterestTarget::domain("Cloud"), InterestRating::None));
        assert!(capture.is_empty());
    }

    #[test]
    fn captured_interests_roll_up_subdomains_by_max() {
        let mut capture = InterestCapture::new();
        capture.set(tech(InterestTarget::subdomain("Web", "Frontend"), InterestRating::Curious));
        capture.set(tech(InterestTarget::subdomain("Web", "Backend"), InterestRating::Passionate));
        capture.set(UserInterest::new(
            InterestTarget::domain("Healthcare"),
            InterestType::Industry,
            InterestRating::Interested,
        ));

        let captured = capture.to_captured_interests(Timestamp::now());
        assert_eq!(captured.tech_domains.get("Web").map(|w| w.value()), Some(4));
        assert_eq!(
            captured.industry_domains.get("Healthcare").map(|w| w.value()),
            Some(3)
        );
    }
}
