//! Recommendation scoring - matches captured interests against pathway domains.
//!
//! For each pathway not already saved:
//!
//! ```text
//! tech     = (sum of matched tech weights)     * matched_tech     * 0.4
//! industry = (sum of matched industry weights) * matched_industry * 0.3
//! score    = (tech + industry) / factors
//! ```
//!
//! where `factors` counts the components with at least one match. A pathway
//! with no matches, or one already saved, scores 0.

use super::CareerPathway;
use crate::domain::user::UserProfile;

pub const TECH_DOMAIN_WEIGHT: f64 = 0.4;
pub const INDUSTRY_WEIGHT: f64 = 0.3;

/// Cut-off and size of the recommendation list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationPolicy {
    /// Scores must be strictly greater than this.
    pub threshold: f64,
    pub limit: usize,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self {
            threshold: 2.0,
            limit: 5,
        }
    }
}

/// A pathway with its recommendation score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPathway {
    pub pathway: CareerPathway,
    pub score: f64,
}

/// Scores one pathway for a profile.
pub fn score_pathway(profile: &UserProfile, pathway: &CareerPathway) -> f64 {
    if profile.has_saved(&pathway.id) {
        return 0.0;
    }
    let interests = &profile.captured_interests;

    let tech = component_score(
        pathway
            .required_tech_domains
            .iter()
            .filter_map(|d| interests.tech_weight(d)),
        TECH_DOMAIN_WEIGHT,
    );
    let industry = component_score(
        pathway
            .relevant_industries
            .iter()
            .filter_map(|i| interests.industry_weight(i)),
        INDUSTRY_WEIGHT,
    );

    let factors = [tech, industry].iter().flatten().count();
    if factors == 0 {
        return 0.0;
    }
    (tech.unwrap_or(0.0) + industry.unwrap_or(0.0)) / factors as f64
}

fn component_score<I>(weights: I, factor: f64) -> Option<f64>
where
    I: Iterator<Item = crate::domain::foundation::InterestWeight>,
{
    let (sum, matches) = weights
        .filter(|w| w.value() > 0)
        .fold((0.0, 0usize), |(sum, n), w| (sum + w.as_f64(), n + 1));
    (matches > 0).then(|| sum * matches as f64 * factor)
}

/// Scores, filters, and ranks pathways. Ties keep catalog order.
pub fn recommend<'a, I>(
    profile: &UserProfile,
    pathways: I,
    policy: RecommendationPolicy,
) -> Vec<ScoredPathway>
where
    I: IntoIterator<Item = &'a CareerPathway>,
{
    let mut scored: Vec<ScoredPathway> = pathways
        .into_iter()
        .map(|p| ScoredPathway {
            score: score_pathway(profile, p),
            pathway: p.clone(),
        })
        .filter(|s| s.score > policy.threshold)
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(policy.limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{InterestWeight, PathwayId, UserId};
    use crate::domain::pathway::career_pathway::test_support::pathway;

    fn profile_with(tech: &[(&str, u8)], industry: &[(&str, u8)]) -> UserProfile {
        let mut p = UserProfile::new(UserId::new("u").unwrap(), "U", "u@example.com").unwrap();
        for (k, v) in tech {
            p.captured_interests
                .tech_domains
                .insert(k.to_string(), InterestWeight::try_new(*v).unwrap());
        }
        for (k, v) in industry {
            p.captured_interests
                .industry_domains
                .insert(k.to_string(), InterestWeight::try_new(*v).unwrap());
        }
        p
    }

    fn pathway_with(id: &str, tech: &[&str], industry: &[&str]) -> CareerPathway {
        let mut p = pathway(id, vec![]);
        p.required_tech_domains = tech.iter().map(|s| s.to_string()).collect();
        p.relevant_industries = industry.iter().map(|s| s.to_string()).collect();
        p
    }

    #[test]
    fn no_matches_scores_zero() {
        let profile = profile_with(&[("Web", 4)], &[]);
        let p = pathway_with("p", &["Cloud"], &["Finance"]);
        assert_eq!(score_pathway(&profile, &p), 0.0);
    }

    #[test]
    fn tech_only_score_uses_match_count() {
        let profile = profile_with(&[("Web", 4), ("Cloud", 3)], &[]);
        let p = pathway_with("p", &["Web", "Cloud"], &[]);
        // (4 + 3) * 2 * 0.4
        assert!((score_pathway(&profile, &p) - 5.6).abs() < 1e-9);
    }

    #[test]
    fn mixed_score_is_averaged_over_factors() {
        let profile = profile_with(&[("Web", 4), ("Cloud", 4)], &[("Finance", 4), ("Retail", 2)]);
        let p = pathway_with("p", &["Web", "Cloud"], &["Finance", "Retail"]);
        // tech = 8 * 2 * 0.4 = 6.4, industry = 6 * 2 * 0.3 = 3.6, avg = 5.0
        assert!((score_pathway(&profile, &p) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn saved_pathway_scores_zero_and_is_excluded() {
        let mut profile = profile_with(&[("Web", 4), ("Cloud", 4)], &[]);
        let p = pathway_with("saved", &["Web", "Cloud"], &[]);
        profile.add_saved_pathway(PathwayId::new("saved").unwrap());

        assert_eq!(score_pathway(&profile, &p), 0.0);
        assert!(recommend(&profile, [&p], RecommendationPolicy::default()).is_empty());
    }

    #[test]
    fn recommend_filters_sorts_and_truncates() {
        let profile = profile_with(&[("Web", 4), ("Cloud", 3), ("AI", 2)], &[]);
        let weak = pathway_with("weak", &["AI"], &[]); // 0.8
        let mid = pathway_with("mid", &["Web", "AI"], &[]); // 4.8
        let strong = pathway_with("strong", &["Web", "Cloud", "AI"], &[]); // 10.8
        let catalog = vec![weak, mid, strong];

        let result = recommend(&profile, &catalog, RecommendationPolicy::default());
        let ids: Vec<&str> = result.iter().map(|s| s.pathway.id.as_str()).collect();
        assert_eq!(ids, vec!["strong", "mid"]);

        let top1 = recommend(
            &profile,
            &catalog,
            RecommendationPolicy {
                limit: 1,
                ..Default::default()
            },
        );
        assert_eq!(top1.len(), 1);
        assert_eq!(top1[0].pathway.id.as_str(), "strong");
    }

    #[test]
    fn zero_weight_interest_does_not_count_as_match() {
        let profile = profile_with(&[("Web", 0), ("Cloud", 4)], &[]);
        let p = pathway_with("p", &["Web", "Cloud"], &[]);
        // only Cloud matches: 4 * 1 * 0.4
        assert!((score_pathway(&profile, &p) - 1.6).abs() < 1e-9);
    }
}
