//! Pathway search: free-text query plus exact-match filters.

use serde::{Deserialize, Serialize};

use super::{CareerPathway, Difficulty};

/// Optional filters intersected with the text query.
///
/// Within a list filter any label may match; separate filters must all match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_domains: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub industries: Vec<String>,
}

impl PathwayFilters {
    pub fn is_empty(&self) -> bool {
        self.difficulty.is_none() && self.tech_domains.is_empty() && self.industries.is_empty()
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_tech_domain(mut self, domain: impl Into<String>) -> Self {
        self.tech_domains.push(domain.into());
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industries.push(industry.into());
        self
    }

    pub fn matches(&self, pathway: &CareerPathway) -> bool {
        if let Some(difficulty) = self.difficulty {
            if pathway.difficulty != difficulty {
                return false;
            }
        }
        any_label_matches(&self.tech_domains, &pathway.required_tech_domains)
            && any_label_matches(&self.industries, &pathway.relevant_industries)
    }
}

fn any_label_matches(wanted: &[String], labels: &[String]) -> bool {
    wanted.is_empty()
        || wanted
            .iter()
            .any(|w| labels.iter().any(|l| l.eq_ignore_ascii_case(w)))
}

/// Case-insensitive substring match over title, description, target role,
/// tech domains, and industries. A blank query matches everything.
pub fn matches_query(pathway: &CareerPathway, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let contains = |s: &str| s.to_lowercase().contains(&needle);

    contains(&pathway.title)
        || contains(&pathway.description)
        || contains(&pathway.target_role)
        || pathway.required_tech_domains.iter().any(|d| contains(d))
        || pathway.relevant_industries.iter().any(|i| contains(i))
}

/// Filters `pathways` by query and filters, preserving input order.
pub fn search<'a, I>(pathways: I, query: &str, filters: &PathwayFilters) -> Vec<CareerPathway>
where
    I: IntoIterator<Item = &'a CareerPathway>,
{
    pathways
        .into_iter()
        .filter(|p| matches_query(p, query) && filters.matches(p))
        .cloned()
        .collect()
}
