//! One named slot per fixed category

use serde::{Deserialize, Serialize};
use shared_types::Category;

/// A value for each of the three report categories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ByCategory<T> {
    pub documentation: T,
    pub communication: T,
    pub evidence_gathering: T,
}

impl<T> ByCategory<T> {
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            documentation: f(Category::Documentation),
            communication: f(Category::Communication),
            evidence_gathering: f(Category::EvidenceGathering),
        }
    }

    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Documentation => &self.documentation,
            Category::Communication => &self.communication,
            Category::EvidenceGathering => &self.evidence_gathering,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::Documentation => &mut self.documentation,
            Category::Communication => &mut self.communication,
            Category::EvidenceGathering => &mut self.evidence_gathering,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}
