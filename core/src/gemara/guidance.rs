use serde::{Deserialize, Serialize};

/// Layer 1 guidance document: categories of guidelines plus citation metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct GuidanceDocument {
    pub metadata: GuidanceMetadata,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct GuidanceMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub version: String,
    /// `YYYY-MM-DD`
    pub publication_date: String,
    /// `YYYY-MM-DD HH:MM:SS`, UTC
    pub last_modified: String,
    pub resources: Vec<ResourceReference>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ResourceReference {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub issuing_body: String,
    pub publication_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub description: String,
    pub guidelines: Vec<Guideline>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Guideline {
    pub id: String,
    pub title: String,
    pub objective: String,
    /// Parent guideline within the same category, if this one is nested.
    pub base_guideline_id: Option<String>,
    pub guideline_parts: Vec<GuidelinePart>,
    pub recommendations: Vec<String>,
    pub see_also: Vec<String>,
    pub external_references: Vec<String>,
}

impl Guideline {
    pub fn parent_id(&self) -> Option<&str> {
        self.base_guideline_id
            .as_deref()
            .filter(|parent| !parent.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct GuidelinePart {
    pub id: String,
    pub title: String,
    pub prose: String,
    pub recommendations: Vec<String>,
}
