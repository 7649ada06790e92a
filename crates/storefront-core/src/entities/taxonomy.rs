use serde::{Deserialize, Serialize};

use super::Identified;

/// Shared surface of categories and tags: a display name, a featured flag,
/// and an integer priority that the priority manager keeps gap-free.
pub trait FeaturedPrioritized: Identified + Clone {
    fn name(&self) -> &str;
    fn is_featured(&self) -> bool;
    fn priority(&self) -> i64;
    fn set_priority(&mut self, priority: i64);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub priority: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Normalized id, e.g. `"no-code"`.
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Hex color such as `"#10b981"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub priority: i64,
}

impl Identified for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl FeaturedPrioritized for Category {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_featured(&self) -> bool {
        self.featured
    }

    fn priority(&self) -> i64 {
        self.priority
    }

    fn set_priority(&mut self, priority: i64) {
        self.priority = priority;
    }
}

impl Identified for Tag {
    fn id(&self) -> &str {
        &self.id
    }
}

impl FeaturedPrioritized for Tag {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_featured(&self) -> bool {
        self.featured
    }

    fn priority(&self) -> i64 {
        self.priority
    }

    fn set_priority(&mut self, priority: i64) {
        self.priority = priority;
    }
}
