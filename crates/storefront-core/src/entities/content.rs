use serde::{Deserialize, Serialize};

use super::Identified;

/// A question/answer pair shown on a product page.
///
/// The owning product is implied by the file the FAQ lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Twitter/X handle or profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// Star rating, 1 through 5.
    pub rating: u8,
    pub quote: String,
    #[serde(default)]
    pub featured: bool,
}

impl Identified for Faq {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Testimonial {
    fn id(&self) -> &str {
        &self.id
    }
}
