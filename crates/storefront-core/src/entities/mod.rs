//! Catalog records as they are stored in the JSON content files.

mod content;
mod product;
mod taxonomy;

pub use content::{Faq, Testimonial};
pub use product::{
    Benefits, CopyBlock, EntryRef, PaymentFrequency, PriceTier, Product, SecondaryCategory,
    Subscription, Variant,
};
pub use taxonomy::{Category, FeaturedPrioritized, Tag};

/// Records addressable by a stable string id.
pub trait Identified {
    fn id(&self) -> &str;
}
