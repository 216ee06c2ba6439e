//! Content model types.
//!
//! The catalog is a three-level hierarchy: [`Category`] → [`Section`] →
//! [`PromptItem`], with a later schema revision allowing items directly under
//! a category (no intervening section). Articles form a flat, block-based
//! list beside the tree.
//!
//! All types serialize with the field names the presentation layer and the
//! cache snapshot use (`subPrompts`, `coverImage`); the remote store's
//! snake_case columns are mapped in [`crate::store::rows`], not here.

pub mod tree;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// What kind of content a [`PromptItem`] carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ItemType {
    /// A single copy-paste prompt.
    #[default]
    Prompt,
    /// A system-instruction bundle with optional supplementary prompts.
    Assistant,
    /// An ordered, step-gated chain of prompts.
    Sequence,
}

/// Accent palette for a category card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Theme {
    /// Orange & pink ("Sunset"); the fallback when a category has none.
    #[default]
    Orange,
    /// Red & rose ("Passion").
    Rose,
    /// Deep blue ("Ocean").
    Blue,
    /// Purple & violet ("Cosmic").
    Violet,
    /// Green & teal ("Nature").
    Emerald,
    /// Gold & dark ("Luxury").
    Amber,
}

/// A titled prompt attached to an assistant or sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubPrompt {
    /// Display title of the sub-prompt (step title for sequences).
    pub title: String,
    /// The prompt text itself.
    pub content: String,
}

/// The leaf content unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PromptItem {
    /// Unique within the parent section (or category, for section-less items).
    pub id: String,
    /// Display title.
    pub title: String,
    /// What this prompt is for.
    pub description: String,
    /// How to use it.
    pub instructions: String,
    /// The prompt text or custom instructions.
    pub content: String,
    /// Variant discriminator.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Ordered steps for [`ItemType::Sequence`], supplementary prompts for
    /// [`ItemType::Assistant`], unused for [`ItemType::Prompt`].
    #[serde(rename = "subPrompts", default, skip_serializing_if = "Vec::is_empty")]
    pub sub_prompts: Vec<SubPrompt>,
}

/// A titled group of items within a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Section {
    /// Unique within the parent category.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short blurb shown on the section card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// How to work with this section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Items in display order.
    #[serde(default)]
    pub items: Vec<PromptItem>,
}

/// Top level of the content hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    /// Unique across all categories.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short blurb shown on the category card.
    pub description: String,
    /// Accent palette; absent rows fall back to [`Theme::Orange`].
    #[serde(default)]
    pub theme: Theme,
    /// Sections in display order.
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Section-less items (later schema revision). Always present, empty when
    /// the category only uses sections.
    #[serde(default)]
    pub items: Vec<PromptItem>,
}

impl Category {
    /// Find a section by id.
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    /// Find a section-less item by id.
    pub fn direct_item(&self, item_id: &str) -> Option<&PromptItem> {
        self.items.iter().find(|i| i.id == item_id)
    }
}

impl Section {
    /// Find an item by id.
    pub fn item(&self, item_id: &str) -> Option<&PromptItem> {
        self.items.iter().find(|i| i.id == item_id)
    }
}

/// Kind of an [`ArticleBlock`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum BlockType {
    /// Section heading inside the article.
    Header,
    /// Paragraph text.
    #[default]
    Text,
    /// Code listing; `meta` holds the language label.
    Code,
    /// Image; `meta` holds the caption.
    Image,
    /// Embedded video URL.
    Video,
    /// Callout box; `meta` holds the tip heading.
    Tip,
    /// Numbered step; `meta` holds the step heading.
    Step,
}

/// One block of an article body. Order is authoritative reading order and is
/// only changed through explicit move operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ArticleBlock {
    /// Unique within the article.
    pub id: String,
    /// Block kind.
    #[serde(rename = "type")]
    pub block_type: BlockType,
    /// The main text, URL or code.
    pub content: String,
    /// Role-dependent auxiliary text: code language, image caption, tip or
    /// step heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
}

/// An instructions-CMS article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Article {
    /// Unique article id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Teaser shown in article lists.
    pub description: String,
    /// Optional cover image URL.
    #[serde(rename = "coverImage", default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Ordered content blocks.
    #[serde(default)]
    pub blocks: Vec<ArticleBlock>,
    /// Drafts stay hidden from the public listing.
    pub published: bool,
    /// Publication date (RFC 3339); articles list newest first.
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_wire_format() {
        let json = serde_json::to_string(&ItemType::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");

        let back: ItemType = serde_json::from_str("\"sequence\"").unwrap();
        assert_eq!(back, ItemType::Sequence);
    }

    #[test]
    fn test_theme_defaults_to_orange() {
        // A category row with no theme column deserializes to the fallback.
        let cat: Category =
            serde_json::from_str(r#"{"id":"c1","title":"T","description":"D"}"#).unwrap();
        assert_eq!(cat.theme, Theme::Orange);
        assert!(cat.sections.is_empty());
        assert!(cat.items.is_empty());
    }

    #[test]
    fn test_sub_prompts_field_name() {
        let item = PromptItem {
            id: "i1".into(),
            title: "T".into(),
            item_type: ItemType::Assistant,
            sub_prompts: vec![SubPrompt {
                title: "Step".into(),
                content: "Do".into(),
            }],
            ..Default::default()
        };

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("subPrompts").is_some());
        assert!(json.get("sub_prompts").is_none());
    }

    #[test]
    fn test_article_cover_image_field_name() {
        let article = Article {
            id: "a1".into(),
            title: "T".into(),
            description: "D".into(),
            cover_image: Some("https://example.com/x.png".into()),
            published: true,
            date: "2024-11-02".into(),
            ..Default::default()
        };

        let json = serde_json::to_value(&article).unwrap();
        assert!(json.get("coverImage").is_some());
    }
}
