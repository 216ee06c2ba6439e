//! Flat row and patch types for the remote schema.
//!
//! The remote store keeps the catalog denormalized in four tables with
//! snake_case columns (`sub_prompts`, `cover_image`) and explicit foreign
//! keys (`sections.category_id`, `items.section_id`). These types own that
//! naming boundary: rows serialize to column names, and the conversions back
//! to [`crate::catalog`] types restore the in-memory names.
//!
//! Patch types model `update(partial_row)`: every field optional, absent
//! fields are not written. Nullable columns use a double `Option` so a patch
//! can distinguish "leave unchanged" from "clear".

use serde::{Deserialize, Serialize};

use crate::catalog::{
    Article, ArticleBlock, Category, ItemType, PromptItem, Section, SubPrompt, Theme,
};

/// Row of the `categories` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    /// Primary key.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Card blurb.
    pub description: String,
    /// Accent palette; legacy rows may lack the column.
    #[serde(default)]
    pub theme: Theme,
    /// Position among sibling categories.
    #[serde(default)]
    pub index: i64,
}

impl CategoryRow {
    /// Build a row from a model category, stripping children.
    pub fn from_model(category: &Category, index: i64) -> Self {
        Self {
            id: category.id.clone(),
            title: category.title.clone(),
            description: category.description.clone(),
            theme: category.theme,
            index,
        }
    }

    /// Convert back to a model category with empty child collections.
    pub fn into_model(self) -> Category {
        Category {
            id: self.id,
            title: self.title,
            description: self.description,
            theme: self.theme,
            sections: Vec::new(),
            items: Vec::new(),
        }
    }
}

/// Partial update of a `categories` row.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryPatch {
    /// New title, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New theme, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    /// New sibling position, if changing (move operations).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
}

impl CategoryPatch {
    /// Apply the patch to an in-memory category.
    pub fn apply(&self, category: &mut Category) {
        if let Some(title) = &self.title {
            category.title = title.clone();
        }
        if let Some(description) = &self.description {
            category.description = description.clone();
        }
        if let Some(theme) = self.theme {
            category.theme = theme;
        }
    }
}

/// Row of the `sections` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRow {
    /// Primary key.
    pub id: String,
    /// Owning category.
    pub category_id: String,
    /// Display title.
    pub title: String,
    /// Card blurb.
    #[serde(default)]
    pub description: Option<String>,
    /// How to work with this section.
    #[serde(default)]
    pub instructions: Option<String>,
    /// Optional icon name.
    #[serde(default)]
    pub icon: Option<String>,
    /// Position among sibling sections.
    #[serde(default)]
    pub index: i64,
}

impl SectionRow {
    /// Build a row from a model section under the given category.
    pub fn from_model(category_id: &str, section: &Section, index: i64) -> Self {
        Self {
            id: section.id.clone(),
            category_id: category_id.to_string(),
            title: section.title.clone(),
            description: section.description.clone(),
            instructions: section.instructions.clone(),
            icon: section.icon.clone(),
            index,
        }
    }

    /// Convert back to a model section with no items.
    pub fn into_model(self) -> Section {
        Section {
            id: self.id,
            title: self.title,
            description: self.description,
            instructions: self.instructions,
            icon: self.icon,
            items: Vec::new(),
        }
    }
}

/// Partial update of a `sections` row.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SectionPatch {
    /// New title, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `Some(None)` clears the description, `Some(Some(_))` replaces it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// `Some(None)` clears the instructions, `Some(Some(_))` replaces them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Option<String>>,
    /// `Some(None)` clears the icon, `Some(Some(_))` replaces it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Option<String>>,
}

impl SectionPatch {
    /// Apply the patch to an in-memory section.
    pub fn apply(&self, section: &mut Section) {
        if let Some(title) = &self.title {
            section.title = title.clone();
        }
        if let Some(description) = &self.description {
            section.description = description.clone();
        }
        if let Some(instructions) = &self.instructions {
            section.instructions = instructions.clone();
        }
        if let Some(icon) = &self.icon {
            section.icon = icon.clone();
        }
    }
}

/// Row of the `items` table.
///
/// Exactly one of `section_id` / `category_id` is set: `section_id` for the
/// original placement, `category_id` for the later section-less revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRow {
    /// Primary key.
    pub id: String,
    /// Owning section, when nested the original way.
    #[serde(default)]
    pub section_id: Option<String>,
    /// Owning category, for section-less items.
    #[serde(default)]
    pub category_id: Option<String>,
    /// Display title.
    pub title: String,
    /// What this prompt is for.
    #[serde(default)]
    pub description: String,
    /// How to use it.
    #[serde(default)]
    pub instructions: String,
    /// The prompt text or custom instructions.
    #[serde(default)]
    pub content: String,
    /// Variant discriminator (`prompt` / `assistant` / `sequence`).
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// JSON column holding the sub-prompt list.
    #[serde(default)]
    pub sub_prompts: Vec<SubPrompt>,
    /// Position among sibling items.
    #[serde(default)]
    pub index: i64,
}

impl ItemRow {
    /// Build a row for an item nested under a section.
    pub fn in_section(section_id: &str, item: &PromptItem, index: i64) -> Self {
        Self::from_parts(Some(section_id), None, item, index)
    }

    /// Build a row for a section-less item placed directly under a category.
    pub fn in_category(category_id: &str, item: &PromptItem, index: i64) -> Self {
        Self::from_parts(None, Some(category_id), item, index)
    }

    fn from_parts(
        section_id: Option<&str>,
        category_id: Option<&str>,
        item: &PromptItem,
        index: i64,
    ) -> Self {
        Self {
            id: item.id.clone(),
            section_id: section_id.map(str::to_string),
            category_id: category_id.map(str::to_string),
            title: item.title.clone(),
            description: item.description.clone(),
            instructions: item.instructions.clone(),
            content: item.content.clone(),
            item_type: item.item_type,
            sub_prompts: item.sub_prompts.clone(),
            index,
        }
    }

    /// Convert back to a model item, mapping `sub_prompts` to `subPrompts`.
    pub fn into_model(self) -> PromptItem {
        PromptItem {
            id: self.id,
            title: self.title,
            description: self.description,
            instructions: self.instructions,
            content: self.content,
            item_type: self.item_type,
            sub_prompts: self.sub_prompts,
        }
    }
}

/// Partial update of an `items` row.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemPatch {
    /// New title, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New usage instructions, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// New prompt text, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New variant, if changing.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    /// New sub-prompt list, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_prompts: Option<Vec<SubPrompt>>,
}

impl ItemPatch {
    /// Apply the patch to an in-memory item.
    pub fn apply(&self, item: &mut PromptItem) {
        if let Some(title) = &self.title {
            item.title = title.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(instructions) = &self.instructions {
            item.instructions = instructions.clone();
        }
        if let Some(content) = &self.content {
            item.content = content.clone();
        }
        if let Some(item_type) = self.item_type {
            item.item_type = item_type;
        }
        if let Some(sub_prompts) = &self.sub_prompts {
            item.sub_prompts = sub_prompts.clone();
        }
    }
}

/// Row of the `articles` table. Blocks live in a single JSON column, so block
/// edits and reorders always write the whole article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRow {
    /// Primary key.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Listing teaser.
    #[serde(default)]
    pub description: String,
    /// Optional cover image URL.
    #[serde(default)]
    pub cover_image: Option<String>,
    /// Ordered content blocks (JSON column).
    #[serde(default)]
    pub blocks: Vec<ArticleBlock>,
    /// Drafts are excluded from the public listing.
    #[serde(default)]
    pub published: bool,
    /// Publication date (RFC 3339); the articles read orders by this, newest
    /// first.
    pub date: String,
}

impl ArticleRow {
    /// Build a row from a model article.
    pub fn from_model(article: &Article) -> Self {
        Self {
            id: article.id.clone(),
            title: article.title.clone(),
            description: article.description.clone(),
            cover_image: article.cover_image.clone(),
            blocks: article.blocks.clone(),
            published: article.published,
            date: article.date.clone(),
        }
    }

    /// Convert back to a model article, mapping `cover_image` to `coverImage`.
    pub fn into_model(self) -> Article {
        Article {
            id: self.id,
            title: self.title,
            description: self.description,
            cover_image: self.cover_image,
            blocks: self.blocks,
            published: self.published,
            date: self.date,
        }
    }
}

/// Partial update of an `articles` row.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArticlePatch {
    /// New title, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New teaser, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `Some(None)` clears the cover image, `Some(Some(_))` replaces it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<Option<String>>,
    /// Replacement block list (edits and reorders write the full list).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<ArticleBlock>>,
    /// New publication flag, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    /// New date, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl ArticlePatch {
    /// Apply the patch to an in-memory article.
    pub fn apply(&self, article: &mut Article) {
        if let Some(title) = &self.title {
            article.title = title.clone();
        }
        if let Some(description) = &self.description {
            article.description = description.clone();
        }
        if let Some(cover_image) = &self.cover_image {
            article.cover_image = cover_image.clone();
        }
        if let Some(blocks) = &self.blocks {
            article.blocks = blocks.clone();
        }
        if let Some(published) = self.published {
            article.published = published;
        }
        if let Some(date) = &self.date {
            article.date = date.clone();
        }
    }
}
