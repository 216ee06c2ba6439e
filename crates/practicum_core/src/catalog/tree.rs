//! Reconstruction of the content tree from flat remote rows, plus the small
//! ordered-list helpers the engine shares.
//!
//! The remote store keeps the hierarchy denormalized; rows arrive already
//! ordered by their `index` column. Nesting is purely by foreign key:
//! sections under `category_id`, items under `section_id`, and section-less
//! items under their `category_id`. Rows pointing at a missing parent are
//! dropped, matching the reference reconstruction.

use std::collections::HashMap;

use super::{Article, Category, Section};
use crate::store::rows::{ArticleRow, CategoryRow, ItemRow, SectionRow};

/// Rebuild the category tree from ordered flat rows.
///
/// Deterministic: the same rows always produce a structurally identical tree,
/// with sibling order taken from row order.
pub fn build_tree(
    category_rows: Vec<CategoryRow>,
    section_rows: Vec<SectionRow>,
    item_rows: Vec<ItemRow>,
) -> Vec<Category> {
    let mut section_items: HashMap<String, Vec<_>> = HashMap::new();
    let mut category_items: HashMap<String, Vec<_>> = HashMap::new();

    for row in item_rows {
        match (row.section_id.clone(), row.category_id.clone()) {
            (Some(section_id), _) => {
                section_items
                    .entry(section_id)
                    .or_default()
                    .push(row.into_model());
            }
            (None, Some(category_id)) => {
                category_items
                    .entry(category_id)
                    .or_default()
                    .push(row.into_model());
            }
            // Orphan row with neither parent; nothing to attach it to.
            (None, None) => {}
        }
    }

    let mut category_sections: HashMap<String, Vec<Section>> = HashMap::new();
    for row in section_rows {
        let category_id = row.category_id.clone();
        let mut section = row.into_model();
        section.items = section_items.remove(&section.id).unwrap_or_default();
        category_sections.entry(category_id).or_default().push(section);
    }

    category_rows
        .into_iter()
        .map(|row| {
            let mut category = row.into_model();
            category.sections = category_sections.remove(&category.id).unwrap_or_default();
            category.items = category_items.remove(&category.id).unwrap_or_default();
            category
        })
        .collect()
}

/// Map article rows back to model articles, preserving row order.
pub fn build_articles(article_rows: Vec<ArticleRow>) -> Vec<Article> {
    article_rows.into_iter().map(ArticleRow::into_model).collect()
}

/// Previous and next sibling of a category, `None` at the boundaries.
pub fn category_neighbors<'a>(
    categories: &'a [Category],
    id: &str,
) -> (Option<&'a Category>, Option<&'a Category>) {
    neighbors_by(categories, |c| c.id == id)
}

/// Previous and next sibling of a section within its category.
pub fn section_neighbors<'a>(
    category: &'a Category,
    section_id: &str,
) -> (Option<&'a Section>, Option<&'a Section>) {
    neighbors_by(&category.sections, |s| s.id == section_id)
}

fn neighbors_by<T>(list: &[T], matches: impl Fn(&T) -> bool) -> (Option<&T>, Option<&T>) {
    let Some(pos) = list.iter().position(matches) else {
        return (None, None);
    };

    let prev = pos.checked_sub(1).and_then(|i| list.get(i));
    let next = list.get(pos + 1);
    (prev, next)
}

/// Move `list[from]` to position `to`, shifting everything between.
///
/// A rotation, not a swap: every element between the two positions changes
/// index. Out-of-range positions leave the list untouched and return `false`.
pub fn splice_move<T>(list: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= list.len() || to >= list.len() {
        return false;
    }
    if from == to {
        return true;
    }

    let element = list.remove(from);
    list.insert(to, element);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemType, Theme};

    fn sample_rows() -> (Vec<CategoryRow>, Vec<SectionRow>, Vec<ItemRow>) {
        let categories = vec![
            CategoryRow {
                id: "analysis".into(),
                title: "Анализ ЦА".into(),
                description: "d".into(),
                theme: Theme::Rose,
                index: 0,
            },
            CategoryRow {
                id: "posts".into(),
                title: "Посты".into(),
                description: "d".into(),
                theme: Theme::Orange,
                index: 1,
            },
        ];

        let sections = vec![SectionRow {
            id: "analysis-prompts".into(),
            category_id: "analysis".into(),
            title: "Промты".into(),
            description: None,
            instructions: None,
            icon: None,
            index: 0,
        }];

        let items = vec![
            ItemRow {
                id: "avatar-creation".into(),
                section_id: Some("analysis-prompts".into()),
                category_id: None,
                title: "Аватар".into(),
                description: String::new(),
                instructions: String::new(),
                content: String::new(),
                item_type: ItemType::Prompt,
                sub_prompts: vec![],
                index: 0,
            },
            ItemRow {
                id: "quick-post".into(),
                section_id: None,
                category_id: Some("posts".into()),
                title: "Быстрый пост".into(),
                description: String::new(),
                instructions: String::new(),
                content: String::new(),
                item_type: ItemType::Prompt,
                sub_prompts: vec![],
                index: 0,
            },
        ];

        (categories, sections, items)
    }

    #[test]
    fn test_nesting_by_foreign_key() {
        let (c, s, i) = sample_rows();
        let tree = build_tree(c, s, i);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].sections.len(), 1);
        assert_eq!(tree[0].sections[0].items[0].id, "avatar-creation");

        // Section-less item lands directly on its category.
        assert!(tree[1].sections.is_empty());
        assert_eq!(tree[1].items[0].id, "quick-post");
    }

    #[test]
    fn test_reconstruction_is_idempotent() {
        let (c, s, i) = sample_rows();
        let first = build_tree(c.clone(), s.clone(), i.clone());
        let second = build_tree(c, s, i);
        assert_eq!(first, second);
    }

    #[test]
    fn test_orphan_rows_are_dropped() {
        let (c, mut s, mut i) = sample_rows();
        s.push(SectionRow {
            id: "ghost".into(),
            category_id: "no-such-category".into(),
            title: "Ghost".into(),
            description: None,
            instructions: None,
            icon: None,
            index: 9,
        });
        i.push(ItemRow {
            id: "ghost-item".into(),
            section_id: Some("no-such-section".into()),
            category_id: None,
            title: "Ghost".into(),
            description: String::new(),
            instructions: String::new(),
            content: String::new(),
            item_type: ItemType::Prompt,
            sub_prompts: vec![],
            index: 9,
        });

        let tree = build_tree(c, s, i);
        assert!(tree.iter().all(|cat| cat.section("ghost").is_none()));
    }

    #[test]
    fn test_neighbors_at_boundaries() {
        let (c, s, i) = sample_rows();
        let tree = build_tree(c, s, i);

        let (prev, next) = category_neighbors(&tree, "analysis");
        assert!(prev.is_none());
        assert_eq!(next.unwrap().id, "posts");

        let (prev, next) = category_neighbors(&tree, "posts");
        assert_eq!(prev.unwrap().id, "analysis");
        assert!(next.is_none());

        let (prev, next) = category_neighbors(&tree, "missing");
        assert!(prev.is_none() && next.is_none());
    }

    #[test]
    fn test_splice_move_rotates() {
        let mut list = vec!["a", "b", "c", "d"];
        assert!(splice_move(&mut list, 0, 2));
        assert_eq!(list, ["b", "c", "a", "d"]);

        assert!(splice_move(&mut list, 3, 0));
        assert_eq!(list, ["d", "b", "c", "a"]);
    }

    #[test]
    fn test_splice_move_out_of_bounds_is_noop() {
        let mut list = vec![1, 2, 3];
        assert!(!splice_move(&mut list, 3, 0));
        assert!(!splice_move(&mut list, 0, 3));
        assert_eq!(list, [1, 2, 3]);
    }
}
