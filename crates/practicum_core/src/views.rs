//! Derived views over the content tree.
//!
//! Search and favorites both work over the same flattened ancestry index: a
//! precomputed list pairing every item with its owning category and section.
//! The index stores positions, not clones, so it is cheap to rebuild whenever
//! the tree is replaced and resolves to borrows on demand. Both projections
//! are pure functions of (tree, input) with no state of their own.

use crate::catalog::{Category, PromptItem, Section};

/// An item together with its ancestry. `section` is `None` for section-less
/// category items.
#[derive(Debug, Clone, Copy)]
pub struct ItemContext<'a> {
    /// The item itself.
    pub item: &'a PromptItem,
    /// Owning category.
    pub category: &'a Category,
    /// Owning section, when the item is nested the original way.
    pub section: Option<&'a Section>,
}

#[derive(Debug, Clone, Copy)]
struct FlatEntry {
    category: usize,
    section: Option<usize>,
    item: usize,
}

/// Flattened ancestry index. Rebuilt only when the tree is replaced;
/// positions index into the tree it was built from.
#[derive(Debug, Default)]
pub struct FlatIndex {
    entries: Vec<FlatEntry>,
}

impl FlatIndex {
    /// Walk the tree once, collecting every item with its ancestry: each
    /// category's sectioned items in order, then its section-less items.
    pub fn build(categories: &[Category]) -> Self {
        let mut entries = Vec::new();

        for (c, category) in categories.iter().enumerate() {
            for (s, section) in category.sections.iter().enumerate() {
                for (i, _) in section.items.iter().enumerate() {
                    entries.push(FlatEntry {
                        category: c,
                        section: Some(s),
                        item: i,
                    });
                }
            }
            for (i, _) in category.items.iter().enumerate() {
                entries.push(FlatEntry {
                    category: c,
                    section: None,
                    item: i,
                });
            }
        }

        Self { entries }
    }

    /// Number of items in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the tree holds no items at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the stored positions against the tree. Entries that no longer
    /// resolve (index built from a different tree) are skipped rather than
    /// panicking.
    pub fn resolve<'a>(
        &'a self,
        categories: &'a [Category],
    ) -> impl Iterator<Item = ItemContext<'a>> + 'a {
        self.entries.iter().filter_map(move |entry| {
            let category = categories.get(entry.category)?;
            match entry.section {
                Some(s) => {
                    let section = category.sections.get(s)?;
                    let item = section.items.get(entry.item)?;
                    Some(ItemContext {
                        item,
                        category,
                        section: Some(section),
                    })
                }
                None => {
                    let item = category.items.get(entry.item)?;
                    Some(ItemContext {
                        item,
                        category,
                        section: None,
                    })
                }
            }
        })
    }
}

/// Case-insensitive substring search over item title OR description.
///
/// An empty or whitespace-only query yields an empty result set; that is the
/// "not searching" state, distinct from a real query with no matches.
pub fn search<'a>(
    categories: &'a [Category],
    index: &'a FlatIndex,
    query: &str,
) -> Vec<ItemContext<'a>> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let needle = trimmed.to_lowercase();
    index
        .resolve(categories)
        .filter(|ctx| {
            ctx.item.title.to_lowercase().contains(&needle)
                || ctx.item.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Items whose id is in the favorites list, in index order. Ids that no
/// longer exist in the tree are silently filtered out.
pub fn favorites<'a>(
    categories: &'a [Category],
    index: &'a FlatIndex,
    favorite_ids: &[String],
) -> Vec<ItemContext<'a>> {
    index
        .resolve(categories)
        .filter(|ctx| favorite_ids.iter().any(|id| *id == ctx.item.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemType;

    fn item(id: &str, title: &str, description: &str) -> PromptItem {
        PromptItem {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            item_type: ItemType::Prompt,
            ..Default::default()
        }
    }

    fn sample_tree() -> Vec<Category> {
        vec![
            Category {
                id: "analysis".into(),
                title: "Анализ".into(),
                description: String::new(),
                sections: vec![Section {
                    id: "s1".into(),
                    title: "Промты".into(),
                    items: vec![
                        item("avatar", "Создание аватара", "Портрет клиента"),
                        item("pains", "Скрытые боли", "Неочевидные проблемы"),
                    ],
                    ..Default::default()
                }],
                ..Default::default()
            },
            Category {
                id: "posts".into(),
                title: "Посты".into(),
                description: String::new(),
                items: vec![item("quick", "Быстрый пост", "Пост за минуту")],
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_index_covers_sectionless_items() {
        let tree = sample_tree();
        let index = FlatIndex::build(&tree);
        assert_eq!(index.len(), 3);

        let contexts: Vec<_> = index.resolve(&tree).collect();
        let direct = contexts.iter().find(|c| c.item.id == "quick").unwrap();
        assert!(direct.section.is_none());
        assert_eq!(direct.category.id, "posts");
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let tree = sample_tree();
        let index = FlatIndex::build(&tree);

        assert!(search(&tree, &index, "").is_empty());
        assert!(search(&tree, &index, "   ").is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let tree = sample_tree();
        let index = FlatIndex::build(&tree);

        // Matches a title.
        let by_title = search(&tree, &index, "АВАТАРА");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].item.id, "avatar");

        // Matches only a description.
        let by_description = search(&tree, &index, "неочевидные");
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].item.id, "pains");
    }

    #[test]
    fn test_every_result_contains_the_query() {
        let tree = sample_tree();
        let index = FlatIndex::build(&tree);

        for ctx in search(&tree, &index, "пост") {
            let haystack = format!("{} {}", ctx.item.title, ctx.item.description).to_lowercase();
            assert!(haystack.contains("пост"));
        }
    }

    #[test]
    fn test_search_is_pure() {
        let tree = sample_tree();
        let index = FlatIndex::build(&tree);

        let first: Vec<_> = search(&tree, &index, "боли")
            .iter()
            .map(|c| c.item.id.clone())
            .collect();
        let second: Vec<_> = search(&tree, &index, "боли")
            .iter()
            .map(|c| c.item.id.clone())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_favorites_filters_dangling_ids() {
        let tree = sample_tree();
        let index = FlatIndex::build(&tree);
        let ids = vec!["quick".to_string(), "deleted-long-ago".to_string()];

        let favs = favorites(&tree, &index, &ids);
        assert_eq!(favs.len(), 1);
        assert_eq!(favs[0].item.id, "quick");
    }
}
