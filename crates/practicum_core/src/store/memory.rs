//! In-memory store implementation for testing and offline development.
//!
//! Tables are [`IndexMap`]s behind an `RwLock`, so insertion order is stable
//! and the store is cheap to share. Reads apply the same ordering the hosted
//! backend does (`index` ascending, articles by `date` descending). Updates
//! use JSON merge semantics, matching how a PATCH lands on a real row.

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::rows::{
    ArticlePatch, ArticleRow, CategoryPatch, CategoryRow, ItemPatch, ItemRow, SectionPatch,
    SectionRow,
};
use super::{BoxFuture, RemoteStore};
use crate::error::Result;

#[derive(Debug, Default)]
struct Tables {
    categories: IndexMap<String, CategoryRow>,
    sections: IndexMap<String, SectionRow>,
    items: IndexMap<String, ItemRow>,
    articles: IndexMap<String, ArticleRow>,
}

/// In-memory [`RemoteStore`] for tests and offline development.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Merge a partial row over an existing one the way a PATCH does: present
/// patch fields overwrite, explicit nulls clear, absent fields are untouched.
fn merge_patch<R, P>(row: &R, patch: &P) -> Result<R>
where
    R: Serialize + DeserializeOwned,
    P: Serialize,
{
    let mut base = serde_json::to_value(row)?;
    let overlay = serde_json::to_value(patch)?;

    if let (Some(base_map), Some(overlay_map)) = (base.as_object_mut(), overlay.as_object()) {
        for (key, value) in overlay_map {
            base_map.insert(key.clone(), value.clone());
        }
    }

    Ok(serde_json::from_value(base)?)
}

impl RemoteStore for InMemoryStore {
    fn fetch_categories(&self) -> BoxFuture<'_, Result<Vec<CategoryRow>>> {
        Box::pin(async move {
            let tables = self.tables.read().unwrap();
            let mut rows: Vec<_> = tables.categories.values().cloned().collect();
            rows.sort_by_key(|r| r.index);
            Ok(rows)
        })
    }

    fn fetch_sections(&self) -> BoxFuture<'_, Result<Vec<SectionRow>>> {
        Box::pin(async move {
            let tables = self.tables.read().unwrap();
            let mut rows: Vec<_> = tables.sections.values().cloned().collect();
            rows.sort_by_key(|r| r.index);
            Ok(rows)
        })
    }

    fn fetch_items(&self) -> BoxFuture<'_, Result<Vec<ItemRow>>> {
        Box::pin(async move {
            let tables = self.tables.read().unwrap();
            let mut rows: Vec<_> = tables.items.values().cloned().collect();
            rows.sort_by_key(|r| r.index);
            Ok(rows)
        })
    }

    fn fetch_articles(&self) -> BoxFuture<'_, Result<Vec<ArticleRow>>> {
        Box::pin(async move {
            let tables = self.tables.read().unwrap();
            let mut rows: Vec<_> = tables.articles.values().cloned().collect();
            rows.sort_by(|a, b| b.date.cmp(&a.date));
            Ok(rows)
        })
    }

    fn insert_category(&self, row: CategoryRow) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let mut tables = self.tables.write().unwrap();
            tables.categories.insert(row.id.clone(), row);
            Ok(())
        })
    }

    fn insert_section(&self, row: SectionRow) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let mut tables = self.tables.write().unwrap();
            tables.sections.insert(row.id.clone(), row);
            Ok(())
        })
    }

    fn insert_item(&self, row: ItemRow) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let mut tables = self.tables.write().unwrap();
            tables.items.insert(row.id.clone(), row);
            Ok(())
        })
    }

    fn insert_article(&self, row: ArticleRow) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let mut tables = self.tables.write().unwrap();
            tables.articles.insert(row.id.clone(), row);
            Ok(())
        })
    }

    fn update_category<'a>(
        &'a self,
        id: &'a str,
        patch: CategoryPatch,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut tables = self.tables.write().unwrap();
            if let Some(row) = tables.categories.get(id) {
                let merged = merge_patch(row, &patch)?;
                tables.categories.insert(id.to_string(), merged);
            }
            Ok(())
        })
    }

    fn update_section<'a>(&'a self, id: &'a str, patch: SectionPatch) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut tables = self.tables.write().unwrap();
            if let Some(row) = tables.sections.get(id) {
                let merged = merge_patch(row, &patch)?;
                tables.sections.insert(id.to_string(), merged);
            }
            Ok(())
        })
    }

    fn update_item<'a>(&'a self, id: &'a str, patch: ItemPatch) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut tables = self.tables.write().unwrap();
            if let Some(row) = tables.items.get(id) {
                let merged = merge_patch(row, &patch)?;
                tables.items.insert(id.to_string(), merged);
            }
            Ok(())
        })
    }

    fn update_article<'a>(&'a self, id: &'a str, patch: ArticlePatch) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut tables = self.tables.write().unwrap();
            if let Some(row) = tables.articles.get(id) {
                let merged = merge_patch(row, &patch)?;
                tables.articles.insert(id.to_string(), merged);
            }
            Ok(())
        })
    }

    fn delete_category<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut tables = self.tables.write().unwrap();
            tables.categories.shift_remove(id);
            Ok(())
        })
    }

    fn delete_section<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut tables = self.tables.write().unwrap();
            tables.sections.shift_remove(id);
            Ok(())
        })
    }

    fn delete_item<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut tables = self.tables.write().unwrap();
            tables.items.shift_remove(id);
            Ok(())
        })
    }

    fn delete_article<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut tables = self.tables.write().unwrap();
            tables.articles.shift_remove(id);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Theme;

    #[tokio::test]
    async fn test_fetch_orders_by_index() {
        let store = InMemoryStore::new();
        for (id, index) in [("b", 1), ("a", 0), ("c", 2)] {
            store
                .insert_category(CategoryRow {
                    id: id.into(),
                    title: id.to_uppercase(),
                    description: String::new(),
                    theme: Theme::Orange,
                    index,
                })
                .await
                .unwrap();
        }

        let rows = store.fetch_categories().await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_articles_order_newest_first() {
        let store = InMemoryStore::new();
        for (id, date) in [("old", "2024-01-10"), ("new", "2024-12-01")] {
            store
                .insert_article(ArticleRow {
                    id: id.into(),
                    title: id.into(),
                    description: String::new(),
                    cover_image: None,
                    blocks: vec![],
                    published: true,
                    date: date.into(),
                })
                .await
                .unwrap();
        }

        let rows = store.fetch_articles().await.unwrap();
        assert_eq!(rows[0].id, "new");
    }

    #[tokio::test]
    async fn test_update_merges_patch() {
        let store = InMemoryStore::new();
        store
            .insert_category(CategoryRow {
                id: "c1".into(),
                title: "Old".into(),
                description: "Desc".into(),
                theme: Theme::Blue,
                index: 0,
            })
            .await
            .unwrap();

        store
            .update_category(
                "c1",
                CategoryPatch {
                    title: Some("New".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let rows = store.fetch_categories().await.unwrap();
        assert_eq!(rows[0].title, "New");
        // Untouched fields survive the merge.
        assert_eq!(rows[0].description, "Desc");
        assert_eq!(rows[0].theme, Theme::Blue);
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_ok() {
        let store = InMemoryStore::new();
        assert!(store.delete_item("nope").await.is_ok());
    }
}
