//! End-to-end scenarios over the engine with in-memory backends.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use practicum_core::cache::MemoryCache;
use practicum_core::catalog::{Category, ItemType, PromptItem, Section, Theme};
use practicum_core::config::Config;
use practicum_core::error::{PracticumError, Result};
use practicum_core::service::Practicum;
use practicum_core::store::rows::{
    ArticlePatch, ArticleRow, CategoryPatch, CategoryRow, ItemPatch, ItemRow, SectionPatch,
    SectionRow,
};
use practicum_core::store::{BoxFuture, InMemoryStore, RemoteStore};

/// Delegating store whose inserts can be switched to fail, for exercising
/// the add-then-refetch reconciliation path.
struct FlakyStore {
    inner: InMemoryStore,
    fail_inserts: Arc<AtomicBool>,
}

impl FlakyStore {
    fn insert_error() -> PracticumError {
        PracticumError::Remote {
            table: "categories".into(),
            status: 500,
            message: "insert rejected".into(),
        }
    }
}

impl RemoteStore for FlakyStore {
    fn fetch_categories(&self) -> BoxFuture<'_, Result<Vec<CategoryRow>>> {
        self.inner.fetch_categories()
    }
    fn fetch_sections(&self) -> BoxFuture<'_, Result<Vec<SectionRow>>> {
        self.inner.fetch_sections()
    }
    fn fetch_items(&self) -> BoxFuture<'_, Result<Vec<ItemRow>>> {
        self.inner.fetch_items()
    }
    fn fetch_articles(&self) -> BoxFuture<'_, Result<Vec<ArticleRow>>> {
        self.inner.fetch_articles()
    }
    fn insert_category(&self, row: CategoryRow) -> BoxFuture<'_, Result<()>> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Box::pin(async { Err(Self::insert_error()) });
        }
        self.inner.insert_category(row)
    }
    fn insert_section(&self, row: SectionRow) -> BoxFuture<'_, Result<()>> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Box::pin(async { Err(Self::insert_error()) });
        }
        self.inner.insert_section(row)
    }
    fn insert_item(&self, row: ItemRow) -> BoxFuture<'_, Result<()>> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Box::pin(async { Err(Self::insert_error()) });
        }
        self.inner.insert_item(row)
    }
    fn insert_article(&self, row: ArticleRow) -> BoxFuture<'_, Result<()>> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Box::pin(async { Err(Self::insert_error()) });
        }
        self.inner.insert_article(row)
    }
    fn update_category<'a>(
        &'a self,
        id: &'a str,
        patch: CategoryPatch,
    ) -> BoxFuture<'a, Result<()>> {
        self.inner.update_category(id, patch)
    }
    fn update_section<'a>(&'a self, id: &'a str, patch: SectionPatch) -> BoxFuture<'a, Result<()>> {
        self.inner.update_section(id, patch)
    }
    fn update_item<'a>(&'a self, id: &'a str, patch: ItemPatch) -> BoxFuture<'a, Result<()>> {
        self.inner.update_item(id, patch)
    }
    fn update_article<'a>(&'a self, id: &'a str, patch: ArticlePatch) -> BoxFuture<'a, Result<()>> {
        self.inner.update_article(id, patch)
    }
    fn delete_category<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        self.inner.delete_category(id)
    }
    fn delete_section<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        self.inner.delete_section(id)
    }
    fn delete_item<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        self.inner.delete_item(id)
    }
    fn delete_article<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        self.inner.delete_article(id)
    }
}

fn test_item(id: &str, title: &str) -> PromptItem {
    PromptItem {
        id: id.into(),
        title: title.into(),
        item_type: ItemType::Prompt,
        ..Default::default()
    }
}

/// Create category → section → item, read the item back, delete it, and
/// confirm the section is empty again.
#[tokio::test]
async fn test_hierarchical_crud_scenario() {
    let store = InMemoryStore::new();
    // A pre-existing row keeps the seeding path out of this scenario.
    store
        .insert_category(CategoryRow {
            id: "existing".into(),
            title: "Existing".into(),
            description: String::new(),
            theme: Theme::Orange,
            index: 0,
        })
        .await
        .unwrap();

    let mut engine = Practicum::new(store.clone(), MemoryCache::new(), Config::default());
    engine.load().await;

    engine
        .add_category(Category {
            id: "cat-1".into(),
            title: "Новая категория".into(),
            description: "desc".into(),
            theme: Theme::Violet,
            ..Default::default()
        })
        .await;
    assert_eq!(engine.category("cat-1").unwrap().theme, Theme::Violet);

    engine
        .add_section(
            "cat-1",
            Section {
                id: "sec-1".into(),
                title: "Раздел".into(),
                ..Default::default()
            },
        )
        .await;

    engine
        .add_item("cat-1", Some("sec-1"), test_item("item-1", "Test"))
        .await;

    let item = engine.item("cat-1", Some("sec-1"), "item-1").unwrap();
    assert_eq!(item.title, "Test");

    // The optimistic writes all reached the store.
    assert_eq!(store.fetch_categories().await.unwrap().len(), 2);
    assert_eq!(store.fetch_sections().await.unwrap().len(), 1);
    assert_eq!(store.fetch_items().await.unwrap().len(), 1);

    engine.delete_item("cat-1", Some("sec-1"), "item-1").await;
    assert!(engine.item("cat-1", Some("sec-1"), "item-1").is_none());
    assert!(engine.section("cat-1", "sec-1").unwrap().items.is_empty());
    assert_eq!(store.fetch_items().await.unwrap().len(), 0);
}

/// Favorite an item, see it in the favorites view, then delete the item and
/// watch the dangling favorite disappear from reads without being pruned.
#[tokio::test]
async fn test_favorites_survive_item_deletion_as_dangling() {
    let mut engine = Practicum::new(InMemoryStore::new(), MemoryCache::new(), Config::default());
    engine.load().await;

    engine
        .add_item("posts", None, test_item("fav-target", "Избранный"))
        .await;

    engine.toggle_favorite("fav-target");
    assert!(engine.is_favorite("fav-target"));

    let favorites = engine.favorite_items();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].item.id, "fav-target");
    assert!(favorites[0].section.is_none());

    engine.delete_item("posts", None, "fav-target").await;

    // The id still sits in the favorites list, but reads filter it out.
    assert!(engine.is_favorite("fav-target"));
    assert!(engine.favorite_items().is_empty());
}

/// A failed `add` self-heals through a forced refetch; the optimistic row
/// disappears again once the store answers without it.
#[tokio::test]
async fn test_failed_add_reconciles_via_refetch() {
    let inner = InMemoryStore::new();
    inner
        .insert_category(CategoryRow {
            id: "c1".into(),
            title: "Only".into(),
            description: String::new(),
            theme: Theme::Orange,
            index: 0,
        })
        .await
        .unwrap();

    let fail_inserts = Arc::new(AtomicBool::new(false));
    let store = FlakyStore {
        inner,
        fail_inserts: fail_inserts.clone(),
    };

    let mut engine = Practicum::new(store, MemoryCache::new(), Config::default());
    engine.load().await;
    assert_eq!(engine.categories().len(), 1);

    fail_inserts.store(true, Ordering::SeqCst);
    engine
        .add_category(Category {
            id: "doomed".into(),
            title: "Doomed".into(),
            description: String::new(),
            ..Default::default()
        })
        .await;

    // The refetch rolled the optimistic insert back out.
    assert_eq!(engine.categories().len(), 1);
    assert!(engine.category("doomed").is_none());
    assert!(!engine.notices().is_empty());
}

/// Section-less items and sectioned items coexist under one category.
#[tokio::test]
async fn test_mixed_category_content() {
    let mut engine = Practicum::new(InMemoryStore::new(), MemoryCache::new(), Config::default());
    engine.load().await;

    engine
        .add_item("analysis", None, test_item("direct", "Прямой промт"))
        .await;

    let category = engine.category("analysis").unwrap();
    assert!(!category.sections.is_empty());
    assert_eq!(category.items.len(), 1);

    // Both placements are reachable through the same read surface.
    assert!(engine.item("analysis", None, "direct").is_some());
    assert!(
        engine
            .item("analysis", Some("analysis-prompts"), "avatar-creation")
            .is_some()
    );
}
