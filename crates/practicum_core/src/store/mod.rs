//! Remote table store abstraction.
//!
//! The hosted backend exposes four table-like collections (`categories`,
//! `sections`, `items`, `articles`) with select/insert/update/delete and
//! explicit ordering. [`RemoteStore`] captures exactly that contract so the
//! engine runs unchanged against the REST backend ([`RestStore`]), an
//! in-memory store in tests ([`InMemoryStore`]), or any future transport.
//!
//! ## Object safety
//!
//! `RemoteStore` is designed to be object-safe so it can be used behind
//! `dyn RemoteStore`. To enable this, all methods return boxed futures.

pub mod memory;
pub mod rest;
pub mod rows;

pub use memory::InMemoryStore;
pub use rest::RestStore;

use std::future::Future;
use std::pin::Pin;

use crate::error::Result;
use rows::{
    ArticlePatch, ArticleRow, CategoryPatch, CategoryRow, ItemPatch, ItemRow, SectionPatch,
    SectionRow,
};

/// A boxed future for object-safe async methods.
///
/// On native targets, futures are `Send` for compatibility with
/// multi-threaded runtimes. On WASM there is no `Send` requirement since
/// JavaScript is single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A boxed future for object-safe async methods (WASM, no `Send`).
#[cfg(target_arch = "wasm32")]
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Contract of the hosted table store.
///
/// Reads return rows already ordered: `categories`, `sections` and `items`
/// by their `index` column ascending, `articles` by `date` descending.
/// Writes address single rows by primary key; batch inserts exist for the
/// seeding path and default to sequential single-row inserts.
pub trait RemoteStore: Send + Sync {
    /// Fetch all category rows, ordered by `index`.
    fn fetch_categories(&self) -> BoxFuture<'_, Result<Vec<CategoryRow>>>;

    /// Fetch all section rows, ordered by `index`.
    fn fetch_sections(&self) -> BoxFuture<'_, Result<Vec<SectionRow>>>;

    /// Fetch all item rows, ordered by `index`.
    fn fetch_items(&self) -> BoxFuture<'_, Result<Vec<ItemRow>>>;

    /// Fetch all article rows, ordered by `date` descending.
    fn fetch_articles(&self) -> BoxFuture<'_, Result<Vec<ArticleRow>>>;

    /// Insert one category row.
    fn insert_category(&self, row: CategoryRow) -> BoxFuture<'_, Result<()>>;

    /// Insert one section row.
    fn insert_section(&self, row: SectionRow) -> BoxFuture<'_, Result<()>>;

    /// Insert one item row.
    fn insert_item(&self, row: ItemRow) -> BoxFuture<'_, Result<()>>;

    /// Insert one article row.
    fn insert_article(&self, row: ArticleRow) -> BoxFuture<'_, Result<()>>;

    /// Insert many category rows (seeding). Defaults to sequential inserts;
    /// backends with a batch endpoint should override.
    fn insert_categories(&self, rows: Vec<CategoryRow>) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            for row in rows {
                self.insert_category(row).await?;
            }
            Ok(())
        })
    }

    /// Insert many section rows (seeding).
    fn insert_sections(&self, rows: Vec<SectionRow>) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            for row in rows {
                self.insert_section(row).await?;
            }
            Ok(())
        })
    }

    /// Insert many item rows (seeding).
    fn insert_items(&self, rows: Vec<ItemRow>) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            for row in rows {
                self.insert_item(row).await?;
            }
            Ok(())
        })
    }

    /// Insert many article rows (seeding).
    fn insert_articles(&self, rows: Vec<ArticleRow>) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            for row in rows {
                self.insert_article(row).await?;
            }
            Ok(())
        })
    }

    /// Patch the category with the given id.
    fn update_category<'a>(
        &'a self,
        id: &'a str,
        patch: CategoryPatch,
    ) -> BoxFuture<'a, Result<()>>;

    /// Patch the section with the given id.
    fn update_section<'a>(&'a self, id: &'a str, patch: SectionPatch) -> BoxFuture<'a, Result<()>>;

    /// Patch the item with the given id.
    fn update_item<'a>(&'a self, id: &'a str, patch: ItemPatch) -> BoxFuture<'a, Result<()>>;

    /// Patch the article with the given id.
    fn update_article<'a>(&'a self, id: &'a str, patch: ArticlePatch) -> BoxFuture<'a, Result<()>>;

    /// Delete the category with the given id.
    fn delete_category<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>>;

    /// Delete the section with the given id.
    fn delete_section<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>>;

    /// Delete the item with the given id.
    fn delete_item<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>>;

    /// Delete the article with the given id.
    fn delete_article<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>>;
}
