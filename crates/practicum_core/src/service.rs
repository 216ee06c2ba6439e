//! The data synchronization engine.
//!
//! [`Practicum`] is the single source of truth for the content tree and the
//! article list during a session. It hydrates instantly from the local cache,
//! reconciles with the remote store, seeds an empty store on first run, and
//! performs every mutation optimistically: the in-memory tree and the cache
//! snapshot are updated before the remote write is issued.
//!
//! Failed remote writes surface as notices, never as errors to the caller.
//! Failed `add` writes additionally force a refetch so the tree re-converges
//! with the store; failed updates, deletes and moves leave the optimistic
//! state in place until the next full reload. That asymmetry matches the
//! observed behavior of the app this engine backs.
//!
//! Mutations take `&mut self`, which serializes them by construction; views
//! receive the engine by reference and read through the accessor methods.

use serde::{Deserialize, Serialize};

use crate::cache::{CacheStore, keys};
use crate::catalog::tree::{self, build_articles, build_tree, splice_move};
use crate::catalog::{Article, Category, PromptItem, Section};
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::error::{PracticumError, Result};
use crate::notify::{Notice, NoticeQueue};
use crate::seed;
use crate::session::{AdminSession, Preferences};
use crate::store::RemoteStore;
use crate::store::rows::{
    ArticlePatch, ArticleRow, CategoryPatch, CategoryRow, ItemPatch, ItemRow, SectionPatch,
    SectionRow,
};
use crate::views::{self, FlatIndex, ItemContext};

/// Cache snapshot layout: the whole denormalized tree plus articles, stamped
/// with the write time.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    categories: Vec<Category>,
    articles: Vec<Article>,
    timestamp: String,
}

#[derive(Debug, Default)]
struct AppState {
    categories: Vec<Category>,
    articles: Vec<Article>,
    favorites: Vec<String>,
    search_query: String,
}

struct Fetched {
    categories: Vec<CategoryRow>,
    sections: Vec<SectionRow>,
    items: Vec<ItemRow>,
    articles: Vec<ArticleRow>,
}

/// The data synchronization engine. Owns the tree, articles, favorites,
/// search state and notice queue; sole writer of both the cache and the
/// remote store.
pub struct Practicum<S: RemoteStore, C: CacheStore> {
    store: S,
    cache: C,
    config: Config,
    state: AppState,
    index: FlatIndex,
    notices: NoticeQueue,
    search_debounce: Debouncer<String>,
    admin: AdminSession,
    loading: bool,
    seed_attempted: bool,
}

impl<S: RemoteStore, C: CacheStore> Practicum<S, C> {
    /// Build an engine over the given backends. Favorites are read from the
    /// cache immediately; the content tree stays empty until [`load`] runs.
    ///
    /// [`load`]: Practicum::load
    pub fn new(store: S, cache: C, config: Config) -> Self {
        let favorites = load_favorites(&cache);

        Self {
            store,
            cache,
            config,
            state: AppState {
                favorites,
                ..Default::default()
            },
            index: FlatIndex::default(),
            notices: NoticeQueue::new(),
            search_debounce: Debouncer::for_search(),
            admin: AdminSession::new(),
            loading: true,
            seed_attempted: false,
        }
    }

    // ========================================================================
    // Startup
    // ========================================================================

    /// Run the startup protocol: hydrate from cache, fetch the four
    /// collections, seed an empty store (once), rebuild the tree, persist
    /// the fresh snapshot. Never fails upward and always clears the loading
    /// flag; failures turn into notices.
    pub async fn load(&mut self) {
        self.loading = true;
        let hydrated = self.hydrate_from_cache();

        match self.fetch_all().await {
            Ok(fetched) => {
                if fetched.categories.is_empty() && !self.seed_attempted {
                    self.seed_attempted = true;
                    if let Err(e) = self.run_seed().await {
                        log::warn!("seeding failed: {e}");
                        self.notices.error("Could not seed the catalog");
                    }
                    // One repeat fetch after seeding, successful or not.
                    match self.fetch_all().await {
                        Ok(fetched) => self.install(fetched),
                        Err(e) => self.load_failed(hydrated, e),
                    }
                } else {
                    self.install(fetched);
                }
            }
            Err(e) => self.load_failed(hydrated, e),
        }

        self.loading = false;
    }

    /// Fetch everything again and replace the in-memory state. Used by the
    /// admin reload action and by failed `add` writes to reconcile.
    pub async fn refetch(&mut self) {
        match self.fetch_all().await {
            Ok(fetched) => self.install(fetched),
            Err(e) => {
                log::warn!("refetch failed: {e}");
                self.notices.error("Could not refresh the catalog from the server");
            }
        }
    }

    async fn fetch_all(&self) -> Result<Fetched> {
        let (categories, sections, items, articles) = tokio::join!(
            self.store.fetch_categories(),
            self.store.fetch_sections(),
            self.store.fetch_items(),
            self.store.fetch_articles(),
        );

        Ok(Fetched {
            categories: categories?,
            sections: sections?,
            items: items?,
            articles: articles?,
        })
    }

    async fn run_seed(&mut self) -> Result<()> {
        let rows = seed::seed_rows();
        log::debug!(
            "seeding empty store: {} categories, {} sections, {} items",
            rows.categories.len(),
            rows.sections.len(),
            rows.items.len()
        );

        // Dependency order: parents before children.
        self.store.insert_categories(rows.categories).await?;
        self.store.insert_sections(rows.sections).await?;
        self.store.insert_items(rows.items).await?;
        if !rows.articles.is_empty() {
            self.store.insert_articles(rows.articles).await?;
        }
        Ok(())
    }

    fn install(&mut self, fetched: Fetched) {
        self.state.categories = build_tree(fetched.categories, fetched.sections, fetched.items);
        self.state.articles = build_articles(fetched.articles);
        self.after_tree_change();
    }

    fn hydrate_from_cache(&mut self) -> bool {
        let raw = match self.cache.get(keys::SNAPSHOT) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                log::warn!("snapshot read failed: {e}");
                return false;
            }
        };

        match serde_json::from_str::<Snapshot>(&raw) {
            Ok(snapshot) => {
                self.state.categories = snapshot.categories;
                self.state.articles = snapshot.articles;
                self.index = FlatIndex::build(&self.state.categories);
                true
            }
            Err(e) => {
                // A corrupt snapshot is not worth a notice; the fetch path
                // will rebuild it.
                log::warn!("discarding unparseable snapshot: {e}");
                false
            }
        }
    }

    fn load_failed(&mut self, hydrated: bool, err: PracticumError) {
        log::warn!("load failed: {err}");
        if hydrated {
            self.notices
                .info("Showing cached catalog — the server is unreachable");
        } else {
            self.notices.error("Could not load the catalog");
        }
    }

    // ========================================================================
    // Category operations
    // ========================================================================

    /// Add a category at the end of the list.
    pub async fn add_category(&mut self, category: Category) {
        let index = self.state.categories.len() as i64;
        let row = CategoryRow::from_model(&category, index);
        let title = category.title.clone();

        self.state.categories.push(category);
        self.after_tree_change();

        if let Err(e) = self.store.insert_category(row).await {
            log::warn!("insert_category failed: {e}");
            self.notices
                .error(format!("Could not save category \"{title}\" to the server"));
            self.refetch().await;
        }
    }

    /// Patch a category's own fields (children are managed by their own
    /// operations).
    pub async fn update_category(&mut self, id: &str, patch: CategoryPatch) {
        if let Some(category) = self.state.categories.iter_mut().find(|c| c.id == id) {
            patch.apply(category);
            self.after_tree_change();
        }

        if let Err(e) = self.store.update_category(id, patch).await {
            log::warn!("update_category failed: {e}");
            self.notices.error("Could not update the category on the server");
        }
    }

    /// Delete a category. Child rows are removed by the store's cascade; a
    /// stale child row would be dropped as an orphan on the next fetch
    /// anyway.
    pub async fn delete_category(&mut self, id: &str) {
        self.state.categories.retain(|c| c.id != id);
        self.after_tree_change();

        if let Err(e) = self.store.delete_category(id).await {
            log::warn!("delete_category failed: {e}");
            self.notices.error("Could not delete the category on the server");
        }
    }

    /// Move the category at `from` to position `to`. Out-of-range positions
    /// are a no-op. The whole sibling order is rewritten remotely: the move
    /// is a rotation, so every category between the two positions changed
    /// index.
    pub async fn move_category(&mut self, from: usize, to: usize) {
        if !splice_move(&mut self.state.categories, from, to) {
            return;
        }
        self.after_tree_change();

        let ids: Vec<String> = self.state.categories.iter().map(|c| c.id.clone()).collect();
        for (i, id) in ids.iter().enumerate() {
            let patch = CategoryPatch {
                index: Some(i as i64),
                ..Default::default()
            };
            if let Err(e) = self.store.update_category(id, patch).await {
                log::warn!("move_category: index write for '{id}' failed: {e}");
                self.notices
                    .error("Could not persist the new category order");
                break;
            }
        }
    }

    // ========================================================================
    // Section operations
    // ========================================================================

    /// Add a section at the end of a category.
    pub async fn add_section(&mut self, category_id: &str, section: Section) {
        let Some(category) = self
            .state
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
        else {
            log::warn!("add_section: category '{category_id}' not in tree");
            return;
        };

        let index = category.sections.len() as i64;
        let row = SectionRow::from_model(category_id, &section, index);
        let title = section.title.clone();

        category.sections.push(section);
        self.after_tree_change();

        if let Err(e) = self.store.insert_section(row).await {
            log::warn!("insert_section failed: {e}");
            self.notices
                .error(format!("Could not save section \"{title}\" to the server"));
            self.refetch().await;
        }
    }

    /// Patch a section's own fields.
    pub async fn update_section(&mut self, category_id: &str, section_id: &str, patch: SectionPatch) {
        if let Some(section) = self
            .state
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .and_then(|c| c.sections.iter_mut().find(|s| s.id == section_id))
        {
            patch.apply(section);
            self.after_tree_change();
        }

        if let Err(e) = self.store.update_section(section_id, patch).await {
            log::warn!("update_section failed: {e}");
            self.notices.error("Could not update the section on the server");
        }
    }

    /// Delete a section and everything in it.
    pub async fn delete_section(&mut self, category_id: &str, section_id: &str) {
        if let Some(category) = self
            .state
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
        {
            category.sections.retain(|s| s.id != section_id);
            self.after_tree_change();
        }

        if let Err(e) = self.store.delete_section(section_id).await {
            log::warn!("delete_section failed: {e}");
            self.notices.error("Could not delete the section on the server");
        }
    }

    // ========================================================================
    // Item operations
    // ========================================================================

    /// Add an item. `section_id: None` places it directly under the category
    /// (the later schema revision).
    pub async fn add_item(
        &mut self,
        category_id: &str,
        section_id: Option<&str>,
        item: PromptItem,
    ) {
        let Some(items) = self.items_mut(category_id, section_id) else {
            log::warn!("add_item: parent '{category_id}'/{section_id:?} not in tree");
            return;
        };

        let index = items.len() as i64;
        let row = match section_id {
            Some(section_id) => ItemRow::in_section(section_id, &item, index),
            None => ItemRow::in_category(category_id, &item, index),
        };
        let title = item.title.clone();

        items.push(item);
        self.after_tree_change();

        if let Err(e) = self.store.insert_item(row).await {
            log::warn!("insert_item failed: {e}");
            self.notices
                .error(format!("Could not save item \"{title}\" to the server"));
            self.refetch().await;
        }
    }

    /// Patch an item.
    pub async fn update_item(
        &mut self,
        category_id: &str,
        section_id: Option<&str>,
        item_id: &str,
        patch: ItemPatch,
    ) {
        if let Some(item) = self
            .items_mut(category_id, section_id)
            .and_then(|items| items.iter_mut().find(|i| i.id == item_id))
        {
            patch.apply(item);
            self.after_tree_change();
        }

        if let Err(e) = self.store.update_item(item_id, patch).await {
            log::warn!("update_item failed: {e}");
            self.notices.error("Could not update the item on the server");
        }
    }

    /// Delete an item. Any favorite pointing at it goes dangling and is
    /// filtered out at read time.
    pub async fn delete_item(
        &mut self,
        category_id: &str,
        section_id: Option<&str>,
        item_id: &str,
    ) {
        if let Some(items) = self.items_mut(category_id, section_id) {
            items.retain(|i| i.id != item_id);
            self.after_tree_change();
        }

        if let Err(e) = self.store.delete_item(item_id).await {
            log::warn!("delete_item failed: {e}");
            self.notices.error("Could not delete the item on the server");
        }
    }

    fn items_mut(
        &mut self,
        category_id: &str,
        section_id: Option<&str>,
    ) -> Option<&mut Vec<PromptItem>> {
        let category = self
            .state
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)?;

        match section_id {
            Some(section_id) => category
                .sections
                .iter_mut()
                .find(|s| s.id == section_id)
                .map(|s| &mut s.items),
            None => Some(&mut category.items),
        }
    }

    // ========================================================================
    // Article operations
    // ========================================================================

    /// Add an article, keeping the newest-first order the remote reads use.
    pub async fn add_article(&mut self, article: Article) {
        let row = ArticleRow::from_model(&article);
        let title = article.title.clone();

        let position = self
            .state
            .articles
            .iter()
            .position(|a| a.date < article.date)
            .unwrap_or(self.state.articles.len());
        self.state.articles.insert(position, article);
        self.persist_snapshot();

        if let Err(e) = self.store.insert_article(row).await {
            log::warn!("insert_article failed: {e}");
            self.notices
                .error(format!("Could not save article \"{title}\" to the server"));
            self.refetch().await;
        }
    }

    /// Patch an article.
    pub async fn update_article(&mut self, id: &str, patch: ArticlePatch) {
        if let Some(article) = self.state.articles.iter_mut().find(|a| a.id == id) {
            patch.apply(article);
            self.persist_snapshot();
        }

        if let Err(e) = self.store.update_article(id, patch).await {
            log::warn!("update_article failed: {e}");
            self.notices.error("Could not update the article on the server");
        }
    }

    /// Delete an article.
    pub async fn delete_article(&mut self, id: &str) {
        self.state.articles.retain(|a| a.id != id);
        self.persist_snapshot();

        if let Err(e) = self.store.delete_article(id).await {
            log::warn!("delete_article failed: {e}");
            self.notices.error("Could not delete the article on the server");
        }
    }

    /// Move a block within an article. Blocks live in one JSON column, so
    /// the reorder is persisted as a single article patch. Out-of-range
    /// positions are a no-op.
    pub async fn move_article_block(&mut self, article_id: &str, from: usize, to: usize) {
        let Some(article) = self.state.articles.iter_mut().find(|a| a.id == article_id) else {
            return;
        };
        if !splice_move(&mut article.blocks, from, to) {
            return;
        }

        let blocks = article.blocks.clone();
        self.persist_snapshot();

        let patch = ArticlePatch {
            blocks: Some(blocks),
            ..Default::default()
        };
        if let Err(e) = self.store.update_article(article_id, patch).await {
            log::warn!("move_article_block failed: {e}");
            self.notices
                .error("Could not persist the new block order");
        }
    }

    // ========================================================================
    // Favorites
    // ========================================================================

    /// Toggle an item id in the favorites set and persist it. The id does
    /// not have to exist in the tree.
    pub fn toggle_favorite(&mut self, item_id: &str) {
        if let Some(pos) = self.state.favorites.iter().position(|id| id == item_id) {
            self.state.favorites.remove(pos);
        } else {
            self.state.favorites.push(item_id.to_string());
        }
        self.persist_favorites();
    }

    /// Whether an item id is currently favorited.
    pub fn is_favorite(&self, item_id: &str) -> bool {
        self.state.favorites.iter().any(|id| id == item_id)
    }

    /// Favorited item ids in toggle order.
    pub fn favorites(&self) -> &[String] {
        &self.state.favorites
    }

    /// Favorited items with ancestry, dangling ids filtered out.
    pub fn favorite_items(&self) -> Vec<ItemContext<'_>> {
        views::favorites(&self.state.categories, &self.index, &self.state.favorites)
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Feed a raw keystroke into the search debouncer.
    pub fn input_search_query(&mut self, query: &str) {
        self.search_debounce.push(query.to_string());
    }

    /// Wait out the debounce window and apply the surviving query, if any.
    pub async fn apply_pending_search(&mut self) {
        if let Some(query) = self.search_debounce.settled().await {
            self.state.search_query = query;
        }
    }

    /// Set the search query immediately, bypassing the debouncer.
    pub fn set_search_query(&mut self, query: &str) {
        self.search_debounce.cancel();
        self.state.search_query = query.to_string();
    }

    /// The applied (post-debounce) search query.
    pub fn search_query(&self) -> &str {
        &self.state.search_query
    }

    /// Matches for the applied query; empty when the query is blank.
    pub fn search_results(&self) -> Vec<ItemContext<'_>> {
        views::search(&self.state.categories, &self.index, &self.state.search_query)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// The category tree in display order.
    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    /// All articles, newest first, drafts included.
    pub fn articles(&self) -> &[Article] {
        &self.state.articles
    }

    /// Published articles only (the public listing).
    pub fn published_articles(&self) -> impl Iterator<Item = &Article> {
        self.state.articles.iter().filter(|a| a.published)
    }

    /// Look up a category. `None` is the cue to redirect to a safe view.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.state.categories.iter().find(|c| c.id == id)
    }

    /// Look up a section within a category.
    pub fn section(&self, category_id: &str, section_id: &str) -> Option<&Section> {
        self.category(category_id)?.section(section_id)
    }

    /// Look up an item; `section_id: None` looks among the category's
    /// section-less items.
    pub fn item(
        &self,
        category_id: &str,
        section_id: Option<&str>,
        item_id: &str,
    ) -> Option<&PromptItem> {
        let category = self.category(category_id)?;
        match section_id {
            Some(section_id) => category.section(section_id)?.item(item_id),
            None => category.direct_item(item_id),
        }
    }

    /// Look up an article.
    pub fn article(&self, id: &str) -> Option<&Article> {
        self.state.articles.iter().find(|a| a.id == id)
    }

    /// Previous/next sibling of a category, for prev/next affordances.
    pub fn category_neighbors(&self, id: &str) -> (Option<&Category>, Option<&Category>) {
        tree::category_neighbors(&self.state.categories, id)
    }

    /// Previous/next sibling of a section within its category.
    pub fn section_neighbors(
        &self,
        category_id: &str,
        section_id: &str,
    ) -> (Option<&Section>, Option<&Section>) {
        match self.category(category_id) {
            Some(category) => tree::section_neighbors(category, section_id),
            None => (None, None),
        }
    }

    /// Whether the startup fetch is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // ========================================================================
    // Notices, session, preferences
    // ========================================================================

    /// Live notices in FIFO order.
    pub fn notices(&mut self) -> Vec<Notice> {
        self.notices.active()
    }

    /// Dismiss one notice early.
    pub fn dismiss_notice(&mut self, id: u64) {
        self.notices.dismiss(id);
    }

    /// Try to open an admin session with the shared password.
    pub fn login_admin(&mut self, password: &str) -> bool {
        self.admin.login(&self.config, password)
    }

    /// Close the admin session.
    pub fn logout_admin(&mut self) {
        self.admin.logout();
    }

    /// Whether an admin session is open.
    pub fn is_admin(&self) -> bool {
        self.admin.is_authenticated()
    }

    /// UI preference accessors over the cache.
    pub fn preferences(&self) -> Preferences<'_> {
        Preferences::new(&self.cache)
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ========================================================================
    // Persistence plumbing
    // ========================================================================

    fn after_tree_change(&mut self) {
        self.index = FlatIndex::build(&self.state.categories);
        self.persist_snapshot();
    }

    fn persist_snapshot(&mut self) {
        let snapshot = Snapshot {
            categories: self.state.categories.clone(),
            articles: self.state.articles.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        match serde_json::to_string(&snapshot) {
            Ok(json) => {
                if let Err(e) = self.cache.set(keys::SNAPSHOT, &json) {
                    self.cache_write_failed(keys::SNAPSHOT, e);
                }
            }
            Err(e) => log::warn!("snapshot serialization failed: {e}"),
        }
    }

    fn persist_favorites(&mut self) {
        match serde_json::to_string(&self.state.favorites) {
            Ok(json) => {
                if let Err(e) = self.cache.set(keys::FAVORITES, &json) {
                    self.cache_write_failed(keys::FAVORITES, e);
                }
            }
            Err(e) => log::warn!("favorites serialization failed: {e}"),
        }
    }

    fn cache_write_failed(&mut self, key: &str, err: PracticumError) {
        if err.is_quota() {
            self.notices
                .error("Local storage is full — changes won't survive a reload");
        } else {
            log::warn!("cache write for '{key}' failed: {err}");
            self.notices.error("Could not write the local cache");
        }
    }
}

fn load_favorites(cache: &dyn CacheStore) -> Vec<String> {
    match cache.get(keys::FAVORITES) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("discarding unparseable favorites: {e}");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            log::warn!("favorites read failed: {e}");
            Vec::new()
        }
    }
}
