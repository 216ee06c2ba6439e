//! REST backend for the hosted table store.
//!
//! Speaks the PostgREST dialect the reference backend (Supabase) exposes:
//! `GET /rest/v1/{table}?select=*&order=...`, `POST` for inserts (single row
//! or array), `PATCH ?id=eq.{id}` for partial updates and
//! `DELETE ?id=eq.{id}`. Every request carries the project API key as both
//! `apikey` header and bearer token.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::rows::{
    ArticlePatch, ArticleRow, CategoryPatch, CategoryRow, ItemPatch, ItemRow, SectionPatch,
    SectionRow,
};
use super::{BoxFuture, RemoteStore};
use crate::error::{PracticumError, Result};

/// [`RemoteStore`] backed by a PostgREST-style HTTP API.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base: String,
    api_key: String,
}

impl RestStore {
    /// Create a store for the given project URL and API key.
    ///
    /// `base_url` is the project root (e.g. `https://xyz.supabase.co`); the
    /// `/rest/v1` prefix is appended here.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        // Validate early so a misconfigured URL fails at construction, not on
        // the first fetch.
        reqwest::Url::parse(base_url)
            .map_err(|_| PracticumError::InvalidRemoteUrl(base_url.to_string()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base, table)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(table: &str, resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let message = resp.text().await.unwrap_or_default();
        Err(PracticumError::Remote {
            table: table.to_string(),
            status: status.as_u16(),
            message,
        })
    }

    async fn select<R: DeserializeOwned>(&self, table: &str, order: &str) -> Result<Vec<R>> {
        let resp = self
            .authed(self.client.get(self.endpoint(table)))
            .query(&[("select", "*"), ("order", order)])
            .send()
            .await?;

        let resp = Self::check(table, resp).await?;
        Ok(resp.json().await?)
    }

    async fn insert<B: Serialize + ?Sized>(&self, table: &str, body: &B) -> Result<()> {
        let resp = self
            .authed(self.client.post(self.endpoint(table)))
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;

        Self::check(table, resp).await?;
        Ok(())
    }

    async fn update<P: Serialize>(&self, table: &str, id: &str, patch: &P) -> Result<()> {
        let resp = self
            .authed(self.client.patch(self.endpoint(table)))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()
            .await?;

        Self::check(table, resp).await?;
        Ok(())
    }

    async fn delete(&self, table: &str, id: &str) -> Result<()> {
        let resp = self
            .authed(self.client.delete(self.endpoint(table)))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;

        Self::check(table, resp).await?;
        Ok(())
    }
}

impl RemoteStore for RestStore {
    fn fetch_categories(&self) -> BoxFuture<'_, Result<Vec<CategoryRow>>> {
        Box::pin(self.select("categories", "index.asc"))
    }

    fn fetch_sections(&self) -> BoxFuture<'_, Result<Vec<SectionRow>>> {
        Box::pin(self.select("sections", "index.asc"))
    }

    fn fetch_items(&self) -> BoxFuture<'_, Result<Vec<ItemRow>>> {
        Box::pin(self.select("items", "index.asc"))
    }

    fn fetch_articles(&self) -> BoxFuture<'_, Result<Vec<ArticleRow>>> {
        Box::pin(self.select("articles", "date.desc"))
    }

    fn insert_category(&self, row: CategoryRow) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.insert("categories", &row).await })
    }

    fn insert_section(&self, row: SectionRow) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.insert("sections", &row).await })
    }

    fn insert_item(&self, row: ItemRow) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.insert("items", &row).await })
    }

    fn insert_article(&self, row: ArticleRow) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.insert("articles", &row).await })
    }

    // PostgREST accepts an array body, so batch inserts are one request.
    fn insert_categories(&self, rows: Vec<CategoryRow>) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.insert("categories", &rows).await })
    }

    fn insert_sections(&self, rows: Vec<SectionRow>) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.insert("sections", &rows).await })
    }

    fn insert_items(&self, rows: Vec<ItemRow>) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.insert("items", &rows).await })
    }

    fn insert_articles(&self, rows: Vec<ArticleRow>) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.insert("articles", &rows).await })
    }

    fn update_category<'a>(
        &'a self,
        id: &'a str,
        patch: CategoryPatch,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.update("categories", id, &patch).await })
    }

    fn update_section<'a>(&'a self, id: &'a str, patch: SectionPatch) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.update("sections", id, &patch).await })
    }

    fn update_item<'a>(&'a self, id: &'a str, patch: ItemPatch) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.update("items", id, &patch).await })
    }

    fn update_article<'a>(&'a self, id: &'a str, patch: ArticlePatch) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.update("articles", id, &patch).await })
    }

    fn delete_category<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.delete("categories", id).await })
    }

    fn delete_section<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.delete("sections", id).await })
    }

    fn delete_item<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.delete("items", id).await })
    }

    fn delete_article<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.delete("articles", id).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_shape() {
        let store = RestStore::new("https://xyz.supabase.co/", "anon-key").unwrap();
        assert_eq!(
            store.endpoint("categories"),
            "https://xyz.supabase.co/rest/v1/categories"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = RestStore::new("not a url", "key").unwrap_err();
        assert!(matches!(err, PracticumError::InvalidRemoteUrl(_)));
    }
}
