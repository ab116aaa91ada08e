use std::time::Duration;

use anyhow::{Context, Result};
use log::*;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::backend::Backend;
use crate::model::{ActionResponse, Entry, EntryForm, RevealResponse, SearchResponse};

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .with_context(|| "Failed to build HTTP client")?;
        Ok(HttpBackend {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // Replies are JSON whatever the status code, so it is not checked
    fn send<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = request
            .send()
            .with_context(|| format!("{} request failed", what))?;
        let status = response.status();
        debug!("{} replied with {}", what, status);
        response
            .json::<T>()
            .with_context(|| format!("Error de-serialising {} reply (status {})", what, status))
    }
}

impl Backend for HttpBackend {
    fn search(&mut self, query: &str) -> Result<Vec<Entry>> {
        debug!("Searching for {:?}", query);
        let request = self.client.get(&self.url("/search")).query(&[("q", query)]);
        let response: SearchResponse = self.send(request, "search")?;
        Ok(response.results)
    }

    fn add(&mut self, form: &EntryForm) -> Result<ActionResponse> {
        debug!("Adding {:?}", form);
        let request = self.client.post(&self.url("/add_password")).form(form);
        self.send(request, "add")
    }

    fn fetch_for_edit(&mut self, id: i64) -> Result<Entry> {
        debug!("Fetching entry {} for edit", id);
        let request = self.client.get(&self.url(&format!("/edit_password/{}", id)));
        self.send(request, "edit fetch")
    }

    fn update(&mut self, id: i64, form: &EntryForm) -> Result<ActionResponse> {
        debug!("Updating entry {} with {:?}", id, form);
        let request = self
            .client
            .post(&self.url(&format!("/edit_password/{}", id)))
            .form(form);
        self.send(request, "update")
    }

    fn delete(&mut self, id: i64) -> Result<ActionResponse> {
        debug!("Deleting entry {}", id);
        let request = self.client.post(&self.url(&format!("/delete_password/{}", id)));
        self.send(request, "delete")
    }

    fn reveal(&mut self, id: i64) -> Result<RevealResponse> {
        debug!("Revealing entry {}", id);
        let request = self.client.get(&self.url(&format!("/view_password/{}", id)));
        self.send(request, "reveal")
    }
}
