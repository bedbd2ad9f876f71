use gloo::net::http::Request;
use serde::de::DeserializeOwned;
use trivia_core::{CategoryId, CategorySource, CategorySummary, GameError, RemoteCategory};

pub(crate) const DEFAULT_API_URL: &str = "https://rithm-jeopardy.herokuapp.com/api/";

/// Category API reached over `fetch`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct HttpCategorySource {
    base_url: String,
}

impl HttpCategorySource {
    pub(crate) fn new(base_url: &str) -> Self {
        let mut base_url = base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    fn categories_url(&self, count: usize) -> String {
        format!("{}categories?count={}", self.base_url, count)
    }

    fn category_url(&self, id: CategoryId) -> String {
        format!("{}category?id={}", self.base_url, id)
    }

    async fn get_json<T: DeserializeOwned>(url: &str) -> trivia_core::Result<T> {
        log::debug!("GET {}", url);
        let response = Request::get(url).send().await.map_err(source_error)?;
        if !response.ok() {
            return Err(GameError::Source(format!(
                "GET {} returned {} {}",
                url,
                response.status(),
                response.status_text()
            )));
        }
        response.json().await.map_err(source_error)
    }
}

fn source_error(err: gloo::net::Error) -> GameError {
    GameError::Source(err.to_string())
}

impl CategorySource for HttpCategorySource {
    async fn list_categories(&self, count: usize) -> trivia_core::Result<Vec<CategorySummary>> {
        Self::get_json(&self.categories_url(count)).await
    }

    async fn fetch_category(&self, id: CategoryId) -> trivia_core::Result<RemoteCategory> {
        Self::get_json(&self.category_url(id)).await
    }
}
