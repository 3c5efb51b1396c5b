//! HTTP client for the catalog API

use std::time::Duration;

use reqwest::{Client, StatusCode};

use super::error::CatalogError;
use super::model::{Catalog, Course};

/// Client for `GET /api/courses` and `GET /api/courses/{id}`
pub struct CatalogClient {
    /// HTTP client
    client: Client,
    /// Server root, without trailing slash
    base_url: String,
}

impl CatalogClient {
    /// Request timeout
    const TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a client for the catalog server at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(Self::TIMEOUT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// URL of the course list
    pub fn courses_url(&self) -> String {
        format!("{}/api/courses", self.base_url)
    }

    /// URL of a single course
    pub fn course_url(&self, id: u32) -> String {
        format!("{}/api/courses/{}", self.base_url, id)
    }

    /// Fetch every course
    pub async fn fetch_courses(&self) -> Result<Catalog, CatalogError> {
        let url = self.courses_url();
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::ApiError { status: status.as_u16(), url });
        }

        let body = response.text().await?;
        let courses: Vec<Course> = serde_json::from_str(&body)?;
        tracing::debug!("Fetched {} courses from {}", courses.len(), url);
        Ok(Catalog::new(courses))
    }

    /// Fetch one course; `None` when the server does not know it
    pub async fn fetch_course(&self, id: u32) -> Result<Option<Course>, CatalogError> {
        let url = self.course_url(id);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CatalogError::ApiError { status: status.as_u16(), url });
        }

        let body = response.text().await?;
        Ok(Some(serde_json::from_str(&body)?))
    }
}

/// Fetch the catalog from `api_url`, falling back to the built-in catalog
/// when no URL is configured or the server cannot be reached
pub async fn fetch_or_builtin(api_url: Option<&str>) -> Catalog {
    let Some(api_url) = api_url else {
        return Catalog::builtin().clone();
    };

    let fetched = match CatalogClient::new(api_url) {
        Ok(client) => client.fetch_courses().await,
        Err(e) => Err(e),
    };

    match fetched {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!(
                recoverable = e.is_recoverable(),
                "Using built-in catalog, fetching from {} failed: {}",
                api_url,
                e
            );
            Catalog::builtin().clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_strip_trailing_slash() {
        let client = CatalogClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.courses_url(), "http://localhost:5000/api/courses");
        assert_eq!(client.course_url(7), "http://localhost:5000/api/courses/7");
    }
}
