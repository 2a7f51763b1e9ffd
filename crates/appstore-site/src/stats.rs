//! Remote counters
//!
//! Two independent, best-effort reads against the repository-hosting API:
//! star/fork/watcher counts of the config repository, and the number of
//! apps listed in the index file. A failed read shows `failed` in its own
//! field and nothing else; there is no retry and no timeout.

use crate::error::StatsError;
use crate::settings::{ContentRef, RepoRef, SiteSettings};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Counters of a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoCounters {
    /// Stars
    pub stargazers_count: u64,
    /// Forks
    pub forks_count: u64,
    /// Watchers
    pub watchers_count: u64,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: Option<String>,
}

/// Where counters come from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Counters of `repo`
    async fn repo_counters(&self, repo: &RepoRef) -> Result<RepoCounters, StatsError>;

    /// Non-blank lines of the file at `file`
    async fn app_count(&self, file: &ContentRef) -> Result<u64, StatsError>;
}

/// Count lines with visible content
#[must_use]
pub fn count_non_blank_lines(text: &str) -> usize {
    text.split('\n').filter(|line| !line.trim().is_empty()).count()
}

/// Decode a base64 file body as served by the contents endpoint
///
/// The API wraps the encoding at 60 columns; embedded whitespace is ignored.
///
/// # Errors
/// [`StatsError::Decode`] if the payload is not base64
pub fn decode_content(encoded: &str) -> Result<String, StatsError> {
    let compact: String = encoded.split_ascii_whitespace().collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// HTTP client for the repository-hosting API
#[derive(Debug, Clone)]
pub struct StatsClient {
    client: reqwest::Client,
    base_url: String,
}

impl StatsClient {
    /// Client against `base_url`
    ///
    /// # Errors
    /// [`StatsError::Transport`] if the HTTP client cannot be built
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self, StatsError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Client configured from settings
    ///
    /// # Errors
    /// [`StatsError::Transport`] if the HTTP client cannot be built
    pub fn from_settings(settings: &SiteSettings) -> Result<Self, StatsError> {
        Self::new(settings.api_base_url.clone(), &settings.user_agent)
    }

    /// API base URL without trailing slash
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        not_found: impl FnOnce() -> StatsError,
    ) -> Result<T, StatsError> {
        tracing::debug!(%url, "requesting");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status {
                StatusCode::NOT_FOUND => not_found(),
                StatusCode::FORBIDDEN => StatsError::RateLimited {
                    status: status.as_u16(),
                },
                _ => StatsError::Status {
                    status: status.as_u16(),
                },
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl StatsSource for StatsClient {
    async fn repo_counters(&self, repo: &RepoRef) -> Result<RepoCounters, StatsError> {
        let url = format!("{}/repos/{}/{}", self.base_url, repo.owner, repo.name);
        self.get_json(&url, || StatsError::Status {
            status: StatusCode::NOT_FOUND.as_u16(),
        })
        .await
    }

    async fn app_count(&self, file: &ContentRef) -> Result<u64, StatsError> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url, file.owner, file.name, file.path
        );
        let response: ContentsResponse = self
            .get_json(&url, || StatsError::NotFound {
                repo: file.repo().to_string(),
                path: file.path.clone(),
            })
            .await?;

        let encoded = response
            .content
            .filter(|c| !c.is_empty())
            .ok_or(StatsError::MissingContent)?;
        let lines = count_non_blank_lines(&decode_content(&encoded)?);
        Ok(u64::try_from(lines).unwrap_or(u64::MAX))
    }
}

/// One counter slot on the page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatDisplay {
    /// Request in flight
    #[default]
    Loading,
    /// Value received
    Value(u64),
    /// Request failed
    Failed,
}

impl StatDisplay {
    /// Map a fetch result, logging the failure
    pub fn from_result(what: &str, result: Result<u64, StatsError>) -> Self {
        match result {
            Ok(value) => Self::Value(value),
            Err(e) => {
                tracing::error!(counter = what, error = %e, "failed to fetch counter");
                Self::Failed
            }
        }
    }
}

impl fmt::Display for StatDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str("Loading..."),
            Self::Value(value) => write!(f, "{value}"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// Every counter shown on the page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteStats {
    /// Stars of the config repository
    pub stars: StatDisplay,
    /// Forks of the config repository
    pub forks: StatDisplay,
    /// Watchers of the config repository
    pub watchers: StatDisplay,
    /// Apps listed in the index file
    pub apps: StatDisplay,
}

impl SiteStats {
    /// All slots loading
    #[inline]
    #[must_use]
    pub fn loading() -> Self {
        Self::default()
    }

    /// Run both reads concurrently; each fills only its own slots
    pub async fn fetch(source: &dyn StatsSource, settings: &SiteSettings) -> Self {
        let (counters, apps) = tokio::join!(
            source.repo_counters(&settings.stars_repo),
            source.app_count(&settings.index_repo),
        );

        let (stars, forks, watchers) = match counters {
            Ok(c) => (
                StatDisplay::Value(c.stargazers_count),
                StatDisplay::Value(c.forks_count),
                StatDisplay::Value(c.watchers_count),
            ),
            Err(e) => {
                tracing::error!(repo = %settings.stars_repo, error = %e, "failed to fetch repository counters");
                (StatDisplay::Failed, StatDisplay::Failed, StatDisplay::Failed)
            }
        };

        Self {
            stars,
            forks,
            watchers,
            apps: StatDisplay::from_result("apps", apps),
        }
    }
}
