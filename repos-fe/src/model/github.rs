use serde::Deserialize;
use time::OffsetDateTime;

/// One repository as returned by the paginated listing endpoint.
///
/// The listing payload also carries a `topics` field, but the dedicated
/// per-repository topics endpoint is the single source of truth for topics,
/// so the field is left out here and ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct Repo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    pub stargazers_count: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub html_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopicsResponse {
    #[serde(default)]
    pub names: Vec<String>,
}
