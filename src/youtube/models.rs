use serde::{Deserialize, Serialize};

/// One queued video, as listed in a mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamListingRecord {
    pub video_id: String,
    pub url: String,
    pub title: String,
    pub uploader_name: String,
    pub uploader_url: String,
    pub duration_seconds: Option<u32>,
    pub view_count: Option<u64>,
    /// Relative upload text as shown by YouTube ("3 days ago").
    pub upload_date_text: Option<String>,
    /// Approximate upload instant derived from `upload_date_text`.
    #[serde(with = "time::serde::rfc3339::option")]
    pub uploaded_at: Option<time::OffsetDateTime>,
    pub thumbnail_url: String,
}

/// A page of a mix.
#[derive(Debug, Clone)]
pub struct MixPage {
    pub items: Vec<StreamListingRecord>,
    pub next_page_url: String,
    /// Items that carried a video wrapper but could not be mapped.
    pub errors: Vec<String>,
}
