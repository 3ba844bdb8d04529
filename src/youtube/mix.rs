//! Auto-generated "mix" playlists (`watch?v=<id>&list=RD<...>`).
//!
//! Mixes are endless and have no server-issued cursor. Each page is the watch
//! page of the previous page's last video, and the first item of every
//! continuation page repeats that video.

use serde_json::Value;

use super::api::{Downloader, Localization};
use super::error::ExtractionError;
use super::item::map_panel_video;
use super::link::{PlaylistHandle, seed_video_id, thumbnail_url_for};
use super::models::{MixPage, StreamListingRecord};
use super::navigator::{self, ITEM_WATCH_URL, PLAYLIST_PANEL_VIDEO_RENDERER, PathError};
use super::timeago::TimeAgoParser;

/// YouTube lists every mix as 25 entries long, however many it returns.
pub const STREAM_COUNT: u64 = 25;

const PBJ_SUFFIX: &str = "&pbj=1";
const CONTINUATION_HOST: &str = "https://youtube.com";

/// Playlist data of the last fetched page. Replaced on every fetch.
#[derive(Debug, Clone)]
struct PlaylistPageState {
    title: String,
    playlist_id: Option<String>,
    items: Vec<Value>,
}

impl PlaylistPageState {
    fn from_response(raw: &Value) -> Result<Self, ExtractionError> {
        let node = navigator::locate_playlist_node(raw)?;
        Ok(Self {
            title: node
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            playlist_id: node
                .get("playlistId")
                .and_then(Value::as_str)
                .map(str::to_string),
            items: node
                .get("contents")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        })
    }
}

pub struct MixPlaylistExtractor<D> {
    downloader: D,
    handle: PlaylistHandle,
    localization: Localization,
    time_parser: TimeAgoParser,
    state: Option<PlaylistPageState>,
}

impl<D: Downloader> MixPlaylistExtractor<D> {
    pub fn new(downloader: D, handle: PlaylistHandle, localization: Localization) -> Self {
        Self {
            downloader,
            handle,
            localization,
            time_parser: TimeAgoParser::new(),
            state: None,
        }
    }

    #[allow(dead_code)]
    pub fn with_time_parser(mut self, time_parser: TimeAgoParser) -> Self {
        self.time_parser = time_parser;
        self
    }

    pub fn handle(&self) -> &PlaylistHandle {
        &self.handle
    }

    /// Fetch the seed watch page. Must run before any accessor.
    pub async fn fetch_page(&mut self) -> Result<(), ExtractionError> {
        let url = format!("{}{PBJ_SUFFIX}", self.handle.url());
        let raw = self.fetch(&url).await?;
        let state = PlaylistPageState::from_response(&raw)?;
        tracing::debug!(
            playlist_id = state.playlist_id.as_deref().unwrap_or(""),
            items = state.items.len(),
            "fetched mix"
        );
        self.state = Some(state);
        Ok(())
    }

    /// Mixes are often untitled; that reads as an empty name.
    pub fn name(&self) -> Result<&str, ExtractionError> {
        Ok(&self.state()?.title)
    }

    pub fn thumbnail_url(&self) -> Result<String, ExtractionError> {
        let playlist_id = self
            .state()?
            .playlist_id
            .as_deref()
            .ok_or_else(|| ExtractionError::Parsing("playlist thumbnail: no playlist id".to_string()))?;
        let video_id = seed_video_id(playlist_id).ok_or_else(|| {
            ExtractionError::Parsing(format!("playlist thumbnail: no video id in {playlist_id}"))
        })?;
        Ok(thumbnail_url_for(video_id))
    }

    pub fn banner_url(&self) -> &str {
        ""
    }

    // Mixes are auto-generated and have no uploader.
    pub fn uploader_url(&self) -> &str {
        ""
    }

    pub fn uploader_name(&self) -> &str {
        ""
    }

    pub fn uploader_avatar_url(&self) -> &str {
        ""
    }

    pub fn stream_count(&self) -> u64 {
        STREAM_COUNT
    }

    /// Items of the seed page, all of them kept.
    pub fn initial_page(&self) -> Result<MixPage, ExtractionError> {
        build_page(&self.state()?.items, &self.time_parser)
    }

    pub fn next_page_url(&self) -> Result<String, ExtractionError> {
        next_page_url(&self.state()?.items)
    }

    /// Fetch a continuation page and make it the current one.
    ///
    /// `None` and `""` are both rejected before any request goes out.
    pub async fn get_page(&mut self, page_url: Option<&str>) -> Result<MixPage, ExtractionError> {
        let page_url = match page_url {
            Some(u) if !u.is_empty() => u,
            _ => {
                return Err(ExtractionError::InvalidArgument(
                    "page url is empty or null".to_string(),
                ));
            }
        };

        let raw = self.fetch(page_url).await?;
        let state = self.state.insert(PlaylistPageState::from_response(&raw)?);

        // The page was requested from the previous page's last video, which
        // comes back again as the first item.
        let Some((_, rest)) = state.items.split_first() else {
            return Err(ExtractionError::MalformedResponse(PathError {
                at: "contents[0]".to_string(),
                position: 0,
                reason: "continuation page has no items".to_string(),
            }));
        };
        let page = build_page(rest, &self.time_parser)?;
        tracing::debug!(
            items = page.items.len(),
            skipped = page.errors.len(),
            "fetched mix continuation"
        );
        Ok(page)
    }

    fn state(&self) -> Result<&PlaylistPageState, ExtractionError> {
        self.state.as_ref().ok_or(ExtractionError::NotFetched)
    }

    async fn fetch(&self, url: &str) -> Result<Value, ExtractionError> {
        self.downloader
            .fetch_json(url, &self.localization)
            .await
            .map_err(ExtractionError::Transport)
    }
}

fn build_page(items: &[Value], time_parser: &TimeAgoParser) -> Result<MixPage, ExtractionError> {
    let (records, errors) = collect_streams(items, time_parser);
    Ok(MixPage {
        items: records,
        next_page_url: next_page_url(items)?,
        errors,
    })
}

/// Map every item that carries a video wrapper. Items without one are
/// skipped, items that fail to map are reported but do not fail the page.
fn collect_streams(
    items: &[Value],
    time_parser: &TimeAgoParser,
) -> (Vec<StreamListingRecord>, Vec<String>) {
    let mut records = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Some(r) = item.get(PLAYLIST_PANEL_VIDEO_RENDERER) else {
            continue;
        };
        match map_panel_video(r, time_parser) {
            Ok(rec) => records.push(rec),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping mix item");
                errors.push(format!("item {index}: {e}"));
            }
        }
    }
    (records, errors)
}

/// Continuation URL taken from the last raw item of a page.
fn next_page_url(items: &[Value]) -> Result<String, ExtractionError> {
    let last = items.last().ok_or_else(|| PathError {
        at: "contents[-1]".to_string(),
        position: 0,
        reason: "page has no items".to_string(),
    })?;
    let path = ITEM_WATCH_URL.resolve_str(last)?;
    Ok(format!("{CONTINUATION_HOST}{path}{PBJ_SUFFIX}"))
}
