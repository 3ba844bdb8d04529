//! Fixed-path lookups into YouTube's `pbj=1` JSON.
//!
//! The watch page payload is unversioned and changes shape without notice, so
//! every lookup is written down as a [`JsonPath`] and evaluated in one place.
//! Any break along the way is reported as a single [`PathError`] that names the
//! segment that failed; callers do not branch on which one it was.

use serde_json::Value;
use std::fmt;

use super::error::ExtractionError;

/// One step of a [`JsonPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Key(&'static str),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => write!(f, "{k}"),
            Segment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct JsonPath(&'static [Segment]);

/// Where the playlist container sits inside a watch page response.
pub const PLAYLIST_NODE: JsonPath = JsonPath(&[
    Segment::Index(3),
    Segment::Key("response"),
    Segment::Key("contents"),
    Segment::Key("twoColumnWatchNextResults"),
    Segment::Key("playlist"),
    Segment::Key("playlist"),
]);

/// Relative watch URL of a queued video, evaluated against one item node.
pub const ITEM_WATCH_URL: JsonPath = JsonPath(&[
    Segment::Key(PLAYLIST_PANEL_VIDEO_RENDERER),
    Segment::Key("navigationEndpoint"),
    Segment::Key("commandMetadata"),
    Segment::Key("webCommandMetadata"),
    Segment::Key("url"),
]);

/// Key every queued video is wrapped in.
pub const PLAYLIST_PANEL_VIDEO_RENDERER: &str = "playlistPanelVideoRenderer";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("json path broke at `{at}` (segment {position}): {reason}")]
pub struct PathError {
    pub at: String,
    pub position: usize,
    pub reason: String,
}

impl JsonPath {
    /// Walk the path from `root`. Arrays are only entered through
    /// [`Segment::Index`] and objects only through [`Segment::Key`].
    pub fn resolve<'a>(&self, root: &'a Value) -> Result<&'a Value, PathError> {
        let mut cur = root;
        for (position, seg) in self.0.iter().enumerate() {
            let next = match (seg, cur) {
                (Segment::Key(k), Value::Object(o)) => o.get(*k),
                (Segment::Index(i), Value::Array(a)) => a.get(*i),
                _ => {
                    return Err(self.broken(position, format!("expected {}, found {}", expected(seg), kind(cur))));
                }
            };
            cur = match next {
                Some(Value::Null) | None => {
                    return Err(self.broken(position, "missing or null".to_string()));
                }
                Some(v) => v,
            };
        }
        Ok(cur)
    }

    pub fn resolve_object<'a>(
        &self,
        root: &'a Value,
    ) -> Result<&'a serde_json::Map<String, Value>, PathError> {
        let v = self.resolve(root)?;
        v.as_object()
            .ok_or_else(|| self.broken(self.0.len() - 1, format!("expected object, found {}", kind(v))))
    }

    pub fn resolve_str<'a>(&self, root: &'a Value) -> Result<&'a str, PathError> {
        let v = self.resolve(root)?;
        v.as_str()
            .ok_or_else(|| self.broken(self.0.len() - 1, format!("expected string, found {}", kind(v))))
    }

    fn broken(&self, position: usize, reason: String) -> PathError {
        let at = self.0[..=position]
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".");
        PathError {
            at,
            position,
            reason,
        }
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.0.iter().map(ToString::to_string).collect::<Vec<_>>();
        write!(f, "{}", parts.join("."))
    }
}

/// Locate the playlist container in a raw watch page response.
pub fn locate_playlist_node(raw: &Value) -> Result<&serde_json::Map<String, Value>, ExtractionError> {
    PLAYLIST_NODE
        .resolve_object(raw)
        .map_err(ExtractionError::MalformedResponse)
}

fn expected(seg: &Segment) -> &'static str {
    match seg {
        Segment::Key(_) => "object",
        Segment::Index(_) => "array",
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
