use reqwest::Url;

use super::error::ExtractionError;

const WATCH_URL: &str = "https://www.youtube.com/watch";

/// Mix playlist ids all start with this.
pub const MIX_PREFIX: &str = "RD";
/// "My Mix" ids carry a longer prefix before the seed video id.
pub const MY_MIX_PREFIX: &str = "RDMM";

/// The seed a mix extractor is bound to: `watch?v=<videoId>&list=RD<...>`.
///
/// Always holds the canonical watch URL, whatever form it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistHandle {
    url: String,
    playlist_id: String,
}

impl PlaylistHandle {
    /// Parse a watch URL carrying a mix `list` parameter.
    pub fn from_url(url: &str) -> Result<Self, ExtractionError> {
        let parsed = Url::parse(url.trim())
            .map_err(|e| ExtractionError::InvalidArgument(format!("bad url {url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ExtractionError::InvalidArgument(format!(
                "unsupported scheme in {url}"
            )));
        }

        let mut video_id = None;
        let mut playlist_id = None;
        for (k, v) in parsed.query_pairs() {
            match k.as_ref() {
                "v" if !v.is_empty() => video_id = Some(v.into_owned()),
                "list" if !v.is_empty() => playlist_id = Some(v.into_owned()),
                _ => {}
            }
        }

        let playlist_id = playlist_id
            .ok_or_else(|| ExtractionError::InvalidArgument(format!("no list parameter in {url}")))?;
        Self::build(video_id.as_deref(), &playlist_id)
    }

    /// Build the canonical watch URL for a seed video and mix id.
    pub fn from_ids(video_id: &str, playlist_id: &str) -> Result<Self, ExtractionError> {
        Self::build(Some(video_id), playlist_id)
    }

    fn build(video_id: Option<&str>, playlist_id: &str) -> Result<Self, ExtractionError> {
        if !is_mix_playlist_id(playlist_id) {
            return Err(ExtractionError::InvalidArgument(format!(
                "{playlist_id} is not a mix playlist"
            )));
        }
        let mut params = Vec::with_capacity(2);
        if let Some(v) = video_id {
            params.push(("v", v));
        }
        params.push(("list", playlist_id));
        let url = Url::parse_with_params(WATCH_URL, &params)
            .map_err(|e| ExtractionError::InvalidArgument(format!("watch url: {e}")))?;
        Ok(Self {
            url: url.into(),
            playlist_id: playlist_id.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn playlist_id(&self) -> &str {
        &self.playlist_id
    }
}

pub fn is_mix_playlist_id(playlist_id: &str) -> bool {
    playlist_id.starts_with(MIX_PREFIX)
}

/// Recover the seed video id from a mix playlist id.
///
/// `RDMM<id>` drops four characters, every other mix id drops the two
/// character `RD`. Returns `None` when nothing is left.
pub fn seed_video_id(playlist_id: &str) -> Option<&str> {
    let id = if let Some(rest) = playlist_id.strip_prefix(MY_MIX_PREFIX) {
        rest
    } else {
        playlist_id.get(MIX_PREFIX.len()..)?
    };
    if id.is_empty() { None } else { Some(id) }
}

pub fn thumbnail_url_for(video_id: &str) -> String {
    format!("https://i.ytimg.com/vi/{video_id}/hqdefault.jpg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seed_url() {
        let h = PlaylistHandle::from_url(
            "https://www.youtube.com/watch?v=_AzeUSL9lZc&list=RD_AzeUSL9lZc",
        )
        .unwrap();
        assert_eq!(h.playlist_id(), "RD_AzeUSL9lZc");
        assert_eq!(
            h.url(),
            "https://www.youtube.com/watch?v=_AzeUSL9lZc&list=RD_AzeUSL9lZc"
        );
    }

    #[test]
    fn canonicalizes_seed_url() {
        let h = PlaylistHandle::from_url(
            "http://youtube.com/watch?feature=share&list=RDseed&v=seed&t=42#t=10",
        )
        .unwrap();
        assert_eq!(h.url(), "https://www.youtube.com/watch?v=seed&list=RDseed");

        let h = PlaylistHandle::from_url("https://www.youtube.com/watch?list=RDMM").unwrap();
        assert_eq!(h.url(), "https://www.youtube.com/watch?list=RDMM");
    }

    #[test]
    fn decodes_query_values() {
        let h = PlaylistHandle::from_url(
            "https://www.youtube.com/watch?v=a%2Db&list=RD+a%2Db",
        )
        .unwrap();
        assert_eq!(h.playlist_id(), "RD a-b");
    }

    #[test]
    fn rejects_regular_playlists() {
        let err = PlaylistHandle::from_url(
            "https://www.youtube.com/watch?v=abc&list=PLxyz",
        )
        .unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidArgument(_)));
        assert!(PlaylistHandle::from_url("https://www.youtube.com/watch?v=abc").is_err());
        assert!(PlaylistHandle::from_url("not a url").is_err());
        assert!(PlaylistHandle::from_url("foo?list=RDx").is_err());
        assert!(PlaylistHandle::from_url("ftp://youtube.com/watch?list=RDx").is_err());
    }

    #[test]
    fn builds_url_from_ids() {
        let h = PlaylistHandle::from_ids("abc", "RDabc").unwrap();
        assert_eq!(h.url(), "https://www.youtube.com/watch?v=abc&list=RDabc");
        assert_eq!(PlaylistHandle::from_url(h.url()).unwrap(), h);
    }

    #[test]
    fn seed_id_strips_my_mix_prefix() {
        assert_eq!(seed_video_id("RDMM_AzeUSL9lZc"), Some("_AzeUSL9lZc"));
        assert_eq!(seed_video_id("RD_AzeUSL9lZc"), Some("_AzeUSL9lZc"));
        assert_eq!(seed_video_id("RDAMVMabc"), Some("AMVMabc"));
    }

    #[test]
    fn seed_id_empty_remainder() {
        assert_eq!(seed_video_id("RDMM"), None);
        assert_eq!(seed_video_id("RD"), None);
        assert_eq!(seed_video_id("R"), None);
    }

    #[test]
    fn thumbnail_template() {
        assert_eq!(
            thumbnail_url_for("_AzeUSL9lZc"),
            "https://i.ytimg.com/vi/_AzeUSL9lZc/hqdefault.jpg"
        );
    }
}
