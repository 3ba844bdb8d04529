use serde_json::Value;

use super::error::ExtractionError;
use super::link::thumbnail_url_for;
use super::models::StreamListingRecord;
use super::timeago::TimeAgoParser;

const YOUTUBE_BASE: &str = "https://www.youtube.com";

/// Map one `playlistPanelVideoRenderer` body to a listing row.
///
/// Only the video id is required; everything else degrades to empty or `None`.
pub fn map_panel_video(
    r: &Value,
    time_parser: &TimeAgoParser,
) -> Result<StreamListingRecord, ExtractionError> {
    let video_id = r
        .get("videoId")
        .and_then(|x| x.as_str())
        .or_else(|| {
            r.pointer("/navigationEndpoint/watchEndpoint/videoId")
                .and_then(|x| x.as_str())
        })
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ExtractionError::Parsing("video id of mix item".to_string()))?
        .to_string();

    let title = r.get("title").and_then(text_of).unwrap_or_default();

    let byline = r
        .pointer("/longBylineText/runs/0")
        .or_else(|| r.pointer("/shortBylineText/runs/0"));
    let uploader_name = byline
        .and_then(|run| run.get("text"))
        .and_then(|x| x.as_str())
        .unwrap_or_default()
        .to_string();
    let uploader_url = byline
        .and_then(|run| {
            run.pointer("/navigationEndpoint/browseEndpoint/canonicalBaseUrl")
                .or_else(|| run.pointer("/navigationEndpoint/commandMetadata/webCommandMetadata/url"))
        })
        .and_then(|x| x.as_str())
        .map(|path| format!("{YOUTUBE_BASE}{path}"))
        .unwrap_or_default();

    let duration_seconds = r
        .get("lengthText")
        .and_then(text_of)
        .as_deref()
        .and_then(parse_duration_text);

    let view_count = r
        .get("viewCountText")
        .and_then(text_of)
        .as_deref()
        .and_then(parse_view_count);

    let upload_date_text = r.get("publishedTimeText").and_then(text_of);
    let uploaded_at = upload_date_text
        .as_deref()
        .and_then(|t| time_parser.parse(t));

    // Thumbnails are listed smallest first.
    let thumbnail_url = r
        .pointer("/thumbnail/thumbnails")
        .and_then(|x| x.as_array())
        .and_then(|list| list.last())
        .and_then(|t| t.get("url"))
        .and_then(|x| x.as_str())
        .map(|u| u.to_string())
        .unwrap_or_else(|| thumbnail_url_for(&video_id));

    Ok(StreamListingRecord {
        url: format!("{YOUTUBE_BASE}/watch?v={video_id}"),
        video_id,
        title,
        uploader_name,
        uploader_url,
        duration_seconds,
        view_count,
        upload_date_text,
        uploaded_at,
        thumbnail_url,
    })
}

/// Text of a `{"simpleText": ..}` or `{"runs": [{"text": ..}, ..]}` node.
fn text_of(v: &Value) -> Option<String> {
    if let Some(s) = v.get("simpleText").and_then(|x| x.as_str()) {
        return Some(s.to_string());
    }
    let runs = v.get("runs")?.as_array()?;
    let joined = runs
        .iter()
        .filter_map(|r| r.get("text").and_then(|t| t.as_str()))
        .collect::<String>();
    if joined.is_empty() { None } else { Some(joined) }
}

/// Parse duration text like "3:45" or "1:23:45" into seconds.
/// Values that do not fit a `u32` give `None`.
fn parse_duration_text(text: &str) -> Option<u32> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    let (hours, mins, secs) = match parts.len() {
        2 => (0, parts[0].parse::<u32>().ok()?, parts[1].parse::<u32>().ok()?),
        3 => (
            parts[0].parse::<u32>().ok()?,
            parts[1].parse::<u32>().ok()?,
            parts[2].parse::<u32>().ok()?,
        ),
        _ => return None,
    };
    hours
        .checked_mul(3600)?
        .checked_add(mins.checked_mul(60)?)?
        .checked_add(secs)
}

/// "1,234,567 views" -> 1234567. Abbreviated counts ("1.2M views") are not
/// exact and give `None`.
fn parse_view_count(text: &str) -> Option<u64> {
    let number = text.split_whitespace().next()?;
    if number.chars().any(|c| c.is_ascii_alphabetic() || c == '.') {
        return None;
    }
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    fn parser() -> TimeAgoParser {
        TimeAgoParser::at(datetime!(2024-06-15 12:00 UTC))
    }

    #[test]
    fn test_maps_full_item() {
        let r = json!({
            "videoId": "abc123",
            "title": {"simpleText": "Song"},
            "longBylineText": {"runs": [{
                "text": "Artist",
                "navigationEndpoint": {"browseEndpoint": {"canonicalBaseUrl": "/@artist"}}
            }]},
            "lengthText": {"simpleText": "4:05"},
            "viewCountText": {"simpleText": "1,234 views"},
            "publishedTimeText": {"simpleText": "2 days ago"},
            "thumbnail": {"thumbnails": [
                {"url": "https://i.ytimg.com/vi/abc123/default.jpg"},
                {"url": "https://i.ytimg.com/vi/abc123/hqdefault.jpg"}
            ]}
        });
        let rec = map_panel_video(&r, &parser()).unwrap();
        assert_eq!(rec.video_id, "abc123");
        assert_eq!(rec.url, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(rec.title, "Song");
        assert_eq!(rec.uploader_name, "Artist");
        assert_eq!(rec.uploader_url, "https://www.youtube.com/@artist");
        assert_eq!(rec.duration_seconds, Some(245));
        assert_eq!(rec.view_count, Some(1234));
        assert_eq!(rec.uploaded_at, Some(datetime!(2024-06-13 12:00 UTC)));
        assert_eq!(rec.thumbnail_url, "https://i.ytimg.com/vi/abc123/hqdefault.jpg");
    }

    #[test]
    fn test_minimal_item_degrades() {
        let r = json!({
            "navigationEndpoint": {"watchEndpoint": {"videoId": "xyz"}},
            "title": {"runs": [{"text": "Part "}, {"text": "Two"}]}
        });
        let rec = map_panel_video(&r, &parser()).unwrap();
        assert_eq!(rec.video_id, "xyz");
        assert_eq!(rec.title, "Part Two");
        assert_eq!(rec.uploader_name, "");
        assert_eq!(rec.duration_seconds, None);
        assert_eq!(rec.view_count, None);
        assert_eq!(rec.upload_date_text, None);
        assert_eq!(rec.thumbnail_url, "https://i.ytimg.com/vi/xyz/hqdefault.jpg");
    }

    #[test]
    fn test_oversized_duration_is_dropped() {
        let r = json!({"videoId": "abc", "lengthText": {"simpleText": "99999999:00"}});
        let rec = map_panel_video(&r, &parser()).unwrap();
        assert_eq!(rec.video_id, "abc");
        assert_eq!(rec.duration_seconds, None);
    }

    #[test]
    fn test_missing_video_id_fails() {
        let r = json!({"title": {"simpleText": "Deleted video"}});
        assert!(map_panel_video(&r, &parser()).is_err());
    }

    #[test]
    fn test_parse_duration_text() {
        assert_eq!(parse_duration_text("3:45"), Some(225));
        assert_eq!(parse_duration_text("1:23:45"), Some(5025));
        assert_eq!(parse_duration_text("LIVE"), None);
        assert_eq!(parse_duration_text("99999999:00"), None);
        assert_eq!(parse_duration_text("2000000:00:00"), None);
    }

    #[test]
    fn test_parse_view_count() {
        assert_eq!(parse_view_count("1,234,567 views"), Some(1_234_567));
        assert_eq!(parse_view_count("1.2M views"), None);
        assert_eq!(parse_view_count("No views"), None);
    }
}
