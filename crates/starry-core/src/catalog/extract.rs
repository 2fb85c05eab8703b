//! Walks the start API document down to the hero widget and the episode tray.
//!
//! Layout of the parts that are read:
//!
//! ```text
//! success.page.spaces
//! ├── hero.widget_wrappers[0].widget.data
//! │   ├── content_info.{title, description}
//! │   └── hero_img.src
//! └── tray.widget_wrappers[template == "CategoryTrayWidget"]
//!     .widget.data.tray_items.data.items[].playable_content.data
//!         ├── title, description
//!         ├── poster.src
//!         └── tags[0].value            ("S1 E7")
//! ```

use crate::{Episode, ParseError, Video};
use serde_json::Value;

/// Template name of the tray holding a show's episodes
pub const EPISODE_TRAY_TEMPLATE: &str = "CategoryTrayWidget";

/// True when a deep-link identifier points at a series
pub fn is_show_id(video_id: &str) -> bool {
    video_id.contains("shows")
}

fn object_at<'a>(value: &'a Value, key: &str, missing: ParseError) -> Result<&'a Value, ParseError> {
    value.get(key).filter(|v| v.is_object()).ok_or(missing)
}

fn text_at(value: &Value, key: &str, missing: ParseError) -> Result<String, ParseError> {
    value.get(key).and_then(primitive_text).ok_or(missing)
}

/// Content of a JSON primitive; strings are unquoted, containers yield nothing
fn primitive_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn image_url(image_base_url: &str, src: &str) -> String {
    format!("{image_base_url}{src}")
}

/// Build a [`Video`] from a resolved start document.
pub fn extract_video(document: &Value, is_show: bool, image_base_url: &str) -> Result<Video, ParseError> {
    let success = object_at(document, "success", ParseError::MissingSuccess)?;
    let page = object_at(success, "page", ParseError::MissingPage)?;
    let spaces = object_at(page, "spaces", ParseError::MissingSpaces)?;
    let hero = object_at(spaces, "hero", ParseError::MissingHero)?;

    let wrappers = hero
        .get("widget_wrappers")
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingWidgetWrappers)?;
    let widget = wrappers
        .first()
        .filter(|w| w.is_object())
        .ok_or(ParseError::MissingWidget)
        .and_then(|wrapper| object_at(wrapper, "widget", ParseError::MissingWidget))?;

    let data = object_at(widget, "data", ParseError::MissingWidgetData)?;
    let content_info = object_at(data, "content_info", ParseError::MissingContentInfo)?;

    let title = text_at(content_info, "title", ParseError::MissingTitle)?;
    let description = text_at(content_info, "description", ParseError::MissingDescription)?;

    let hero_img = data
        .get("hero_img")
        .filter(|v| v.is_object())
        .and_then(|img| img.get("src"))
        .and_then(primitive_text)
        .ok_or(ParseError::MissingHeroImage)?;
    let thumbnail = image_url(image_base_url, &hero_img);

    let video = if is_show {
        Video::Show {
            episodes: extract_episodes(spaces, image_base_url),
            thumbnail,
            title,
            description,
        }
    } else {
        Video::Movie {
            thumbnail,
            title,
            description,
        }
    };
    Ok(video)
}

/// Episodes from the category tray, in source order.
///
/// A missing tray yields no episodes. Items without playable content are skipped.
pub fn extract_episodes(spaces: &Value, image_base_url: &str) -> Vec<Episode> {
    let items = spaces
        .get("tray")
        .and_then(|tray| tray.get("widget_wrappers"))
        .and_then(Value::as_array)
        .and_then(|wrappers| {
            wrappers.iter().find(|wrapper| {
                wrapper.get("template").and_then(Value::as_str) == Some(EPISODE_TRAY_TEMPLATE)
            })
        })
        .and_then(|wrapper| wrapper.get("widget"))
        .and_then(|widget| widget.get("data"))
        .and_then(|data| data.get("tray_items"))
        .and_then(|tray_items| tray_items.get("data"))
        .and_then(|data| data.get("items"))
        .and_then(Value::as_array);

    let Some(items) = items else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let content = item
                .get("playable_content")
                .and_then(|pc| pc.get("data"))
                .filter(|data| data.is_object())?;
            Some(episode_from_content(content, image_base_url))
        })
        .collect()
}

fn episode_from_content(content: &Value, image_base_url: &str) -> Episode {
    let title = content.get("title").and_then(primitive_text).unwrap_or_default();
    let description = content
        .get("description")
        .and_then(primitive_text)
        .unwrap_or_default();
    let poster = content
        .get("poster")
        .and_then(|poster| poster.get("src"))
        .and_then(primitive_text)
        .unwrap_or_default();
    let tag = content
        .get("tags")
        .and_then(Value::as_array)
        .and_then(|tags| tags.first())
        .and_then(|tag| tag.get("value"))
        .and_then(primitive_text)
        .unwrap_or_default();

    Episode {
        number: parse_episode_number(&tag),
        thumbnail: image_url(image_base_url, &poster),
        title,
        description,
    }
}

/// Episode number from a tag like `"S1 E7"`; 0 when no number follows the last `E`.
pub fn parse_episode_number(tag: &str) -> u32 {
    tag.rfind('E')
        .map(|pos| &tag[pos + 1..])
        .and_then(|digits| digits.trim().parse().ok())
        .unwrap_or(0)
}
