//! Resolution list construction and manual selection

use super::engine::{TrackSelectionOverride, TrackSelectionParameters, TrackType, Tracks};
use crate::ResolutionInfo;

/// Quality tier name for a track height
pub fn resolution_label(height: i32) -> String {
    match height {
        h if h >= 2160 => format!("4K ({h}p)"),
        h if h >= 1440 => "1440p".to_string(),
        h if h >= 1080 => "1080p".to_string(),
        h if h >= 720 => "720p".to_string(),
        h if h >= 480 => "480p".to_string(),
        h if h >= 360 => "360p".to_string(),
        h if h >= 240 => "240p".to_string(),
        h => format!("{h}p"),
    }
}

/// Full resolution list for a track set.
///
/// The adaptive entry comes first, followed by the tracks of the first
/// video group ordered by descending height. Later video groups are ignored.
pub fn build_resolution_list(tracks: &Tracks) -> Vec<ResolutionInfo> {
    let mut list = vec![ResolutionInfo::auto()];

    if let Some(group) = tracks.first_of_type(TrackType::Video) {
        list.extend(group.formats.iter().enumerate().map(|(index, format)| ResolutionInfo {
            track_index: index as i32,
            display_name: resolution_label(format.height),
            width: format.width,
            height: format.height,
            bitrate: format.bitrate,
            is_auto: false,
        }));
    }

    list.sort_by(|a, b| b.is_auto.cmp(&a.is_auto).then(b.height.cmp(&a.height)));
    list
}

/// Parameters that apply `resolution`, or `None` when it cannot be applied.
///
/// The adaptive entry clears every video override. A manual entry pins the
/// first video group to its track index when that index exists in the group.
pub fn apply_resolution(
    parameters: TrackSelectionParameters,
    tracks: &Tracks,
    resolution: &ResolutionInfo,
) -> Option<TrackSelectionParameters> {
    if resolution.is_auto {
        return Some(parameters.clear_overrides_of_type(TrackType::Video));
    }

    let group = tracks.first_of_type(TrackType::Video)?;
    let index = usize::try_from(resolution.track_index).ok()?;
    if index >= group.len() {
        return None;
    }

    Some(parameters.set_override_for_type(TrackSelectionOverride {
        group_id: group.id.clone(),
        track_type: TrackType::Video,
        track_indices: vec![index],
    }))
}
