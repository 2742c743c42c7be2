//! Jam track model and the tolerant mapping from the community
//! dataset.
//!
//! The upstream JSON has changed shape several times: top-level array
//! versus wrapper objects, long versus abbreviated field names. The
//! mapping accepts every shape seen so far instead of pinning one.

use serde_json::Value;

/// Per-instrument difficulty ratings, 0 to 7.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Difficulties {
    pub lead: Option<u8>,
    pub bass: Option<u8>,
    pub drums: Option<u8>,
    pub vocals: Option<u8>,
    pub pro_lead: Option<u8>,
    pub pro_bass: Option<u8>,
    pub pro_drums: Option<u8>,
    pub pro_vocals: Option<u8>,
}

impl Difficulties {
    /// Mean of the four main instrument lanes that carry a rating.
    pub fn average(&self) -> Option<f64> {
        let lanes: Vec<u8> = [self.lead, self.bass, self.drums, self.vocals]
            .into_iter()
            .flatten()
            .collect();
        if lanes.is_empty() {
            return None;
        }
        Some(lanes.iter().map(|&v| v as f64).sum::<f64>() / lanes.len() as f64)
    }
}

/// One jam track after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub release_year: Option<u32>,
    pub genres: Vec<String>,
    pub artwork: Option<String>,
    pub duration_secs: Option<u32>,
    pub bpm: Option<u32>,
    pub key: Option<String>,
    pub mode: Option<String>,
    pub difficulties: Difficulties,
    pub jam_loop_code: Option<String>,
    pub isrc: Option<String>,
    pub last_modified: Option<String>,
    pub active_date: Option<String>,
    pub new_until: Option<String>,
}

impl Track {
    /// Duration as `m:ss`.
    pub fn duration_display(&self) -> Option<String> {
        self.duration_secs
            .map(|secs| format!("{}:{:02}", secs / 60, secs % 60))
    }
}

/// Parse the raw dataset into tracks. Entries without both a title
/// and an artist are dropped.
pub fn parse_tracks(data: &Value) -> Vec<Track> {
    entries_of(data)
        .into_iter()
        .filter_map(map_track)
        .collect()
}

/// Accept every container shape the dataset has used: a bare array, a
/// `tracks`/`items`/`data` wrapper, or an object keyed by track id.
fn entries_of(data: &Value) -> Vec<&Value> {
    if let Some(list) = data.as_array() {
        return list.iter().collect();
    }
    if let Some(obj) = data.as_object() {
        for wrapper in ["tracks", "items", "data"] {
            if let Some(list) = obj.get(wrapper).and_then(Value::as_array) {
                return list.iter().collect();
            }
        }
        return obj.values().collect();
    }
    Vec::new()
}

fn map_track(entry: &Value) -> Option<Track> {
    let obj = entry.as_object()?;

    let title = first_str(obj, &["title", "trackTitle", "tt", "name"])?;
    let artist = first_str(obj, &["artist", "artistName", "trackArtist", "an"])?;
    let id = first_str(obj, &["shortname", "shortName", "sn", "slug", "id", "trackId", "devName"])
        .unwrap_or_else(|| format!("{title}||{artist}"));

    let diffs = obj
        .get("difficulties")
        .or_else(|| obj.get("intensities"))
        .or_else(|| obj.get("in"))
        .and_then(Value::as_object);
    let difficulties = match diffs {
        Some(d) => Difficulties {
            lead: lane(d, &["gr", "lead", "guitar", "lg"]),
            bass: lane(d, &["ba", "bass", "bs"]),
            drums: lane(d, &["ds", "drums", "dr"]),
            vocals: lane(d, &["vl", "vocals", "vo"]),
            pro_lead: lane(d, &["pg", "proLead", "proGuitar"]),
            pro_bass: lane(d, &["pb", "proBass"]),
            pro_drums: lane(d, &["pd", "proDrums"]),
            pro_vocals: lane(d, &["pv", "proVocals"]),
        },
        None => Difficulties::default(),
    };

    Some(Track {
        id,
        title,
        artist,
        album: first_str(obj, &["album", "ab"]),
        release_year: first_u32(obj, &["releaseYear", "year", "ry"]),
        genres: genres_of(obj),
        artwork: first_str(obj, &["artwork", "artworkUrl", "cover", "image", "au"]),
        duration_secs: first_u32(obj, &["duration", "length", "dn"]),
        bpm: first_u32(obj, &["bpm", "mt"]),
        key: first_str(obj, &["key", "mk"]),
        mode: first_str(obj, &["mode", "mm"]),
        difficulties,
        jam_loop_code: first_str(obj, &["jamLoopCode"]),
        isrc: first_str(obj, &["isrc"]),
        last_modified: first_str(obj, &["lastModified"]),
        active_date: first_str(obj, &["activeDate"]),
        new_until: first_str(obj, &["newUntil"]),
    })
}

fn genres_of(obj: &serde_json::Map<String, Value>) -> Vec<String> {
    for key in ["genre", "genres", "ge"] {
        match obj.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return vec![s.clone()],
            Some(Value::Array(list)) => {
                let genres: Vec<String> = list
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                if !genres.is_empty() {
                    return genres;
                }
            }
            _ => {}
        }
    }
    Vec::new()
}

/// First non-empty string under any of the aliases.
fn first_str(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// First numeric value under any of the aliases, tolerating numbers
/// stored as strings.
fn first_u32(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<u32> {
    keys.iter().filter_map(|key| obj.get(*key)).find_map(|v| {
        v.as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
    })
}

fn lane(diffs: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<u8> {
    keys.iter()
        .filter_map(|key| diffs.get(*key))
        .find_map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bare_array() {
        let data = json!([
            {"title": "Song A", "artist": "Artist A"},
            {"title": "Song B", "artist": "Artist B"}
        ]);
        let tracks = parse_tracks(&data);
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].title, "Song A");
    }

    #[test]
    fn test_parse_wrapper_objects() {
        for wrapper in ["tracks", "items", "data"] {
            let data = json!({wrapper: [{"title": "T", "artist": "A"}]});
            assert_eq!(parse_tracks(&data).len(), 1, "wrapper {wrapper}");
        }
    }

    #[test]
    fn test_parse_object_map() {
        let data = json!({
            "songa": {"title": "Song A", "artist": "Artist A"},
            "songb": {"title": "Song B", "artist": "Artist B"}
        });
        assert_eq!(parse_tracks(&data).len(), 2);
    }

    #[test]
    fn test_entries_without_title_or_artist_are_dropped() {
        let data = json!([
            {"title": "Keep", "artist": "Me"},
            {"title": "No Artist"},
            {"artist": "No Title"},
            {"title": "", "artist": "Empty Title"}
        ]);
        let tracks = parse_tracks(&data);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Keep");
    }

    #[test]
    fn test_field_aliases() {
        let data = json!([{
            "tt": "Abbreviated",
            "an": "Artist",
            "sn": "abbrev",
            "ry": 1987,
            "ab": "Album",
            "dn": 245,
            "mt": 120,
            "mk": "E",
            "mm": "Minor",
            "au": "https://img.example/a.png",
            "ge": ["Rock", "Pop"]
        }]);
        let track = &parse_tracks(&data)[0];
        assert_eq!(track.title, "Abbreviated");
        assert_eq!(track.id, "abbrev");
        assert_eq!(track.release_year, Some(1987));
        assert_eq!(track.album.as_deref(), Some("Album"));
        assert_eq!(track.duration_secs, Some(245));
        assert_eq!(track.bpm, Some(120));
        assert_eq!(track.key.as_deref(), Some("E"));
        assert_eq!(track.mode.as_deref(), Some("Minor"));
        assert_eq!(track.genres, vec!["Rock", "Pop"]);
    }

    #[test]
    fn test_id_falls_back_to_title_and_artist() {
        let data = json!([{"title": "T", "artist": "A"}]);
        assert_eq!(parse_tracks(&data)[0].id, "T||A");
    }

    #[test]
    fn test_genre_string_becomes_single_entry() {
        let data = json!([{"title": "T", "artist": "A", "genre": "Metal"}]);
        assert_eq!(parse_tracks(&data)[0].genres, vec!["Metal"]);
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let data = json!([{"title": "T", "artist": "A", "year": "1999", "bpm": "128"}]);
        let track = &parse_tracks(&data)[0];
        assert_eq!(track.release_year, Some(1999));
        assert_eq!(track.bpm, Some(128));
    }

    #[test]
    fn test_difficulty_lane_aliases_and_average() {
        let data = json!([{
            "title": "T",
            "artist": "A",
            "in": {"gr": 4, "ba": 2, "ds": 6, "vl": 4, "pg": 7}
        }]);
        let track = &parse_tracks(&data)[0];
        assert_eq!(track.difficulties.lead, Some(4));
        assert_eq!(track.difficulties.bass, Some(2));
        assert_eq!(track.difficulties.drums, Some(6));
        assert_eq!(track.difficulties.vocals, Some(4));
        assert_eq!(track.difficulties.pro_lead, Some(7));
        assert_eq!(track.difficulties.average(), Some(4.0));
    }

    #[test]
    fn test_average_ignores_missing_lanes() {
        let diffs = Difficulties {
            lead: Some(3),
            drums: Some(5),
            ..Default::default()
        };
        assert_eq!(diffs.average(), Some(4.0));
        assert_eq!(Difficulties::default().average(), None);
    }

    #[test]
    fn test_duration_display() {
        let data = json!([{"title": "T", "artist": "A", "duration": 245}]);
        let track = &parse_tracks(&data)[0];
        assert_eq!(track.duration_display().as_deref(), Some("4:05"));
    }
}
