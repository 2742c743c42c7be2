//! Query matching over the track list.

use crate::model::Track;

/// Lowercase, trim and fold Latin diacritics so "Beyoncé" matches
/// "beyonce". Characters outside the fold table pass through.
pub fn normalize(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .chars()
        .map(fold_char)
        .collect()
}

fn fold_char(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => 'i',
        'ľ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ŕ' | 'ř' => 'r',
        'ś' | 'š' => 's',
        'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

/// Relevance of one track for a normalized query. Exact matches and
/// substring matches stack, so an exact title hit outranks any
/// substring-only hit.
fn score(track: &Track, query: &str) -> u32 {
    let title = normalize(&track.title);
    let artist = normalize(&track.artist);
    let mut score = 0;
    if title == query {
        score += 120;
    }
    if artist == query {
        score += 90;
    }
    if title.contains(query) {
        score += 60;
    }
    if artist.contains(query) {
        score += 40;
    }
    score
}

/// Tracks matching `query`, best first. Ties keep dataset order.
pub fn search<'a>(tracks: &'a [Track], query: &str) -> Vec<&'a Track> {
    let query = normalize(query);
    if query.is_empty() {
        return Vec::new();
    }
    let mut scored: Vec<(u32, &Track)> = tracks
        .iter()
        .filter_map(|track| {
            let s = score(track, &query);
            (s > 0).then_some((s, track))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, track)| track).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_tracks;
    use serde_json::json;

    fn sample_tracks() -> Vec<Track> {
        parse_tracks(&json!([
            {"title": "Everlong", "artist": "Foo Fighters"},
            {"title": "Everlong (Live)", "artist": "Foo Fighters"},
            {"title": "Long Road", "artist": "Everlong"},
            {"title": "Señorita", "artist": "Shawn Mendes"},
            {"title": "Unrelated", "artist": "Somebody"}
        ]))
    }

    #[test]
    fn test_normalize_folds_case_and_diacritics() {
        assert_eq!(normalize("  Beyoncé "), "beyonce");
        assert_eq!(normalize("SEÑORITA"), "senorita");
        assert_eq!(normalize("Mötley Crüe"), "motley crue");
        assert_eq!(normalize("日本語"), "日本語");
    }

    #[test]
    fn test_exact_title_outranks_substring_matches() {
        let tracks = sample_tracks();
        let results = search(&tracks, "everlong");
        let titles: Vec<&str> = results.iter().map(|t| t.title.as_str()).collect();
        // Exact title stacks with its own substring hit (180) and
        // lands first.
        assert_eq!(titles[0], "Everlong");
        assert!(titles.contains(&"Everlong (Live)"));
        assert!(titles.contains(&"Long Road"));
        assert_eq!(titles.len(), 3);
    }

    #[test]
    fn test_exact_artist_beats_title_substring() {
        let tracks = sample_tracks();
        let results = search(&tracks, "everlong");
        // "Long Road" by artist "Everlong": 90 exact artist + 40
        // substring artist = 130 versus the live title's 60.
        let long_road = results.iter().position(|t| t.title == "Long Road").unwrap();
        let live = results
            .iter()
            .position(|t| t.title == "Everlong (Live)")
            .unwrap();
        assert!(long_road < live);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let tracks = sample_tracks();
        assert!(search(&tracks, "zzz none").is_empty());
        assert!(search(&tracks, "   ").is_empty());
    }

    #[test]
    fn test_diacritic_insensitive_query() {
        let tracks = sample_tracks();
        let results = search(&tracks, "senorita");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Señorita");
    }

    #[test]
    fn test_ties_keep_dataset_order() {
        let tracks = parse_tracks(&json!([
            {"title": "Alpha Song", "artist": "X"},
            {"title": "Beta Song", "artist": "Y"}
        ]));
        let results = search(&tracks, "song");
        let titles: Vec<&str> = results.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha Song", "Beta Song"]);
    }
}
