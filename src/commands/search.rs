//! /search handler: look up jam tracks and render the details.

use super::{CommandContext, CommandReply, EMBED_COLOR};
use encore_core::message::{Embed, IncomingCommand};
use encore_tracks::{search, Track};
use tracing::warn;

/// How many hits a multi-result list shows.
const LIST_LIMIT: usize = 10;

pub(super) async fn handle_search(
    incoming: &IncomingCommand,
    ctx: &CommandContext<'_>,
    lang: &str,
) -> CommandReply {
    let query = incoming.option_str("query").map(str::trim).unwrap_or("");
    if query.is_empty() {
        return CommandReply::text(ctx.catalog.resolve(lang, "search.no_query"));
    }

    let snapshot = match ctx.tracks.tracks().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("track lookup failed: {e}");
            return CommandReply::text(ctx.catalog.resolve(lang, "common.error"));
        }
    };

    let hits = search(&snapshot.tracks, query);
    let mut reply = match hits.as_slice() {
        [] => CommandReply::text(ctx.catalog.resolve_with(
            lang,
            "search.no_results",
            &[("query", query.to_string())],
        )),
        [only] => CommandReply::embed(track_embed(only, ctx, lang)),
        _ => CommandReply::embed(list_embed(&hits, snapshot.cached, ctx, lang)),
    };

    if snapshot.stale {
        let notice = ctx.catalog.resolve(lang, "search.stale_notice");
        reply.content = if reply.content.is_empty() {
            notice
        } else {
            format!("{notice}\n{}", reply.content)
        };
    }
    reply
}

/// Detail embed for a single track.
fn track_embed(track: &Track, ctx: &CommandContext<'_>, lang: &str) -> Embed {
    let mut embed = Embed::new()
        .title(track.title.clone())
        .color(EMBED_COLOR)
        .field(
            ctx.catalog.resolve(lang, "search.artist"),
            track.artist.clone(),
            true,
        );

    if let Some(album) = &track.album {
        embed = embed.field(ctx.catalog.resolve(lang, "search.album"), album.clone(), true);
    }
    if let Some(year) = track.release_year {
        embed = embed.field(
            ctx.catalog.resolve(lang, "search.year"),
            year.to_string(),
            true,
        );
    }
    if let Some(duration) = track.duration_display() {
        embed = embed.field(ctx.catalog.resolve(lang, "search.duration"), duration, true);
    }
    if let Some(bpm) = track.bpm {
        embed = embed.field(ctx.catalog.resolve(lang, "search.bpm"), bpm.to_string(), true);
    }
    if let Some(key) = &track.key {
        let value = match &track.mode {
            Some(mode) => format!("{key} {mode}"),
            None => key.clone(),
        };
        embed = embed.field(ctx.catalog.resolve(lang, "search.key"), value, true);
    }
    if !track.genres.is_empty() {
        embed = embed.field(
            ctx.catalog.resolve(lang, "search.genres"),
            track.genres.join(", "),
            true,
        );
    }
    if let Some(modified) = &track.last_modified {
        embed = embed.field(
            ctx.catalog.resolve(lang, "search.last_modified"),
            modified.clone(),
            true,
        );
    }

    let lanes = difficulty_lines(track, ctx, lang);
    if !lanes.is_empty() {
        embed = embed.field(
            ctx.catalog.resolve(lang, "search.difficulties"),
            format!("```\n{}\n```", lanes.join("\n")),
            false,
        );
    }

    if let Some(artwork) = &track.artwork {
        embed = embed.thumbnail(artwork.clone());
    }
    embed
}

/// Numbered list of the best matches.
fn list_embed(hits: &[&Track], cached: bool, ctx: &CommandContext<'_>, lang: &str) -> Embed {
    let lines: Vec<String> = hits
        .iter()
        .take(LIST_LIMIT)
        .enumerate()
        .map(|(i, track)| format!("{}. **{}** · {}", i + 1, track.title, track.artist))
        .collect();

    let mut footer = ctx.catalog.resolve(lang, "search.multiple_hint");
    if cached {
        footer.push_str(" · ");
        footer.push_str(&ctx.catalog.resolve(lang, "search.cached_note"));
    }

    Embed::new()
        .title(ctx.catalog.resolve_with(
            lang,
            "search.multiple_title",
            &[("count", hits.len().to_string())],
        ))
        .description(lines.join("\n"))
        .color(EMBED_COLOR)
        .footer(footer)
}

/// One aligned "Label ▰▰▰▱▱▱▱" line per charted lane, closed by the
/// numeric average over the main lanes.
fn difficulty_lines(track: &Track, ctx: &CommandContext<'_>, lang: &str) -> Vec<String> {
    let d = &track.difficulties;
    let lanes = [
        ("search.lane_lead", d.lead),
        ("search.lane_bass", d.bass),
        ("search.lane_drums", d.drums),
        ("search.lane_vocals", d.vocals),
        ("search.lane_pro_lead", d.pro_lead),
        ("search.lane_pro_bass", d.pro_bass),
        ("search.lane_pro_drums", d.pro_drums),
        ("search.lane_pro_vocals", d.pro_vocals),
    ];

    let labelled: Vec<(String, u8)> = lanes
        .iter()
        .filter_map(|(key, value)| value.map(|v| (ctx.catalog.resolve(lang, key), v)))
        .collect();
    let average = d
        .average()
        .map(|avg| (ctx.catalog.resolve(lang, "search.lane_average"), avg));
    let width = labelled
        .iter()
        .map(|(label, _)| label.chars().count())
        .chain(average.iter().map(|(label, _)| label.chars().count()))
        .max()
        .unwrap_or(0);

    let mut lines: Vec<String> = labelled
        .iter()
        .map(|(label, value)| format!("{label:<width$} {}", bar(*value)))
        .collect();
    if let Some((label, avg)) = average {
        lines.push(format!("{label:<width$} {avg:.1}"));
    }
    lines
}

/// Seven-segment intensity bar, e.g. "▰▰▰▱▱▱▱" for 3.
fn bar(value: u8) -> String {
    let filled = usize::from(value.min(7));
    "▰".repeat(filled) + &"▱".repeat(7 - filled)
}
