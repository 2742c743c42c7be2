//! /achievements handlers: mark entries done, undo them, reset, and
//! show paged progress lists.

use super::{CommandContext, CommandReply, EMBED_COLOR};
use encore_core::message::{Embed, IncomingCommand};
use encore_store::MarkOutcome;
use std::collections::HashSet;

/// Entries shown per list page.
const PAGE_SIZE: usize = 10;

/// Emoji attached to completion messages.
const TROPHY: &str = "🏆";

pub(super) fn handle_achievements(
    incoming: &IncomingCommand,
    ctx: &CommandContext<'_>,
    lang: &str,
) -> CommandReply {
    match incoming.subcommand.as_deref() {
        Some("done") => mark_done(incoming, ctx, lang),
        Some("undo") => undo(incoming, ctx, lang),
        Some("reset") => reset(incoming, ctx, lang),
        Some("progress") => progress(incoming, ctx, lang),
        Some("help") => help(ctx, lang),
        _ => list(incoming, ctx, lang),
    }
}

fn help(ctx: &CommandContext<'_>, lang: &str) -> CommandReply {
    let ids = match ctx.achievements.achievements() {
        Ok(all) => all
            .iter()
            .map(|a| format!("`{}`", a.id))
            .collect::<Vec<_>>()
            .join(", "),
        Err(e) => return CommandReply::text(format!("Error: {e}")),
    };
    CommandReply::text(ctx.catalog.resolve_with(
        lang,
        "achievements.ui.help",
        &[("ids", ids)],
    ))
}

fn mark_done(incoming: &IncomingCommand, ctx: &CommandContext<'_>, lang: &str) -> CommandReply {
    let id = incoming.option_str("id").unwrap_or("").trim();
    match ctx.achievements.mark_done(&incoming.user_id, id) {
        Ok(MarkOutcome::Marked) => CommandReply::text(ctx.catalog.resolve_with(
            lang,
            "achievements.ui.marked",
            &[
                ("emoji", TROPHY.to_string()),
                ("name", entry_name(ctx, lang, id)),
            ],
        )),
        Ok(MarkOutcome::AlreadyDone) => CommandReply::text(ctx.catalog.resolve_with(
            lang,
            "achievements.ui.already_done",
            &[
                ("emoji", TROPHY.to_string()),
                ("name", entry_name(ctx, lang, id)),
            ],
        )),
        Ok(MarkOutcome::UnknownId) => CommandReply::text(ctx.catalog.resolve_with(
            lang,
            "achievements.ui.unknown_id",
            &[("id", id.to_string())],
        )),
        Err(e) => CommandReply::text(format!("Error: {e}")),
    }
}

fn undo(incoming: &IncomingCommand, ctx: &CommandContext<'_>, lang: &str) -> CommandReply {
    let id = incoming.option_str("id").unwrap_or("").trim();
    match ctx.achievements.undo(&incoming.user_id, id) {
        Ok(true) => CommandReply::text(ctx.catalog.resolve_with(
            lang,
            "achievements.ui.undone",
            &[("name", entry_name(ctx, lang, id))],
        )),
        Ok(false) => CommandReply::text(ctx.catalog.resolve_with(
            lang,
            "achievements.ui.not_done",
            &[("name", entry_name(ctx, lang, id))],
        )),
        Err(e) => CommandReply::text(format!("Error: {e}")),
    }
}

fn reset(incoming: &IncomingCommand, ctx: &CommandContext<'_>, lang: &str) -> CommandReply {
    match ctx.achievements.reset(&incoming.user_id) {
        Ok(()) => CommandReply::text(ctx.catalog.resolve(lang, "achievements.ui.reset")),
        Err(e) => CommandReply::text(format!("Error: {e}")),
    }
}

fn progress(incoming: &IncomingCommand, ctx: &CommandContext<'_>, lang: &str) -> CommandReply {
    match ctx.achievements.stats(&incoming.user_id) {
        Ok(stats) => CommandReply::text(ctx.catalog.resolve_with(
            lang,
            "achievements.ui.progress",
            &[
                ("done", stats.done.to_string()),
                ("total", stats.total.to_string()),
                ("percent", stats.percent.to_string()),
            ],
        )),
        Err(e) => CommandReply::text(format!("Error: {e}")),
    }
}

fn list(incoming: &IncomingCommand, ctx: &CommandContext<'_>, lang: &str) -> CommandReply {
    let all = match ctx.achievements.achievements() {
        Ok(all) => all,
        Err(e) => return CommandReply::text(format!("Error: {e}")),
    };
    let done: HashSet<String> = match ctx.achievements.user_done(&incoming.user_id) {
        Ok(done) => done.into_iter().collect(),
        Err(e) => return CommandReply::text(format!("Error: {e}")),
    };

    let show_all = incoming.option_str("view") == Some("all");
    let entries: Vec<_> = all
        .iter()
        .filter(|a| show_all || !done.contains(&a.id))
        .collect();
    if entries.is_empty() {
        // An empty open view means every achievement is completed.
        let key = if !show_all && !all.is_empty() {
            "achievements.ui.all_done"
        } else {
            "achievements.ui.empty"
        };
        return CommandReply::text(ctx.catalog.resolve(lang, key));
    }

    let pages = entries.len().div_ceil(PAGE_SIZE);
    let page = incoming
        .option_i64("page")
        .unwrap_or(1)
        .clamp(1, pages as i64) as usize;

    let lines: Vec<String> = entries
        .iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .map(|a| {
            let marker = if done.contains(&a.id) { "✅" } else { "⬜" };
            let name = entry_name(ctx, lang, &a.id);
            let desc = entry_desc(ctx, lang, &a.id);
            if desc.is_empty() {
                format!("{marker} **{name}**")
            } else {
                format!("{marker} **{name}**: {desc}")
            }
        })
        .collect();

    let embed = Embed::new()
        .title(ctx.catalog.resolve(lang, "achievements.ui.list_title"))
        .description(lines.join("\n"))
        .color(EMBED_COLOR)
        .footer(ctx.catalog.resolve_with(
            lang,
            "achievements.ui.page",
            &[("page", page.to_string()), ("pages", pages.to_string())],
        ));

    CommandReply::embed(embed)
}

/// Localized display name for an achievement id. Ids without a locale
/// entry fall back to the id itself.
fn entry_name(ctx: &CommandContext<'_>, lang: &str, id: &str) -> String {
    let key = format!("achievements.entries.{id}.name");
    let resolved = ctx.catalog.resolve(lang, &key);
    if resolved == key {
        id.to_string()
    } else {
        resolved
    }
}

fn entry_desc(ctx: &CommandContext<'_>, lang: &str, id: &str) -> String {
    let key = format!("achievements.entries.{id}.desc");
    let resolved = ctx.catalog.resolve(lang, &key);
    if resolved == key {
        String::new()
    } else {
        resolved
    }
}
