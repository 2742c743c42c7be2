//! /language handlers: show the current server language, list what is
//! available, and change it.

use super::{CommandContext, CommandReply, EMBED_COLOR};
use encore_core::message::{Embed, IncomingCommand};
use encore_locales::languages::{label_for, list_labels};
use encore_locales::{CANONICAL_CODE, PROTECTED_CODE};

pub(super) fn handle_language(
    incoming: &IncomingCommand,
    ctx: &CommandContext<'_>,
    lang: &str,
) -> CommandReply {
    match incoming.subcommand.as_deref() {
        Some("set") => set_language(incoming, ctx, lang),
        Some("list") => list_languages(ctx, lang),
        _ => show_current(ctx, lang),
    }
}

fn show_current(ctx: &CommandContext<'_>, lang: &str) -> CommandReply {
    let label = label_for(lang);
    CommandReply::text(ctx.catalog.resolve_with(
        lang,
        "language.current",
        &[("language", label.display_name())],
    ))
}

fn list_languages(ctx: &CommandContext<'_>, lang: &str) -> CommandReply {
    let codes = ctx.catalog.codes();
    let lines: Vec<String> = list_labels(&codes)
        .iter()
        .map(|label| format!("{} `{}` {}", label.emoji, label.code, label.display_name()))
        .collect();

    let mut description = lines.join("\n");
    if !ctx.config.links.github.is_empty() {
        description.push_str("\n\n");
        description.push_str(&ctx.catalog.resolve_with(
            lang,
            "language.translate_hint",
            &[("github", ctx.config.links.github.clone())],
        ));
    }

    let embed = Embed::new()
        .title(ctx.catalog.resolve_with(
            lang,
            "language.available_title",
            &[("count", codes.len().to_string())],
        ))
        .description(description)
        .color(EMBED_COLOR)
        .footer(ctx.catalog.resolve(lang, "language.hint"));

    CommandReply::embed(embed)
}

fn set_language(
    incoming: &IncomingCommand,
    ctx: &CommandContext<'_>,
    lang: &str,
) -> CommandReply {
    let Some(guild_id) = incoming.guild_id.as_deref() else {
        return CommandReply::text(ctx.catalog.resolve(lang, "language.guild_only"));
    };

    let code = incoming.option_str("code").unwrap_or("").trim();
    if !ctx.catalog.has_language(code) {
        return CommandReply::text(ctx.catalog.resolve_with(
            lang,
            "language.unknown",
            &[("code", code.to_string())],
        ));
    }

    match ctx.guild_langs.set(guild_id, code) {
        Ok(()) => {
            // Confirm in the newly chosen language.
            let label = label_for(code);
            let mut content = ctx.catalog.resolve_with(
                code,
                "language.updated",
                &[
                    ("emoji", label.emoji.clone()),
                    ("language", label.display_name()),
                ],
            );
            // Freshly bootstrapped languages still carry canonical
            // text, so ask for translation help: the English notice
            // always, plus the localized one once translators have
            // covered the key.
            if code != CANONICAL_CODE
                && code != PROTECTED_CODE
                && !ctx.config.links.github.is_empty()
            {
                let args = [("github", ctx.config.links.github.clone())];
                let english =
                    ctx.catalog
                        .resolve_with(CANONICAL_CODE, "language.translate_hint", &args);
                let localized = ctx
                    .catalog
                    .resolve_with(code, "language.translate_hint", &args);
                content.push('\n');
                content.push_str(&english);
                if localized != english {
                    content.push('\n');
                    content.push_str(&localized);
                }
            }
            CommandReply::text(content)
        }
        Err(e) => CommandReply::text(format!("Error: {e}")),
    }
}
