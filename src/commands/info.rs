//! Informational command handlers: /ping, /about, /credits.

use super::{CommandContext, CommandReply, EMBED_COLOR};
use encore_core::message::Embed;
use encore_locales::languages::label_for;

fn format_uptime(elapsed: std::time::Duration) -> String {
    let hours = elapsed.as_secs() / 3600;
    let minutes = (elapsed.as_secs() % 3600) / 60;
    let secs = elapsed.as_secs() % 60;
    format!("{hours}h {minutes}m {secs}s")
}

pub(super) fn handle_ping(ctx: &CommandContext<'_>, lang: &str) -> CommandReply {
    let uptime = format_uptime(ctx.uptime.elapsed());

    CommandReply::text(
        ctx.catalog
            .resolve_with(lang, "ping.reply", &[("uptime", uptime)]),
    )
}

/// Handle /about with the bot description and the configured links.
pub(super) fn handle_about(ctx: &CommandContext<'_>, lang: &str) -> CommandReply {
    let name = ctx.config.encore.name.clone();
    let links = &ctx.config.links;

    let mut embed = Embed::new()
        .title(
            ctx.catalog
                .resolve_with(lang, "about.title", &[("name", name.clone())]),
        )
        .description(
            ctx.catalog
                .resolve_with(lang, "about.description", &[("name", name)]),
        )
        .color(EMBED_COLOR)
        .field(
            ctx.catalog.resolve(lang, "about.version"),
            format!("v{}", env!("CARGO_PKG_VERSION")),
            true,
        )
        .field(
            ctx.catalog.resolve(lang, "about.uptime"),
            format_uptime(ctx.uptime.elapsed()),
            true,
        )
        .field(
            ctx.catalog.resolve(lang, "about.language"),
            label_for(lang).display_name(),
            true,
        );

    let mut link_lines = Vec::new();
    if !links.support_server.is_empty() {
        link_lines.push(format!(
            "[{}]({})",
            ctx.catalog.resolve(lang, "about.support_server"),
            links.support_server
        ));
    }
    if !links.contact.is_empty() {
        link_lines.push(format!(
            "{}: {}",
            ctx.catalog.resolve(lang, "about.contact"),
            links.contact
        ));
    }
    if !links.github.is_empty() {
        link_lines.push(format!(
            "[{}]({})",
            ctx.catalog.resolve(lang, "about.source"),
            links.github
        ));
    }
    if !link_lines.is_empty() {
        embed = embed.field(
            ctx.catalog.resolve(lang, "about.links_title"),
            link_lines.join("\n"),
            false,
        );
    }
    embed = embed.footer(ctx.catalog.resolve(lang, "about.footer"));

    CommandReply::embed(embed)
}

/// Handle /credits naming the track data source and the translators.
pub(super) fn handle_credits(ctx: &CommandContext<'_>, lang: &str) -> CommandReply {
    let mut embed = Embed::new()
        .title(ctx.catalog.resolve(lang, "credits.title"))
        .description(ctx.catalog.resolve(lang, "credits.description"))
        .color(EMBED_COLOR)
        .field(
            ctx.catalog.resolve(lang, "credits.data_source"),
            ctx.config.tracks.data_url.clone(),
            false,
        );

    if !ctx.config.links.github.is_empty() {
        embed = embed.field(
            ctx.catalog.resolve(lang, "credits.translators"),
            format!("{}/tree/main/locales", ctx.config.links.github),
            false,
        );
    }
    embed = embed.field(
        ctx.catalog.resolve(lang, "credits.disclaimer_title"),
        ctx.catalog.resolve(lang, "credits.disclaimer"),
        false,
    );

    CommandReply::embed(embed)
}
