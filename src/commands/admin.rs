//! Owner-only command handlers: /sync-locales and /system.

use super::{CommandContext, CommandReply, Dispatch, ExitAction};
use encore_channels::LogLevel;
use encore_core::error::EncoreError;
use encore_core::message::IncomingCommand;
use encore_locales::{sync_all, MergePolicy, SyncOptions};

pub(super) fn handle_sync_locales(
    incoming: &IncomingCommand,
    ctx: &CommandContext<'_>,
    lang: &str,
) -> Dispatch {
    if !ctx.config.discord.is_owner(&incoming.user_id) {
        return CommandReply::text(ctx.catalog.resolve(lang, "common.not_allowed")).into();
    }

    let options = SyncOptions {
        policy: MergePolicy {
            prune: incoming.option_bool("prune").unwrap_or(false),
            force: incoming.option_bool("force").unwrap_or(false),
        },
        dry_run: incoming.option_bool("dry-run").unwrap_or(false),
        only: incoming.option_str("language").map(str::to_string),
    };

    match sync_all(ctx.locales_dir, &options) {
        Ok(report) => {
            let mut content = ctx.catalog.resolve_with(
                lang,
                "sync.report",
                &[
                    ("scanned", report.scanned.to_string()),
                    ("updated", report.updated.to_string()),
                    ("unchanged", report.unchanged.to_string()),
                    ("errors", report.errors.to_string()),
                ],
            );
            if report.dry_run {
                content.push('\n');
                content.push_str(&ctx.catalog.resolve(lang, "sync.dry_run_notice"));
            }

            let level = if report.errors > 0 {
                LogLevel::Warn
            } else {
                LogLevel::Success
            };
            let audit = format!(
                "Locale sync by {}: {} scanned, {} updated, {} unchanged, {} errors{}",
                incoming.user_tag,
                report.scanned,
                report.updated,
                report.unchanged,
                report.errors,
                if report.dry_run { " (dry run)" } else { "" }
            );
            Dispatch {
                reply: CommandReply::text(content),
                audit: Some((level, audit)),
                exit: None,
            }
        }
        Err(EncoreError::ProtectedLanguage(code)) => {
            CommandReply::text(ctx.catalog.resolve_with(lang, "sync.protected", &[("code", code)]))
                .into()
        }
        Err(e) => Dispatch {
            reply: CommandReply::text(format!("Error: {e}")),
            audit: Some((
                LogLevel::Error,
                format!("Locale sync by {} failed: {e}", incoming.user_tag),
            )),
            exit: None,
        },
    }
}

pub(super) fn handle_system(
    incoming: &IncomingCommand,
    ctx: &CommandContext<'_>,
    lang: &str,
) -> Dispatch {
    if !ctx.config.discord.is_owner(&incoming.user_id) {
        return CommandReply::text(ctx.catalog.resolve(lang, "common.not_allowed")).into();
    }

    match incoming.subcommand.as_deref() {
        Some("restart") => Dispatch {
            reply: CommandReply::text(ctx.catalog.resolve(lang, "system.restarting")),
            audit: Some((
                LogLevel::Warn,
                format!("Restart requested by {}", incoming.user_tag),
            )),
            exit: Some(ExitAction::Restart),
        },
        Some("shutdown") => Dispatch {
            reply: CommandReply::text(ctx.catalog.resolve(lang, "system.shutting_down")),
            audit: Some((
                LogLevel::Warn,
                format!("Shutdown requested by {}", incoming.user_tag),
            )),
            exit: Some(ExitAction::Shutdown),
        },
        _ => CommandReply::text(ctx.catalog.resolve(lang, "common.unknown_command")).into(),
    }
}
