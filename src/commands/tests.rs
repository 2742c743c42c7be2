use super::*;
use encore_core::config::TracksConfig;
use encore_core::message::OptionValue;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

const EN_LOCALE: &str = include_str!("../../locales/en.json");
const DE_LOCALE: &str = include_str!("../../locales/de.json");

struct Fixture {
    locales_dir: PathBuf,
    catalog: LocaleCatalog,
    guild_langs: GuildLangStore,
    achievements: AchievementStore,
    tracks: TracksClient,
    config: Config,
    uptime: Instant,
}

impl Fixture {
    fn ctx(&self) -> CommandContext<'_> {
        CommandContext {
            catalog: &self.catalog,
            guild_langs: &self.guild_langs,
            achievements: &self.achievements,
            tracks: &self.tracks,
            config: &self.config,
            locales_dir: &self.locales_dir,
            uptime: &self.uptime,
        }
    }
}

/// Build an isolated on-disk world for one test: bundled en/de locales,
/// a sparse fr locale, and the stock achievement definitions.
fn fixture() -> Fixture {
    let id = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir =
        std::env::temp_dir().join(format!("__encore_cmd_test_{}_{}__", std::process::id(), id));
    let locales_dir = dir.join("locales");
    std::fs::create_dir_all(&locales_dir).unwrap();
    std::fs::write(locales_dir.join("en.json"), EN_LOCALE).unwrap();
    std::fs::write(locales_dir.join("de.json"), DE_LOCALE).unwrap();
    std::fs::write(
        locales_dir.join("fr.json"),
        "{\n  \"common\": {\n    \"error\": \"Zut.\"\n  }\n}\n",
    )
    .unwrap();

    std::fs::write(
        dir.join("achievements.json"),
        r#"[
  { "id": "first_song" },
  { "id": "full_combo" },
  { "id": "flawless_solo" },
  { "id": "band_leader" },
  { "id": "setlist_master" }
]"#,
    )
    .unwrap();

    let catalog = LocaleCatalog::load(&locales_dir).unwrap();
    let guild_langs = GuildLangStore::new(dir.join("languages.json"), "de".to_string());
    let achievements =
        AchievementStore::new(dir.join("achievements.json"), dir.join("progress.json"));
    // Port 9 is never listening, so any accidental fetch fails fast.
    let tracks = TracksClient::new(&TracksConfig {
        data_url: "http://127.0.0.1:9/tracks.json".to_string(),
        cache_ttl_mins: 15,
        fetch_timeout_secs: 1,
    })
    .unwrap();

    Fixture {
        locales_dir,
        catalog,
        guild_langs,
        achievements,
        tracks,
        config: Config::default(),
        uptime: Instant::now(),
    }
}

fn incoming(name: &str, subcommand: Option<&str>) -> IncomingCommand {
    IncomingCommand {
        id: uuid::Uuid::new_v4(),
        channel: "discord".to_string(),
        name: name.to_string(),
        subcommand: subcommand.map(str::to_string),
        options: HashMap::new(),
        guild_id: Some("guild-1".to_string()),
        user_id: "user-1".to_string(),
        user_tag: "tester".to_string(),
        reply_token: "tok".to_string(),
        timestamp: chrono::Utc::now(),
    }
}

fn with_option(mut cmd: IncomingCommand, name: &str, value: OptionValue) -> IncomingCommand {
    cmd.options.insert(name.to_string(), value);
    cmd
}

#[test]
fn test_parse_all_commands() {
    assert!(matches!(Command::parse("ping"), Some(Command::Ping)));
    assert!(matches!(Command::parse("about"), Some(Command::About)));
    assert!(matches!(Command::parse("credits"), Some(Command::Credits)));
    assert!(matches!(
        Command::parse("language"),
        Some(Command::Language)
    ));
    assert!(matches!(Command::parse("search"), Some(Command::Search)));
    assert!(matches!(
        Command::parse("achievements"),
        Some(Command::Achievements)
    ));
    assert!(matches!(
        Command::parse("sync-locales"),
        Some(Command::SyncLocales)
    ));
    assert!(matches!(Command::parse("system"), Some(Command::System)));
}

#[test]
fn test_parse_unknown_returns_none() {
    assert!(Command::parse("dance").is_none());
    assert!(Command::parse("").is_none());
    assert!(Command::parse("PING").is_none());
}

#[test]
fn test_definitions_cover_every_command() {
    let defs = definitions();
    let names: Vec<&str> = defs
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 8);
    for name in &names {
        assert!(
            Command::parse(name).is_some(),
            "registered command {name} has no handler"
        );
    }
    assert!(ephemeral_names().contains(&"achievements".to_string()));
    assert!(!ephemeral_names().contains(&"ping".to_string()));
}

#[tokio::test]
async fn test_ping_reports_uptime() {
    let fx = fixture();
    let d = handle(Command::Ping, &incoming("ping", None), &fx.ctx()).await;
    assert!(d.reply.content.contains("Pong"), "got: {}", d.reply.content);
    assert!(d.reply.content.contains("0h"), "got: {}", d.reply.content);
}

#[tokio::test]
async fn test_about_embed_uses_bot_name() {
    let fx = fixture();
    let d = handle(Command::About, &incoming("about", None), &fx.ctx()).await;
    let embed = &d.reply.embeds[0];
    assert!(
        embed.title.as_deref().unwrap_or("").contains("Encore"),
        "got: {:?}",
        embed.title
    );
    assert!(
        embed
            .fields
            .iter()
            .any(|f| f.value == format!("v{}", env!("CARGO_PKG_VERSION"))),
        "about should carry the package version"
    );
}

#[tokio::test]
async fn test_language_show_falls_back_to_default() {
    let fx = fixture();
    let d = handle(Command::Language, &incoming("language", None), &fx.ctx()).await;
    // No preference stored, so the reply is in German about German.
    assert!(
        d.reply.content.contains("German (Deutsch)"),
        "got: {}",
        d.reply.content
    );
}

#[tokio::test]
async fn test_language_set_updates_store_and_confirms_in_new_language() {
    let fx = fixture();
    let cmd = with_option(
        incoming("language", Some("set")),
        "code",
        OptionValue::String("en".to_string()),
    );
    let d = handle(Command::Language, &cmd, &fx.ctx()).await;
    assert!(
        d.reply.content.contains("English"),
        "confirmation should name the new language: {}",
        d.reply.content
    );
    assert_eq!(fx.guild_langs.get(Some("guild-1")), "en");
}

#[tokio::test]
async fn test_language_set_nudges_for_translation() {
    let fx = fixture();
    let cmd = with_option(
        incoming("language", Some("set")),
        "code",
        OptionValue::String("fr".to_string()),
    );
    let d = handle(Command::Language, &cmd, &fx.ctx()).await;
    // The English notice always, plus the resolver-chain one because
    // the sparse fr file lacks the key.
    assert!(
        d.reply.content.contains("Spotted a rough translation"),
        "got: {}",
        d.reply.content
    );
    assert!(
        d.reply.content.contains("holprige"),
        "got: {}",
        d.reply.content
    );
    assert_eq!(fx.guild_langs.get(Some("guild-1")), "fr");
}

#[tokio::test]
async fn test_language_set_rejects_unknown_code() {
    let fx = fixture();
    let cmd = with_option(
        incoming("language", Some("set")),
        "code",
        OptionValue::String("xx".to_string()),
    );
    let d = handle(Command::Language, &cmd, &fx.ctx()).await;
    assert!(d.reply.content.contains("xx"), "got: {}", d.reply.content);
    assert!(
        d.reply.content.contains("keine verfügbare"),
        "should answer in the default language: {}",
        d.reply.content
    );
    assert_eq!(fx.guild_langs.get(Some("guild-1")), "de");
}

#[tokio::test]
async fn test_language_set_requires_guild() {
    let fx = fixture();
    let mut cmd = with_option(
        incoming("language", Some("set")),
        "code",
        OptionValue::String("en".to_string()),
    );
    cmd.guild_id = None;
    let d = handle(Command::Language, &cmd, &fx.ctx()).await;
    assert!(
        d.reply.content.contains("Servers"),
        "got: {}",
        d.reply.content
    );
}

#[tokio::test]
async fn test_language_list_pins_canonical_and_protected() {
    let fx = fixture();
    let d = handle(
        Command::Language,
        &incoming("language", Some("list")),
        &fx.ctx(),
    )
    .await;
    let description = d.reply.embeds[0].description.clone().unwrap();
    let en_pos = description.find("`en`").unwrap();
    let de_pos = description.find("`de`").unwrap();
    let fr_pos = description.find("`fr`").unwrap();
    assert!(en_pos < de_pos && de_pos < fr_pos, "got: {description}");
}

#[tokio::test]
async fn test_achievement_mark_and_progress() {
    let fx = fixture();
    let done = with_option(
        incoming("achievements", Some("done")),
        "id",
        OptionValue::String("first_song".to_string()),
    );

    let d = handle(Command::Achievements, &done, &fx.ctx()).await;
    assert!(
        d.reply.content.contains("Erste Zugabe"),
        "got: {}",
        d.reply.content
    );

    let d = handle(Command::Achievements, &done, &fx.ctx()).await;
    assert!(
        d.reply.content.contains("bereits"),
        "second mark should report already done: {}",
        d.reply.content
    );

    let d = handle(
        Command::Achievements,
        &incoming("achievements", Some("progress")),
        &fx.ctx(),
    )
    .await;
    assert!(
        d.reply.content.contains("1/5") && d.reply.content.contains("20"),
        "got: {}",
        d.reply.content
    );
}

#[tokio::test]
async fn test_achievement_unknown_id() {
    let fx = fixture();
    let cmd = with_option(
        incoming("achievements", Some("done")),
        "id",
        OptionValue::String("nope".to_string()),
    );
    let d = handle(Command::Achievements, &cmd, &fx.ctx()).await;
    assert!(d.reply.content.contains("nope"), "got: {}", d.reply.content);
}

#[tokio::test]
async fn test_achievement_undo() {
    let fx = fixture();
    let done = with_option(
        incoming("achievements", Some("done")),
        "id",
        OptionValue::String("first_song".to_string()),
    );
    handle(Command::Achievements, &done, &fx.ctx()).await;

    let undo = with_option(
        incoming("achievements", Some("undo")),
        "id",
        OptionValue::String("first_song".to_string()),
    );
    let d = handle(Command::Achievements, &undo, &fx.ctx()).await;
    assert!(
        d.reply.content.contains("wieder offen"),
        "got: {}",
        d.reply.content
    );

    let d = handle(Command::Achievements, &undo, &fx.ctx()).await;
    assert!(
        d.reply.content.contains("war nicht"),
        "undoing twice should say it was not done: {}",
        d.reply.content
    );
}

#[tokio::test]
async fn test_achievement_list_hides_done_unless_view_all() {
    let fx = fixture();
    let done = with_option(
        incoming("achievements", Some("done")),
        "id",
        OptionValue::String("first_song".to_string()),
    );
    handle(Command::Achievements, &done, &fx.ctx()).await;

    let d = handle(
        Command::Achievements,
        &incoming("achievements", Some("list")),
        &fx.ctx(),
    )
    .await;
    let open_only = d.reply.embeds[0].description.clone().unwrap();
    assert!(!open_only.contains("Erste Zugabe"), "got: {open_only}");
    assert!(open_only.contains("⬜"), "got: {open_only}");

    let all = with_option(
        incoming("achievements", Some("list")),
        "view",
        OptionValue::String("all".to_string()),
    );
    let d = handle(Command::Achievements, &all, &fx.ctx()).await;
    let everything = d.reply.embeds[0].description.clone().unwrap();
    assert!(everything.contains("Erste Zugabe"), "got: {everything}");
    assert!(everything.contains("✅"), "got: {everything}");
    assert!(
        d.reply.embeds[0]
            .footer
            .as_ref()
            .unwrap()
            .text
            .contains("1/1"),
        "single page expected"
    );
}

#[tokio::test]
async fn test_achievements_help_lists_ids() {
    let fx = fixture();
    let d = handle(
        Command::Achievements,
        &incoming("achievements", Some("help")),
        &fx.ctx(),
    )
    .await;
    assert!(
        d.reply.content.contains("Verfügbare IDs"),
        "got: {}",
        d.reply.content
    );
    assert!(
        d.reply.content.contains("`first_song`") && d.reply.content.contains("`setlist_master`"),
        "every id should be listed: {}",
        d.reply.content
    );
}

#[tokio::test]
async fn test_search_requires_query() {
    let fx = fixture();
    let d = handle(Command::Search, &incoming("search", None), &fx.ctx()).await;
    assert!(
        d.reply.content.contains("Songtitel"),
        "got: {}",
        d.reply.content
    );
}

#[tokio::test]
async fn test_search_degrades_when_service_down() {
    let fx = fixture();
    let cmd = with_option(
        incoming("search", None),
        "query",
        OptionValue::String("anything".to_string()),
    );
    let d = handle(Command::Search, &cmd, &fx.ctx()).await;
    assert!(
        d.reply.content.contains("schiefgelaufen"),
        "got: {}",
        d.reply.content
    );
}

#[tokio::test]
async fn test_sync_locales_requires_owner() {
    let fx = fixture();
    let d = handle(
        Command::SyncLocales,
        &incoming("sync-locales", None),
        &fx.ctx(),
    )
    .await;
    assert!(
        d.reply.content.contains("darfst"),
        "got: {}",
        d.reply.content
    );
    assert!(d.audit.is_none());
}

#[tokio::test]
async fn test_sync_locales_updates_sparse_file() {
    let mut fx = fixture();
    fx.config.discord.owner_ids = vec!["user-1".to_string()];

    let d = handle(
        Command::SyncLocales,
        &incoming("sync-locales", None),
        &fx.ctx(),
    )
    .await;
    assert!(
        d.reply.content.contains("1 aktualisiert"),
        "got: {}",
        d.reply.content
    );
    assert!(d.audit.is_some(), "sync should leave an audit line");
    assert!(d.exit.is_none());

    let fr = std::fs::read_to_string(fx.locales_dir.join("fr.json")).unwrap();
    assert!(fr.contains("\"ping\""), "missing keys should be merged in");
    assert!(fr.contains("Zut."), "existing translations must survive");
}

#[tokio::test]
async fn test_sync_locales_refuses_protected_language() {
    let mut fx = fixture();
    fx.config.discord.owner_ids = vec!["user-1".to_string()];

    let cmd = with_option(
        incoming("sync-locales", None),
        "language",
        OptionValue::String("de".to_string()),
    );
    let d = handle(Command::SyncLocales, &cmd, &fx.ctx()).await;
    assert!(
        d.reply.content.contains("von Hand gepflegt"),
        "got: {}",
        d.reply.content
    );
}

#[tokio::test]
async fn test_system_restart_owner_only() {
    let mut fx = fixture();

    let d = handle(
        Command::System,
        &incoming("system", Some("restart")),
        &fx.ctx(),
    )
    .await;
    assert!(d.exit.is_none(), "non-owner must not trigger an exit");

    fx.config.discord.owner_ids = vec!["user-1".to_string()];
    let d = handle(
        Command::System,
        &incoming("system", Some("restart")),
        &fx.ctx(),
    )
    .await;
    assert_eq!(d.exit, Some(ExitAction::Restart));
    assert!(
        d.reply.content.contains("Starte neu"),
        "got: {}",
        d.reply.content
    );

    let d = handle(
        Command::System,
        &incoming("system", Some("shutdown")),
        &fx.ctx(),
    )
    .await;
    assert_eq!(d.exit, Some(ExitAction::Shutdown));
}
