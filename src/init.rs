//! Init wizard: interactive setup for new installs with cliclack
//! styled prompts.

use encore_core::config;
use encore_locales::{bootstrap, DEFAULT_BOOTSTRAP_CODES};
use std::path::Path;

const LOGO: &str = r#"
    ███████╗███╗   ██╗ ██████╗ ██████╗ ██████╗ ███████╗
    ██╔════╝████╗  ██║██╔════╝██╔═══██╗██╔══██╗██╔════╝
    █████╗  ██╔██╗ ██║██║     ██║   ██║██████╔╝█████╗
    ██╔══╝  ██║╚██╗██║██║     ██║   ██║██╔══██╗██╔══╝
    ███████╗██║ ╚████║╚██████╗╚██████╔╝██║  ██║███████╗
    ╚══════╝╚═╝  ╚═══╝ ╚═════╝ ╚═════╝ ╚═╝  ╚═╝╚══════╝
"#;

/// Starter achievement definitions, written on first setup.
const STARTER_ACHIEVEMENTS: &str = r#"[
  { "id": "first_song" },
  { "id": "full_combo" },
  { "id": "flawless_solo" },
  { "id": "band_leader" },
  { "id": "setlist_master" }
]
"#;

/// Run the interactive init wizard.
pub fn run(config_path: &str) -> anyhow::Result<()> {
    println!("{LOGO}");
    cliclack::intro(console::style("encore init").bold().to_string())?;

    // 1. Discord application credentials.
    cliclack::note(
        "Discord application",
        "Create an application at https://discord.com/developers/applications\n\
         You need the bot token, the application ID, and the public key.",
    )?;

    let bot_token: String = cliclack::input("Bot token")
        .placeholder("Paste from the Bot page (or Enter to skip)")
        .required(false)
        .default_input("")
        .interact()?;

    let application_id: String = cliclack::input("Application ID")
        .placeholder("From General Information (or Enter to skip)")
        .required(false)
        .default_input("")
        .interact()?;

    let public_key: String = cliclack::input("Public key")
        .placeholder("Hex key for interaction signatures (or Enter to skip)")
        .required(false)
        .default_input("")
        .interact()?;

    // 2. Optional guild scoping and owner.
    let guild_id: String = cliclack::input("Development guild ID")
        .placeholder("Commands update instantly in this server (blank = global)")
        .required(false)
        .default_input("")
        .interact()?;

    let owner_id: String = cliclack::input("Your Discord user ID")
        .placeholder("Unlocks /system and /sync-locales (blank = nobody)")
        .required(false)
        .default_input("")
        .interact()?;

    // 3. Default language for new servers.
    let default_language: &str = cliclack::select("Default server language")
        .item("de", "German (Recommended)", "Hand-maintained translation")
        .item("en", "English", "The canonical key source")
        .interact()?;

    // 4. Interactions endpoint port.
    let port_str: String = cliclack::input("Interactions port")
        .default_input("8787")
        .validate(|input: &String| {
            if input.parse::<u16>().is_err() {
                return Err("Enter a port number");
            }
            Ok(())
        })
        .interact()?;
    let port: u16 = port_str.parse().unwrap_or(8787);

    // 5. Generate config.toml.
    if Path::new(config_path).exists() {
        cliclack::log::warning(format!(
            "{config_path} already exists — skipping.\nDelete it and run 'encore init' again to regenerate."
        ))?;
    } else {
        let content = generate_config(
            &bot_token,
            &application_id,
            &public_key,
            &guild_id,
            &owner_id,
            default_language,
            port,
        );
        std::fs::write(config_path, content)?;
        cliclack::log::success(format!("Generated {config_path}"))?;
    }

    // 6. Deploy the bundled locale files.
    config::install_bundled_locales("locales");
    cliclack::log::success("Locale files ready in locales/ (en, de)")?;

    let seed_all: bool = cliclack::confirm("Seed locale files for every supported language?")
        .initial_value(false)
        .interact()?;
    if seed_all {
        let report = bootstrap(Path::new("locales"), DEFAULT_BOOTSTRAP_CODES, false)?;
        cliclack::log::success(format!(
            "Seeded {} locale files ({} already existed)",
            report.created, report.skipped
        ))?;
    }

    // 7. Data directory with starter achievements.
    std::fs::create_dir_all("data")?;
    let achievements_path = Path::new("data/achievements.json");
    if achievements_path.exists() {
        cliclack::log::success("data/achievements.json — exists")?;
    } else {
        std::fs::write(achievements_path, STARTER_ACHIEVEMENTS)?;
        cliclack::log::success("data/achievements.json — created")?;
    }

    // 8. Next steps.
    cliclack::note(
        "Next steps",
        "1. Review config.toml\n\
         2. Run: encore deploy\n\
         3. Run: encore start\n\
         4. In the developer portal, set the Interactions Endpoint URL\n\
            to https://<your-host>/interactions",
    )?;

    cliclack::outro("Setup complete — enjoy Encore!")?;
    Ok(())
}

/// Generate config.toml content from wizard inputs (pure function for
/// testability).
pub fn generate_config(
    bot_token: &str,
    application_id: &str,
    public_key: &str,
    guild_id: &str,
    owner_id: &str,
    default_language: &str,
    port: u16,
) -> String {
    let owner_ids = if owner_id.is_empty() {
        "[]".to_string()
    } else {
        format!("[\"{owner_id}\"]")
    };

    format!(
        r#"[encore]
name = "Encore"
data_dir = "data"
log_level = "info"
# Uncomment for rolling daily log files instead of stdout:
# log_dir = "logs"

[discord]
bot_token = "{bot_token}"
application_id = "{application_id}"
public_key = "{public_key}"
guild_id = "{guild_id}"
owner_ids = {owner_ids}
# Channel that receives locale sync reports:
sync_log_channel_id = ""

[interactions]
host = "0.0.0.0"
port = {port}

[locales]
dir = "locales"
default_language = "{default_language}"

[tracks]
cache_ttl_mins = 15
fetch_timeout_secs = 12

[log_webhooks]
# Webhook URLs for mirrored log embeds; empty disables delivery.
default_url = ""

[links]
support_server = ""
contact = ""
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_core::config::Config;

    #[test]
    fn test_generate_config_full() {
        let content = generate_config(
            "token123",
            "app456",
            "abcdef",
            "guild789",
            "owner1",
            "de",
            9000,
        );
        assert!(content.contains("bot_token = \"token123\""));
        assert!(content.contains("application_id = \"app456\""));
        assert!(content.contains("public_key = \"abcdef\""));
        assert!(content.contains("guild_id = \"guild789\""));
        assert!(content.contains("owner_ids = [\"owner1\"]"));
        assert!(content.contains("port = 9000"));
        assert!(content.contains("default_language = \"de\""));
    }

    #[test]
    fn test_generate_config_minimal() {
        let content = generate_config("", "", "", "", "", "en", 8787);
        assert!(content.contains("bot_token = \"\""));
        assert!(content.contains("owner_ids = []"));
        assert!(content.contains("port = 8787"));
        assert!(content.contains("default_language = \"en\""));
    }

    #[test]
    fn test_generated_config_parses() {
        let content = generate_config("t", "a", "p", "g", "o", "de", 8787);
        let cfg: Config = toml::from_str(&content).unwrap();
        assert_eq!(cfg.discord.bot_token, "t");
        assert_eq!(cfg.discord.owner_ids, vec!["o".to_string()]);
        assert_eq!(cfg.interactions.port, 8787);
        assert_eq!(cfg.locales.default_language, "de");
        assert_eq!(cfg.encore.name, "Encore");
        // Omitted keys fall back to their defaults.
        assert!(cfg.tracks.data_url.contains("fnfestival"));
        assert!(!cfg.links.github.is_empty());
    }
}
