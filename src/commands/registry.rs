//! Slash command registry: the definitions pushed to Discord on deploy
//! and the per-command delivery flags.

use serde_json::{json, Value};

// Discord application command option types.
const SUB_COMMAND: u8 = 1;
const STRING: u8 = 3;
const INTEGER: u8 = 4;
const BOOLEAN: u8 = 5;

// Permission bit for Manage Server.
const MANAGE_GUILD: &str = "32";

/// Commands whose replies only the invoking user should see.
pub fn ephemeral_names() -> Vec<String> {
    ["achievements", "sync-locales", "system"]
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// The full command set, in Discord's bulk-overwrite wire shape.
pub fn definitions() -> Value {
    json!([
        {
            "name": "ping",
            "description": "Check that the bot is alive"
        },
        {
            "name": "about",
            "description": "What this bot does, with links"
        },
        {
            "name": "credits",
            "description": "Data sources and translators"
        },
        {
            "name": "language",
            "description": "Show or change the server language",
            "default_member_permissions": MANAGE_GUILD,
            "options": [
                {
                    "type": SUB_COMMAND,
                    "name": "show",
                    "description": "Show the current server language"
                },
                {
                    "type": SUB_COMMAND,
                    "name": "list",
                    "description": "List every available language"
                },
                {
                    "type": SUB_COMMAND,
                    "name": "set",
                    "description": "Change the server language",
                    "options": [
                        {
                            "type": STRING,
                            "name": "code",
                            "description": "Language code, e.g. fr",
                            "required": true
                        }
                    ]
                }
            ]
        },
        {
            "name": "search",
            "description": "Search Fortnite Festival jam tracks",
            "options": [
                {
                    "type": STRING,
                    "name": "query",
                    "description": "Song title or artist",
                    "required": true
                }
            ]
        },
        {
            "name": "achievements",
            "description": "Track your Festival achievements",
            "options": [
                {
                    "type": SUB_COMMAND,
                    "name": "list",
                    "description": "List achievements",
                    "options": [
                        {
                            "type": INTEGER,
                            "name": "page",
                            "description": "Page number",
                            "required": false,
                            "min_value": 1
                        },
                        {
                            "type": STRING,
                            "name": "view",
                            "description": "Which entries to show",
                            "required": false,
                            "choices": [
                                { "name": "Open", "value": "open" },
                                { "name": "All", "value": "all" }
                            ]
                        }
                    ]
                },
                {
                    "type": SUB_COMMAND,
                    "name": "done",
                    "description": "Mark an achievement as done",
                    "options": [
                        {
                            "type": STRING,
                            "name": "id",
                            "description": "Achievement id",
                            "required": true
                        }
                    ]
                },
                {
                    "type": SUB_COMMAND,
                    "name": "undo",
                    "description": "Reopen an achievement",
                    "options": [
                        {
                            "type": STRING,
                            "name": "id",
                            "description": "Achievement id",
                            "required": true
                        }
                    ]
                },
                {
                    "type": SUB_COMMAND,
                    "name": "progress",
                    "description": "Show your completion stats"
                },
                {
                    "type": SUB_COMMAND,
                    "name": "reset",
                    "description": "Clear all your progress"
                },
                {
                    "type": SUB_COMMAND,
                    "name": "help",
                    "description": "How tracking works, with every achievement id"
                }
            ]
        },
        {
            "name": "sync-locales",
            "description": "Merge new canonical keys into the locale files",
            "default_member_permissions": "0",
            "options": [
                {
                    "type": STRING,
                    "name": "language",
                    "description": "Only sync this language code",
                    "required": false
                },
                {
                    "type": BOOLEAN,
                    "name": "prune",
                    "description": "Drop keys missing from the canonical file",
                    "required": false
                },
                {
                    "type": BOOLEAN,
                    "name": "force",
                    "description": "Overwrite translated values with canonical text",
                    "required": false
                },
                {
                    "type": BOOLEAN,
                    "name": "dry-run",
                    "description": "Report changes without writing",
                    "required": false
                }
            ]
        },
        {
            "name": "system",
            "description": "Owner controls for the bot process",
            "default_member_permissions": "0",
            "options": [
                {
                    "type": SUB_COMMAND,
                    "name": "restart",
                    "description": "Restart the bot"
                },
                {
                    "type": SUB_COMMAND,
                    "name": "shutdown",
                    "description": "Shut the bot down"
                }
            ]
        }
    ])
}
