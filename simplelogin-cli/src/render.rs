// simplelogin-cli/src/render.rs
//! Table and text views of API objects.

use crate::output::{Formattable, Meta, Response};
use chrono::DateTime;
use comfy_table::{presets, ContentArrangement, Table};
use serde::Serialize;
use simplelogin_client::{Alias, Domain, Mailbox, MailboxRef, TrashedAlias, UserSettings, UserStats};

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn check(flag: bool) -> &'static str {
    if flag {
        "✓"
    } else {
        "✗"
    }
}

pub fn timestamp(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

fn mailbox_emails(mailboxes: &[MailboxRef]) -> String {
    mailboxes
        .iter()
        .map(|m| m.email.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn json_list<T: Serialize>(items: &[T], meta: Meta) -> serde_json::Result<String> {
    serde_json::to_string(&Response::ok_with_meta(items, meta))
}

pub struct AliasList<'a> {
    pub aliases: &'a [Alias],
    pub pages: Option<u32>,
}

impl Formattable for AliasList<'_> {
    fn to_json(&self) -> serde_json::Result<String> {
        json_list(
            self.aliases,
            Meta {
                pages: self.pages,
                count: Some(self.aliases.len()),
            },
        )
    }

    fn to_human(&self) -> String {
        if self.aliases.is_empty() {
            return "No aliases found.".to_string();
        }
        let mut t = table(vec!["ID", "Email", "Enabled", "Pinned", "Note", "Fwd", "Rep", "Blk"]);
        for alias in self.aliases {
            t.add_row(vec![
                alias.id.to_string(),
                alias.email.clone(),
                check(alias.enabled).to_string(),
                if alias.pinned { "✓" } else { "" }.to_string(),
                alias.note.clone().unwrap_or_default(),
                alias.nb_forward.to_string(),
                alias.nb_reply.to_string(),
                alias.nb_block.to_string(),
            ]);
        }
        t.to_string()
    }
}

pub struct AliasDetail<'a>(pub &'a Alias);

impl Formattable for AliasDetail<'_> {
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&Response::ok(self.0))
    }

    fn to_human(&self) -> String {
        let alias = self.0;
        let mut t = table(vec!["Field", "Value"]);
        t.add_row(vec!["ID".to_string(), alias.id.to_string()]);
        t.add_row(vec!["Email".to_string(), alias.email.clone()]);
        t.add_row(vec!["Name".to_string(), alias.name.clone().unwrap_or_default()]);
        t.add_row(vec!["Enabled".to_string(), check(alias.enabled).to_string()]);
        t.add_row(vec!["Pinned".to_string(), check(alias.pinned).to_string()]);
        t.add_row(vec!["Note".to_string(), alias.note.clone().unwrap_or_default()]);
        t.add_row(vec!["Mailboxes".to_string(), mailbox_emails(&alias.mailboxes)]);
        t.add_row(vec![
            "Forwarded / Replied / Blocked".to_string(),
            format!("{} / {} / {}", alias.nb_forward, alias.nb_reply, alias.nb_block),
        ]);
        t.add_row(vec!["Created".to_string(), timestamp(alias.creation_timestamp)]);
        if let Some(activity) = &alias.latest_activity {
            t.add_row(vec![
                "Latest activity".to_string(),
                format!("{} at {}", activity.action, timestamp(activity.timestamp)),
            ]);
        }
        t.to_string()
    }
}

pub struct DomainList<'a>(pub &'a [Domain]);

impl Formattable for DomainList<'_> {
    fn to_json(&self) -> serde_json::Result<String> {
        json_list(
            self.0,
            Meta {
                count: Some(self.0.len()),
                ..Default::default()
            },
        )
    }

    fn to_human(&self) -> String {
        if self.0.is_empty() {
            return "No custom domains found.".to_string();
        }
        let mut t = table(vec!["ID", "Domain", "Verified", "Catch-all", "Random prefix", "Aliases"]);
        for domain in self.0 {
            t.add_row(vec![
                domain.id.to_string(),
                domain.domain_name.clone(),
                check(domain.is_verified).to_string(),
                check(domain.catch_all).to_string(),
                check(domain.random_prefix_generation).to_string(),
                domain.nb_alias.to_string(),
            ]);
        }
        t.to_string()
    }
}

pub struct DomainDetail<'a>(pub &'a Domain);

impl Formattable for DomainDetail<'_> {
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&Response::ok(self.0))
    }

    fn to_human(&self) -> String {
        let domain = self.0;
        let mut t = table(vec!["Field", "Value"]);
        t.add_row(vec!["ID".to_string(), domain.id.to_string()]);
        t.add_row(vec!["Domain".to_string(), domain.domain_name.clone()]);
        t.add_row(vec!["Display name".to_string(), domain.name.clone().unwrap_or_default()]);
        t.add_row(vec!["Verified".to_string(), check(domain.is_verified).to_string()]);
        t.add_row(vec!["Catch-all".to_string(), check(domain.catch_all).to_string()]);
        t.add_row(vec![
            "Random prefix".to_string(),
            check(domain.random_prefix_generation).to_string(),
        ]);
        t.add_row(vec!["Mailboxes".to_string(), mailbox_emails(&domain.mailboxes)]);
        t.add_row(vec!["Aliases".to_string(), domain.nb_alias.to_string()]);
        t.add_row(vec!["Created".to_string(), timestamp(domain.creation_timestamp)]);
        t.to_string()
    }
}

pub struct TrashList<'a>(pub &'a [TrashedAlias]);

impl Formattable for TrashList<'_> {
    fn to_json(&self) -> serde_json::Result<String> {
        json_list(
            self.0,
            Meta {
                count: Some(self.0.len()),
                ..Default::default()
            },
        )
    }

    fn to_human(&self) -> String {
        if self.0.is_empty() {
            return "Trash is empty.".to_string();
        }
        let mut t = table(vec!["Alias", "Deleted"]);
        for entry in self.0 {
            t.add_row(vec![entry.alias.clone(), timestamp(entry.deletion_timestamp)]);
        }
        t.to_string()
    }
}

pub struct MailboxList<'a>(pub &'a [Mailbox]);

impl Formattable for MailboxList<'_> {
    fn to_json(&self) -> serde_json::Result<String> {
        json_list(
            self.0,
            Meta {
                count: Some(self.0.len()),
                ..Default::default()
            },
        )
    }

    fn to_human(&self) -> String {
        if self.0.is_empty() {
            return "No mailboxes found.".to_string();
        }
        let mut t = table(vec!["ID", "Email", "Default", "Verified", "Aliases", "Created"]);
        for mailbox in self.0 {
            t.add_row(vec![
                mailbox.id.to_string(),
                mailbox.email.clone(),
                if mailbox.default { "✓" } else { "" }.to_string(),
                check(mailbox.verified).to_string(),
                mailbox.nb_alias.to_string(),
                timestamp(mailbox.creation_timestamp),
            ]);
        }
        t.to_string()
    }
}

pub struct StatsView<'a>(pub &'a UserStats);

impl Formattable for StatsView<'_> {
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&Response::ok(self.0))
    }

    fn to_human(&self) -> String {
        let stats = self.0;
        let mut t = table(vec!["Stat", "Count"]);
        t.add_row(vec!["Aliases".to_string(), stats.nb_alias.to_string()]);
        t.add_row(vec!["Forwarded".to_string(), stats.nb_forward.to_string()]);
        t.add_row(vec!["Replied".to_string(), stats.nb_reply.to_string()]);
        t.add_row(vec!["Blocked".to_string(), stats.nb_block.to_string()]);
        t.to_string()
    }
}

pub struct SettingsView<'a>(pub &'a UserSettings);

impl Formattable for SettingsView<'_> {
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&Response::ok(self.0))
    }

    fn to_human(&self) -> String {
        let settings = self.0;
        let mut t = table(vec!["Setting", "Value"]);
        t.add_row(vec!["Alias generator".to_string(), settings.alias_generator.clone()]);
        t.add_row(vec!["Notifications".to_string(), check(settings.notification).to_string()]);
        t.add_row(vec![
            "Default random alias domain".to_string(),
            settings.random_alias_default_domain.clone().unwrap_or_default(),
        ]);
        t.add_row(vec![
            "Sender format".to_string(),
            settings.sender_format.clone().unwrap_or_default(),
        ]);
        t.add_row(vec![
            "Random alias suffix".to_string(),
            settings.random_alias_suffix.clone().unwrap_or_default(),
        ]);
        t.to_string()
    }
}

/// Where the API key comes from and which overrides are active
#[derive(Debug, Serialize)]
pub struct ConfigView {
    /// Masked key
    pub api_key: Option<String>,
    pub source: Option<&'static str>,
    pub config_path: String,
    pub account_email: Option<String>,
    pub api_key_env: bool,
    pub config_env: Option<String>,
    pub xdg_config_home: Option<String>,
    pub api_url: String,
}

impl Formattable for ConfigView {
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&Response::ok(self))
    }

    fn to_human(&self) -> String {
        let unset = || "(not set)".to_string();
        let mut t = table(vec!["Setting", "Value"]);
        t.add_row(vec![
            "API key".to_string(),
            self.api_key.clone().unwrap_or_else(|| "(none)".to_string()),
        ]);
        t.add_row(vec![
            "Key source".to_string(),
            self.source.unwrap_or("-").to_string(),
        ]);
        t.add_row(vec!["Config file".to_string(), self.config_path.clone()]);
        t.add_row(vec!["API URL".to_string(), self.api_url.clone()]);
        t.add_row(vec![
            "SIMPLELOGIN_EMAIL".to_string(),
            self.account_email.clone().unwrap_or_else(unset),
        ]);
        t.add_row(vec![
            "SIMPLELOGIN_API_KEY".to_string(),
            if self.api_key_env { "set" } else { "(not set)" }.to_string(),
        ]);
        t.add_row(vec![
            "SIMPLELOGIN_CONFIG".to_string(),
            self.config_env.clone().unwrap_or_else(unset),
        ]);
        t.add_row(vec![
            "XDG_CONFIG_HOME".to_string(),
            self.xdg_config_home.clone().unwrap_or_else(unset),
        ]);
        t.to_string()
    }
}

/// A one-line outcome plus the data behind it
pub struct Message {
    pub text: String,
    pub data: serde_json::Value,
}

impl Message {
    pub fn new(text: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            text: text.into(),
            data,
        }
    }
}

impl Formattable for Message {
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&Response::ok(&self.data))
    }

    fn to_human(&self) -> String {
        format!("{} {}", console::style("✓").green(), self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn alias(id: u64, enabled: bool, note: Option<&str>) -> Alias {
        serde_json::from_value(json!({
            "id": id,
            "email": format!("a{}@sl.co", id),
            "enabled": enabled,
            "pinned": id == 1,
            "note": note,
            "creation_timestamp": 0,
        }))
        .unwrap()
    }

    #[test]
    fn test_timestamp() {
        assert_eq!(timestamp(0), "1970-01-01 00:00");
        assert_eq!(timestamp(1_700_000_000), "2023-11-14 22:13");
    }

    #[test]
    fn test_alias_list_human() {
        let aliases = vec![alias(1, true, Some("bank")), alias(2, false, None)];
        let out = AliasList {
            aliases: &aliases,
            pages: None,
        }
        .to_human();

        assert!(out.contains("a1@sl.co"));
        assert!(out.contains("bank"));
        assert!(out.contains("✗"));
    }

    #[test]
    fn test_empty_alias_list() {
        let out = AliasList {
            aliases: &[],
            pages: Some(1),
        }
        .to_human();
        assert_eq!(out, "No aliases found.");
    }

    #[test]
    fn test_alias_list_json_envelope() {
        let aliases = vec![alias(3, true, None)];
        let out = AliasList {
            aliases: &aliases,
            pages: Some(2),
        }
        .to_json()
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["ok"], true);
        assert_eq!(value["result"][0]["id"], 3);
        assert_eq!(value["meta"]["pages"], 2);
        assert_eq!(value["meta"]["count"], 1);
    }

    #[test]
    fn test_message_json_is_data() {
        let msg = Message::new("Alias 4 disabled", json!({"id": 4, "enabled": false}));
        let value: serde_json::Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({"ok": true, "result": {"id": 4, "enabled": false}}));
        assert!(msg.to_human().contains("Alias 4 disabled"));
    }

    #[test]
    fn test_config_view_never_shows_env_key() {
        let view = ConfigView {
            api_key: Some("abcd****wxyz".to_string()),
            source: Some("environment"),
            config_path: "/home/me/.config/simplelogin/config.yaml".to_string(),
            account_email: None,
            api_key_env: true,
            config_env: None,
            xdg_config_home: None,
            api_url: "https://app.simplelogin.io".to_string(),
        };
        let out = view.to_human();
        assert!(out.contains("abcd****wxyz"));
        assert!(out.contains("environment"));
        assert!(out.contains("(not set)"));

        let value: serde_json::Value = serde_json::from_str(&view.to_json().unwrap()).unwrap();
        assert_eq!(value["result"]["source"], "environment");
        assert_eq!(value["result"]["api_key_env"], true);
    }
}
