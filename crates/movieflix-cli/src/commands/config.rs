use crate::context::AppContext;
use crate::output::{new_table, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color};
use movieflix_config::{Config, SearchProviderKind};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Values accepted by `movieflix config set`; `None` leaves a setting unchanged
#[derive(Debug, Default)]
pub struct ConfigUpdate {
    pub api_base_url: Option<String>,
    pub top_k: Option<u32>,
    pub search_provider: Option<String>,
    pub tmdb_base_url: Option<String>,
    pub tmdb_api_key: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.api_base_url.is_none()
            && self.top_k.is_none()
            && self.search_provider.is_none()
            && self.tmdb_base_url.is_none()
            && self.tmdb_api_key.is_none()
            && self.log_file.is_none()
    }

    /// Apply the config-file part; the TMDB key is a credential and handled separately
    fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(url) = &self.api_base_url {
            config.api.base_url = url.trim().to_string();
        }
        if let Some(top_k) = self.top_k {
            config.recommendations.top_k = top_k;
        }
        if let Some(provider) = &self.search_provider {
            config.search.provider = parse_provider(provider)?;
        }
        if let Some(url) = &self.tmdb_base_url {
            config.tmdb.base_url = url.trim().to_string();
        }
        if let Some(path) = &self.log_file {
            config.logging.file = if path.as_os_str().is_empty() { None } else { Some(path.clone()) };
        }
        Ok(())
    }

    fn touches_config(&self) -> bool {
        self.api_base_url.is_some()
            || self.top_k.is_some()
            || self.search_provider.is_some()
            || self.tmdb_base_url.is_some()
            || self.log_file.is_some()
    }
}

pub fn parse_provider(s: &str) -> Result<SearchProviderKind> {
    match s.trim().to_lowercase().as_str() {
        "backend" => Ok(SearchProviderKind::Backend),
        "tmdb" => Ok(SearchProviderKind::Tmdb),
        other => Err(eyre!("Invalid search provider '{}'. Use 'backend' or 'tmdb'", other)),
    }
}

fn provider_name(kind: SearchProviderKind) -> &'static str {
    match kind {
        SearchProviderKind::Backend => "backend",
        SearchProviderKind::Tmdb => "tmdb",
    }
}

pub fn show_config(ctx: &AppContext, full: bool, output: &Output) -> Result<()> {
    let config_file = ctx.paths.config_file();
    let config = &ctx.config;
    let store = ctx.credentials()?;

    let reveal = |value: Option<String>| match value {
        Some(v) if full => v,
        Some(v) => mask_string(&v),
        None => "<not set>".to_string(),
    };
    let token = reveal(store.get_token().cloned());
    let tmdb_key = reveal(store.get_tmdb_api_key());
    let username = store.get_username().cloned();
    let selected = store.get_selected_user_id();
    drop(store);

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file,
            "config_file_exists": config_file.exists(),
            "credentials_file": ctx.paths.credentials_file(),
            "api": { "base_url": config.api.base_url },
            "recommendations": { "top_k": config.recommendations.top_k },
            "search": { "provider": provider_name(config.search.provider) },
            "tmdb": { "base_url": config.tmdb.base_url, "api_key": tmdb_key },
            "logging": { "file": config.logging.file },
            "session": { "token": token, "username": username, "selected_user_id": selected },
        }));
        return Ok(());
    }

    output.heading("Configuration");
    if !config_file.exists() {
        output.warn(format!(
            "No configuration file at {}, showing defaults",
            config_file.display()
        ));
    }

    let mut files = new_table();
    files.set_header(vec![
        Cell::new("Config File").add_attribute(Attribute::Bold),
        Cell::new(config_file.display().to_string()),
    ]);
    files.add_row(vec![
        Cell::new("Credentials File").add_attribute(Attribute::Bold),
        Cell::new(ctx.paths.credentials_file().display().to_string()),
    ]);
    output.table(&files);

    let mut settings = new_table();
    settings.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stderr>".to_string());
    for (key, value) in [
        ("api.base_url", config.api.base_url.clone()),
        ("recommendations.top_k", config.recommendations.top_k.to_string()),
        ("search.provider", provider_name(config.search.provider).to_string()),
        ("tmdb.base_url", config.tmdb.base_url.clone()),
        ("tmdb api key", tmdb_key),
        ("logging.file", log_file),
    ] {
        settings.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    output.table(&settings);

    let mut session = new_table();
    session.set_header(vec![
        Cell::new("Session").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    session.add_row(vec![Cell::new("token"), Cell::new(token)]);
    session.add_row(vec![
        Cell::new("username"),
        Cell::new(username.unwrap_or_else(|| "<not signed in>".to_string())),
    ]);
    session.add_row(vec![
        Cell::new("selected profile"),
        Cell::new(selected.map(|id| id.to_string()).unwrap_or_else(|| "<none>".to_string())),
    ]);
    output.table(&session);

    if !full {
        output.println(format!("{}", "Secrets are masked; use --full to reveal them".dimmed()));
    }
    Ok(())
}

pub fn set_config(ctx: &AppContext, update: ConfigUpdate, output: &Output) -> Result<()> {
    if update.is_empty() {
        output.warn("Nothing to change. See `movieflix config set --help` for the available settings");
        return Ok(());
    }

    let mut update = update;
    if update.log_file.as_deref() == Some(Path::new("default")) {
        update.log_file = Some(ctx.paths.default_log_file());
    }

    if update.touches_config() {
        let config_file = ctx.paths.config_file();
        let mut config = ctx.config.clone();
        update.apply(&mut config)?;
        ctx.paths
            .ensure_directories()
            .map_err(|e| eyre!("Failed to create {}: {}", ctx.paths.config_dir().display(), e))?;
        config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;
        config
            .save_to_file(&config_file)
            .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
        output.success(format!("Configuration saved to {}", config_file.display()));
    }

    if let Some(key) = &update.tmdb_api_key {
        let key = key.trim().to_string();
        if key.is_empty() {
            return Err(eyre!("TMDB API key cannot be empty"));
        }
        ctx.update_credentials(|store| store.set_tmdb_api_key(key))?;
        output.success("TMDB API key stored in the credential store");
    }
    Ok(())
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return "<not set>".to_string();
    }
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
