//! Config subcommand handlers

use std::str::FromStr;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, QuietHours};

use super::app::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Dispatch a `config` action against the given store.
pub async fn handle_config_command(
    action: ConfigAction,
    store: &dyn ConfigStore,
    presenter: &Presenter,
) -> u8 {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, &key, &value, presenter).await,
        ConfigAction::Get { key } => handle_get(store, &key, presenter).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => {
            presenter.output(&store.path().display().to_string());
            EXIT_SUCCESS
        }
    }
}

async fn handle_init(store: &dyn ConfigStore, presenter: &Presenter) -> u8 {
    match store.init().await {
        Ok(()) => {
            presenter.success(&format!("Created config at {}", store.path().display()));
            EXIT_SUCCESS
        }
        Err(e) => {
            presenter.error(&e.to_string());
            EXIT_ERROR
        }
    }
}

async fn handle_set(
    store: &dyn ConfigStore,
    key: &str,
    value: &str,
    presenter: &Presenter,
) -> u8 {
    if !is_valid_config_key(key) {
        presenter.error(&format!(
            "Unknown config key '{}'. Valid keys: {}",
            key,
            VALID_CONFIG_KEYS.join(", ")
        ));
        return EXIT_USAGE_ERROR;
    }

    if key == "quiet_hours" {
        if let Err(e) = QuietHours::from_str(value) {
            presenter.error(&e.to_string());
            return EXIT_USAGE_ERROR;
        }
    }

    let mut config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&e.to_string());
            return EXIT_ERROR;
        }
    };

    set_field(&mut config, key, value.to_string());

    match store.save(&config).await {
        Ok(()) => {
            presenter.success(&format!("Set {} = {}", key, value));
            EXIT_SUCCESS
        }
        Err(e) => {
            presenter.error(&e.to_string());
            EXIT_ERROR
        }
    }
}

async fn handle_get(store: &dyn ConfigStore, key: &str, presenter: &Presenter) -> u8 {
    if !is_valid_config_key(key) {
        presenter.error(&format!(
            "Unknown config key '{}'. Valid keys: {}",
            key,
            VALID_CONFIG_KEYS.join(", ")
        ));
        return EXIT_USAGE_ERROR;
    }

    let config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&e.to_string());
            return EXIT_ERROR;
        }
    };

    match get_field(&config, key) {
        Some(value) => presenter.output(&value),
        None => presenter.output("(not set)"),
    }
    EXIT_SUCCESS
}

async fn handle_list(store: &dyn ConfigStore, presenter: &Presenter) -> u8 {
    let config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&e.to_string());
            return EXIT_ERROR;
        }
    };

    for key in VALID_CONFIG_KEYS {
        let value = get_field(&config, key).unwrap_or_else(|| "(not set)".to_string());
        presenter.key_value(key, &value);
    }
    EXIT_SUCCESS
}

fn set_field(config: &mut AppConfig, key: &str, value: String) {
    match key {
        "chime_wav" => config.chime_wav = Some(value),
        "pop_wav" => config.pop_wav = Some(value),
        "player" => config.player = Some(value),
        "quiet_hours" => config.quiet_hours = Some(value),
        _ => {}
    }
}

fn get_field(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "chime_wav" => config.chime_wav.clone(),
        "pop_wav" => config.pop_wav.clone(),
        "player" => config.player.clone(),
        "quiet_hours" => config.quiet_hours.clone(),
        _ => None,
    }
}
