//! Config command handler

use crate::args::ConfigSubcommand;
use course_return::config::Config;
use course_return::info;
use std::io::{self, BufRead, Write};

/// Dispatch config subcommands
///
/// # Errors
/// Returns a printable message when a key is unknown, a value is invalid, or
/// the config file cannot be written.
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
) -> Result<(), String> {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(&mut io::stdin().lock()),
    }
}

fn handle_config_get(config: &Config, key: Option<&str>) -> Result<(), String> {
    match key {
        Some(k) => {
            let value = config
                .get(k)
                .ok_or_else(|| format!("Unknown config key: '{k}'"))?;
            println!("{value}");
        }
        None => {
            println!("\n=== Configuration ===\n");
            print!("{config}");
        }
    }
    Ok(())
}

fn handle_config_set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    config.set(key, value)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    info!("Config key '{key}' set to '{value}'");
    println!("✓ Set {key} = {value}");
    Ok(())
}

fn handle_config_unset(config: &mut Config, defaults: &Config, key: &str) -> Result<(), String> {
    config.unset(key, defaults)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    info!("Config key '{key}' reset to default");
    println!("✓ Reset {key} to default");
    Ok(())
}

fn handle_config_reset(input: &mut impl BufRead) -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    input.read_line(&mut response).ok();

    if is_confirmation(&response) {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}

fn is_confirmation(response: &str) -> bool {
    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_accepts_y_and_yes_only() {
        assert!(is_confirmation("y\n"));
        assert!(is_confirmation(" YES "));
        assert!(!is_confirmation("n"));
        assert!(!is_confirmation(""));
        assert!(!is_confirmation("yep"));
    }

    #[test]
    fn unknown_key_is_an_error() {
        let config = Config::from_defaults();
        let err = handle_config_get(&config, Some("token")).unwrap_err();
        assert!(err.contains("Unknown config key"));
    }
}
