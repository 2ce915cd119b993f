//! Config command handler

use crate::args::ConfigSubcommand;
use gradex::config::Config;
use std::io::{self, BufRead, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    let result = match subcommand {
        None => {
            handle_config_get(config, None);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key }) => {
            handle_config_get(config, key);
            Ok(())
        }
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => {
            let stdin = io::stdin();
            handle_config_reset(&mut stdin.lock(), &mut io::stdout())
        }
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Handle the config get subcommand
pub fn handle_config_get(config: &Config, key: Option<String>) {
    if let Some(k) = key {
        match config.get(&k) {
            Some(value) => println!("{value}"),
            None => eprintln!("Unknown config key: '{k}'"),
        }
    } else {
        println!("\n=== Configuration ===\n");
        print!("{config}");
    }
}

/// Handle the config set subcommand
pub fn handle_config_set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    config.set(key, value)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    println!("✓ Set {key} = {value}");
    Ok(())
}

/// Handle the config unset subcommand
pub fn handle_config_unset(config: &mut Config, defaults: &Config, key: &str) -> Result<(), String> {
    config.unset(key, defaults)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    println!("✓ Reset {key} to default");
    Ok(())
}

/// Whether a confirmation answer means yes
fn confirmed(response: &str) -> bool {
    let answer = response.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Handle the config reset subcommand, asking for confirmation on `input`
pub fn handle_config_reset<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        writeln!(out, "✓ Config is already at defaults").map_err(|e| e.to_string())?;
        return Ok(());
    }

    write!(out, "Are you sure you want to reset config to defaults? (y/n): ")
        .and_then(|()| out.flush())
        .map_err(|e| e.to_string())?;

    let mut response = String::new();
    input.read_line(&mut response).map_err(|e| e.to_string())?;

    if confirmed(&response) {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        writeln!(out, "✓ Config reset to defaults").map_err(|e| e.to_string())?;
    } else {
        writeln!(out, "✗ Reset cancelled").map_err(|e| e.to_string())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_answers() {
        assert!(confirmed("y\n"));
        assert!(confirmed(" YES "));
        assert!(!confirmed("n"));
        assert!(!confirmed(""));
    }
}
