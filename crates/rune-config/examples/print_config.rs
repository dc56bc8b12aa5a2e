/// Print the effective transition configuration
///
/// Run with: cargo run -p rune-config --example print_config

fn main() {
    let config = rune_config::RuneConfig::load();

    println!("=== Rune Transitions Configuration ===\n");

    println!("Transitions:");
    println!("  Enabled: {}", config.transitions.enabled);
    println!("  External Locator: {}", config.transitions.external_locator);
    println!("  Turnstile Duration: {} ms", config.transitions.turnstile.duration_ms);
    println!(
        "  Turnstile Easing: {} (exponent {})",
        config.transitions.turnstile.easing, config.transitions.turnstile.exponent
    );
    println!();

    println!("Logging:");
    println!("  Filter: {}", config.logging.filter);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
