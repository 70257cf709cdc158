use clap::Parser;
use std::collections::HashMap;
use std::time::Duration;

use kplookup_resolver::{Invoker, Lookup, VariableKeys};

#[derive(Parser)]
#[command(name = "kplookup")]
#[command(about = "Fetch a KeePass entry attribute through keepassxc-cli", long_about = None)]
#[command(version)]
struct Cli {
    /// Lookup terms: the entry identifier, the attribute name, and for
    /// `custom_properties` the custom property key
    #[arg(required = true, num_args = 1..=3)]
    terms: Vec<String>,

    /// Configuration variable as KEY=VALUE (repeatable),
    /// e.g. --var keepass_dbx=~/vault.kdbx --var keepassxc_pwd=...
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    vars: Vec<(String, String)>,

    /// Variable key table: "short" reads keepass_dbx/keepass_key,
    /// "long" reads keepassxc_kdbx_path/keepassxc_key_file
    #[arg(long, default_value = "short", value_parser = ["short", "long"])]
    keys: String,

    /// Abort the keepassxc-cli call after this many seconds
    #[arg(long, value_name = "SECONDS")]
    timeout_secs: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace); logs go to stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    // Logs go to stderr; stdout carries only the looked-up value.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let keys = match cli.keys.as_str() {
        "long" => VariableKeys::long(),
        _ => VariableKeys::short(),
    };
    tracing::debug!(keys = %cli.keys, terms = cli.terms.len(), "starting lookup");

    let mut invoker = Invoker::new();
    if let Some(secs) = cli.timeout_secs {
        invoker = invoker.with_timeout(Duration::from_secs(secs));
    }

    let variables: HashMap<String, String> = cli.vars.into_iter().collect();
    let value = Lookup::with_keys(keys)
        .with_invoker(invoker)
        .run(&cli.terms, &variables)
        .await?;

    println!("{value}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn key_value_pairs_parse() {
        assert_eq!(
            parse_key_value("keepass_dbx=~/vault.kdbx").unwrap(),
            ("keepass_dbx".to_string(), "~/vault.kdbx".to_string())
        );
        // Values may themselves contain '='.
        assert_eq!(
            parse_key_value("keepassxc_pwd=a=b").unwrap(),
            ("keepassxc_pwd".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("no-separator").is_err());
    }

    #[test]
    fn terms_and_vars_are_collected() {
        let cli = Cli::parse_from([
            "kplookup",
            "WebServer",
            "custom_properties",
            "api_token",
            "--var",
            "keepass_dbx=/vault/db.kdbx",
            "--var",
            "keepassxc_pwd=pw",
        ]);
        assert_eq!(cli.terms, ["WebServer", "custom_properties", "api_token"]);
        assert_eq!(cli.vars.len(), 2);
        assert_eq!(cli.keys, "short");
        assert!(cli.timeout_secs.is_none());
    }
}
