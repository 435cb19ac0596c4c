use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use serde::Deserialize;

use avx_core::provider::ResourceType;
use avx_core::resource::{Attributes, Resource, Value};
use avx_core::schema::{AttributeSchema, ResourceSchema};
use avx_provider::ProviderConfig;
use avx_provider::resources;

#[derive(Parser)]
#[command(name = "avx")]
#[command(about = "Offline tooling for the Aviatrix provider", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the schema of one type, or list every type
    Schema {
        /// Resource or data source type
        resource_type: Option<String>,
    },
    /// Validate resource configurations without contacting the controller
    Validate {
        /// Path to a JSON file with a "resources" list
        file: PathBuf,
    },
    /// Show the attributes encoded in an import identifier
    ParseId {
        resource_type: String,
        identifier: String,
    },
    /// Check provider settings from a file and the AVIATRIX_* environment
    Config {
        /// Path to a JSON settings file
        file: PathBuf,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

/// One entry of a configuration file
#[derive(Debug, Deserialize)]
struct ResourceEntry {
    #[serde(rename = "type")]
    resource_type: String,
    name: String,
    /// Data sources are read-only lookups
    #[serde(default)]
    data: bool,
    #[serde(default)]
    attributes: Attributes,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    resources: Vec<ResourceEntry>,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Schema { resource_type } => run_schema(resource_type.as_deref()),
        Commands::Validate { file } => run_validate(&file),
        Commands::ParseId {
            resource_type,
            identifier,
        } => run_parse_id(&resource_type, &identifier),
        Commands::Config { file } => run_config(&file),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "avx", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

// =============================================================================
// schema
// =============================================================================

fn run_schema(resource_type: Option<&str>) -> Result<(), String> {
    let types = resources::resource_types();

    let Some(name) = resource_type else {
        println!("{}", "Resources:".cyan().bold());
        for t in types.iter().filter(|t| !t.is_data_source()) {
            println!("  • {}", t.name());
        }
        println!("{}", "Data sources:".cyan().bold());
        for t in types.iter().filter(|t| t.is_data_source()) {
            println!("  • {}", t.name());
        }
        return Ok(());
    };

    let t = types
        .iter()
        .find(|t| t.name() == name)
        .ok_or_else(|| format!("Unknown resource type: {}", name))?;
    print_schema(t.as_ref());
    Ok(())
}

fn print_schema(t: &dyn ResourceType) {
    let schema = t.schema();
    let kind = if t.is_data_source() {
        "data source"
    } else {
        "resource"
    };
    println!("{} ({})", schema.resource_type.cyan().bold(), kind);
    if let Some(description) = &schema.description {
        println!("  {}", description);
    }
    println!();
    for attr in sorted_attributes(&schema) {
        println!("  {}: {}{}", attr.name.bold(), attr.attr_type, flags(attr));
        if let Some(default) = &attr.default {
            println!("      default: {}", format_value(default));
        }
        if let Some(description) = &attr.description {
            println!("      {}", description.dimmed());
        }
    }
}

fn sorted_attributes(schema: &ResourceSchema) -> Vec<&AttributeSchema> {
    let mut attrs: Vec<&AttributeSchema> = schema.attributes.values().collect();
    attrs.sort_by(|a, b| a.name.cmp(&b.name));
    attrs
}

fn flags(attr: &AttributeSchema) -> String {
    let mut flags = Vec::new();
    if attr.required {
        flags.push("required".to_string());
    } else if attr.computed && !attr.optional {
        flags.push("computed".to_string());
    } else {
        flags.push("optional".to_string());
        if attr.computed {
            flags.push("computed".to_string());
        }
    }
    if attr.force_new {
        flags.push("forces replacement".yellow().to_string());
    }
    if attr.sensitive {
        flags.push("sensitive".red().to_string());
    }
    if let Some(max) = attr.max_items {
        flags.push(format!("max {} items", max));
    }
    format!(" ({})", flags.join(", "))
}

// =============================================================================
// validate
// =============================================================================

fn load_resources(file: &Path) -> Result<Vec<Resource>, String> {
    let content = fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
    let config: ConfigFile = serde_json::from_str(&content)
        .map_err(|e| format!("Parse error in {}: {}", file.display(), e))?;

    Ok(config
        .resources
        .into_iter()
        .map(|entry| Resource {
            id: avx_core::resource::ResourceId::new(entry.resource_type, entry.name),
            attributes: entry.attributes,
            read_only: entry.data,
        })
        .collect())
}

/// Every error across all resources, one per line
fn validate_resources(resources: &[Resource]) -> Result<(), String> {
    let errors: Vec<String> = resources
        .iter()
        .filter_map(|resource| resources::validate(resource).err())
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("\n"))
    }
}

fn run_validate(file: &Path) -> Result<(), String> {
    let resources = load_resources(file)?;
    log::info!("loaded {} resources from {}", resources.len(), file.display());

    println!("{}", "Validating...".cyan());
    validate_resources(&resources)?;

    println!(
        "{}",
        format!("✓ {} resources validated successfully.", resources.len())
            .green()
            .bold()
    );
    for resource in &resources {
        println!("  • {}", resource.id);
    }
    Ok(())
}

// =============================================================================
// parse-id
// =============================================================================

fn parse_id(resource_type: &str, identifier: &str) -> Result<BTreeMap<String, Value>, String> {
    let handler = resources::find(resource_type)
        .ok_or_else(|| format!("Unknown resource type: {}", resource_type))?;
    let attrs = handler
        .parse_identifier(identifier)
        .map_err(|e| e.to_string())?;
    Ok(attrs.into_iter().collect())
}

fn run_parse_id(resource_type: &str, identifier: &str) -> Result<(), String> {
    let attrs = parse_id(resource_type, identifier)?;
    println!("{} {}", resource_type.cyan().bold(), identifier);
    if attrs.is_empty() {
        println!("  {}", "(no natural-key attributes)".dimmed());
    }
    for (key, value) in &attrs {
        println!("  {}: {}", key.bold(), format_value(value).green());
    }
    Ok(())
}

// =============================================================================
// config
// =============================================================================

fn run_config(file: &Path) -> Result<(), String> {
    let config = ProviderConfig::load(file).map_err(|e| e.to_string())?;
    config.validate().map_err(|e| e.to_string())?;

    println!("{}", "✓ Provider settings are complete.".green().bold());
    println!("  controller_ip: {}", config.controller_ip);
    println!("  username: {}", config.username);
    println!("  password: {}", "<redacted>".dimmed());
    println!("  verify_ssl_certificate: {}", config.verify_ssl_certificate);
    if let Some(ca) = &config.path_to_ca_certificate {
        println!("  path_to_ca_certificate: {}", ca.display());
    }
    Ok(())
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Int(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::List(items) => {
            let strs: Vec<_> = items.iter().map(format_value).collect();
            format!("[{}]", strs.join(", "))
        }
        Value::Map(map) => {
            let sorted: BTreeMap<_, _> = map.iter().collect();
            let strs: Vec<_> = sorted
                .iter()
                .map(|(k, v)| format!("{}: {}", k, format_value(v)))
                .collect();
            format!("{{{}}}", strs.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn loads_resources_and_data_sources() {
        let file = write_config(
            r#"{"resources": [
                {"type": "vpn_user", "name": "alice",
                 "attributes": {"gw_name": "gw1", "vpc_id": "vpc-1", "user_name": "alice"}},
                {"type": "network_domains", "name": "all", "data": true}
            ]}"#,
        );
        let resources = load_resources(file.path()).unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].id.to_string(), "vpn_user.alice");
        assert_eq!(resources[0].attributes["gw_name"], Value::from("gw1"));
        assert!(resources[1].is_data_source());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = write_config(r#"{"resources": "nope"}"#);
        let err = load_resources(file.path()).unwrap_err();
        assert!(err.starts_with("Parse error"));
    }

    #[test]
    fn validation_reports_every_failing_resource() {
        let resources = vec![
            Resource::new("aws_tgw_peering", "a").with_attribute("tgw_name1", "tgw1"),
            Resource::new("controller_bgp_max_as_limit_config", "limits"),
            Resource::new("aws_tgw_peering", "ok")
                .with_attribute("tgw_name1", "tgw1")
                .with_attribute("tgw_name2", "tgw2"),
        ];
        let err = validate_resources(&resources).unwrap_err();
        let lines: Vec<&str> = err.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("aws_tgw_peering.a"));
        assert!(lines[1].contains("controller_bgp_max_as_limit_config.limits"));
    }

    #[test]
    fn parse_id_splits_composite_identifiers() {
        let attrs = parse_id("aws_tgw_peering", "tgw1~tgw2").unwrap();
        assert_eq!(attrs["tgw_name1"], Value::from("tgw1"));
        assert_eq!(attrs["tgw_name2"], Value::from("tgw2"));

        assert!(parse_id("aws_tgw_peering", "tgw1").is_err());
        assert!(parse_id("aviatrix_unicorn", "x").is_err());
    }

    #[test]
    fn format_value_sorts_map_keys() {
        let value = Value::Map(
            [
                ("b".to_string(), Value::Int(2)),
                ("a".to_string(), Value::Bool(true)),
            ]
            .into_iter()
            .collect(),
        );
        assert_eq!(format_value(&value), "{a: true, b: 2}");
    }

    #[test]
    fn sensitive_attributes_are_flagged() {
        colored::control::set_override(false);
        let schema = resources::find("copilot_simple_deployment").unwrap().schema();
        let attr = &schema.attributes["controller_service_account_password"];
        assert!(flags(attr).contains("sensitive"));
        assert!(flags(attr).contains("forces replacement"));
    }
}
