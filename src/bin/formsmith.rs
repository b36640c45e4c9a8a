//! formsmith: Infer form fields from a YAML configuration file
//!
//! Usage:
//!   # Read from file, print the field tree as JSON
//!   formsmith config.yaml
//!
//!   # Read from stdin
//!   cat config.yaml | formsmith --compact
//!
//!   # Print a plain-text outline of the form instead of JSON
//!   formsmith config.yaml --outline
//!
//!   # Load settings from a file, override one of them
//!   formsmith config.yaml --config formsmith.yaml --separator /

use anyhow::{Context, Result};
use clap::Parser;
use formsmith::{
    generate_fields, EmailDetection, FieldRenderer, FormConfig, NullPolicy, OutlineRenderer, Separator,
};
use std::fs;
use std::io::{stdin, stdout, Read, Write};

#[derive(Parser, Debug)]
#[command(name = "formsmith")]
#[command(about = "Infer form fields from YAML configuration", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Compact JSON output (no pretty-printing)
    #[arg(long, conflicts_with = "outline")]
    compact: bool,

    /// Print a text outline of the form instead of JSON
    #[arg(long)]
    outline: bool,

    /// YAML file with settings (separator, nulls, email)
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Single-character separator between key segments in field paths (default: ".")
    #[arg(long)]
    separator: Option<Separator>,

    /// How null values are represented (default: empty-group)
    #[arg(long, value_enum)]
    nulls: Option<NullPolicy>,

    /// Only classify full `local@domain.tld` addresses as email
    #[arg(long)]
    strict_email: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;

    let mut text = String::new();
    if let Some(file_path) = &args.input {
        text = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read input file: {}", file_path))?;
    } else {
        stdin().read_to_string(&mut text).context("Failed to read stdin")?;
    }

    let fields = generate_fields(&text, &config)?;
    tracing::info!(fields = fields.len(), "generated form");

    if fields.is_empty() {
        eprintln!("Warning: No fields found in input");
    }

    let stdout = stdout();
    let mut out = stdout.lock();

    if args.outline {
        let mut renderer = OutlineRenderer::new(&mut out);
        renderer.render(&fields).context("Failed to write outline")?;
    } else {
        let output = if args.compact {
            serde_json::to_string(&fields)?
        } else {
            serde_json::to_string_pretty(&fields)?
        };
        writeln!(out, "{}", output)?;
    }

    Ok(())
}

/// Settings file first, then command-line overrides
fn build_config(args: &Args) -> Result<FormConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_yaml::from_str(&raw)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => FormConfig::default(),
    };

    if let Some(sep) = args.separator {
        config.separator = sep;
    }
    if let Some(nulls) = args.nulls {
        config.nulls = nulls;
    }
    if args.strict_email {
        config.email = EmailDetection::Strict;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn config_for(argv: &[&str]) -> Result<FormConfig> {
        let args = Args::try_parse_from(argv)?;
        build_config(&args)
    }

    #[test]
    fn test_defaults_without_settings() {
        let config = config_for(&["formsmith"]).unwrap();

        assert_eq!(config.separator, Separator::default());
        assert_eq!(config.nulls, NullPolicy::EmptyGroup);
        assert_eq!(config.email, EmailDetection::Loose);
    }

    #[test]
    fn test_settings_file_is_applied() {
        let file = settings_file("separator: /\nnulls: skip\nemail: strict\n");
        let path = file.path().to_str().unwrap();

        let config = config_for(&["formsmith", "--config", path]).unwrap();

        assert_eq!(config.separator.as_char(), '/');
        assert_eq!(config.nulls, NullPolicy::Skip);
        assert_eq!(config.email, EmailDetection::Strict);
    }

    #[test]
    fn test_flags_override_settings_file() {
        let file = settings_file("separator: /\nnulls: skip\n");
        let path = file.path().to_str().unwrap();

        let config = config_for(&[
            "formsmith",
            "--config",
            path,
            "--separator",
            ":",
            "--nulls",
            "empty-text",
            "--strict-email",
        ])
        .unwrap();

        assert_eq!(config.separator.as_char(), ':');
        assert_eq!(config.nulls, NullPolicy::EmptyText);
        assert_eq!(config.email, EmailDetection::Strict);
    }

    #[test]
    fn test_invalid_separators_are_rejected() {
        assert!(config_for(&["formsmith", "--separator", "::"]).is_err());
        assert!(config_for(&["formsmith", "--separator", ""]).is_err());
        assert!(config_for(&["formsmith", "--separator", "\\"]).is_err());

        let file = settings_file("separator: \"::\"\n");
        let path = file.path().to_str().unwrap();
        let err = config_for(&["formsmith", "--config", path]).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_missing_settings_file() {
        let err = config_for(&["formsmith", "--config", "/nonexistent/formsmith.yaml"]).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
