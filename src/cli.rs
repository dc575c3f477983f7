use clap::{Args as ClapArgs, Parser, Subcommand};
use compliance_inspect::application::dto::OutputFormat;
use std::path::PathBuf;

/// Inspect compliance-operator results
#[derive(Parser, Debug)]
#[command(name = "compliance-inspect")]
#[command(version)]
#[command(
    about = "Inspect compliance-operator results",
    long_about = "Resolves a ComplianceCheckResult back to the Rule that produced it by walking \
                  result -> scan -> suite -> binding -> profile -> rule."
)]
pub struct Args {
    /// Namespace holding the compliance objects
    /// (defaults to the context namespace, then "default")
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    /// Path to the kubeconfig file
    #[arg(long, global = true, value_name = "FILE")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use instead of current-context
    #[arg(long, global = true, value_name = "NAME")]
    pub context: Option<String>,

    /// Read objects from a directory of YAML/JSON manifests instead of a cluster
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        conflicts_with_all = ["kubeconfig", "context"]
    )]
    pub from_dir: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the rule, controls, fixes and remediation behind a check result
    ViewResult(ViewResultArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ViewResultArgs {
    /// Name of the ComplianceCheckResult
    pub result: String,

    /// Output format: table or json
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Fail when more than one bound profile matches the scan
    #[arg(long)]
    pub strict: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
