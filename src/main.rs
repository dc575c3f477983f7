mod cli;

use cli::{Args, Command, ViewResultArgs};
use compliance_inspect::adapters::outbound::console::{
    SilentProgressReporter, StderrProgressReporter,
};
use compliance_inspect::adapters::outbound::filesystem::ManifestObjectStore;
use compliance_inspect::adapters::outbound::network::KubeApiObjectStore;
use compliance_inspect::application::dto::{ViewResultRequest, ViewResultResponse};
use compliance_inspect::application::factories::{FormatterFactory, PresenterFactory};
use compliance_inspect::application::read_models::ResultViewBuilder;
use compliance_inspect::application::use_cases::ViewResultUseCase;
use compliance_inspect::config::{kubeconfig_path, load_kubeconfig, resolve_namespace};
use compliance_inspect::lineage::services::MatchPolicy;
use compliance_inspect::ports::outbound::{ObjectStore, ProgressReporter};
use compliance_inspect::shared::error::ExitCode;
use compliance_inspect::shared::Result;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        let colored = std::io::stderr().is_terminal();
        let header = "❌ An error occurred:";
        if colored {
            eprintln!("\n{}\n", header.red().bold());
        } else {
            eprintln!("\n{}\n", header);
        }
        eprintln!("{}", e);

        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

/// `RUST_LOG` wins unless `--verbose` asks for debug output
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("compliance_inspect=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: Args) -> Result<()> {
    let (store, namespace) = connect(&args)?;

    match args.command {
        Command::ViewResult(view_args) => {
            let policy = if view_args.strict {
                MatchPolicy::Strict
            } else {
                MatchPolicy::FirstMatch
            };
            let request = ViewResultRequest::new(view_args.result.clone(), namespace)
                .with_match_policy(policy);

            let response = if args.quiet {
                view_result(store, SilentProgressReporter, request)?
            } else {
                view_result(store, StderrProgressReporter::new(), request)?
            };
            present(&view_args, &response, args.quiet)
        }
    }
}

/// Builds the object store and settles the namespace.
fn connect(args: &Args) -> Result<(Box<dyn ObjectStore>, String)> {
    if let Some(dir) = &args.from_dir {
        let store = ManifestObjectStore::load_dir(dir)?;
        let namespace = resolve_namespace(args.namespace.as_deref(), None);
        return Ok((Box::new(store), namespace));
    }

    let path = kubeconfig_path(args.kubeconfig.as_deref())?;
    let kubeconfig = load_kubeconfig(&path)?;
    let connection = kubeconfig.connection(args.context.as_deref(), &path)?;
    let namespace = resolve_namespace(args.namespace.as_deref(), connection.namespace.as_deref());

    tracing::debug!(server = %connection.server, %namespace, "using cluster");
    let store = KubeApiObjectStore::new(&connection)?;
    Ok((Box::new(store), namespace))
}

fn view_result<PR: ProgressReporter>(
    store: Box<dyn ObjectStore>,
    progress_reporter: PR,
    request: ViewResultRequest,
) -> Result<ViewResultResponse> {
    ViewResultUseCase::new(store, progress_reporter).execute(request)
}

fn present(args: &ViewResultArgs, response: &ViewResultResponse, quiet: bool) -> Result<()> {
    let view = ResultViewBuilder::build(response)?;

    if !quiet {
        eprintln!("{}", FormatterFactory::progress_message(args.format));
    }
    let rendered = FormatterFactory::create(args.format).format(&view)?;

    PresenterFactory::create(args.output.clone().into()).present(&rendered)
}
