use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use depdocs::cli::{GenerateOptions, Output, commands::generate};
use depdocs::constants::logging::FILE_ONLY_TARGET;
use depdocs::{ConfigLoader, LogContext, ProcessRunner, Verbosity};

#[derive(Parser)]
#[command(name = "depdocs")]
#[command(
    version,
    about = "Generate dbt lineage docs from a spreadsheet of object dependencies"
)]
struct Cli {
    /// Workbook with a "Dependencies" sheet and an optional "Objects" sheet
    #[arg(required_unless_present = "show_config")]
    workbook: Option<PathBuf>,

    #[arg(
        long = "target-dir",
        alias = "target-dirpath",
        help = "Directory to build docs in (defaults to a new temporary directory)"
    )]
    target_dir: Option<PathBuf>,

    #[arg(long, help = "Project template directory (defaults to the built-in skeleton)")]
    template: Option<PathBuf>,

    #[arg(long, help = "Documentation tool program (default: dbt)")]
    tool: Option<String>,

    #[arg(long, help = "Run 'docs generate' only, not 'docs serve'")]
    no_serve: bool,

    #[arg(long, help = "Write the project but do not run the documentation tool")]
    skip_docs: bool,

    #[arg(long, value_name = "FILE", help = "Write the object graph as JSON")]
    dump_graph: Option<PathBuf>,

    #[arg(long, short, value_name = "FILE", help = "Additional config file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Print the effective configuration and exit")]
    show_config: bool,

    #[arg(long, help = "Debug output on the console (takes precedence over RUST_LOG)")]
    verbose: bool,

    #[arg(long, short, help = "Errors only on the console (takes precedence over RUST_LOG)")]
    quiet: bool,
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mdepdocs encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Output::default().error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load(cli.config.as_deref())?;
    if cli.show_config {
        print!("{}", ConfigLoader::render(&config)?);
        return Ok(());
    }

    let logs = LogContext::new(&config.logging, Verbosity::from_flags(cli.verbose, cli.quiet));
    logs.install()?;

    let Some(workbook) = cli.workbook else {
        anyhow::bail!("a workbook path is required");
    };
    let options = GenerateOptions {
        workbook,
        target_dir: cli.target_dir,
        template_dir: cli.template,
        tool: cli.tool,
        no_serve: cli.no_serve,
        skip_docs: cli.skip_docs,
        dump_graph: cli.dump_graph,
    };

    let mut runner = ProcessRunner;
    match generate::run(&options, &config, &mut runner) {
        Ok(report) => {
            Output::new(cli.quiet).report(&report);
            Ok(())
        }
        Err(e) => {
            // printed once by main on stderr
            tracing::error!(target: FILE_ONLY_TARGET, "Run failed: {:?}", e);
            tracing::debug!("Full log: {}", logs.debug_log().display());
            Err(e.into())
        }
    }
}
