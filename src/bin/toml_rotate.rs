use clap::Parser;
use pbm_rotate::config::toml_config::{RotationJob, TomlConfig};
use pbm_rotate::utils::{logger, validation::Validate};
use pbm_rotate::{LocalStorage, PbmError, RotateEngine, RotationReport, SimplePipeline};

#[derive(Parser)]
#[command(name = "toml-rotate")]
#[command(about = "Rotate a batch of PBM files described in a TOML job file")]
struct Args {
    /// Path to TOML job file
    #[arg(short, long, default_value = "pbm-rotate.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,

    /// Validate the job file and list the jobs without rotating anything
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let args = Args::parse();

    // Settings may turn on verbosity, but the logger has to exist before the
    // file is read, so the command line flag decides.
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("📁 Loading jobs from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    let jobs = match config.resolved_jobs() {
        Ok(jobs) => jobs,
        Err(e) => fail(&e),
    };

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no files will be written");
        display_job_summary(&config, &jobs);
        return;
    }

    if args.verbose || config.verbose() {
        display_job_summary(&config, &jobs);
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let storage = LocalStorage::new(config.base_path());

    let mut reports: Vec<RotationReport> = Vec::new();
    let mut first_error: Option<PbmError> = None;

    for job in jobs {
        let pipeline = SimplePipeline::new(&storage, job.clone());
        let engine = RotateEngine::new_with_monitoring(pipeline, monitor_enabled);

        match engine.run() {
            Ok(report) => reports.push(report),
            Err(e) => {
                tracing::error!("❌ Job {} failed: {}", job.path, e);
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                if !config.continue_on_error() {
                    fail(&e);
                }
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    for report in &reports {
        println!(
            "✅ {} -> {} ({} degrees, {} -> {})",
            report.input_path,
            report.output_path,
            report.degrees,
            report.input_dimensions,
            report.output_dimensions
        );
    }

    if let Some(e) = first_error {
        fail(&e);
    }
}

fn display_job_summary(config: &TomlConfig, jobs: &[RotationJob]) {
    println!("📋 Job Summary:");
    println!("  Base path: {}", config.base_path());
    println!("  Continue on error: {}", config.continue_on_error());
    for job in jobs {
        println!("  {} -> {} ({} degrees)", job.path, job.export_path, job.degree);
    }
}

fn fail(e: &PbmError) -> ! {
    tracing::error!(
        "❌ Batch failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("{}", logger::timestamped(e.user_friendly_message()));
    std::process::exit(e.exit_code());
}
