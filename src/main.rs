use clap::Parser;
use pbm_rotate::utils::{logger, validation::Validate};
use pbm_rotate::{CliConfig, LocalStorage, PbmError, RotateEngine, SimplePipeline};

fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting pbm-rotate");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let json = config.json;
    let pipeline = SimplePipeline::new(LocalStorage::default(), config.clone());
    let engine = RotateEngine::new_with_monitoring(pipeline, config.monitor);

    match engine.run() {
        Ok(report) => {
            tracing::info!(
                "✅ Rotated {} -> {} ({} -> {})",
                report.input_path,
                report.output_path,
                report.input_dimensions,
                report.output_dimensions
            );
            if json {
                match serde_json::to_string_pretty(&report) {
                    Ok(text) => println!("{}", text),
                    Err(e) => fail(&PbmError::from(e)),
                }
            } else {
                println!("📁 Output saved to: {}", report.output_path);
            }
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &PbmError) -> ! {
    tracing::error!(
        "❌ Rotation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("{}", logger::timestamped(e.user_friendly_message()));
    std::process::exit(e.exit_code());
}
