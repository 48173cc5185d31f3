use crate::core::Pipeline;
use crate::domain::model::RotationReport;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Runs a [`Pipeline`] from input file to verified output file.
pub struct RotateEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> RotateEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn run(&self) -> Result<RotationReport> {
        tracing::info!("Rotating {}", self.pipeline.source());
        // Reject the angle before touching the file system.
        let rotation = self.pipeline.rotation()?;

        let matrix = self.pipeline.extract()?;
        let input_dimensions = matrix.dimensions();
        tracing::info!("Extracted {} image", input_dimensions);
        self.monitor.log_stats("Extract");

        let rotated = self.pipeline.transform(matrix)?;
        let output_dimensions = rotated.dimensions();
        tracing::info!(
            "Rotated {} degrees {:?}: {} -> {}",
            rotation.degrees(),
            rotation.direction(),
            input_dimensions,
            output_dimensions
        );
        self.monitor.log_stats("Transform");

        let output_path = self.pipeline.load(rotated)?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(RotationReport {
            input_path: self.pipeline.source().to_string(),
            output_path,
            degrees: rotation.degrees(),
            direction: rotation.direction(),
            input_dimensions,
            output_dimensions,
        })
    }
}
