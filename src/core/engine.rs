use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// What a finished run produced.
#[derive(Debug)]
pub struct RunOutcome<T> {
    pub images: Vec<PathBuf>,
    pub output: T,
    pub elapsed: Duration,
}

pub struct AnalysisEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AnalysisEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<RunOutcome<P::Output>> {
        let started = Instant::now();
        tracing::info!("🚀 Starting {} analysis", self.pipeline.name());
        self.monitor.log_stats("Start");

        // Extract
        tracing::info!("📥 Extracting data...");
        let raw_data = self.pipeline.extract().await?;
        self.monitor.log_stats("Extract");

        // Transform
        tracing::info!("🔄 Transforming data...");
        let output = self.pipeline.transform(raw_data).await?;
        self.monitor.log_stats("Transform");

        // Load
        tracing::info!("🖼️ Rendering plots...");
        let images = self.pipeline.load(&output).await?;
        for image in &images {
            tracing::info!("📁 Plot saved to: {}", image.display());
        }
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(RunOutcome {
            images,
            output,
            elapsed: started.elapsed(),
        })
    }
}
