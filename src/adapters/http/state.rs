//! Shared request state

use crate::core::pipeline::InferencePipeline;
use crate::domain::ports::ModelHandle;
use crate::utils::monitor::SystemMonitor;
use chrono::{DateTime, Utc};

/// Read-only state shared by every handler.
pub struct AppState {
    pub pipeline: InferencePipeline,
    pub monitor: SystemMonitor,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(model: ModelHandle, monitor: SystemMonitor) -> Self {
        Self {
            pipeline: InferencePipeline::new(model),
            monitor,
            started_at: Utc::now(),
        }
    }

    pub fn model(&self) -> &ModelHandle {
        self.pipeline.model()
    }

    pub fn uptime_secs(&self) -> i64 {
        Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}
