//! Current analysis held on behalf of a presenter
//!
//! A session shows at most one flight at a time. Loading a new log replaces
//! the report wholesale; a log that fails to load leaves the previous report
//! in place so the display never shows a half-updated result.

use std::path::Path;
use tracing::warn;

use super::processor::{AnalysisReport, PipelineError, VibrationPipeline};

#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    pipeline: VibrationPipeline,
    current: Option<AnalysisReport>,
}

impl AnalysisSession {
    pub fn new(pipeline: VibrationPipeline) -> Self {
        Self {
            pipeline,
            current: None,
        }
    }

    /// The most recent successful analysis.
    pub fn current(&self) -> Option<&AnalysisReport> {
        self.current.as_ref()
    }

    pub fn load_file(&mut self, path: &Path) -> Result<&AnalysisReport, PipelineError> {
        let result = self.pipeline.analyze_file(path);
        self.replace(result)
    }

    pub fn load_str(&mut self, input: &str) -> Result<&AnalysisReport, PipelineError> {
        let result = self.pipeline.analyze_str(input);
        self.replace(result)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    fn replace(
        &mut self,
        result: Result<AnalysisReport, PipelineError>,
    ) -> Result<&AnalysisReport, PipelineError> {
        match result {
            Ok(report) => Ok(self.current.insert(report)),
            Err(e) => {
                warn!(
                    error = %e,
                    kept_previous = self.current.is_some(),
                    "Flight log rejected"
                );
                Err(e)
            }
        }
    }
}
