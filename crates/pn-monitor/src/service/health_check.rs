//! One complete health check: poll, classify, summarize, render.

use crate::domain::{NodeEndpoint, PollCycleResult};
use crate::error::MonitorError;
use crate::ports::FleetMonitorApi;
use crate::render::ReportRenderer;

/// Output of a health check.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub cycle: PollCycleResult,
    /// Report lines, ready to print.
    pub lines: Vec<String>,
}

/// Runs poll cycles against a fixed endpoint list.
pub struct HealthCheck<A: FleetMonitorApi> {
    api: A,
    endpoints: Vec<NodeEndpoint>,
    include_version: bool,
    renderer: ReportRenderer,
}

impl<A: FleetMonitorApi> HealthCheck<A> {
    pub fn new(
        api: A,
        endpoints: Vec<NodeEndpoint>,
        include_version: bool,
        terminal_width: usize,
    ) -> Self {
        Self {
            api,
            endpoints,
            include_version,
            renderer: ReportRenderer::new(terminal_width, include_version),
        }
    }

    pub fn endpoints(&self) -> &[NodeEndpoint] {
        &self.endpoints
    }

    /// Poll every endpoint and render the report. Nothing is rendered if the
    /// cycle aborts.
    pub async fn run(&self) -> Result<HealthReport, MonitorError> {
        let statuses = self.api.poll(&self.endpoints, self.include_version).await?;
        let cycle = PollCycleResult::new(statuses);
        let lines = self.renderer.render(&cycle);
        Ok(HealthReport { cycle, lines })
    }
}
