use super::ControlPosition;
use crate::legend::{DepthLegend, LegendEntry};

/// Depth legend anchored to a corner of the map.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LegendControl {
    legend: DepthLegend,
    position: ControlPosition,
}

impl LegendControl {
    /// Creates the control at the given corner.
    pub fn new(position: ControlPosition) -> Self {
        Self {
            legend: DepthLegend::new(),
            position,
        }
    }

    /// Corner the legend is shown in.
    pub fn position(&self) -> ControlPosition {
        self.position
    }

    /// The legend.
    pub fn legend(&self) -> &DepthLegend {
        &self.legend
    }

    /// Rows of the legend, shallowest first.
    pub fn entries(&self) -> Vec<LegendEntry> {
        self.legend.entries()
    }
}
