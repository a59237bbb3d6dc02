//! Depth legend: the key mapping depth bands to marker colors.

use std::fmt::Write;

use crate::style::color_of_depth;
use crate::Color;

/// Lower bounds of the legend bands, in kilometers.
pub const DEPTH_GRADES: [i32; 6] = [-10, 10, 30, 50, 70, 90];

/// One line of the legend.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Lower bound of the band, km.
    pub lower: i32,
    /// Upper bound of the band, km. `None` for the open-ended last band.
    pub upper: Option<i32>,
    /// Swatch color.
    pub color: Color,
}

impl LegendEntry {
    /// Text of the entry: `10–30 km`, or `90+ km` for the last band.
    pub fn label(&self) -> String {
        match self.upper {
            Some(upper) => format!("{}\u{2013}{} km", self.lower, upper),
            None => format!("{}+ km", self.lower),
        }
    }
}

/// The depth legend.
///
/// Entries are derived from [`DEPTH_GRADES`] every time they are requested. The swatch of each
/// entry is the marker color of the entry's own lower bound, so the `90` entry shows the color
/// of the 70-90 band (90 is not deeper than 90).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DepthLegend;

impl DepthLegend {
    /// Creates the legend.
    pub fn new() -> Self {
        Self
    }

    /// Legend lines, shallowest first.
    pub fn entries(&self) -> Vec<LegendEntry> {
        DEPTH_GRADES
            .iter()
            .enumerate()
            .map(|(i, &lower)| LegendEntry {
                lower,
                upper: DEPTH_GRADES.get(i + 1).copied(),
                color: color_of_depth(lower as f64),
            })
            .collect()
    }

    /// Renders the legend as an HTML fragment, one `<br>`-terminated line per entry.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for entry in self.entries() {
            let range = match entry.upper {
                Some(upper) => format!("{}&ndash;{}", entry.lower, upper),
                None => format!("{}+", entry.lower),
            };
            let _ = write!(
                html,
                "<i style=\"background:{}\"></i> {range} km<br>",
                entry.color.to_hex()
            );
        }

        html
    }
}
