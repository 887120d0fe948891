//! Chart-data extraction from answer text
//!
//! The backend's answers embed two recognizable patterns: a pairwise state
//! comparison and one or more "Top N Crops in <State>" sections. Both scans
//! are best-effort visual aids derived on every render; a missed match
//! yields no chart, never an error.
//!
//! The delimiter strings below are a versioned contract with the backend's
//! answer builder. They must track it byte for byte.

use egui::Color32;
use once_cell::sync::Lazy;
use regex::Regex;

/// Line marker for the pairwise comparison statement
pub const COMPARISON_MARKER: &str = "Comparison:";

/// Section delimiter emitted before each top-crops listing
pub const TOP_CROPS_DELIMITER: &str = "### 🌾 Top";

static COMPARISON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Comparison:\s*(.+?)\s+vs\s+(.+?)\s*$").expect("comparison pattern")
});

static CROPS_SECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Crops in\s+([^\n]+)").expect("crops section pattern"));

static CROP_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*([^*]+)\*\*:\s*([0-9]+(?:\.[0-9]+)?)k tonnes").expect("crop line pattern")
});

/// One bar in a rainfall comparison chart
#[derive(Clone, Debug, PartialEq)]
pub struct RainfallPoint {
    pub label: String,
    pub value: f32,
    pub color: Color32,
}

/// Rainfall comparison chart derived from a `Comparison:` line
#[derive(Clone, Debug, PartialEq)]
pub struct RainfallChart {
    pub title: String,
    pub subtitle: String,
    pub data: Vec<RainfallPoint>,
}

/// One bar in a crop production chart
#[derive(Clone, Debug, PartialEq)]
pub struct CropPoint {
    pub crop: String,
    pub production: f32,
    pub color: Color32,
}

/// Crop production chart derived from a top-crops section
#[derive(Clone, Debug, PartialEq)]
pub struct CropChart {
    pub title: String,
    pub data: Vec<CropPoint>,
}

/// A chart-ready record extracted from answer text
#[derive(Clone, Debug, PartialEq)]
pub enum Visualization {
    Rainfall(RainfallChart),
    Crops(CropChart),
}

impl Visualization {
    /// Largest value among the data points, used to normalize bar widths
    pub fn max_value(&self) -> f32 {
        let values: Box<dyn Iterator<Item = f32>> = match self {
            Visualization::Rainfall(chart) => Box::new(chart.data.iter().map(|p| p.value)),
            Visualization::Crops(chart) => Box::new(chart.data.iter().map(|p| p.production)),
        };
        values.fold(0.0_f32, f32::max)
    }
}

/// Fraction of the chart width a bar of `value` should fill, capped at 1.0
pub fn bar_fraction(value: f32, max_value: f32) -> f32 {
    if max_value <= 0.0 {
        return 0.0;
    }
    (value / max_value).clamp(0.0, 1.0)
}

/// Distinct color for bar `index` of `count`, rotated around the hue wheel
pub fn series_color(index: usize, count: usize) -> Color32 {
    let count = count.max(1);
    let hue = (index % count) as f32 / count as f32;
    Color32::from(egui::ecolor::Hsva::new(hue, 0.65, 0.85, 1.0))
}

/// Scan answer text for both recognized patterns
pub fn extract(answer: &str) -> Vec<Visualization> {
    let mut charts = Vec::new();

    if let Some(chart) = extract_comparison(answer) {
        charts.push(Visualization::Rainfall(chart));
    }
    for chart in extract_crop_sections(answer) {
        charts.push(Visualization::Crops(chart));
    }

    charts
}

/// Look for `Comparison: <A> vs <B>` on some line
///
/// The bar magnitudes are a stub: the answer text does not carry rainfall
/// numbers in machine-readable form, so the chart shows fixed illustrative
/// values of 1200 and 800 rather than real data.
fn extract_comparison(answer: &str) -> Option<RainfallChart> {
    let captures = answer.lines().find_map(|line| COMPARISON_RE.captures(line))?;
    let first = captures[1].to_string();
    let second = captures[2].to_string();

    Some(RainfallChart {
        title: "Average Annual Rainfall".to_string(),
        subtitle: format!("{} vs {}", first, second),
        data: vec![
            RainfallPoint {
                label: first,
                value: 1200.0,
                color: series_color(0, 2),
            },
            RainfallPoint {
                label: second,
                value: 800.0,
                color: series_color(1, 2),
            },
        ],
    })
}

/// Split the answer on the top-crops delimiter and mine each section
fn extract_crop_sections(answer: &str) -> Vec<CropChart> {
    let mut charts = Vec::new();

    // Text before the first delimiter has no section header and is skipped
    for section in answer.split(TOP_CROPS_DELIMITER).skip(1) {
        let Some(state) = CROPS_SECTION_RE
            .captures(section)
            .map(|c| c[1].trim().to_string())
        else {
            continue;
        };

        let pairs: Vec<(String, f32)> = section
            .lines()
            .filter(|line| line.contains("**") && line.contains("tonnes"))
            .filter_map(|line| {
                let captures = CROP_LINE_RE.captures(line)?;
                let production = captures[2].parse::<f32>().ok()?;
                Some((captures[1].to_string(), production))
            })
            .collect();

        if pairs.is_empty() {
            continue;
        }

        let count = pairs.len();
        charts.push(CropChart {
            title: format!("Top Crops in {}", state),
            data: pairs
                .into_iter()
                .enumerate()
                .map(|(i, (crop, production))| CropPoint {
                    crop,
                    production,
                    color: series_color(i, count),
                })
                .collect(),
        });
    }

    charts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_extraction() {
        let charts = extract("## Comparison: Maharashtra vs Gujarat\nsome text");
        assert_eq!(charts.len(), 1);
        let Visualization::Rainfall(chart) = &charts[0] else {
            panic!("expected rainfall chart");
        };
        assert_eq!(chart.data.len(), 2);
        assert_eq!(chart.data[0].label, "Maharashtra");
        assert_eq!(chart.data[0].value, 1200.0);
        assert_eq!(chart.data[1].label, "Gujarat");
        assert_eq!(chart.data[1].value, 800.0);
        assert_ne!(chart.data[0].color, chart.data[1].color);
    }

    #[test]
    fn test_no_comparison_no_chart() {
        assert!(extract("plain answer with no patterns").is_empty());
    }

    #[test]
    fn test_top_crops_extraction() {
        let answer = "### 🌾 Top 2 Crops in Punjab\n**Wheat**: 500k tonnes\n**Rice**: 300k tonnes";
        let charts = extract(answer);
        assert_eq!(charts.len(), 1);
        let Visualization::Crops(chart) = &charts[0] else {
            panic!("expected crop chart");
        };
        assert_eq!(chart.title, "Top Crops in Punjab");
        assert_eq!(chart.data.len(), 2);
        assert_eq!(chart.data[0].crop, "Wheat");
        assert_eq!(chart.data[0].production, 500.0);
        assert_eq!(chart.data[1].crop, "Rice");
        assert_eq!(chart.data[1].production, 300.0);
        assert_ne!(chart.data[0].color, chart.data[1].color);
    }

    #[test]
    fn test_ordinal_prefixes_and_decimals() {
        // The backend numbers its crop lines and emits two decimals
        let answer = "### 🌾 Top 5 Crops in Gujarat\n1. **Cotton**: 123.45k tonnes\n2. **Groundnut**: 99.10k tonnes\n";
        let charts = extract(answer);
        let Visualization::Crops(chart) = &charts[0] else {
            panic!("expected crop chart");
        };
        assert_eq!(chart.data[0].crop, "Cotton");
        assert!((chart.data[0].production - 123.45).abs() < 1e-3);
        assert!((chart.data[1].production - 99.10).abs() < 1e-3);
    }

    #[test]
    fn test_empty_section_yields_no_chart() {
        let charts = extract("### 🌾 Top 5 Crops in Kerala\nno data rows here");
        assert!(charts.is_empty());
    }

    #[test]
    fn test_multiple_sections() {
        let answer = "### 🌾 Top 1 Crops in Punjab\n**Wheat**: 500k tonnes\n\n### 🌾 Top 1 Crops in Haryana\n**Rice**: 200k tonnes\n";
        let charts = extract(answer);
        assert_eq!(charts.len(), 2);
    }

    #[test]
    fn test_comparison_and_crops_together() {
        let answer = "## Comparison: Punjab vs Haryana\n### 🌾 Top 1 Crops in Punjab\n**Wheat**: 500k tonnes\n";
        let charts = extract(answer);
        assert_eq!(charts.len(), 2);
        assert!(matches!(charts[0], Visualization::Rainfall(_)));
        assert!(matches!(charts[1], Visualization::Crops(_)));
    }

    #[test]
    fn test_bar_fraction_caps_at_one() {
        assert_eq!(bar_fraction(500.0, 500.0), 1.0);
        assert_eq!(bar_fraction(250.0, 500.0), 0.5);
        assert_eq!(bar_fraction(600.0, 500.0), 1.0);
        assert_eq!(bar_fraction(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_max_value() {
        let answer = "### 🌾 Top 2 Crops in Punjab\n**Wheat**: 500k tonnes\n**Rice**: 300k tonnes";
        let charts = extract(answer);
        assert_eq!(charts[0].max_value(), 500.0);
    }
}
