//! Terminal visualization using braille graphics and block bars

use console::style;
use drawille::Canvas;

use crate::core::gauge::{RiskBand, RiskGauge};
use crate::core::histogram::DurationHistogram;
use crate::core::tornado::TornadoEntry;

/// Canvas height of the distribution chart, in braille pixels
pub const HISTOGRAM_HEIGHT: u32 = 32;

/// Width of block bars, in characters
pub const BAR_WIDTH: usize = 40;

/// A labelled vertical marker on the distribution chart
#[derive(Debug, Clone, Copy)]
pub struct Marker<'a> {
    pub label: &'a str,
    /// Character placed under the marker column
    pub symbol: char,
    pub value: f64,
}

/// Render the duration histogram with percentile markers
///
/// Each bin is two braille pixels wide. Markers are drawn as dotted vertical
/// lines and labelled on the line below the chart.
pub fn render_histogram(histogram: &DurationHistogram, markers: &[Marker]) -> String {
    let max = histogram.max_count();
    if histogram.is_empty() || max == 0 {
        return "  (no distribution data)".to_string();
    }

    let width = (histogram.bins.len() * 2) as u32;
    let height = HISTOGRAM_HEIGHT;
    let mut canvas = Canvas::new(width, height);

    for (i, bin) in histogram.bins.iter().enumerate() {
        let bar = ((bin.count as f64 / max as f64) * (height - 1) as f64).round() as u32;
        let x = (i * 2) as u32;
        for dy in 0..bar {
            let y = height - 1 - dy;
            canvas.set(x, y);
            canvas.set(x + 1, y);
        }
    }

    // Baseline keeps the frame full width even when edge bins are empty
    for x in 0..width {
        canvas.set(x, height - 1);
    }

    let mut label_line: Vec<char> = vec![' '; histogram.bins.len()];
    for marker in markers {
        if let Some(idx) = histogram.bin_index(marker.value) {
            let x = (idx * 2) as u32;
            for y in (0..height).step_by(3) {
                canvas.set(x, y);
            }
            label_line[idx] = marker.symbol;
        }
    }

    let mut output = String::new();
    output.push_str(&canvas.frame());
    output.push('\n');
    output.push_str(&label_line.into_iter().collect::<String>());

    if let (Some(first), Some(last)) = (histogram.bins.first(), histogram.bins.last()) {
        output.push_str(&format!(
            "\n{:<w$}{:>8.1}h",
            format!("{:.1}h", first.lower),
            last.upper,
            w = histogram.bins.len().saturating_sub(8)
        ));
    }

    let legend: Vec<String> = markers
        .iter()
        .map(|m| format!("{}={:.1}h", m.label, m.value))
        .collect();
    if !legend.is_empty() {
        output.push_str(&format!("\n{}", legend.join("  ")));
    }

    output
}

/// A block bar of `value / max` scaled to `width` characters
pub fn render_bar(value: f64, max: f64, width: usize) -> String {
    if max.is_nan() || max <= 0.0 || !value.is_finite() {
        return String::new();
    }
    let filled = ((value / max).clamp(0.0, 1.0) * width as f64).round() as usize;
    "█".repeat(filled)
}

/// Horizontal tornado bars, widest first
///
/// Bars built from placeholder records are dimmed and starred.
pub fn render_tornado(entries: &[TornadoEntry], label_width: usize) -> String {
    if entries.is_empty() {
        return "  (no per-task variability available)".to_string();
    }
    let max = entries.iter().map(|e| e.value).fold(0.0_f64, f64::max);

    let mut lines: Vec<String> = entries
        .iter()
        .map(|e| {
            let bar = render_bar(e.value, max, BAR_WIDTH);
            let (bar, star) = if e.provenance.is_fallback() {
                (style(bar).dim(), "*")
            } else {
                (style(bar).cyan(), "")
            };
            format!(
                "  {:<w$} {} {:.3}{}",
                e.task_key,
                bar,
                e.value,
                star,
                w = label_width
            )
        })
        .collect();

    if entries.iter().any(|e| e.provenance.is_fallback()) {
        lines.push(format!(
            "  {}",
            style("* placeholder variability (no simulator detail)").dim()
        ));
    }
    lines.join("\n")
}

/// Gauge bar with the band coloured
pub fn render_gauge(gauge: &RiskGauge) -> String {
    let bar = render_bar(gauge.score, 1.0, BAR_WIDTH);
    let empty = "░".repeat(BAR_WIDTH.saturating_sub(bar.chars().count()));
    let styled = match gauge.band {
        RiskBand::Safe => style(bar).green(),
        RiskBand::Caution => style(bar).yellow(),
        RiskBand::Danger => style(bar).red(),
    };
    format!(
        "  {:<10} {}{} {:>5.1}% {}",
        gauge.dimension.to_string(),
        styled,
        style(empty).dim(),
        gauge.score * 100.0,
        gauge.band
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Provenance;
    use crate::core::gauge::RiskDimension;

    fn is_braille(c: char) -> bool {
        (0x2800..=0x28FF).contains(&(c as u32))
    }

    #[test]
    fn test_render_histogram() {
        let samples: Vec<f64> = (0..200).map(|i| 10.0 + (i % 20) as f64).collect();
        let hist = DurationHistogram::from_samples(&samples, 20);
        let markers = [
            Marker { label: "P50", symbol: '5', value: 20.0 },
            Marker { label: "P80", symbol: '8', value: 26.0 },
        ];
        let output = render_histogram(&hist, &markers);

        assert!(output.chars().any(is_braille));
        assert!(output.contains("P50=20.0h"));
        assert!(output.contains("P80=26.0h"));
        assert!(output.contains('5') && output.contains('8'));
    }

    #[test]
    fn test_render_histogram_empty() {
        let output = render_histogram(&DurationHistogram::default(), &[]);
        assert!(output.contains("no distribution data"));
    }

    #[test]
    fn test_render_bar() {
        assert_eq!(render_bar(0.5, 1.0, 10).chars().count(), 5);
        assert_eq!(render_bar(2.0, 1.0, 10).chars().count(), 10);
        assert_eq!(render_bar(0.5, 0.0, 10), "");
        assert_eq!(render_bar(f64::NAN, 1.0, 10), "");
    }

    #[test]
    fn test_render_tornado_scales_to_widest() {
        console::set_colors_enabled(false);
        let entries = vec![
            TornadoEntry {
                task_key: "T-1".to_string(),
                value: 0.4,
                variability: 0.4,
                completion_probability: 0.5,
                provenance: Provenance::Upstream,
            },
            TornadoEntry {
                task_key: "T-2".to_string(),
                value: 0.2,
                variability: 0.2,
                completion_probability: 0.5,
                provenance: Provenance::Fallback,
            },
        ];
        let output = render_tornado(&entries, 6);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH / 2);
        assert!(!lines[0].ends_with('*'));
        assert!(lines[1].ends_with("0.200*"));
        assert!(lines[2].contains("placeholder variability"));
    }

    #[test]
    fn test_render_gauge() {
        console::set_colors_enabled(false);
        let gauge = RiskGauge {
            dimension: RiskDimension::Scope,
            score: 0.35,
            band: RiskBand::Danger,
        };
        let output = render_gauge(&gauge);
        assert!(output.contains("Scope"));
        assert!(output.contains("35.0%"));
        assert!(output.contains("danger"));
    }
}
