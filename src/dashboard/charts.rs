//! SVG charts: sentiment distribution pie and keyword bar chart

use super::{escape_html, sentiment_color};
use crate::keywords::KeywordCount;
use crate::report::SentimentSummary;
use std::f64::consts::PI;

/// Keyword bar color
pub const BAR_COLOR: &str = "#3b82f6";

const PIE_SIZE: f64 = 360.0;
const PIE_RADIUS: f64 = 140.0;

/// Point on the pie edge, angle in degrees counterclockwise from 3 o'clock
fn polar(cx: f64, cy: f64, r: f64, degrees: f64) -> (f64, f64) {
    let rad = degrees * PI / 180.0;
    (cx + r * rad.cos(), cy - r * rad.sin())
}

/// Pie chart of label proportions, starting at 12 o'clock and running
/// counterclockwise, largest share first. Labels with no reviews are left out.
pub fn pie_chart(summary: &SentimentSummary) -> String {
    let c = PIE_SIZE / 2.0;
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="pie-chart" viewBox="0 0 {s} {s}" width="{s}" height="{s}" role="img" aria-label="Sentiment distribution">"#,
        s = PIE_SIZE
    );

    let mut slices: Vec<_> = summary.present().collect();
    // stable: equal counts keep Positive, Neutral, Negative order
    slices.sort_by(|a, b| b.count.cmp(&a.count));
    let mut start = 90.0;

    for share in &slices {
        let sweep = share.percentage / 100.0 * 360.0;
        let color = sentiment_color(share.sentiment);

        if slices.len() == 1 {
            svg.push_str(&format!(
                r#"<circle cx="{c}" cy="{c}" r="{r}" fill="{color}" stroke="white" stroke-width="2"><title>{label}</title></circle>"#,
                r = PIE_RADIUS,
                label = share.sentiment,
            ));
        } else {
            let (x1, y1) = polar(c, c, PIE_RADIUS, start);
            let (x2, y2) = polar(c, c, PIE_RADIUS, start + sweep);
            let large_arc = if sweep > 180.0 { 1 } else { 0 };
            svg.push_str(&format!(
                r#"<path d="M {c} {c} L {x1:.2} {y1:.2} A {r} {r} 0 {large_arc} 0 {x2:.2} {y2:.2} Z" fill="{color}" stroke="white" stroke-width="2"><title>{label}</title></path>"#,
                r = PIE_RADIUS,
                label = share.sentiment,
            ));
        }

        let (lx, ly) = if slices.len() == 1 {
            (c, c)
        } else {
            polar(c, c, PIE_RADIUS * 0.6, start + sweep / 2.0)
        };
        svg.push_str(&format!(
            r#"<text x="{lx:.2}" y="{ly:.2}" text-anchor="middle" dominant-baseline="central" font-size="14" fill="white" font-weight="bold">{pct:.1}%</text>"#,
            pct = share.percentage,
        ));

        let (tx, ty) = polar(c, c, PIE_RADIUS + 12.0, start + sweep / 2.0);
        let anchor = if tx < c - 1.0 {
            "end"
        } else if tx > c + 1.0 {
            "start"
        } else {
            "middle"
        };
        if slices.len() > 1 {
            svg.push_str(&format!(
                r##"<text x="{tx:.2}" y="{ty:.2}" text-anchor="{anchor}" dominant-baseline="central" font-size="13" fill="#374151">{label}</text>"##,
                label = share.sentiment,
            ));
        }

        start += sweep;
    }

    svg.push_str("</svg>");
    svg
}

/// Horizontal bar chart of keyword frequencies, most frequent on top
pub fn bar_chart(keywords: &[KeywordCount]) -> String {
    const WIDTH: f64 = 720.0;
    const LEFT: f64 = 140.0;
    const RIGHT: f64 = 30.0;
    const TOP: f64 = 40.0;
    const BOTTOM: f64 = 50.0;
    const ROW: f64 = 26.0;

    let plot_width = WIDTH - LEFT - RIGHT;
    let height = TOP + BOTTOM + ROW * keywords.len().max(1) as f64;
    let max_freq = keywords.iter().map(|k| k.frequency).max().unwrap_or(0).max(1);

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="bar-chart" viewBox="0 0 {WIDTH} {height}" width="{WIDTH}" height="{height}" role="img" aria-label="Top keywords">"#
    );
    svg.push_str(&format!(
        r#"<text x="{x}" y="22" text-anchor="middle" font-size="16" font-weight="bold">Most Common Keywords in Reviews</text>"#,
        x = WIDTH / 2.0
    ));

    // integer ticks, at most ten
    let step = (max_freq as f64 / 10.0).ceil().max(1.0) as usize;
    let axis_y = TOP + ROW * keywords.len() as f64;
    for tick in (0..=max_freq).step_by(step) {
        let x = LEFT + tick as f64 / max_freq as f64 * plot_width;
        svg.push_str(&format!(
            r##"<line x1="{x:.2}" y1="{TOP}" x2="{x:.2}" y2="{axis_y}" stroke="#e5e7eb"/><text x="{x:.2}" y="{ty}" text-anchor="middle" font-size="12">{tick}</text>"##,
            ty = axis_y + 16.0,
        ));
    }

    for (i, keyword) in keywords.iter().enumerate() {
        let y = TOP + ROW * i as f64;
        let bar = keyword.frequency as f64 / max_freq as f64 * plot_width;
        svg.push_str(&format!(
            r#"<text x="{lx}" y="{ly:.2}" text-anchor="end" dominant-baseline="central" font-size="13">{token}</text><rect x="{LEFT}" y="{by:.2}" width="{bar:.2}" height="{bh:.2}" fill="{BAR_COLOR}"><title>{token}: {freq}</title></rect>"#,
            lx = LEFT - 8.0,
            ly = y + ROW / 2.0,
            by = y + 3.0,
            bh = ROW - 6.0,
            token = escape_html(&keyword.token),
            freq = keyword.frequency,
        ));
    }

    svg.push_str(&format!(
        r#"<text x="{x}" y="{y}" text-anchor="middle" font-size="13">Frequency</text>"#,
        x = LEFT + plot_width / 2.0,
        y = height - 10.0,
    ));
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::{ClassificationResult, Sentiment};

    fn summary_of(labels: &[Sentiment]) -> SentimentSummary {
        let results: Vec<ClassificationResult> = labels
            .iter()
            .map(|&sentiment| ClassificationResult {
                review: String::new(),
                sentiment,
                score: 0.0,
            })
            .collect();
        SentimentSummary::from_results(&results)
    }

    #[test]
    fn test_pie_slices_per_present_label() {
        let summary = summary_of(&[Sentiment::Positive, Sentiment::Negative, Sentiment::Negative]);
        let svg = pie_chart(&summary);
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("#10b981"));
        assert!(svg.contains("#ef4444"));
        assert!(!svg.contains("#f59e0b"));
        assert!(svg.contains("33.3%"));
        assert!(svg.contains("66.7%"));
    }

    #[test]
    fn test_pie_slices_largest_first() {
        let summary = summary_of(&[
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Neutral,
            Sentiment::Negative,
        ]);
        let svg = pie_chart(&summary);
        let negative = svg.find("<title>Negative</title>").unwrap();
        let positive = svg.find("<title>Positive</title>").unwrap();
        let neutral = svg.find("<title>Neutral</title>").unwrap();
        assert!(negative < positive);
        assert!(positive < neutral);
    }

    #[test]
    fn test_pie_single_label_is_circle() {
        let summary = summary_of(&[Sentiment::Neutral, Sentiment::Neutral]);
        let svg = pie_chart(&summary);
        assert!(svg.contains("<circle"));
        assert!(!svg.contains("<path"));
        assert!(svg.contains("100.0%"));
    }

    #[test]
    fn test_pie_large_arc_flag() {
        let summary = summary_of(&[
            Sentiment::Positive,
            Sentiment::Positive,
            Sentiment::Positive,
            Sentiment::Negative,
        ]);
        let svg = pie_chart(&summary);
        assert!(svg.contains(" 0 1 0 "));
    }

    #[test]
    fn test_bar_chart_rows_in_order() {
        let keywords = vec![
            KeywordCount { token: "quality".to_string(), frequency: 3 },
            KeywordCount { token: "delivery".to_string(), frequency: 2 },
        ];
        let svg = bar_chart(&keywords);
        assert_eq!(svg.matches("<rect").count(), 2);
        let q = svg.find(">quality<").unwrap();
        let d = svg.find(">delivery<").unwrap();
        assert!(q < d);
        assert!(svg.contains("Most Common Keywords in Reviews"));
        assert!(svg.contains(">Frequency<"));
        assert!(svg.contains(BAR_COLOR));
    }

    #[test]
    fn test_bar_chart_empty() {
        let svg = bar_chart(&[]);
        assert!(!svg.contains("<rect"));
        assert!(svg.ends_with("</svg>"));
    }
}
