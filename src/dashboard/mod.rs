//! HTML dashboard
//!
//! Server-side rendering of the analyzer page: input form, summary metrics,
//! distribution pie, word cloud, keyword bars and the classified reviews.

pub mod charts;
pub mod word_cloud;

pub use charts::{bar_chart, pie_chart};
pub use word_cloud::{PlacedWord, WordCloud};

use crate::report::{sample_text, Analysis};
use crate::sentiment::Sentiment;

/// Per-request page state. Replaces a session flag: whether the sample
/// reviews are loaded travels with the request.
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// Pre-fill the text area with the sample reviews
    pub load_sample: bool,
    /// Text previously submitted by the user
    pub review_text: String,
}

impl PageOptions {
    pub fn with_text(review_text: impl Into<String>) -> Self {
        Self {
            load_sample: false,
            review_text: review_text.into(),
        }
    }

    pub fn sample() -> Self {
        Self {
            load_sample: true,
            review_text: String::new(),
        }
    }

    /// Text shown in the input area
    pub fn text_area_value(&self) -> String {
        if self.load_sample {
            sample_text()
        } else {
            self.review_text.clone()
        }
    }
}

/// What the page shows below the input form
#[derive(Debug)]
pub enum PageContent<'a> {
    Empty,
    Warning(String),
    Report(&'a Analysis),
}

/// Chart color of a label
pub fn sentiment_color(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "#10b981",
        Sentiment::Neutral => "#f59e0b",
        Sentiment::Negative => "#ef4444",
    }
}

/// Table cell background of a label
pub fn sentiment_background(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "#d1fae5",
        Sentiment::Neutral => "#fef3c7",
        Sentiment::Negative => "#fee2e2",
    }
}

fn sentiment_icon(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "✅",
        Sentiment::Neutral => "⚪",
        Sentiment::Negative => "❌",
    }
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; color: #111827; background: #f9fafb; }
.layout { display: flex; min-height: 100vh; }
aside { width: 260px; background: #f3f4f6; padding: 24px; box-sizing: border-box; }
main { flex: 1; padding: 32px 48px; max-width: 1200px; }
textarea { width: 100%; height: 200px; font: inherit; padding: 8px; box-sizing: border-box; }
button { background: #ef4444; color: white; border: 0; border-radius: 6px; padding: 10px 18px; font-size: 15px; cursor: pointer; }
button.secondary { background: #374151; }
hr { border: 0; border-top: 1px solid #e5e7eb; margin: 28px 0; }
.warning { background: #fef3c7; border-left: 4px solid #f59e0b; padding: 12px 16px; border-radius: 4px; }
.metrics { display: flex; gap: 24px; }
.metric { flex: 1; background: white; border-radius: 8px; padding: 16px; box-shadow: 0 1px 2px rgba(0,0,0,.06); }
.metric .label { color: #6b7280; font-size: 14px; }
.metric .value { font-size: 32px; font-weight: 600; }
.metric .delta { color: #059669; font-size: 14px; }
.charts { display: flex; gap: 24px; flex-wrap: wrap; }
.charts > section { flex: 1; min-width: 360px; }
.charts svg, .keywords svg { max-width: 100%; height: auto; background: white; }
.table-wrap { max-height: 400px; overflow-y: auto; background: white; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #e5e7eb; }
td.score { font-variant-numeric: tabular-nums; }
footer { text-align: center; color: gray; margin: 32px 0 16px; }
"#;

/// Render the full page
pub fn render_page(options: &PageOptions, content: PageContent<'_>, cloud: &WordCloud) -> String {
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str("<title>Review Sentiment Analyzer</title>");
    html.push_str(&format!("<style>{}</style></head><body><div class=\"layout\">", STYLE));

    html.push_str(&render_sidebar());

    html.push_str("<main><h1>📊 Product Review Sentiment Analyzer</h1>");
    html.push_str("<h3>Analyze customer reviews from e-commerce platforms</h3>");
    html.push_str(&render_form(options));

    match content {
        PageContent::Empty => {}
        PageContent::Warning(message) => {
            html.push_str(&format!(
                "<p class=\"warning\" role=\"alert\">⚠️ {}</p>",
                escape_html(&message)
            ));
        }
        PageContent::Report(analysis) => html.push_str(&render_report(analysis, cloud)),
    }

    html.push_str("<hr><footer>Sentiment analysis with a product-review lexicon</footer>");
    html.push_str("</main></div></body></html>");
    html
}

fn render_sidebar() -> String {
    let mut html = String::from("<aside><h2>📝 Instructions</h2><ol>");
    for step in [
        "Paste reviews (one per line)",
        "Click 'Analyze Reviews'",
        "View sentiment breakdown",
        "Explore keyword insights",
    ] {
        html.push_str(&format!("<li>{}</li>", step));
    }
    html.push_str("</ol><hr><p><strong>Sample Data Available</strong></p>");
    html.push_str(
        "<form method=\"get\" action=\"/\"><input type=\"hidden\" name=\"sample\" value=\"true\">\
         <button class=\"secondary\" type=\"submit\">Load Sample Reviews</button></form>",
    );
    html.push_str("</aside>");
    html
}

fn render_form(options: &PageOptions) -> String {
    format!(
        "<form method=\"post\" action=\"/analyze\">\
         <label for=\"reviews\">Enter Reviews (one per line):</label>\
         <textarea id=\"reviews\" name=\"reviews\" placeholder=\"Paste your reviews here...\">{}</textarea>\
         <p><button type=\"submit\">🔍 Analyze Reviews</button></p></form>",
        escape_html(&options.text_area_value())
    )
}

fn render_metrics(analysis: &Analysis) -> String {
    let summary = &analysis.summary;
    let mut html = String::from("<hr><h2>📈 Sentiment Summary</h2><div class=\"metrics\">");
    html.push_str(&format!(
        "<div class=\"metric\"><div class=\"label\">Total Reviews</div><div class=\"value\">{}</div></div>",
        summary.total
    ));
    for share in &summary.shares {
        html.push_str(&format!(
            "<div class=\"metric\" data-sentiment=\"{label}\"><div class=\"label\">{icon} {label}</div>\
             <div class=\"value\">{count}</div><div class=\"delta\">{pct:.1}%</div></div>",
            icon = sentiment_icon(share.sentiment),
            label = share.sentiment,
            count = share.count,
            pct = share.percentage,
        ));
    }
    html.push_str("</div>");
    html
}

fn render_table(analysis: &Analysis) -> String {
    let mut html = String::from(
        "<hr><h2>📝 Classified Reviews</h2><div class=\"table-wrap\"><table>\
         <thead><tr><th>Review</th><th>Sentiment</th><th>Score</th></tr></thead><tbody>",
    );
    for result in &analysis.results {
        html.push_str(&format!(
            "<tr><td>{}</td><td style=\"background-color: {}\">{}</td><td class=\"score\">{:.3}</td></tr>",
            escape_html(&result.review),
            sentiment_background(result.sentiment),
            result.sentiment,
            result.score,
        ));
    }
    html.push_str("</tbody></table></div>");
    html
}

fn render_download(analysis: &Analysis) -> String {
    let text = analysis.reviews().join("\n");
    format!(
        "<hr><form method=\"post\" action=\"/export.csv\">\
         <textarea name=\"reviews\" hidden>{}</textarea>\
         <button type=\"submit\">📥 Download Results as CSV</button></form>",
        escape_html(&text)
    )
}

/// Dashboard sections for a finished analysis
pub fn render_report(analysis: &Analysis, cloud: &WordCloud) -> String {
    let mut html = render_metrics(analysis);

    html.push_str("<hr><div class=\"charts\">");
    html.push_str("<section><h2>📊 Sentiment Distribution</h2>");
    html.push_str(&pie_chart(&analysis.summary));
    html.push_str("</section><section><h2>☁️ Review Word Cloud</h2>");
    html.push_str(&cloud.render(&analysis.cloud_words));
    html.push_str("</section></div>");

    html.push_str("<hr><section class=\"keywords\"><h2>🔑 Top Keywords</h2>");
    html.push_str(&bar_chart(&analysis.keywords));
    html.push_str("</section>");

    html.push_str(&render_table(analysis));
    html.push_str(&render_download(analysis));
    html.push_str(&format!(
        "<p class=\"run\"><small>Run {} at {}</small></p>",
        analysis.run_id,
        analysis.generated_at.format("%Y-%m-%d %H:%M UTC"),
    ));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Analyzer, SAMPLE_REVIEWS};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_empty_page() {
        let html = render_page(&PageOptions::default(), PageContent::Empty, &WordCloud::default());
        assert!(html.contains("Enter Reviews (one per line):"));
        assert!(html.contains("Load Sample Reviews"));
        assert!(!html.contains("Sentiment Summary"));
        assert!(html.contains("></textarea>"));
    }

    #[test]
    fn test_sample_prefill() {
        let html = render_page(&PageOptions::sample(), PageContent::Empty, &WordCloud::default());
        assert!(html.contains("Great product! Loved the quality and fast delivery."));
        assert!(html.contains("Superb! Exceeded my expectations."));
    }

    #[test]
    fn test_warning() {
        let html = render_page(
            &PageOptions::default(),
            PageContent::Warning("Please enter some reviews to analyze!".to_string()),
            &WordCloud::default(),
        );
        assert!(html.contains("class=\"warning\""));
        assert!(html.contains("Please enter some reviews to analyze!"));
        assert!(!html.contains("Classified Reviews"));
    }

    #[test]
    fn test_report_sections() {
        let analysis = Analyzer::default().analyze(&SAMPLE_REVIEWS.join("\n")).unwrap();
        let options = PageOptions::with_text(SAMPLE_REVIEWS.join("\n"));
        let html = render_page(&options, PageContent::Report(&analysis), &WordCloud::default());

        assert!(html.contains("Total Reviews"));
        assert!(html.contains("class=\"pie-chart\""));
        assert!(html.contains("class=\"word-cloud\""));
        assert!(html.contains("class=\"bar-chart\""));
        assert!(html.contains("action=\"/export.csv\""));
        assert_eq!(html.matches("<tr><td>").count(), 15);
        assert!(html.contains("background-color: #d1fae5"));
        assert!(html.contains("background-color: #fee2e2"));
    }

    #[test]
    fn test_report_escapes_reviews() {
        let analysis = Analyzer::default().analyze("<img src=x onerror=alert(1)> great").unwrap();
        let html = render_report(&analysis, &WordCloud::default());
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt; great"));
    }

    #[test]
    fn test_metric_percentages() {
        let analysis = Analyzer::default().analyze("Great\nTerrible\nBox").unwrap();
        let html = render_report(&analysis, &WordCloud::default());
        assert_eq!(html.matches("class=\"delta\">33.3%</div>").count(), 3);
    }

    #[test]
    fn test_colors_per_label() {
        assert_eq!(sentiment_color(Sentiment::Positive), "#10b981");
        assert_eq!(sentiment_background(Sentiment::Negative), "#fee2e2");
        assert_eq!(sentiment_background(Sentiment::Neutral), "#fef3c7");
    }
}
