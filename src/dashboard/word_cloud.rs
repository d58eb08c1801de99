//! Word cloud layout
//!
//! Words are sized by relative frequency and placed along an archimedean
//! spiral from the canvas center, taking the first spot that does not overlap
//! anything already placed. A word that does not fit is shrunk; once a word
//! cannot fit even at the minimum size, layout stops.

use super::escape_html;
use crate::config::WordCloudConfig;
use crate::keywords::KeywordCount;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Viridis colormap sampled at eight stops
const VIRIDIS: [&str; 8] = [
    "#440154", "#46327e", "#365c8d", "#277f8e", "#1fa187", "#4ac16d", "#a0da39", "#fde725",
];

/// Approximate glyph advance as a fraction of the font size
const GLYPH_WIDTH: f64 = 0.6;

/// Gap kept between words, in pixels
const PADDING: f64 = 2.0;

/// A word with its final position, centered on (x, y)
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub font_size: f64,
    pub x: f64,
    pub y: f64,
    pub vertical: bool,
    pub color: &'static str,
}

impl PlacedWord {
    /// Bounding box as (left, top, right, bottom)
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (w, h) = box_size(&self.text, self.font_size, self.vertical);
        (self.x - w / 2.0, self.y - h / 2.0, self.x + w / 2.0, self.y + h / 2.0)
    }

    fn overlaps(&self, other: &PlacedWord) -> bool {
        let (l1, t1, r1, b1) = self.bounds();
        let (l2, t2, r2, b2) = other.bounds();
        l1 < r2 + PADDING && l2 < r1 + PADDING && t1 < b2 + PADDING && t2 < b1 + PADDING
    }
}

fn box_size(text: &str, font_size: f64, vertical: bool) -> (f64, f64) {
    let w = text.chars().count() as f64 * font_size * GLYPH_WIDTH;
    let h = font_size;
    if vertical {
        (h, w)
    } else {
        (w, h)
    }
}

#[derive(Debug, Clone)]
pub struct WordCloud {
    width: f64,
    height: f64,
    seed: u64,
    max_words: usize,
    /// Share of words laid out horizontally
    prefer_horizontal: f64,
    min_font_size: f64,
    max_font_size: f64,
}

impl WordCloud {
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        let height = height as f64;
        Self {
            width: width as f64,
            height,
            seed,
            max_words: 200,
            prefer_horizontal: 0.9,
            min_font_size: 6.0,
            max_font_size: (height / 6.0).max(12.0),
        }
    }

    pub fn from_config(config: &WordCloudConfig) -> Self {
        let mut cloud = Self::new(config.width, config.height, config.seed);
        cloud.max_words = config.max_words;
        cloud
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Place words, most frequent first. Input is expected in descending
    /// frequency order.
    pub fn layout(&self, words: &[KeywordCount]) -> Vec<PlacedWord> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut placed: Vec<PlacedWord> = Vec::new();

        let max_freq = match words.iter().map(|w| w.frequency).max() {
            Some(f) if f > 0 => f as f64,
            _ => return placed,
        };

        for word in words.iter().take(self.max_words) {
            let relative = word.frequency as f64 / max_freq;
            let mut font_size = (self.max_font_size * (0.5 * relative + 0.5)).round();
            let vertical = !rng.random_bool(self.prefer_horizontal);
            let color = VIRIDIS[rng.random_range(0..VIRIDIS.len())];
            let phase = rng.random::<f64>() * std::f64::consts::TAU;

            let spot = loop {
                let candidate = PlacedWord {
                    text: word.token.clone(),
                    font_size,
                    x: 0.0,
                    y: 0.0,
                    vertical,
                    color,
                };
                if let Some(found) = self.find_spot(candidate, &placed, phase) {
                    break Some(found);
                }
                font_size = (font_size * 0.85).floor();
                if font_size < self.min_font_size {
                    break None;
                }
            };

            match spot {
                Some(found) => placed.push(found),
                None => {
                    tracing::debug!(word = %word.token, "Word cloud full");
                    break;
                }
            }
        }

        placed
    }

    /// Walk the spiral until the word fits
    fn find_spot(&self, mut word: PlacedWord, placed: &[PlacedWord], phase: f64) -> Option<PlacedWord> {
        let (w, h) = box_size(&word.text, word.font_size, word.vertical);
        if w > self.width || h > self.height {
            return None;
        }

        let cx = self.width / 2.0;
        let cy = self.height / 2.0;
        let aspect = self.height / self.width;
        let max_radius = self.width.hypot(self.height) / 2.0;

        // r = SPACING * t gives rings SPACING * 2π apart
        const SPACING: f64 = 2.0;
        let mut t = 0.0_f64;
        loop {
            let r = SPACING * t;
            if r > max_radius {
                return None;
            }

            word.x = cx + r * (t + phase).cos();
            word.y = cy + r * (t + phase).sin() * aspect;

            let (left, top, right, bottom) = word.bounds();
            let inside = left >= 0.0 && top >= 0.0 && right <= self.width && bottom <= self.height;
            if inside && !placed.iter().any(|p| p.overlaps(&word)) {
                return Some(word);
            }

            // about 3px along the arc per step
            t += 3.0 / r.max(3.0);
        }
    }

    /// Render placed words as a standalone SVG
    pub fn to_svg(&self, placed: &[PlacedWord]) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="word-cloud" viewBox="0 0 {w} {h}" width="{w}" height="{h}" role="img" aria-label="Review word cloud">"#,
            w = self.width,
            h = self.height,
        );
        svg.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);

        for word in placed {
            let transform = if word.vertical {
                format!(r#" transform="rotate(-90 {:.1} {:.1})""#, word.x, word.y)
            } else {
                String::new()
            };
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" font-size="{}" fill="{}" text-anchor="middle" dominant-baseline="central" font-family="sans-serif"{}>{}</text>"#,
                word.x,
                word.y,
                word.font_size,
                word.color,
                transform,
                escape_html(&word.text),
            ));
        }

        svg.push_str("</svg>");
        svg
    }

    /// Lay out and render in one step
    pub fn render(&self, words: &[KeywordCount]) -> String {
        self.to_svg(&self.layout(words))
    }
}

impl Default for WordCloud {
    fn default() -> Self {
        Self::from_config(&WordCloudConfig::default())
    }
}
