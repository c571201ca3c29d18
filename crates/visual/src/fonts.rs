//! Font discovery and metrics for preview layout and text painting.
//!
//! `FontBook` wraps a `fontdb` database. Faces are parsed on demand with
//! `ttf-parser`; nothing is cached beyond the raw font data fontdb already holds.
//! An empty book is valid: measurement falls back to a fixed per-character
//! advance and painters skip text they cannot outline.

use srsforge_style::FontWeight;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Average advance, in ems, assumed when no face is available.
const FALLBACK_ADVANCE_EM: f32 = 0.55;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Failed to read font file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No usable font face in '{0}'")]
    NoFaces(String),
}

/// Vertical metrics in pixels for a given font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    pub descent: f32,
}

#[derive(Clone, Debug)]
pub struct FontBook {
    db: Arc<fontdb::Database>,
    family: Option<String>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::empty()
    }
}

impl FontBook {
    /// A book with no faces.
    pub fn empty() -> Self {
        Self {
            db: Arc::new(fontdb::Database::new()),
            family: None,
        }
    }

    /// A book seeded with the installed system fonts.
    pub fn system() -> Self {
        Self::empty().with_system_fonts(true)
    }

    pub fn with_system_fonts(mut self, enable: bool) -> Self {
        if enable {
            let db = Arc::make_mut(&mut self.db);
            db.load_system_fonts();
            log::debug!("Loaded system fonts, {} face(s) available", db.len());
        }
        self
    }

    pub fn with_font_dir(mut self, path: impl AsRef<Path>) -> Self {
        let db = Arc::make_mut(&mut self.db);
        let before = db.len();
        db.load_fonts_dir(path.as_ref());
        log::debug!(
            "Loaded {} face(s) from {}",
            db.len() - before,
            path.as_ref().display()
        );
        self
    }

    /// Adds raw TrueType/OpenType data; returns an error if it holds no face.
    pub fn add_font_data(&mut self, data: Vec<u8>) -> Result<(), FontError> {
        let db = Arc::make_mut(&mut self.db);
        let before = db.len();
        db.load_font_data(data);
        if db.len() == before {
            return Err(FontError::NoFaces("<memory>".to_string()));
        }
        Ok(())
    }

    pub fn add_font_file(&mut self, path: impl AsRef<Path>) -> Result<(), FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.display().to_string(),
            source,
        })?;
        self.add_font_data(data)
            .map_err(|_| FontError::NoFaces(path.display().to_string()))
    }

    /// Prefers `family` over the generic sans-serif family when resolving faces.
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    fn resolve(&self, weight: FontWeight) -> Option<fontdb::ID> {
        let mut families = Vec::with_capacity(2);
        if let Some(family) = &self.family {
            families.push(fontdb::Family::Name(family.as_str()));
        }
        families.push(fontdb::Family::SansSerif);

        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight(weight.numeric_value()),
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        self.db.query(&query).or_else(|| {
            // Any face beats skipping text entirely.
            self.db.faces().next().map(|face| face.id)
        })
    }

    /// Runs `f` against the best face for `weight`, if any face is available.
    pub fn with_face<T>(&self, weight: FontWeight, f: impl FnOnce(&ttf_parser::Face<'_>) -> T) -> Option<T> {
        let id = self.resolve(weight)?;
        self.db
            .with_face_data(id, |data, index| ttf_parser::Face::parse(data, index).ok().map(|face| f(&face)))
            .flatten()
    }

    /// Advance width of `text` in pixels at `font_size`.
    pub fn measure(&self, text: &str, font_size: f32, weight: FontWeight) -> f32 {
        self.with_face(weight, |face| {
            let scale = font_size / face.units_per_em() as f32;
            text.chars()
                .map(|c| {
                    face.glyph_index(c)
                        .and_then(|glyph| face.glyph_hor_advance(glyph))
                        .map(|advance| advance as f32 * scale)
                        .unwrap_or(font_size * FALLBACK_ADVANCE_EM)
                })
                .sum()
        })
        .unwrap_or_else(|| text.chars().count() as f32 * font_size * FALLBACK_ADVANCE_EM)
    }

    pub fn line_metrics(&self, font_size: f32, weight: FontWeight) -> LineMetrics {
        self.with_face(weight, |face| {
            let scale = font_size / face.units_per_em() as f32;
            LineMetrics {
                ascent: face.ascender() as f32 * scale,
                descent: -(face.descender() as f32) * scale,
            }
        })
        .unwrap_or(LineMetrics {
            ascent: font_size * 0.8,
            descent: font_size * 0.2,
        })
    }

    /// Greedy word wrap into lines no wider than `max_width`.
    ///
    /// Words wider than the line are kept whole on their own line.
    pub fn wrap(&self, text: &str, font_size: f32, weight: FontWeight, max_width: f32) -> Vec<String> {
        let space = self.measure(" ", font_size, weight);
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in text.split_whitespace() {
            let word_width = self.measure(word, font_size, weight);
            if !current.is_empty() && current_width + space + word_width > max_width {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            if !current.is_empty() {
                current.push(' ');
                current_width += space;
            }
            current.push_str(word);
            current_width += word_width;
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_book_uses_fallback_metrics() {
        let fonts = FontBook::empty();
        assert!(fonts.is_empty());
        assert!((fonts.measure("abcd", 10.0, FontWeight::Regular) - 22.0).abs() < 1e-3);
        assert!(fonts.with_face(FontWeight::Bold, |_| ()).is_none());
        assert!((fonts.line_metrics(10.0, FontWeight::Regular).ascent - 8.0).abs() < 1e-3);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let fonts = FontBook::empty();
        // 5.5px per char at 10px: "aaaa bbbb" is 49.5px wide
        let lines = fonts.wrap("aaaa bbbb cccc", 10.0, FontWeight::Regular, 50.0);
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);

        let long = fonts.wrap("supercalifragilistic ok", 10.0, FontWeight::Regular, 20.0);
        assert_eq!(long, vec!["supercalifragilistic", "ok"]);

        assert!(fonts.wrap("   ", 10.0, FontWeight::Regular, 50.0).is_empty());
    }

    #[test]
    fn garbage_font_data_is_rejected() {
        let mut fonts = FontBook::empty();
        assert!(matches!(fonts.add_font_data(vec![0, 1, 2, 3]), Err(FontError::NoFaces(_))));
        assert!(matches!(
            fonts.add_font_file("/definitely/not/here.ttf"),
            Err(FontError::Read { .. })
        ));
    }

    #[test]
    fn installed_face_drives_metrics() {
        let fonts = FontBook::system();
        if fonts.is_empty() {
            eprintln!("no font faces installed, skipping");
            return;
        }
        assert!(fonts.with_face(FontWeight::Bold, |face| face.units_per_em()).is_some());

        let narrow = fonts.measure("iiii", 20.0, FontWeight::Regular);
        let wide = fonts.measure("WWWW", 20.0, FontWeight::Regular);
        assert!(narrow < wide, "{narrow} vs {wide}");

        let metrics = fonts.line_metrics(20.0, FontWeight::Regular);
        assert!(metrics.ascent > 0.0 && metrics.descent >= 0.0);

        let width = fonts.measure("WWWW", 20.0, FontWeight::Regular);
        let lines = fonts.wrap("WWWW WWWW", 20.0, FontWeight::Regular, width * 1.5);
        assert_eq!(lines, vec!["WWWW", "WWWW"]);
    }
}
