//! Display category of a device, derived from its name.
//!
//! Naming convention: `R*` is a router, `SW*` a switch, anything else falls
//! back to the router glyph. `R` is checked first, so a name such as `Room1`
//! is a router too.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphCategory {
    Router,
    Switch,
    Fallback,
}

/// Glyph actually drawn for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Router,
    Switch,
}

impl GlyphCategory {
    pub fn glyph(self) -> Glyph {
        match self {
            GlyphCategory::Switch => Glyph::Switch,
            GlyphCategory::Router | GlyphCategory::Fallback => Glyph::Router,
        }
    }
}

/// Maps a device name to a display category.
pub trait Classifier {
    fn classify(&self, name: &str) -> GlyphCategory;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NamePrefixClassifier;

impl Classifier for NamePrefixClassifier {
    fn classify(&self, name: &str) -> GlyphCategory {
        classify(name)
    }
}

pub fn classify(name: &str) -> GlyphCategory {
    if name.starts_with('R') {
        GlyphCategory::Router
    } else if name.starts_with("SW") {
        GlyphCategory::Switch
    } else {
        GlyphCategory::Fallback
    }
}
