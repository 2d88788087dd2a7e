use serde::{Deserialize, Serialize};

/// The eight kinds of priced work an offer line can be.
///
/// Item types are stored as free text (legacy records carry all sorts of
/// spellings), so every read goes through [`Category::from_raw`], which
/// keyword-matches the text against a fixed priority list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Kitchen,
    CoffeeCorner,
    Hilton,
    Separator,
    TvUnit,
    Door,
    Skirting,
    PlainItem,
}

impl Category {
    /// Match free-form type text to a category.
    ///
    /// Checks run in a fixed order and the first hit wins, so a string
    /// containing both "tv" and "kahve" resolves to [`Category::CoffeeCorner`].
    /// Returns `None` when nothing matches.
    pub fn from_raw(raw: &str) -> Option<Category> {
        let x = raw.trim().to_lowercase();
        if x.contains("mutfak") || x.contains("kitchen") {
            return Some(Category::Kitchen);
        }
        if x.contains("kahve") || x.contains("coffee") {
            return Some(Category::CoffeeCorner);
        }
        if x.contains("hilton") {
            return Some(Category::Hilton);
        }
        if x.contains("seper") || x.contains("separat") || x.contains("divider") {
            return Some(Category::Separator);
        }
        if x.contains("tv") {
            return Some(Category::TvUnit);
        }
        if x.contains("kapı") || x.contains("kapi") || x.contains("door") {
            return Some(Category::Door);
        }
        if x.contains("süpür") || x.contains("supur") || x.contains("skirting") {
            return Some(Category::Skirting);
        }
        if x.contains("sade") || x.contains("other") || x.contains("custom") {
            return Some(Category::PlainItem);
        }
        None
    }

    /// The canonical display label. Labels round-trip through
    /// [`Category::from_raw`], which keeps normalization idempotent.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Kitchen => "Mutfak",
            Category::CoffeeCorner => "Kahve Köşesi",
            Category::Hilton => "Hilton",
            Category::Separator => "Seperatör",
            Category::TvUnit => "TV Ünitesi",
            Category::Door => "Kapı",
            Category::Skirting => "Süpürgelik",
            Category::PlainItem => "Sade Kalem",
        }
    }
}

/// Normalize free-form type text to its display label.
///
/// Unmatched non-empty text is kept as-is (the record still shows what the
/// user typed); empty text falls back to the plain-item label. Pricing
/// treats anything unmatched as a plain item either way.
pub fn normalize_type_label(raw: &str) -> String {
    match Category::from_raw(raw) {
        Some(category) => category.label().to_string(),
        None if !raw.is_empty() => raw.to_string(),
        None => Category::PlainItem.label().to_string(),
    }
}
