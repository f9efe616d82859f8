//! Document-owned style table.
//!
//! Every built font and cell style is interned here: identical descriptors
//! share one slot, so a workbook never accumulates duplicate style records.
//! The table also owns the palette and the document default font, and caches
//! the renderer format derived for each style slot.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rust_xlsxwriter::Format;

use crate::spec::{
    ColorIndex, SpecCellStyle, SpecFont, SpecPalette, SpecPaletteColor, XlsxStyleError,
};
use crate::util::derive_rust_xlsx_format;

/// Registered, immutable cell style.
///
/// Cheap to clone and safe to share across threads. Equality compares the
/// slot and the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellStyle {
    slot: usize,
    spec: Arc<SpecCellStyle>,
}

impl CellStyle {
    /// Slot index in the owning document's style table.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Frozen descriptor.
    pub fn spec(&self) -> &SpecCellStyle {
        &self.spec
    }
}

#[derive(Debug)]
struct StyleTable {
    default_font: SpecFont,
    palette: SpecPalette,
    fonts: Vec<SpecFont>,
    dict_font_slots: HashMap<SpecFont, usize>,
    styles: Vec<Arc<SpecCellStyle>>,
    dict_style_slots: HashMap<Arc<SpecCellStyle>, usize>,
    dict_formats: HashMap<usize, Format>,
}

impl StyleTable {
    fn new(default_font: SpecFont) -> Self {
        let mut table = Self {
            default_font: default_font.clone(),
            palette: SpecPalette::default(),
            fonts: Vec::new(),
            dict_font_slots: HashMap::new(),
            styles: Vec::new(),
            dict_style_slots: HashMap::new(),
            dict_formats: HashMap::new(),
        };
        // Slot 0 of both tables holds the baseline entry.
        table.intern_font(&default_font);
        table.intern_style(SpecCellStyle::with_font(default_font));
        table
    }

    fn intern_font(&mut self, font: &SpecFont) -> usize {
        if let Some(&slot) = self.dict_font_slots.get(font) {
            tracing::trace!(slot, "font already registered");
            return slot;
        }

        let slot = self.fonts.len();
        self.fonts.push(font.clone());
        self.dict_font_slots.insert(font.clone(), slot);
        tracing::debug!(slot, font_name = font.name(), "registered font");
        slot
    }

    fn intern_style(&mut self, spec: SpecCellStyle) -> CellStyle {
        self.intern_font(spec.font());

        if let Some((spec_existing, &slot)) = self.dict_style_slots.get_key_value(&spec) {
            tracing::trace!(slot, "cell style already registered");
            return CellStyle {
                slot,
                spec: Arc::clone(spec_existing),
            };
        }

        let slot = self.styles.len();
        let spec = Arc::new(spec);
        self.styles.push(Arc::clone(&spec));
        self.dict_style_slots.insert(Arc::clone(&spec), slot);
        tracing::debug!(slot, "registered cell style");
        CellStyle { slot, spec }
    }

    fn owns(&self, style: &CellStyle) -> bool {
        self.styles
            .get(style.slot)
            .is_some_and(|spec| **spec == *style.spec)
    }
}

/// Shared handle to one document's style table.
///
/// Clones refer to the same table. Builders hold a clone so that `build()`
/// can register its result with the document that created the builder.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    inner: Arc<Mutex<StyleTable>>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleRegistry {
    /// Registry whose default font is [`SpecFont::default`].
    pub fn new() -> Self {
        Self::with_default_font(SpecFont::default())
    }

    pub fn with_default_font(default_font: SpecFont) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StyleTable::new(default_font))),
        }
    }

    /// Whether both handles refer to the same document table.
    pub fn is_same_document(&self, other: &StyleRegistry) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Font used by styles built without an explicit font.
    pub fn default_font(&self) -> SpecFont {
        self.inner.lock().default_font.clone()
    }

    /// Replace the document default font for styles built afterwards.
    pub fn set_default_font(&self, font: SpecFont) {
        let mut table = self.inner.lock();
        table.intern_font(&font);
        table.default_font = font;
    }

    /// Copy of the current palette.
    pub fn palette(&self) -> SpecPalette {
        self.inner.lock().palette.clone()
    }

    /// Resolve a palette entry against this document's palette.
    pub fn palette_color(&self, color: impl Into<ColorIndex>) -> SpecPaletteColor {
        self.inner.lock().palette.color(color)
    }

    /// Re-colour one palette slot. Cached renderer formats are dropped.
    pub fn set_palette_color(
        &self,
        index: impl Into<ColorIndex>,
        rgb: u32,
    ) -> Result<(), XlsxStyleError> {
        let mut table = self.inner.lock();
        table.palette.set_color_at_index(index, rgb)?;
        table.dict_formats.clear();
        Ok(())
    }

    /// Intern a font; returns its font-table slot.
    pub fn register_font(&self, font: &SpecFont) -> usize {
        self.inner.lock().intern_font(font)
    }

    /// Intern a style descriptor (and its font).
    pub fn register_style(&self, spec: SpecCellStyle) -> CellStyle {
        self.inner.lock().intern_style(spec)
    }

    /// Baseline style stored in slot 0.
    pub fn default_style(&self) -> CellStyle {
        let table = self.inner.lock();
        CellStyle {
            slot: 0,
            spec: Arc::clone(&table.styles[0]),
        }
    }

    pub fn font_count(&self) -> usize {
        self.inner.lock().fonts.len()
    }

    pub fn style_count(&self) -> usize {
        self.inner.lock().styles.len()
    }

    /// Snapshot of the font table in slot order.
    pub fn fonts(&self) -> Vec<SpecFont> {
        self.inner.lock().fonts.clone()
    }

    /// Renderer format for `style`.
    ///
    /// A style registered by another document is interned here first.
    pub fn format_for(&self, style: &CellStyle) -> Format {
        let mut table = self.inner.lock();
        let slot = if table.owns(style) {
            style.slot
        } else {
            table.intern_style(style.spec().clone()).slot
        };

        if let Some(format) = table.dict_formats.get(&slot) {
            return format.clone();
        }
        let format = derive_rust_xlsx_format(&table.styles[slot], &table.palette);
        table.dict_formats.insert(slot, format.clone());
        format
    }
}
