//! Mutable font accumulator.

use crate::registry::StyleRegistry;
use crate::spec::{
    ColorIndex, EnumFontUnderline, EnumFontVerticalOffset, SpecFont, XlsxStyleError,
};
use crate::util::{validate_font_name, validate_font_size};

/// Chainable font builder bound to one document.
///
/// ```ignore
/// let font = writer
///     .create_font_builder()
///     .bold(true)
///     .height_in_points(14)?
///     .color(EnumIndexedColor::DarkBlue)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct FontBuilder {
    registry: StyleRegistry,
    font: SpecFont,
}

impl FontBuilder {
    /// Builder seeded with [`SpecFont::default`].
    pub fn new(registry: StyleRegistry) -> Self {
        Self {
            registry,
            font: SpecFont::default(),
        }
    }

    pub fn with_name_and_size(
        registry: StyleRegistry,
        name: &str,
        size_in_points: i64,
    ) -> Result<Self, XlsxStyleError> {
        let font = SpecFont {
            name: validate_font_name(name)?,
            size_in_points: validate_font_size(size_in_points)?,
            ..SpecFont::default()
        };
        Ok(Self { registry, font })
    }

    /// Overwrite every attribute with those of `font`.
    pub fn clone_from_font(&mut self, font: &SpecFont) -> &mut Self {
        self.font = font.clone();
        self
    }

    /// Overwrite every attribute with the current state of `other`.
    pub fn clone_from_builder(&mut self, other: &FontBuilder) -> &mut Self {
        self.font = other.snapshot();
        self
    }

    pub fn font_name(&mut self, name: &str) -> Result<&mut Self, XlsxStyleError> {
        self.font.name = validate_font_name(name)?;
        Ok(self)
    }

    pub fn bold(&mut self, enable: bool) -> &mut Self {
        self.font.bold = enable;
        self
    }

    pub fn italic(&mut self, enable: bool) -> &mut Self {
        self.font.italic = enable;
        self
    }

    pub fn strikeout(&mut self, enable: bool) -> &mut Self {
        self.font.strikeout = enable;
        self
    }

    /// Set the font colour from a named palette entry or a palette colour.
    pub fn color(&mut self, color: impl Into<ColorIndex>) -> &mut Self {
        self.font.color = color.into();
        self
    }

    /// Set the font colour from a raw palette index.
    pub fn color_index(&mut self, index: u16) -> Result<&mut Self, XlsxStyleError> {
        self.font.color = ColorIndex::new(index)?;
        Ok(self)
    }

    /// Set the size in points. Fails without side effects outside `1..=409`.
    pub fn height_in_points(&mut self, size_in_points: i64) -> Result<&mut Self, XlsxStyleError> {
        self.font.size_in_points = validate_font_size(size_in_points)?;
        Ok(self)
    }

    pub fn underline(&mut self, underline: EnumFontUnderline) -> &mut Self {
        self.font.underline = underline;
        self
    }

    pub fn vertical_offset(&mut self, offset: EnumFontVerticalOffset) -> &mut Self {
        self.font.vertical_offset = offset;
        self
    }

    /// Current state, without registering it.
    pub fn snapshot(&self) -> SpecFont {
        self.font.clone()
    }

    /// Freeze the current state and register it in the document font table.
    pub fn build(&self) -> SpecFont {
        let font = self.snapshot();
        self.registry.register_font(&font);
        font
    }
}
