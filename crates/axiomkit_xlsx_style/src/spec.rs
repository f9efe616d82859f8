//! Style specification models, option records and the crate error type.

use std::fmt;

use rust_xlsxwriter::{ExcelDateTime, XlsxError};
use serde::{Deserialize, Serialize};

use crate::conf::{
    ARR_PALETTE_RGB_DEFAULT, C_FONT_NAME_DEFAULT, C_NUM_FORMAT_GENERAL, N_COLOR_INDEX_AUTOMATIC,
    N_FONT_SIZE_POINTS_DEFAULT,
};
use crate::util::{validate_color_index, validate_font_name, validate_font_size};

////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Errors raised by builders, the style registry and the workbook writer.
#[derive(Debug, thiserror::Error)]
pub enum XlsxStyleError {
    /// A setter or constructor received a value outside its domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A preset name was not registered on the writer.
    #[error("unknown style preset: {0}")]
    UnknownPreset(String),
    /// A configuration document could not be parsed.
    #[error("invalid style configuration: {0}")]
    InvalidConfig(String),
    /// No worksheet exists at the requested index.
    #[error("worksheet not found at index {0}")]
    SheetNotFound(usize),
    /// The writer was already flushed to disk.
    #[error("Cannot write after close().")]
    WriterClosed,
    /// The underlying workbook engine failed.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),
}

impl XlsxStyleError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Colors

/// Handle into the document-wide indexed colour palette.
///
/// Two handles are equal iff they name the same palette slot. The RGB value
/// behind a slot is owned by the document (see [`SpecPalette`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ColorIndex(u16);

impl ColorIndex {
    /// Palette slot 8.
    pub const BLACK: ColorIndex = ColorIndex(8);
    /// Palette slot 9.
    pub const WHITE: ColorIndex = ColorIndex(9);
    /// System colour chosen by the renderer.
    pub const AUTOMATIC: ColorIndex = ColorIndex(N_COLOR_INDEX_AUTOMATIC);

    /// Validate a raw palette index.
    pub fn new(index: u16) -> Result<Self, XlsxStyleError> {
        validate_color_index(index)?;
        Ok(Self(index))
    }

    /// Raw palette index.
    pub const fn get(self) -> u16 {
        self.0
    }

    pub const fn is_automatic(self) -> bool {
        self.0 == N_COLOR_INDEX_AUTOMATIC
    }
}

impl Default for ColorIndex {
    fn default() -> Self {
        Self::BLACK
    }
}

impl TryFrom<u16> for ColorIndex {
    type Error = XlsxStyleError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColorIndex> for u16 {
    fn from(value: ColorIndex) -> Self {
        value.0
    }
}

/// Named entries of the legacy indexed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum EnumIndexedColor {
    Black = 8,
    White = 9,
    Red = 10,
    BrightGreen = 11,
    Blue = 12,
    Yellow = 13,
    Pink = 14,
    Turquoise = 15,
    DarkRed = 16,
    Green = 17,
    DarkBlue = 18,
    DarkYellow = 19,
    Violet = 20,
    Teal = 21,
    Grey25Percent = 22,
    Grey50Percent = 23,
    CornflowerBlue = 24,
    Maroon = 25,
    LemonChiffon = 26,
    Orchid = 28,
    Coral = 29,
    RoyalBlue = 30,
    LightCornflowerBlue = 31,
    SkyBlue = 40,
    LightTurquoise = 41,
    LightGreen = 42,
    LightYellow = 43,
    PaleBlue = 44,
    Rose = 45,
    Lavender = 46,
    Tan = 47,
    LightBlue = 48,
    Aqua = 49,
    Lime = 50,
    Gold = 51,
    LightOrange = 52,
    Orange = 53,
    BlueGrey = 54,
    Grey40Percent = 55,
    DarkTeal = 56,
    SeaGreen = 57,
    DarkGreen = 58,
    OliveGreen = 59,
    Brown = 60,
    Plum = 61,
    Indigo = 62,
    Grey80Percent = 63,
    Automatic = 64,
}

impl EnumIndexedColor {
    /// Palette slot named by this entry.
    pub const fn index(self) -> u16 {
        self as u16
    }
}

impl From<EnumIndexedColor> for ColorIndex {
    fn from(value: EnumIndexedColor) -> Self {
        ColorIndex(value.index())
    }
}

/// Palette colour resolved by a document: slot plus its current RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecPaletteColor {
    /// Palette slot.
    pub index: ColorIndex,
    /// `0xRRGGBB`; `None` for the automatic slot.
    pub rgb: Option<u32>,
}

impl SpecPaletteColor {
    /// Palette slot backing this colour.
    pub fn indexed(&self) -> ColorIndex {
        self.index
    }
}

impl From<SpecPaletteColor> for ColorIndex {
    fn from(value: SpecPaletteColor) -> Self {
        value.index
    }
}

impl From<&SpecPaletteColor> for ColorIndex {
    fn from(value: &SpecPaletteColor) -> Self {
        value.index
    }
}

/// Indexed colour table owned by one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecPalette {
    rgb_by_index: [u32; ARR_PALETTE_RGB_DEFAULT.len()],
}

impl Default for SpecPalette {
    fn default() -> Self {
        Self {
            rgb_by_index: ARR_PALETTE_RGB_DEFAULT,
        }
    }
}

impl SpecPalette {
    /// RGB currently stored at `index`; `None` for the automatic slot.
    pub fn rgb(&self, index: ColorIndex) -> Option<u32> {
        self.rgb_by_index.get(usize::from(index.get())).copied()
    }

    /// Resolve a palette entry into a colour object.
    pub fn color(&self, color: impl Into<ColorIndex>) -> SpecPaletteColor {
        let index = color.into();
        SpecPaletteColor {
            index,
            rgb: self.rgb(index),
        }
    }

    /// Re-colour one slot. The automatic slot cannot be re-coloured.
    pub fn set_color_at_index(
        &mut self,
        index: impl Into<ColorIndex>,
        rgb: u32,
    ) -> Result<(), XlsxStyleError> {
        let index = index.into();
        if index.is_automatic() {
            return Err(XlsxStyleError::invalid(
                "the automatic palette slot cannot be re-coloured",
            ));
        }
        if rgb > 0xFF_FFFF {
            return Err(XlsxStyleError::invalid(format!(
                "rgb value must fit in 24 bits, got {rgb:#x}"
            )));
        }
        self.rgb_by_index[usize::from(index.get())] = rgb;
        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Enums

/// Line style for one border edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumBorderStyle {
    #[default]
    None,
    Thin,
    Medium,
    Dashed,
    Dotted,
    Thick,
    Double,
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantDashDot,
}

/// Which diagonals of a cell are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumBorderDiagonal {
    #[default]
    None,
    /// Top-left to bottom-right.
    Backward,
    /// Bottom-left to top-right.
    Forward,
    Both,
}

/// Cell fill pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumFillPattern {
    #[default]
    NoFill,
    /// Foreground colour fills the whole cell.
    Solid,
    MediumGray,
    DarkGray,
    LightGray,
    DarkHorizontal,
    DarkVertical,
    DarkDown,
    DarkUp,
    DarkGrid,
    DarkTrellis,
    LightHorizontal,
    LightVertical,
    LightDown,
    LightUp,
    LightGrid,
    LightTrellis,
    Gray125,
    Gray0625,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumHorizontalAlignment {
    #[default]
    General,
    Left,
    Center,
    Right,
    Fill,
    Justify,
    CenterSelection,
    Distributed,
}

/// Vertical text alignment. `None` leaves the renderer's baseline in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumVerticalAlignment {
    #[default]
    None,
    Top,
    Center,
    Bottom,
    Justify,
    Distributed,
}

/// Font underline style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumFontUnderline {
    #[default]
    None,
    Single,
    Double,
    SingleAccounting,
    DoubleAccounting,
}

/// Super/subscript offset of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumFontVerticalOffset {
    #[default]
    None,
    Superscript,
    Subscript,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Borders

/// Style and colour of one straight border edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecBorderEdge {
    /// Line style.
    pub style: EnumBorderStyle,
    /// Line colour.
    pub color: ColorIndex,
}

impl SpecBorderEdge {
    pub fn new(style: EnumBorderStyle, color: impl Into<ColorIndex>) -> Self {
        Self {
            style,
            color: color.into(),
        }
    }
}

/// Direction, style and colour of the diagonal border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecBorderDiagonal {
    /// Which diagonals are drawn.
    pub direction: EnumBorderDiagonal,
    /// Line style.
    pub style: EnumBorderStyle,
    /// Line colour.
    pub color: ColorIndex,
}

impl SpecBorderDiagonal {
    pub fn new(
        direction: EnumBorderDiagonal,
        style: EnumBorderStyle,
        color: impl Into<ColorIndex>,
    ) -> Self {
        Self {
            direction,
            style,
            color: color.into(),
        }
    }
}

/// Four straight edges plus the diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecBorderSet {
    pub top: SpecBorderEdge,
    pub right: SpecBorderEdge,
    pub bottom: SpecBorderEdge,
    pub left: SpecBorderEdge,
    pub diagonal: SpecBorderDiagonal,
}

impl SpecBorderSet {
    /// Same style and colour on every straight edge; the diagonal keeps the
    /// style and colour but is not drawn.
    pub fn uniform(style: EnumBorderStyle, color: impl Into<ColorIndex>) -> Self {
        let edge = SpecBorderEdge::new(style, color);
        Self {
            top: edge,
            right: edge,
            bottom: edge,
            left: edge,
            diagonal: SpecBorderDiagonal::new(EnumBorderDiagonal::None, style, edge.color),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Fonts

/// Plain font configuration record, validated into a [`SpecFont`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecFontOptions {
    /// Typeface name.
    pub name: String,
    /// Size in points.
    pub size_in_points: i64,
    pub bold: bool,
    pub italic: bool,
    pub strikeout: bool,
    pub underline: EnumFontUnderline,
    pub color: ColorIndex,
    pub vertical_offset: EnumFontVerticalOffset,
}

impl Default for SpecFontOptions {
    fn default() -> Self {
        Self {
            name: C_FONT_NAME_DEFAULT.to_string(),
            size_in_points: i64::from(N_FONT_SIZE_POINTS_DEFAULT),
            bold: false,
            italic: false,
            strikeout: false,
            underline: EnumFontUnderline::None,
            color: ColorIndex::BLACK,
            vertical_offset: EnumFontVerticalOffset::None,
        }
    }
}

/// Immutable font descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SpecFontOptions", into = "SpecFontOptions")]
pub struct SpecFont {
    pub(crate) name: String,
    pub(crate) size_in_points: u16,
    pub(crate) bold: bool,
    pub(crate) italic: bool,
    pub(crate) strikeout: bool,
    pub(crate) underline: EnumFontUnderline,
    pub(crate) color: ColorIndex,
    pub(crate) vertical_offset: EnumFontVerticalOffset,
}

impl Default for SpecFont {
    fn default() -> Self {
        Self {
            name: C_FONT_NAME_DEFAULT.to_string(),
            size_in_points: N_FONT_SIZE_POINTS_DEFAULT,
            bold: false,
            italic: false,
            strikeout: false,
            underline: EnumFontUnderline::None,
            color: ColorIndex::BLACK,
            vertical_offset: EnumFontVerticalOffset::None,
        }
    }
}

impl SpecFont {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_in_points(&self) -> u16 {
        self.size_in_points
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    pub fn is_strikeout(&self) -> bool {
        self.strikeout
    }

    pub fn underline(&self) -> EnumFontUnderline {
        self.underline
    }

    pub fn color(&self) -> ColorIndex {
        self.color
    }

    pub fn vertical_offset(&self) -> EnumFontVerticalOffset {
        self.vertical_offset
    }
}

impl TryFrom<SpecFontOptions> for SpecFont {
    type Error = XlsxStyleError;

    fn try_from(options: SpecFontOptions) -> Result<Self, Self::Error> {
        Ok(Self {
            name: validate_font_name(&options.name)?,
            size_in_points: validate_font_size(options.size_in_points)?,
            bold: options.bold,
            italic: options.italic,
            strikeout: options.strikeout,
            underline: options.underline,
            color: options.color,
            vertical_offset: options.vertical_offset,
        })
    }
}

impl From<SpecFont> for SpecFontOptions {
    fn from(font: SpecFont) -> Self {
        Self {
            name: font.name,
            size_in_points: i64::from(font.size_in_points),
            bold: font.bold,
            italic: font.italic,
            strikeout: font.strikeout,
            underline: font.underline,
            color: font.color,
            vertical_offset: font.vertical_offset,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellStyles

/// Immutable cell style descriptor. The font is held by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpecCellStyle {
    pub(crate) font: SpecFont,
    pub(crate) wrap_text: bool,
    pub(crate) fill_pattern: EnumFillPattern,
    pub(crate) foreground_color: ColorIndex,
    pub(crate) background_color: ColorIndex,
    pub(crate) borders: SpecBorderSet,
    pub(crate) horizontal_alignment: EnumHorizontalAlignment,
    pub(crate) vertical_alignment: EnumVerticalAlignment,
    pub(crate) number_format: String,
}

impl SpecCellStyle {
    /// Baseline style around `font`.
    pub(crate) fn with_font(font: SpecFont) -> Self {
        Self {
            font,
            wrap_text: false,
            fill_pattern: EnumFillPattern::NoFill,
            foreground_color: ColorIndex::BLACK,
            background_color: ColorIndex::WHITE,
            borders: SpecBorderSet::default(),
            horizontal_alignment: EnumHorizontalAlignment::General,
            vertical_alignment: EnumVerticalAlignment::None,
            number_format: C_NUM_FORMAT_GENERAL.to_string(),
        }
    }

    pub fn font(&self) -> &SpecFont {
        &self.font
    }

    pub fn wrap_text(&self) -> bool {
        self.wrap_text
    }

    pub fn fill_pattern(&self) -> EnumFillPattern {
        self.fill_pattern
    }

    pub fn foreground_color(&self) -> ColorIndex {
        self.foreground_color
    }

    pub fn background_color(&self) -> ColorIndex {
        self.background_color
    }

    pub fn borders(&self) -> &SpecBorderSet {
        &self.borders
    }

    pub fn horizontal_alignment(&self) -> EnumHorizontalAlignment {
        self.horizontal_alignment
    }

    pub fn vertical_alignment(&self) -> EnumVerticalAlignment {
        self.vertical_alignment
    }

    /// Number format pattern, handed to the renderer as-is.
    pub fn number_format(&self) -> &str {
        &self.number_format
    }
}

/// Batch configuration applied by
/// [`CellStyleBuilder::apply_options`](crate::style::CellStyleBuilder::apply_options).
///
/// Every field overwrites builder state except `border` and `number_format`,
/// which leave the current value untouched when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecCellStyleOptions {
    /// Font attached to the style.
    pub font: SpecFont,
    #[serde(default)]
    pub wrap_text: bool,
    /// Pattern foreground; black unless set.
    #[serde(default = "derive_color_black")]
    pub foreground_color: ColorIndex,
    /// Pattern background; white unless set.
    #[serde(default = "derive_color_white")]
    pub background_color: ColorIndex,
    #[serde(default)]
    pub fill_pattern: EnumFillPattern,
    #[serde(default)]
    pub horizontal_alignment: EnumHorizontalAlignment,
    #[serde(default)]
    pub vertical_alignment: EnumVerticalAlignment,
    /// Full border set; `None` keeps the builder's borders.
    #[serde(default)]
    pub border: Option<SpecBorderSet>,
    /// Number format; `None` keeps the builder's format.
    #[serde(default)]
    pub number_format: Option<String>,
}

impl SpecCellStyleOptions {
    /// Options with baseline values around `font`.
    pub fn new(font: SpecFont) -> Self {
        Self {
            font,
            wrap_text: false,
            foreground_color: ColorIndex::BLACK,
            background_color: ColorIndex::WHITE,
            fill_pattern: EnumFillPattern::NoFill,
            horizontal_alignment: EnumHorizontalAlignment::General,
            vertical_alignment: EnumVerticalAlignment::None,
            border: None,
            number_format: None,
        }
    }
}

fn derive_color_black() -> ColorIndex {
    ColorIndex::BLACK
}

fn derive_color_white() -> ColorIndex {
    ColorIndex::WHITE
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellValues

/// Closed set of values a cell can hold.
#[derive(Clone)]
pub enum EnumCellValue {
    /// Empty cell; only written when a style is attached.
    Blank,
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
    /// Date/time value rendered through the style's number format.
    DateTime(ExcelDateTime),
    /// Formula text such as `=SUM(A1:A3)`.
    Formula(String),
}

// `ExcelDateTime` has no `Debug`; dates print as their Excel serial value.
impl fmt::Debug for EnumCellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => f.write_str("Blank"),
            Self::Text(val) => f.debug_tuple("Text").field(val).finish(),
            Self::Number(val) => f.debug_tuple("Number").field(val).finish(),
            Self::Boolean(val) => f.debug_tuple("Boolean").field(val).finish(),
            Self::DateTime(val) => f.debug_tuple("DateTime").field(&val.to_excel()).finish(),
            Self::Formula(val) => f.debug_tuple("Formula").field(val).finish(),
        }
    }
}

impl EnumCellValue {
    pub fn formula(formula: impl Into<String>) -> Self {
        Self::Formula(formula.into())
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for EnumCellValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for EnumCellValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<ExcelDateTime> for EnumCellValue {
    fn from(value: ExcelDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl<T: Into<EnumCellValue>> From<Option<T>> for EnumCellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Blank, Into::into)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Writer-level report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Final sheet names in creation order.
    pub sheets: Vec<String>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_index_rejects_out_of_palette_values() {
        assert_eq!(ColorIndex::new(10).expect("red").get(), 10);
        assert!(ColorIndex::new(64).expect("automatic").is_automatic());
        assert!(matches!(
            ColorIndex::new(65),
            Err(XlsxStyleError::InvalidArgument(_))
        ));
    }

    #[test]
    fn named_palette_entry_and_raw_index_agree() {
        let c_from_name: ColorIndex = EnumIndexedColor::Red.into();
        assert_eq!(c_from_name, ColorIndex::new(10).expect("red"));
        assert_eq!(ColorIndex::from(EnumIndexedColor::Black), ColorIndex::BLACK);
        assert_eq!(ColorIndex::from(EnumIndexedColor::White), ColorIndex::WHITE);
    }

    #[test]
    fn palette_resolves_and_recolours_slots() {
        let mut palette = SpecPalette::default();
        let red = palette.color(EnumIndexedColor::Red);
        assert_eq!(red.rgb, Some(0xFF0000));
        assert_eq!(red.indexed(), ColorIndex::from(EnumIndexedColor::Red));
        assert_eq!(palette.rgb(ColorIndex::AUTOMATIC), None);

        palette
            .set_color_at_index(EnumIndexedColor::Red, 0xCC0000)
            .expect("recolour");
        assert_eq!(palette.color(EnumIndexedColor::Red).rgb, Some(0xCC0000));

        assert!(palette.set_color_at_index(ColorIndex::AUTOMATIC, 0).is_err());
        assert!(
            palette
                .set_color_at_index(EnumIndexedColor::Red, 0x1_000_000)
                .is_err()
        );
    }

    #[test]
    fn uniform_border_set_leaves_diagonal_undrawn() {
        let borders = SpecBorderSet::uniform(EnumBorderStyle::Thin, EnumIndexedColor::Blue);
        let edge = SpecBorderEdge::new(EnumBorderStyle::Thin, EnumIndexedColor::Blue);
        assert_eq!(borders.top, edge);
        assert_eq!(borders.right, edge);
        assert_eq!(borders.bottom, edge);
        assert_eq!(borders.left, edge);
        assert_eq!(borders.diagonal.direction, EnumBorderDiagonal::None);
        assert_eq!(borders.diagonal.style, EnumBorderStyle::Thin);
    }

    #[test]
    fn font_options_validate_into_descriptor() {
        let font = SpecFont::try_from(SpecFontOptions {
            name: "Calibri".to_string(),
            size_in_points: 11,
            bold: true,
            ..SpecFontOptions::default()
        })
        .expect("valid font");
        assert_eq!(font.name(), "Calibri");
        assert_eq!(font.size_in_points(), 11);
        assert!(font.is_bold());

        let err = SpecFont::try_from(SpecFontOptions {
            size_in_points: 0,
            ..SpecFontOptions::default()
        })
        .expect_err("zero size");
        assert!(matches!(err, XlsxStyleError::InvalidArgument(_)));

        let err = SpecFont::try_from(SpecFontOptions {
            name: "  ".to_string(),
            ..SpecFontOptions::default()
        })
        .expect_err("blank name");
        assert!(matches!(err, XlsxStyleError::InvalidArgument(_)));
    }

    #[test]
    fn font_defaults_match_documented_baseline() {
        let font = SpecFont::default();
        assert_eq!(font.name(), "Arial");
        assert_eq!(font.size_in_points(), 12);
        assert!(!font.is_bold() && !font.is_italic() && !font.is_strikeout());
        assert_eq!(font.underline(), EnumFontUnderline::None);
        assert_eq!(font.color(), ColorIndex::BLACK);
        assert_eq!(font.vertical_offset(), EnumFontVerticalOffset::None);
    }

    #[test]
    fn cell_value_conversions_pick_matching_variant() {
        assert!(matches!(EnumCellValue::from("a"), EnumCellValue::Text(ref v) if v == "a"));
        assert!(matches!(EnumCellValue::from(3_i32), EnumCellValue::Number(v) if v == 3.0));
        assert!(matches!(EnumCellValue::from(true), EnumCellValue::Boolean(true)));
        assert!(matches!(EnumCellValue::from(None::<f64>), EnumCellValue::Blank));
        assert!(matches!(EnumCellValue::from(Some(1.5_f64)), EnumCellValue::Number(v) if v == 1.5));
        assert!(matches!(
            EnumCellValue::formula("=A1+1"),
            EnumCellValue::Formula(ref v) if v == "=A1+1"
        ));
    }

    #[test]
    fn cell_value_debug_prints_variant_and_payload() {
        assert_eq!(format!("{:?}", EnumCellValue::Blank), "Blank");
        assert_eq!(format!("{:?}", EnumCellValue::from("a")), "Text(\"a\")");
        assert_eq!(format!("{:?}", EnumCellValue::from(true)), "Boolean(true)");

        let date = ExcelDateTime::from_ymd(2024, 1, 2).expect("date");
        let c_debug = format!("{:?}", EnumCellValue::from(date));
        assert!(c_debug.starts_with("DateTime("), "{c_debug}");
    }
}
