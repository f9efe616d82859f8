//! `axiomkit_xlsx_style` v1:
//! fluent font and cell style composition for XLSX workbooks.
//!
//! Modules:
//! - `conf`     : constants, default palette and style presets
//! - `spec`     : descriptors, option records, colours and the error type
//! - `util`     : validators, sheet-name helpers and renderer format mapping
//! - `registry` : document-owned font/style table with interning
//! - `font`     : `FontBuilder`
//! - `style`    : `CellStyleBuilder`
//! - `writer`   : workbook writer, sheets and typed cell values
pub mod conf;
pub mod font;
pub mod registry;
pub mod spec;
pub mod style;
pub mod util;
pub mod writer;

pub use conf::{
    C_FONT_NAME_DEFAULT, C_NUM_FORMAT_GENERAL, EnumStylePresetKey, N_FONT_SIZE_POINTS_DEFAULT,
    N_FONT_SIZE_POINTS_MAX, derive_default_cell_style_presets,
};
pub use font::FontBuilder;
pub use registry::{CellStyle, StyleRegistry};
pub use spec::{
    ColorIndex, EnumBorderDiagonal, EnumBorderStyle, EnumCellValue, EnumFillPattern,
    EnumFontUnderline, EnumFontVerticalOffset, EnumHorizontalAlignment, EnumIndexedColor,
    EnumVerticalAlignment, SpecBorderDiagonal, SpecBorderEdge, SpecBorderSet, SpecCellStyle,
    SpecCellStyleOptions, SpecFont, SpecFontOptions, SpecPalette, SpecPaletteColor,
    SpecXlsxReport, XlsxStyleError,
};
pub use style::CellStyleBuilder;
pub use util::{parse_cell_style_presets_json, sanitize_sheet_name};
pub use writer::{CellValueSink, SheetWriter, XlsxWriter};
