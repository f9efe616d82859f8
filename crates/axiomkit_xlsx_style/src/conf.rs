//! XLSX style constants and default preset factories.

use std::collections::BTreeMap;

use crate::spec::{
    ColorIndex, EnumBorderStyle, EnumHorizontalAlignment, EnumVerticalAlignment, SpecBorderSet,
    SpecCellStyleOptions, SpecFont,
};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];
/// Name given to a sheet whose requested name sanitizes to nothing.
pub const C_SHEET_NAME_FALLBACK: &str = "Sheet";
/// Sheet name Excel reserves (compared case-insensitively).
pub const C_SHEET_NAME_RESERVED: &str = "History";

/// Typeface used by fresh font builders and the document default font.
pub const C_FONT_NAME_DEFAULT: &str = "Arial";
/// Point size used by fresh font builders and the document default font.
pub const N_FONT_SIZE_POINTS_DEFAULT: u16 = 12;
/// Largest font size Excel renders.
pub const N_FONT_SIZE_POINTS_MAX: u16 = 409;

/// Number format applied when none is configured.
pub const C_NUM_FORMAT_GENERAL: &str = "General";
/// Positive;negative;zero;text.
pub const N_NUM_FORMAT_SECTIONS_MAX: usize = 4;

/// Palette slot of the renderer-chosen system colour.
pub const N_COLOR_INDEX_AUTOMATIC: u16 = 64;

/// Legacy 64-slot indexed palette as `0xRRGGBB`.
///
/// Slots 0-7 repeat the eight basic colours; 8-63 are the classic 56-colour
/// workbook palette.
pub const ARR_PALETTE_RGB_DEFAULT: [u32; 64] = [
    0x000000, 0xFFFFFF, 0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF, // 0-7
    0x000000, 0xFFFFFF, 0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF, // 8-15
    0x800000, 0x008000, 0x000080, 0x808000, 0x800080, 0x008080, 0xC0C0C0, 0x808080, // 16-23
    0x9999FF, 0x993366, 0xFFFFCC, 0xCCFFFF, 0x660066, 0xFF8080, 0x0066CC, 0xCCCCFF, // 24-31
    0x000080, 0xFF00FF, 0xFFFF00, 0x00FFFF, 0x800080, 0x800000, 0x008080, 0x0000FF, // 32-39
    0x00CCFF, 0xCCFFFF, 0xCCFFCC, 0xFFFF99, 0x99CCFF, 0xFF99CC, 0xCC99FF, 0xFFCC99, // 40-47
    0x3366FF, 0x33CCCC, 0x99CC00, 0xFFCC00, 0xFF9900, 0xFF6600, 0x666699, 0x969696, // 48-55
    0x003366, 0x339966, 0x003300, 0x333300, 0x993300, 0x993366, 0x333399, 0x333333, // 56-63
];

/// Canonical style preset keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumStylePresetKey {
    /// Generic text cell style.
    Text,
    /// Integer number style.
    Integer,
    /// Decimal number style.
    Decimal,
    /// Scientific number style.
    Scientific,
    /// Header cell style.
    Header,
}

impl EnumStylePresetKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Scientific => "scientific",
            Self::Header => "header",
        }
    }
}

/// Build default named style presets used by [`crate::writer::XlsxWriter`].
pub fn derive_default_cell_style_presets() -> BTreeMap<String, SpecCellStyleOptions> {
    let cfg_base_options = SpecCellStyleOptions {
        horizontal_alignment: EnumHorizontalAlignment::Left,
        vertical_alignment: EnumVerticalAlignment::Center,
        border: Some(SpecBorderSet::uniform(
            EnumBorderStyle::Thin,
            ColorIndex::BLACK,
        )),
        ..SpecCellStyleOptions::new(SpecFont::default())
    };

    let mut dict_presets = BTreeMap::new();
    dict_presets.insert(
        EnumStylePresetKey::Text.as_str().to_string(),
        cfg_base_options.clone(),
    );
    dict_presets.insert(
        EnumStylePresetKey::Header.as_str().to_string(),
        SpecCellStyleOptions {
            font: SpecFont {
                bold: true,
                ..SpecFont::default()
            },
            horizontal_alignment: EnumHorizontalAlignment::Center,
            ..cfg_base_options.clone()
        },
    );
    dict_presets.insert(
        EnumStylePresetKey::Integer.as_str().to_string(),
        SpecCellStyleOptions {
            number_format: Some("0".to_string()),
            ..cfg_base_options.clone()
        },
    );
    dict_presets.insert(
        EnumStylePresetKey::Decimal.as_str().to_string(),
        SpecCellStyleOptions {
            number_format: Some("0.0000".to_string()),
            ..cfg_base_options.clone()
        },
    );
    dict_presets.insert(
        EnumStylePresetKey::Scientific.as_str().to_string(),
        SpecCellStyleOptions {
            number_format: Some("0.00E+0".to_string()),
            ..cfg_base_options
        },
    );

    dict_presets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_presets_cover_every_key() {
        let dict_presets = derive_default_cell_style_presets();
        for key in [
            EnumStylePresetKey::Text,
            EnumStylePresetKey::Integer,
            EnumStylePresetKey::Decimal,
            EnumStylePresetKey::Scientific,
            EnumStylePresetKey::Header,
        ] {
            assert!(dict_presets.contains_key(key.as_str()), "{}", key.as_str());
        }

        let header = &dict_presets["header"];
        assert!(header.font.is_bold());
        assert_eq!(
            header.horizontal_alignment,
            EnumHorizontalAlignment::Center
        );
        assert_eq!(dict_presets["text"].number_format, None);
        assert_eq!(
            dict_presets["scientific"].number_format.as_deref(),
            Some("0.00E+0")
        );
    }

    #[test]
    fn palette_basic_slots_match_named_slots() {
        assert_eq!(ARR_PALETTE_RGB_DEFAULT[..8], ARR_PALETTE_RGB_DEFAULT[8..16]);
        assert_eq!(ARR_PALETTE_RGB_DEFAULT[22], 0xC0C0C0);
    }
}
