//! Stateless helper utilities shared by builders, registry and writer.

use std::collections::BTreeMap;

use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, FormatDiagonalBorder, FormatPattern, FormatScript,
    FormatUnderline,
};

use crate::conf::{
    C_NUM_FORMAT_GENERAL, C_SHEET_NAME_FALLBACK, C_SHEET_NAME_RESERVED, N_COLOR_INDEX_AUTOMATIC,
    N_FONT_SIZE_POINTS_MAX, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    N_NUM_FORMAT_SECTIONS_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::spec::{
    ColorIndex, EnumBorderDiagonal, EnumBorderStyle, EnumFillPattern, EnumFontUnderline,
    EnumFontVerticalOffset, EnumHorizontalAlignment, EnumVerticalAlignment, SpecCellStyle,
    SpecCellStyleOptions, SpecPalette, XlsxStyleError,
};

////////////////////////////////////////////////////////////////////////////////
// #region Validation

/// Validate a font size in points.
pub fn validate_font_size(size_in_points: i64) -> Result<u16, XlsxStyleError> {
    if size_in_points < 1 || size_in_points > i64::from(N_FONT_SIZE_POINTS_MAX) {
        return Err(XlsxStyleError::invalid(format!(
            "font size must be within 1..={N_FONT_SIZE_POINTS_MAX} points, got {size_in_points}"
        )));
    }
    Ok(size_in_points as u16)
}

/// Validate a typeface name; surrounding whitespace is trimmed.
pub fn validate_font_name(name: &str) -> Result<String, XlsxStyleError> {
    let c_name = name.trim();
    if c_name.is_empty() {
        return Err(XlsxStyleError::invalid("font name must not be empty"));
    }
    Ok(c_name.to_string())
}

/// Validate a raw palette index.
pub fn validate_color_index(index: u16) -> Result<(), XlsxStyleError> {
    if index > N_COLOR_INDEX_AUTOMATIC {
        return Err(XlsxStyleError::invalid(format!(
            "palette index must be within 0..={N_COLOR_INDEX_AUTOMATIC}, got {index}"
        )));
    }
    Ok(())
}

/// Structural check of a number format pattern.
///
/// Rejects empty patterns, unterminated quotes, unbalanced `[...]` blocks,
/// dangling `\`, `_` or `*` escapes and more than four sections.
pub fn validate_num_format(num_format: &str) -> Result<(), XlsxStyleError> {
    if num_format.trim().is_empty() {
        return Err(XlsxStyleError::invalid("number format must not be empty"));
    }

    let mut n_sections = 1usize;
    let mut if_in_quote = false;
    let mut if_in_bracket = false;
    let mut chars = num_format.chars();

    while let Some(chr) = chars.next() {
        if if_in_quote {
            if chr == '"' {
                if_in_quote = false;
            }
            continue;
        }
        if if_in_bracket {
            match chr {
                ']' => if_in_bracket = false,
                '[' => {
                    return Err(XlsxStyleError::invalid(format!(
                        "nested '[' in number format: {num_format}"
                    )));
                }
                _ => {}
            }
            continue;
        }
        match chr {
            '"' => if_in_quote = true,
            '[' => if_in_bracket = true,
            ']' => {
                return Err(XlsxStyleError::invalid(format!(
                    "unbalanced ']' in number format: {num_format}"
                )));
            }
            '\\' | '_' | '*' => {
                if chars.next().is_none() {
                    return Err(XlsxStyleError::invalid(format!(
                        "dangling '{chr}' at end of number format: {num_format}"
                    )));
                }
            }
            ';' => n_sections += 1,
            _ => {}
        }
    }

    if if_in_quote {
        return Err(XlsxStyleError::invalid(format!(
            "unterminated quote in number format: {num_format}"
        )));
    }
    if if_in_bracket {
        return Err(XlsxStyleError::invalid(format!(
            "unterminated '[' in number format: {num_format}"
        )));
    }
    if n_sections > N_NUM_FORMAT_SECTIONS_MAX {
        return Err(XlsxStyleError::invalid(format!(
            "number format has {n_sections} sections, at most {N_NUM_FORMAT_SECTIONS_MAX} allowed"
        )));
    }
    Ok(())
}

/// Validate a row height in points.
pub fn validate_row_height(height: f64) -> Result<f64, XlsxStyleError> {
    if !height.is_finite() || height <= 0.0 {
        return Err(XlsxStyleError::invalid(format!(
            "row height must be a positive number of points, got {height}"
        )));
    }
    Ok(height)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNames

/// Make `name` acceptable to Excel as a worksheet name.
///
/// Illegal characters become `replace_to`, surrounding whitespace and
/// apostrophes are stripped, a blank result becomes `Sheet`, the reserved
/// `History` gets a `_` suffix, and the result is capped at 31 characters.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let c_name_replaced = TUP_EXCEL_ILLEGAL
        .iter()
        .fold(name.to_string(), |acc, c_illegal| acc.replace(c_illegal, replace_to));

    let mut c_name = trim_sheet_name(&c_name_replaced).to_string();
    if c_name.is_empty() {
        c_name = C_SHEET_NAME_FALLBACK.to_string();
    }
    if c_name.eq_ignore_ascii_case(C_SHEET_NAME_RESERVED) {
        c_name.push('_');
    }

    // Capping can expose an apostrophe at the new end.
    let c_name_capped: String = c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect();
    trim_sheet_name(&c_name_capped).to_string()
}

fn trim_sheet_name(name: &str) -> &str {
    name.trim_matches(|chr: char| chr.is_whitespace() || chr == '\'')
}

/// Return `name` or the first free `name__N` (N >= 2) not in `is_taken`.
///
/// `is_taken` decides name equality; Excel compares sheet names
/// case-insensitively.
pub fn derive_unique_sheet_name(name: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(name) {
        return name.to_string();
    }

    let base_name: String = name
        .chars()
        .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
        .collect();

    let mut n_idx = 2usize;
    loop {
        let candidate: String = format!("{base_name}__{n_idx}")
            .chars()
            .take(N_LEN_EXCEL_SHEET_NAME_MAX)
            .collect();
        if !is_taken(&candidate) {
            return candidate;
        }
        n_idx += 1;
    }
}

pub fn cast_row_num(value: usize) -> Result<u32, XlsxStyleError> {
    if value >= N_NROWS_EXCEL_MAX {
        return Err(XlsxStyleError::invalid(format!(
            "row index overflow: {value}"
        )));
    }
    u32::try_from(value)
        .map_err(|_| XlsxStyleError::invalid(format!("row index overflow: {value}")))
}

pub fn cast_col_num(value: usize) -> Result<u16, XlsxStyleError> {
    if value >= N_NCOLS_EXCEL_MAX {
        return Err(XlsxStyleError::invalid(format!(
            "column index overflow: {value}"
        )));
    }
    u16::try_from(value)
        .map_err(|_| XlsxStyleError::invalid(format!("column index overflow: {value}")))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Configuration

/// Parse a `{ "name": options, ... }` JSON document into style presets.
pub fn parse_cell_style_presets_json(
    txt: &str,
) -> Result<BTreeMap<String, SpecCellStyleOptions>, XlsxStyleError> {
    let dict_presets: BTreeMap<String, SpecCellStyleOptions> = serde_json::from_str(txt)
        .map_err(|err| XlsxStyleError::InvalidConfig(err.to_string()))?;

    for (name, options) in &dict_presets {
        if let Some(num_format) = &options.number_format {
            validate_num_format(num_format).map_err(|err| {
                XlsxStyleError::InvalidConfig(format!("preset '{name}': {err}"))
            })?;
        }
    }
    Ok(dict_presets)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RendererFormat

/// Convert a style descriptor into a renderer format, resolving palette
/// indices against `palette`.
pub fn derive_rust_xlsx_format(spec: &SpecCellStyle, palette: &SpecPalette) -> Format {
    let font = spec.font();
    let mut format = Format::new()
        .set_font_name(font.name())
        .set_font_size(f64::from(font.size_in_points()))
        .set_font_color(derive_color(font.color(), palette));

    if font.is_bold() {
        format = format.set_bold();
    }
    if font.is_italic() {
        format = format.set_italic();
    }
    if font.is_strikeout() {
        format = format.set_font_strikethrough();
    }
    if font.underline() != EnumFontUnderline::None {
        format = format.set_underline(derive_format_underline(font.underline()));
    }
    if font.vertical_offset() != EnumFontVerticalOffset::None {
        format = format.set_font_script(derive_format_script(font.vertical_offset()));
    }

    if spec.wrap_text() {
        format = format.set_text_wrap();
    }

    match spec.fill_pattern() {
        EnumFillPattern::NoFill => {}
        // The renderer paints solid cells with the background slot.
        EnumFillPattern::Solid => {
            format = format
                .set_pattern(FormatPattern::Solid)
                .set_background_color(derive_color(spec.foreground_color(), palette));
        }
        pattern => {
            format = format
                .set_pattern(derive_format_pattern(pattern))
                .set_foreground_color(derive_color(spec.foreground_color(), palette))
                .set_background_color(derive_color(spec.background_color(), palette));
        }
    }

    let borders = spec.borders();
    if borders.top.style != EnumBorderStyle::None {
        format = format
            .set_border_top(derive_format_border(borders.top.style))
            .set_border_top_color(derive_color(borders.top.color, palette));
    }
    if borders.right.style != EnumBorderStyle::None {
        format = format
            .set_border_right(derive_format_border(borders.right.style))
            .set_border_right_color(derive_color(borders.right.color, palette));
    }
    if borders.bottom.style != EnumBorderStyle::None {
        format = format
            .set_border_bottom(derive_format_border(borders.bottom.style))
            .set_border_bottom_color(derive_color(borders.bottom.color, palette));
    }
    if borders.left.style != EnumBorderStyle::None {
        format = format
            .set_border_left(derive_format_border(borders.left.style))
            .set_border_left_color(derive_color(borders.left.color, palette));
    }
    if borders.diagonal.direction != EnumBorderDiagonal::None
        && borders.diagonal.style != EnumBorderStyle::None
    {
        format = format
            .set_border_diagonal(derive_format_border(borders.diagonal.style))
            .set_border_diagonal_color(derive_color(borders.diagonal.color, palette))
            .set_border_diagonal_type(derive_format_diagonal(borders.diagonal.direction));
    }

    if let Some(align) = derive_format_align(spec.horizontal_alignment()) {
        format = format.set_align(align);
    }
    if let Some(align) = derive_format_valign(spec.vertical_alignment()) {
        format = format.set_align(align);
    }

    if spec.number_format() != C_NUM_FORMAT_GENERAL {
        format = format.set_num_format(spec.number_format());
    }

    format
}

fn derive_color(index: ColorIndex, palette: &SpecPalette) -> Color {
    match palette.rgb(index) {
        Some(rgb) => Color::RGB(rgb),
        None => Color::Automatic,
    }
}

fn derive_format_border(style: EnumBorderStyle) -> FormatBorder {
    match style {
        EnumBorderStyle::None => FormatBorder::None,
        EnumBorderStyle::Thin => FormatBorder::Thin,
        EnumBorderStyle::Medium => FormatBorder::Medium,
        EnumBorderStyle::Dashed => FormatBorder::Dashed,
        EnumBorderStyle::Dotted => FormatBorder::Dotted,
        EnumBorderStyle::Thick => FormatBorder::Thick,
        EnumBorderStyle::Double => FormatBorder::Double,
        EnumBorderStyle::Hair => FormatBorder::Hair,
        EnumBorderStyle::MediumDashed => FormatBorder::MediumDashed,
        EnumBorderStyle::DashDot => FormatBorder::DashDot,
        EnumBorderStyle::MediumDashDot => FormatBorder::MediumDashDot,
        EnumBorderStyle::DashDotDot => FormatBorder::DashDotDot,
        EnumBorderStyle::MediumDashDotDot => FormatBorder::MediumDashDotDot,
        EnumBorderStyle::SlantDashDot => FormatBorder::SlantDashDot,
    }
}

fn derive_format_diagonal(direction: EnumBorderDiagonal) -> FormatDiagonalBorder {
    match direction {
        EnumBorderDiagonal::None => FormatDiagonalBorder::None,
        EnumBorderDiagonal::Forward => FormatDiagonalBorder::BorderUp,
        EnumBorderDiagonal::Backward => FormatDiagonalBorder::BorderDown,
        EnumBorderDiagonal::Both => FormatDiagonalBorder::BorderUpDown,
    }
}

fn derive_format_pattern(pattern: EnumFillPattern) -> FormatPattern {
    match pattern {
        EnumFillPattern::NoFill => FormatPattern::None,
        EnumFillPattern::Solid => FormatPattern::Solid,
        EnumFillPattern::MediumGray => FormatPattern::MediumGray,
        EnumFillPattern::DarkGray => FormatPattern::DarkGray,
        EnumFillPattern::LightGray => FormatPattern::LightGray,
        EnumFillPattern::DarkHorizontal => FormatPattern::DarkHorizontal,
        EnumFillPattern::DarkVertical => FormatPattern::DarkVertical,
        EnumFillPattern::DarkDown => FormatPattern::DarkDown,
        EnumFillPattern::DarkUp => FormatPattern::DarkUp,
        EnumFillPattern::DarkGrid => FormatPattern::DarkGrid,
        EnumFillPattern::DarkTrellis => FormatPattern::DarkTrellis,
        EnumFillPattern::LightHorizontal => FormatPattern::LightHorizontal,
        EnumFillPattern::LightVertical => FormatPattern::LightVertical,
        EnumFillPattern::LightDown => FormatPattern::LightDown,
        EnumFillPattern::LightUp => FormatPattern::LightUp,
        EnumFillPattern::LightGrid => FormatPattern::LightGrid,
        EnumFillPattern::LightTrellis => FormatPattern::LightTrellis,
        EnumFillPattern::Gray125 => FormatPattern::Gray125,
        EnumFillPattern::Gray0625 => FormatPattern::Gray0625,
    }
}

fn derive_format_align(align: EnumHorizontalAlignment) -> Option<FormatAlign> {
    match align {
        EnumHorizontalAlignment::General => None,
        EnumHorizontalAlignment::Left => Some(FormatAlign::Left),
        EnumHorizontalAlignment::Center => Some(FormatAlign::Center),
        EnumHorizontalAlignment::Right => Some(FormatAlign::Right),
        EnumHorizontalAlignment::Fill => Some(FormatAlign::Fill),
        EnumHorizontalAlignment::Justify => Some(FormatAlign::Justify),
        EnumHorizontalAlignment::CenterSelection => Some(FormatAlign::CenterAcross),
        EnumHorizontalAlignment::Distributed => Some(FormatAlign::Distributed),
    }
}

fn derive_format_valign(align: EnumVerticalAlignment) -> Option<FormatAlign> {
    match align {
        EnumVerticalAlignment::None => None,
        EnumVerticalAlignment::Top => Some(FormatAlign::Top),
        EnumVerticalAlignment::Center => Some(FormatAlign::VerticalCenter),
        EnumVerticalAlignment::Bottom => Some(FormatAlign::Bottom),
        EnumVerticalAlignment::Justify => Some(FormatAlign::VerticalJustify),
        EnumVerticalAlignment::Distributed => Some(FormatAlign::VerticalDistributed),
    }
}

fn derive_format_underline(underline: EnumFontUnderline) -> FormatUnderline {
    match underline {
        EnumFontUnderline::None => FormatUnderline::None,
        EnumFontUnderline::Single => FormatUnderline::Single,
        EnumFontUnderline::Double => FormatUnderline::Double,
        EnumFontUnderline::SingleAccounting => FormatUnderline::SingleAccounting,
        EnumFontUnderline::DoubleAccounting => FormatUnderline::DoubleAccounting,
    }
}

fn derive_format_script(offset: EnumFontVerticalOffset) -> FormatScript {
    match offset {
        EnumFontVerticalOffset::None => FormatScript::None,
        EnumFontVerticalOffset::Superscript => FormatScript::Superscript,
        EnumFontVerticalOffset::Subscript => FormatScript::Subscript,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
