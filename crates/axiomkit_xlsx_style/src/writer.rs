//! Workbook writer: style factories, presets, sheets and cell values.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};

use crate::conf::derive_default_cell_style_presets;
use crate::font::FontBuilder;
use crate::registry::{CellStyle, StyleRegistry};
use crate::spec::{
    EnumCellValue, SpecCellStyleOptions, SpecFont, SpecFontOptions, SpecXlsxReport,
    XlsxStyleError,
};
use crate::style::CellStyleBuilder;
use crate::util::{
    cast_col_num, cast_row_num, derive_unique_sheet_name, parse_cell_style_presets_json,
    sanitize_sheet_name, validate_num_format, validate_row_height,
};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueSink

/// Destination for typed cell values.
///
/// Implementors provide one method per [`EnumCellValue`] variant; dispatch
/// over the closed variant happens in [`CellValueSink::write_value`].
/// Row and column indices are zero-based.
pub trait CellValueSink {
    fn write_blank(
        &mut self,
        row: usize,
        col: usize,
        style: Option<&CellStyle>,
    ) -> Result<(), XlsxStyleError>;

    fn write_text(
        &mut self,
        row: usize,
        col: usize,
        value: &str,
        style: Option<&CellStyle>,
    ) -> Result<(), XlsxStyleError>;

    fn write_number(
        &mut self,
        row: usize,
        col: usize,
        value: f64,
        style: Option<&CellStyle>,
    ) -> Result<(), XlsxStyleError>;

    fn write_boolean(
        &mut self,
        row: usize,
        col: usize,
        value: bool,
        style: Option<&CellStyle>,
    ) -> Result<(), XlsxStyleError>;

    fn write_datetime(
        &mut self,
        row: usize,
        col: usize,
        value: &ExcelDateTime,
        style: Option<&CellStyle>,
    ) -> Result<(), XlsxStyleError>;

    fn write_formula(
        &mut self,
        row: usize,
        col: usize,
        formula: &str,
        style: Option<&CellStyle>,
    ) -> Result<(), XlsxStyleError>;

    fn write_value(
        &mut self,
        row: usize,
        col: usize,
        value: &EnumCellValue,
        style: Option<&CellStyle>,
    ) -> Result<(), XlsxStyleError> {
        match value {
            EnumCellValue::Blank => self.write_blank(row, col, style),
            EnumCellValue::Text(val) => self.write_text(row, col, val, style),
            EnumCellValue::Number(val) => self.write_number(row, col, *val, style),
            EnumCellValue::Boolean(val) => self.write_boolean(row, col, *val, style),
            EnumCellValue::DateTime(val) => self.write_datetime(row, col, val, style),
            EnumCellValue::Formula(val) => self.write_formula(row, col, val, style),
        }
    }

    /// Write `values` left to right starting at `(row, col_start)`, applying
    /// `style` to every written cell.
    fn write_row_values(
        &mut self,
        row: usize,
        col_start: usize,
        style: Option<&CellStyle>,
        values: &[EnumCellValue],
    ) -> Result<(), XlsxStyleError> {
        for (n_offset, value) in values.iter().enumerate() {
            self.write_value(row, col_start + n_offset, value, style)?;
        }
        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetWriter

/// Mutable view of one worksheet, borrowed from an [`XlsxWriter`].
pub struct SheetWriter<'a> {
    index: usize,
    worksheet: &'a mut Worksheet,
    registry: &'a StyleRegistry,
}

impl SheetWriter<'_> {
    /// Zero-based sheet position in the workbook.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Set the height of `row` in points.
    pub fn set_row_height(&mut self, row: usize, height: f64) -> Result<(), XlsxStyleError> {
        let height = validate_row_height(height)?;
        self.worksheet.set_row_height(cast_row_num(row)?, height)?;
        Ok(())
    }

    fn derive_format(&self, style: Option<&CellStyle>) -> Option<Format> {
        style.map(|val| self.registry.format_for(val))
    }
}

impl CellValueSink for SheetWriter<'_> {
    /// Blank cells without a style carry nothing and are skipped.
    fn write_blank(
        &mut self,
        row: usize,
        col: usize,
        style: Option<&CellStyle>,
    ) -> Result<(), XlsxStyleError> {
        if let Some(format) = self.derive_format(style) {
            self.worksheet
                .write_blank(cast_row_num(row)?, cast_col_num(col)?, &format)?;
        }
        Ok(())
    }

    fn write_text(
        &mut self,
        row: usize,
        col: usize,
        value: &str,
        style: Option<&CellStyle>,
    ) -> Result<(), XlsxStyleError> {
        let (row, col) = (cast_row_num(row)?, cast_col_num(col)?);
        match self.derive_format(style) {
            Some(format) => self
                .worksheet
                .write_string_with_format(row, col, value, &format)?,
            None => self.worksheet.write_string(row, col, value)?,
        };
        Ok(())
    }

    fn write_number(
        &mut self,
        row: usize,
        col: usize,
        value: f64,
        style: Option<&CellStyle>,
    ) -> Result<(), XlsxStyleError> {
        let (row, col) = (cast_row_num(row)?, cast_col_num(col)?);
        match self.derive_format(style) {
            Some(format) => self
                .worksheet
                .write_number_with_format(row, col, value, &format)?,
            None => self.worksheet.write_number(row, col, value)?,
        };
        Ok(())
    }

    fn write_boolean(
        &mut self,
        row: usize,
        col: usize,
        value: bool,
        style: Option<&CellStyle>,
    ) -> Result<(), XlsxStyleError> {
        let (row, col) = (cast_row_num(row)?, cast_col_num(col)?);
        match self.derive_format(style) {
            Some(format) => self
                .worksheet
                .write_boolean_with_format(row, col, value, &format)?,
            None => self.worksheet.write_boolean(row, col, value)?,
        };
        Ok(())
    }

    fn write_datetime(
        &mut self,
        row: usize,
        col: usize,
        value: &ExcelDateTime,
        style: Option<&CellStyle>,
    ) -> Result<(), XlsxStyleError> {
        let (row, col) = (cast_row_num(row)?, cast_col_num(col)?);
        match self.derive_format(style) {
            Some(format) => self
                .worksheet
                .write_datetime_with_format(row, col, value, &format)?,
            None => self.worksheet.write_datetime(row, col, value)?,
        };
        Ok(())
    }

    fn write_formula(
        &mut self,
        row: usize,
        col: usize,
        formula: &str,
        style: Option<&CellStyle>,
    ) -> Result<(), XlsxStyleError> {
        let (row, col) = (cast_row_num(row)?, cast_col_num(col)?);
        match self.derive_format(style) {
            Some(format) => self
                .worksheet
                .write_formula_with_format(row, col, formula, &format)?,
            None => self.worksheet.write_formula(row, col, formula)?,
        };
        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region XlsxWriter

/// Stateful workbook writer.
///
/// The workbook is buffered in memory until [`Self::close`] is called. All
/// fonts and styles created through the writer are interned in one
/// [`StyleRegistry`].
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    registry: StyleRegistry,
    set_sheet_names_existing: BTreeSet<String>,
    dict_presets: BTreeMap<String, SpecCellStyleOptions>,
    report: SpecXlsxReport,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path, seeded with the default presets.
    pub fn new(path_file_out: impl Into<PathBuf>) -> Self {
        Self {
            path_file_out: path_file_out.into(),
            workbook: Workbook::new(),
            registry: StyleRegistry::new(),
            set_sheet_names_existing: BTreeSet::new(),
            dict_presets: derive_default_cell_style_presets(),
            report: SpecXlsxReport::default(),
            if_closed: false,
        }
    }

    /// Return output file path.
    pub fn file_out(&self) -> &Path {
        &self.path_file_out
    }

    /// Style table shared by every builder this writer creates.
    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    /// Return immutable snapshot of the writer report.
    pub fn report(&self) -> SpecXlsxReport {
        self.report.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), XlsxStyleError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        tracing::debug!(
            path = %self.path_file_out.display(),
            n_sheets = self.report.sheets.len(),
            "saved workbook"
        );
        Ok(())
    }

    /// Render the workbook into an in-memory `.xlsx` payload.
    pub fn save_to_buffer(&mut self) -> Result<Vec<u8>, XlsxStyleError> {
        Ok(self.workbook.save_to_buffer()?)
    }

    pub fn create_font_builder(&self) -> FontBuilder {
        FontBuilder::new(self.registry.clone())
    }

    pub fn create_cell_style_builder(&self) -> CellStyleBuilder {
        CellStyleBuilder::new(self.registry.clone())
    }

    pub fn create_cell_style_builder_with(
        &self,
        options: &SpecCellStyleOptions,
    ) -> Result<CellStyleBuilder, XlsxStyleError> {
        CellStyleBuilder::with_options(self.registry.clone(), options)
    }

    /// One-shot style build from an options record.
    pub fn create_cell_style(
        &self,
        options: &SpecCellStyleOptions,
    ) -> Result<CellStyle, XlsxStyleError> {
        Ok(self.create_cell_style_builder_with(options)?.build())
    }

    /// Find or create a font matching `options`.
    pub fn create_font(&self, options: SpecFontOptions) -> Result<SpecFont, XlsxStyleError> {
        let font = SpecFont::try_from(options)?;
        self.registry.register_font(&font);
        Ok(font)
    }

    /// Register or replace a named style preset.
    pub fn register_preset(
        &mut self,
        name: &str,
        options: SpecCellStyleOptions,
    ) -> Result<(), XlsxStyleError> {
        if let Some(num_format) = &options.number_format {
            validate_num_format(num_format)?;
        }
        self.dict_presets.insert(name.to_string(), options);
        Ok(())
    }

    /// Register every preset in `dict_presets`; stops at the first invalid one.
    pub fn register_presets(
        &mut self,
        dict_presets: BTreeMap<String, SpecCellStyleOptions>,
    ) -> Result<(), XlsxStyleError> {
        for (name, options) in dict_presets {
            self.register_preset(&name, options)?;
        }
        Ok(())
    }

    /// Register presets from a `{ "name": options }` JSON document.
    pub fn register_presets_json(&mut self, txt: &str) -> Result<(), XlsxStyleError> {
        let dict_presets = parse_cell_style_presets_json(txt)?;
        self.register_presets(dict_presets)
    }

    /// Registered preset names in sorted order.
    pub fn preset_names(&self) -> Vec<String> {
        self.dict_presets.keys().cloned().collect()
    }

    pub fn create_cell_style_from_preset(&self, name: &str) -> Result<CellStyle, XlsxStyleError> {
        let options = self
            .dict_presets
            .get(name)
            .ok_or_else(|| XlsxStyleError::UnknownPreset(name.to_string()))?;
        self.create_cell_style(options)
    }

    /// Append a worksheet and return its index.
    ///
    /// The name is sanitized and de-duplicated ignoring case; a rewritten name
    /// is recorded as a report warning. A name the engine still rejects
    /// leaves the workbook untouched.
    pub fn add_sheet(&mut self, name: &str) -> Result<usize, XlsxStyleError> {
        self.validate_open()?;

        let c_name_clean = sanitize_sheet_name(name, "_");
        let c_name = derive_unique_sheet_name(&c_name_clean, |candidate| {
            self.set_sheet_names_existing
                .contains(&candidate.to_lowercase())
        });
        if c_name != name {
            tracing::warn!(requested = name, assigned = %c_name, "sheet name rewritten");
            self.report
                .warn(format!("Sheet name '{name}' was written as '{c_name}'."));
        }

        let mut worksheet = Worksheet::new();
        worksheet.set_name(&c_name)?;
        self.workbook.push_worksheet(worksheet);
        self.set_sheet_names_existing.insert(c_name.to_lowercase());
        self.report.sheets.push(c_name);
        Ok(self.report.sheets.len() - 1)
    }

    /// Index of the sheet whose final name is `name`, ignoring case.
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        let c_name_lower = name.to_lowercase();
        self.report
            .sheets
            .iter()
            .position(|val| val.to_lowercase() == c_name_lower)
    }

    /// Borrow the sheet at `index` for writing.
    pub fn sheet(&mut self, index: usize) -> Result<SheetWriter<'_>, XlsxStyleError> {
        self.validate_open()?;
        if index >= self.report.sheets.len() {
            return Err(XlsxStyleError::SheetNotFound(index));
        }

        let worksheet = self
            .workbook
            .worksheet_from_index(index)
            .map_err(|_| XlsxStyleError::SheetNotFound(index))?;
        Ok(SheetWriter {
            index,
            worksheet,
            registry: &self.registry,
        })
    }

    pub fn set_row_height(
        &mut self,
        sheet: usize,
        row: usize,
        height: f64,
    ) -> Result<(), XlsxStyleError> {
        self.sheet(sheet)?.set_row_height(row, height)
    }

    fn validate_open(&self) -> Result<(), XlsxStyleError> {
        if self.if_closed {
            return Err(XlsxStyleError::WriterClosed);
        }
        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
