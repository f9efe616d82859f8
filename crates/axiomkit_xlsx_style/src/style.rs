//! Mutable cell style accumulator.
//!
//! A [`CellStyleBuilder`] collects wrap, fill, border, alignment and number
//! format settings plus one font. [`CellStyleBuilder::build`] freezes the
//! current state into a [`CellStyle`] registered with the owning document;
//! the builder stays usable and later mutations never reach styles built
//! earlier.
//!
//! Border setters only ever touch the edges they name. The two-edge
//! composites are defined as the matching single-edge setters applied in
//! order, so `border_top_right(e)` equals `border_top(e)` then
//! `border_right(e)`.

use crate::conf::C_NUM_FORMAT_GENERAL;
use crate::font::FontBuilder;
use crate::registry::{CellStyle, StyleRegistry};
use crate::spec::{
    ColorIndex, EnumFillPattern, EnumHorizontalAlignment, EnumVerticalAlignment,
    SpecBorderDiagonal, SpecBorderEdge, SpecBorderSet, SpecCellStyle, SpecCellStyleOptions,
    SpecFont, XlsxStyleError,
};
use crate::util::validate_num_format;

/// Chainable cell style builder bound to one document.
#[derive(Debug, Clone)]
pub struct CellStyleBuilder {
    registry: StyleRegistry,
    /// `None` resolves to the document default font at build time.
    font: Option<SpecFont>,
    wrap_text: bool,
    fill_pattern: EnumFillPattern,
    foreground_color: ColorIndex,
    background_color: ColorIndex,
    borders: SpecBorderSet,
    horizontal_alignment: EnumHorizontalAlignment,
    vertical_alignment: EnumVerticalAlignment,
    number_format: String,
}

impl CellStyleBuilder {
    /// Builder with baseline attributes and no explicit font.
    pub fn new(registry: StyleRegistry) -> Self {
        Self {
            registry,
            font: None,
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

    /// Equivalent to [`Self::new`] followed by [`Self::apply_options`].
    pub fn with_options(
        registry: StyleRegistry,
        options: &SpecCellStyleOptions,
    ) -> Result<Self, XlsxStyleError> {
        let mut builder = Self::new(registry);
        builder.apply_options(options)?;
        Ok(builder)
    }

    /// Apply a whole options record.
    ///
    /// Order: font, wrap, foreground, background, fill pattern, alignments,
    /// then border and number format when present. Absent border or number
    /// format keeps the current value.
    pub fn apply_options(
        &mut self,
        options: &SpecCellStyleOptions,
    ) -> Result<&mut Self, XlsxStyleError> {
        if let Some(num_format) = &options.number_format {
            validate_num_format(num_format)?;
        }

        self.font(options.font.clone())
            .wrap_text(options.wrap_text)
            .foreground_color(options.foreground_color)
            .background_color(options.background_color)
            .fill_pattern(options.fill_pattern)
            .horizontal_alignment(options.horizontal_alignment)
            .vertical_alignment(options.vertical_alignment);
        if let Some(border) = options.border {
            self.border(border);
        }
        if let Some(num_format) = &options.number_format {
            self.number_format = num_format.clone();
        }
        Ok(self)
    }

    /// Overwrite every attribute, font included, with those of `spec`.
    pub fn clone_from_style(&mut self, spec: &SpecCellStyle) -> &mut Self {
        self.font = Some(spec.font.clone());
        self.wrap_text = spec.wrap_text;
        self.fill_pattern = spec.fill_pattern;
        self.foreground_color = spec.foreground_color;
        self.background_color = spec.background_color;
        self.borders = spec.borders;
        self.horizontal_alignment = spec.horizontal_alignment;
        self.vertical_alignment = spec.vertical_alignment;
        self.number_format = spec.number_format.clone();
        self
    }

    pub fn clone_from_cell_style(&mut self, style: &CellStyle) -> &mut Self {
        self.clone_from_style(style.spec())
    }

    /// Overwrite every attribute with the current, font-resolved state of
    /// `other`.
    pub fn clone_from_builder(&mut self, other: &CellStyleBuilder) -> &mut Self {
        let spec = other.snapshot();
        self.clone_from_style(&spec)
    }

    pub fn font(&mut self, font: SpecFont) -> &mut Self {
        self.font = Some(font);
        self
    }

    /// Attach the frozen state of `builder` as this style's font.
    pub fn font_from_builder(&mut self, builder: &FontBuilder) -> &mut Self {
        self.font(builder.build())
    }

    pub fn wrap_text(&mut self, enable: bool) -> &mut Self {
        self.wrap_text = enable;
        self
    }

    /// Pattern foreground colour; the visible colour of a solid fill.
    pub fn foreground_color(&mut self, color: impl Into<ColorIndex>) -> &mut Self {
        self.foreground_color = color.into();
        self
    }

    pub fn foreground_color_index(&mut self, index: u16) -> Result<&mut Self, XlsxStyleError> {
        Ok(self.foreground_color(ColorIndex::new(index)?))
    }

    pub fn background_color(&mut self, color: impl Into<ColorIndex>) -> &mut Self {
        self.background_color = color.into();
        self
    }

    pub fn background_color_index(&mut self, index: u16) -> Result<&mut Self, XlsxStyleError> {
        Ok(self.background_color(ColorIndex::new(index)?))
    }

    pub fn fill_pattern(&mut self, pattern: EnumFillPattern) -> &mut Self {
        self.fill_pattern = pattern;
        self
    }

    pub fn horizontal_alignment(&mut self, alignment: EnumHorizontalAlignment) -> &mut Self {
        self.horizontal_alignment = alignment;
        self
    }

    pub fn vertical_alignment(&mut self, alignment: EnumVerticalAlignment) -> &mut Self {
        self.vertical_alignment = alignment;
        self
    }

    /// Number format pattern such as `#,##0.00` or `dd/mm/yyyy`.
    ///
    /// Structurally malformed patterns fail here and leave the builder as is.
    pub fn number_format(&mut self, num_format: &str) -> Result<&mut Self, XlsxStyleError> {
        validate_num_format(num_format)?;
        self.number_format = num_format.to_string();
        Ok(self)
    }

    /// Replace all four edges and the diagonal.
    pub fn border(&mut self, borders: SpecBorderSet) -> &mut Self {
        self.borders = borders;
        self
    }

    /// Same edge on top, right, bottom and left; diagonal untouched.
    pub fn border_all(&mut self, edge: SpecBorderEdge) -> &mut Self {
        self.border_top(edge)
            .border_right(edge)
            .border_bottom(edge)
            .border_left(edge)
    }

    pub fn border_top(&mut self, edge: SpecBorderEdge) -> &mut Self {
        self.borders.top = edge;
        self
    }

    pub fn border_right(&mut self, edge: SpecBorderEdge) -> &mut Self {
        self.borders.right = edge;
        self
    }

    pub fn border_bottom(&mut self, edge: SpecBorderEdge) -> &mut Self {
        self.borders.bottom = edge;
        self
    }

    pub fn border_left(&mut self, edge: SpecBorderEdge) -> &mut Self {
        self.borders.left = edge;
        self
    }

    pub fn border_diagonal(&mut self, diagonal: SpecBorderDiagonal) -> &mut Self {
        self.borders.diagonal = diagonal;
        self
    }

    pub fn border_top_right(&mut self, edge: SpecBorderEdge) -> &mut Self {
        self.border_top(edge).border_right(edge)
    }

    pub fn border_top_left(&mut self, edge: SpecBorderEdge) -> &mut Self {
        self.border_top(edge).border_left(edge)
    }

    pub fn border_bottom_right(&mut self, edge: SpecBorderEdge) -> &mut Self {
        self.border_bottom(edge).border_right(edge)
    }

    pub fn border_bottom_left(&mut self, edge: SpecBorderEdge) -> &mut Self {
        self.border_bottom(edge).border_left(edge)
    }

    pub fn border_top_bottom(&mut self, edge: SpecBorderEdge) -> &mut Self {
        self.border_top(edge).border_bottom(edge)
    }

    pub fn border_left_right(&mut self, edge: SpecBorderEdge) -> &mut Self {
        self.border_left(edge).border_right(edge)
    }

    /// Current state with the font resolved, without registering it.
    pub fn snapshot(&self) -> SpecCellStyle {
        SpecCellStyle {
            font: self
                .font
                .clone()
                .unwrap_or_else(|| self.registry.default_font()),
            wrap_text: self.wrap_text,
            fill_pattern: self.fill_pattern,
            foreground_color: self.foreground_color,
            background_color: self.background_color,
            borders: self.borders,
            horizontal_alignment: self.horizontal_alignment,
            vertical_alignment: self.vertical_alignment,
            number_format: self.number_format.clone(),
        }
    }

    /// Freeze the current state and register it with the document.
    pub fn build(&self) -> CellStyle {
        self.registry.register_style(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::spec::{
        EnumBorderDiagonal, EnumBorderStyle, EnumFontUnderline, EnumIndexedColor,
    };

    fn derive_builder() -> CellStyleBuilder {
        CellStyleBuilder::new(StyleRegistry::new())
    }

    fn derive_edge(style: EnumBorderStyle, color: EnumIndexedColor) -> SpecBorderEdge {
        SpecBorderEdge::new(style, color)
    }

    #[test]
    fn build_without_setters_yields_documented_defaults() {
        let style = derive_builder().build();
        let spec = style.spec();

        assert_eq!(spec.font(), &SpecFont::default());
        assert_eq!(spec.font().name(), "Arial");
        assert_eq!(spec.font().size_in_points(), 12);
        assert!(!spec.wrap_text());
        assert_eq!(spec.fill_pattern(), EnumFillPattern::NoFill);
        assert_eq!(spec.foreground_color(), ColorIndex::BLACK);
        assert_eq!(spec.background_color(), ColorIndex::WHITE);
        assert_eq!(spec.horizontal_alignment(), EnumHorizontalAlignment::General);
        assert_eq!(spec.vertical_alignment(), EnumVerticalAlignment::None);
        assert_eq!(spec.number_format(), "General");

        let borders = spec.borders();
        for edge in [borders.top, borders.right, borders.bottom, borders.left] {
            assert_eq!(edge.style, EnumBorderStyle::None);
        }
        assert_eq!(borders.diagonal.direction, EnumBorderDiagonal::None);
        assert_eq!(borders.diagonal.style, EnumBorderStyle::None);

        // The baseline style is the document's slot 0.
        assert_eq!(style.slot(), 0);
    }

    #[test]
    fn unset_font_resolves_to_document_default_font() {
        let registry = StyleRegistry::new();
        let font_default = SpecFont {
            name: "Calibri".to_string(),
            size_in_points: 11,
            ..SpecFont::default()
        };
        registry.set_default_font(font_default.clone());

        let style = CellStyleBuilder::new(registry).wrap_text(true).build();
        assert_eq!(style.spec().font(), &font_default);
    }

    #[test]
    fn built_style_is_independent_of_later_mutation() {
        let mut builder = derive_builder();
        builder
            .fill_pattern(EnumFillPattern::Solid)
            .foreground_color(EnumIndexedColor::LightYellow);
        let style_1 = builder.build();
        let spec_1 = style_1.spec().clone();

        let mut font_builder = FontBuilder::new(StyleRegistry::new());
        font_builder.color(EnumIndexedColor::Red);
        builder.font_from_builder(&font_builder);
        let style_2 = builder.build();

        assert_eq!(style_1.spec(), &spec_1);
        assert_eq!(style_1.spec().font().color(), ColorIndex::BLACK);
        assert_eq!(
            style_2.spec().font().color(),
            ColorIndex::from(EnumIndexedColor::Red)
        );

        let mut spec_expected = spec_1;
        spec_expected.font.color = EnumIndexedColor::Red.into();
        assert_eq!(style_2.spec(), &spec_expected);
        assert_ne!(style_1.slot(), style_2.slot());
    }

    #[test]
    fn mutating_source_font_builder_does_not_reach_built_style() {
        let registry = StyleRegistry::new();
        let mut font_builder = FontBuilder::new(registry.clone());
        font_builder.bold(true);

        let style = CellStyleBuilder::new(registry)
            .font_from_builder(&font_builder)
            .build();
        font_builder.bold(false).underline(EnumFontUnderline::Single);

        assert!(style.spec().font().is_bold());
        assert_eq!(style.spec().font().underline(), EnumFontUnderline::None);
    }

    #[test]
    fn clone_from_built_style_reproduces_it() {
        let registry = StyleRegistry::new();
        let mut builder_1 = CellStyleBuilder::new(registry.clone());
        builder_1
            .wrap_text(true)
            .fill_pattern(EnumFillPattern::LightGrid)
            .foreground_color(EnumIndexedColor::SeaGreen)
            .background_color(EnumIndexedColor::Tan)
            .border_top_left(derive_edge(EnumBorderStyle::Dashed, EnumIndexedColor::Plum))
            .border_diagonal(SpecBorderDiagonal::new(
                EnumBorderDiagonal::Both,
                EnumBorderStyle::Hair,
                EnumIndexedColor::Grey50Percent,
            ))
            .horizontal_alignment(EnumHorizontalAlignment::Right)
            .vertical_alignment(EnumVerticalAlignment::Top)
            .number_format("#,##0.00")
            .expect("format");
        let style_1 = builder_1.build();

        let mut builder_2 = CellStyleBuilder::new(registry);
        builder_2.clone_from_cell_style(&style_1);
        let style_2 = builder_2.build();

        assert_eq!(style_2.spec(), style_1.spec());
        assert_eq!(style_2, style_1);
    }

    #[test]
    fn clone_from_builder_copies_resolved_state() {
        let registry = StyleRegistry::new();
        let mut source = CellStyleBuilder::new(registry.clone());
        source
            .wrap_text(true)
            .border_all(derive_edge(EnumBorderStyle::Medium, EnumIndexedColor::Blue));

        let mut target = CellStyleBuilder::new(registry);
        target
            .horizontal_alignment(EnumHorizontalAlignment::Center)
            .clone_from_builder(&source);
        source.wrap_text(false);

        assert_eq!(target.snapshot(), {
            let mut spec = source.snapshot();
            spec.wrap_text = true;
            spec
        });
    }

    #[test]
    fn border_all_equals_four_single_edge_setters() {
        let edge = derive_edge(EnumBorderStyle::Thick, EnumIndexedColor::DarkRed);
        let diagonal = SpecBorderDiagonal::new(
            EnumBorderDiagonal::Forward,
            EnumBorderStyle::Thin,
            EnumIndexedColor::Black,
        );

        let mut builder_all = derive_builder();
        builder_all.border_diagonal(diagonal).border_all(edge);

        let mut builder_single = derive_builder();
        builder_single
            .border_diagonal(diagonal)
            .border_top(edge)
            .border_right(edge)
            .border_bottom(edge)
            .border_left(edge);

        assert_eq!(builder_all.build(), builder_single.build());
        assert_eq!(builder_all.snapshot().borders().diagonal, diagonal);
    }

    #[test]
    fn single_edge_setter_leaves_other_edges_alone() {
        let mut builder = derive_builder();
        let edge_thin = derive_edge(EnumBorderStyle::Thin, EnumIndexedColor::Black);
        let edge_double = derive_edge(EnumBorderStyle::Double, EnumIndexedColor::Red);
        builder.border_all(edge_thin).border_bottom(edge_double);

        let borders = *builder.snapshot().borders();
        assert_eq!(borders.top, edge_thin);
        assert_eq!(borders.right, edge_thin);
        assert_eq!(borders.left, edge_thin);
        assert_eq!(borders.bottom, edge_double);
    }

    #[test]
    fn border_set_replaces_diagonal_too() {
        let mut builder = derive_builder();
        builder.border_diagonal(SpecBorderDiagonal::new(
            EnumBorderDiagonal::Both,
            EnumBorderStyle::Thin,
            EnumIndexedColor::Black,
        ));
        builder.border(SpecBorderSet::uniform(
            EnumBorderStyle::Medium,
            EnumIndexedColor::Green,
        ));
        let borders = *builder.snapshot().borders();
        assert_eq!(borders.diagonal.direction, EnumBorderDiagonal::None);
        assert_eq!(borders.left.style, EnumBorderStyle::Medium);
    }

    #[test]
    fn apply_options_without_border_keeps_existing_border() {
        let edge = derive_edge(EnumBorderStyle::Dotted, EnumIndexedColor::Violet);
        let mut builder = derive_builder();
        builder.border_all(edge).wrap_text(false);

        let font = SpecFont {
            italic: true,
            ..SpecFont::default()
        };
        let options = SpecCellStyleOptions {
            wrap_text: true,
            ..SpecCellStyleOptions::new(font.clone())
        };
        builder.apply_options(&options).expect("apply options");

        let spec = builder.snapshot();
        assert_eq!(spec.font(), &font);
        assert!(spec.wrap_text());
        assert_eq!(spec.borders().top, edge);
        assert_eq!(spec.borders().left, edge);
    }

    #[test]
    fn apply_options_with_border_overwrites_full_set() {
        let mut builder = derive_builder();
        builder
            .border_all(derive_edge(EnumBorderStyle::Dotted, EnumIndexedColor::Violet))
            .border_diagonal(SpecBorderDiagonal::new(
                EnumBorderDiagonal::Backward,
                EnumBorderStyle::Thin,
                EnumIndexedColor::Black,
            ));

        let border = SpecBorderSet {
            bottom: derive_edge(EnumBorderStyle::Double, EnumIndexedColor::Black),
            ..SpecBorderSet::default()
        };
        let options = SpecCellStyleOptions {
            wrap_text: true,
            border: Some(border),
            ..SpecCellStyleOptions::new(SpecFont::default())
        };
        builder.apply_options(&options).expect("apply options");

        assert_eq!(builder.snapshot().borders(), &border);
    }

    #[test]
    fn apply_options_rejects_bad_number_format_without_side_effects() {
        let mut builder = derive_builder();
        let spec_before = builder.snapshot();
        let options = SpecCellStyleOptions {
            wrap_text: true,
            number_format: Some("\"open".to_string()),
            ..SpecCellStyleOptions::new(SpecFont::default())
        };

        assert!(builder.apply_options(&options).is_err());
        assert_eq!(builder.snapshot(), spec_before);
    }

    #[test]
    fn with_options_equals_new_then_apply() {
        let registry = StyleRegistry::new();
        let options = SpecCellStyleOptions {
            fill_pattern: EnumFillPattern::Solid,
            foreground_color: EnumIndexedColor::PaleBlue.into(),
            number_format: Some("0.0%".to_string()),
            ..SpecCellStyleOptions::new(SpecFont::default())
        };

        let style_1 = CellStyleBuilder::with_options(registry.clone(), &options)
            .expect("builder")
            .build();
        let style_2 = CellStyleBuilder::new(registry)
            .apply_options(&options)
            .expect("apply options")
            .build();
        assert_eq!(style_1, style_2);
        assert_eq!(style_1.spec().number_format(), "0.0%");
    }

    #[test]
    fn color_overloads_produce_equal_styles() {
        let registry = StyleRegistry::new();

        let style_by_index = CellStyleBuilder::new(registry.clone())
            .foreground_color_index(10)
            .expect("red")
            .build();
        let style_by_name = CellStyleBuilder::new(registry.clone())
            .foreground_color(EnumIndexedColor::Red)
            .build();
        let style_by_object = CellStyleBuilder::new(registry.clone())
            .foreground_color(registry.palette_color(EnumIndexedColor::Red))
            .build();

        assert_eq!(style_by_index, style_by_name);
        assert_eq!(style_by_index, style_by_object);
        assert_eq!(style_by_index.spec(), style_by_object.spec());
    }

    #[test]
    fn raw_color_index_out_of_range_is_rejected() {
        let mut builder = derive_builder();
        assert!(matches!(
            builder.background_color_index(65),
            Err(XlsxStyleError::InvalidArgument(_))
        ));
        assert_eq!(builder.snapshot().background_color(), ColorIndex::WHITE);
    }

    #[test]
    fn malformed_number_format_is_rejected_eagerly() {
        let mut builder = derive_builder();
        builder.number_format("0.00").expect("format");
        assert!(builder.number_format("[Red").is_err());
        assert_eq!(builder.snapshot().number_format(), "0.00");
    }

    #[test]
    fn repeated_builds_share_registered_slot() {
        let registry = StyleRegistry::new();
        let mut builder = CellStyleBuilder::new(registry.clone());
        builder.wrap_text(true);
        let style_1 = builder.build();
        let style_2 = builder.build();

        assert_eq!(style_1, style_2);
        assert_eq!(registry.style_count(), 2);
    }

    fn strategy_border_style() -> impl Strategy<Value = EnumBorderStyle> {
        proptest::sample::select(vec![
            EnumBorderStyle::None,
            EnumBorderStyle::Thin,
            EnumBorderStyle::Medium,
            EnumBorderStyle::Dashed,
            EnumBorderStyle::Dotted,
            EnumBorderStyle::Thick,
            EnumBorderStyle::Double,
            EnumBorderStyle::Hair,
            EnumBorderStyle::MediumDashed,
            EnumBorderStyle::DashDot,
            EnumBorderStyle::MediumDashDot,
            EnumBorderStyle::DashDotDot,
            EnumBorderStyle::MediumDashDotDot,
            EnumBorderStyle::SlantDashDot,
        ])
    }

    fn strategy_edge() -> impl Strategy<Value = SpecBorderEdge> {
        (strategy_border_style(), 0u16..=64).prop_map(|(style, n_color)| {
            SpecBorderEdge::new(style, ColorIndex::new(n_color).expect("in range"))
        })
    }

    proptest! {
        #[test]
        fn composite_border_setters_match_their_composition(
            edge_a in strategy_edge(),
            edge_b in strategy_edge(),
        ) {
            let mut builder_composite = derive_builder();
            builder_composite
                .border_all(edge_a)
                .border_top_right(edge_b)
                .border_bottom_left(edge_b);

            let mut builder_single = derive_builder();
            builder_single
                .border_top(edge_a)
                .border_right(edge_a)
                .border_bottom(edge_a)
                .border_left(edge_a)
                .border_top(edge_b)
                .border_right(edge_b)
                .border_bottom(edge_b)
                .border_left(edge_b);

            prop_assert_eq!(builder_composite.snapshot(), builder_single.snapshot());
        }

        #[test]
        fn disjoint_edge_composites_commute(
            edge_a in strategy_edge(),
            edge_b in strategy_edge(),
        ) {
            let mut builder_ab = derive_builder();
            builder_ab.border_top_bottom(edge_a).border_left_right(edge_b);

            let mut builder_ba = derive_builder();
            builder_ba.border_left_right(edge_b).border_top_bottom(edge_a);

            prop_assert_eq!(builder_ab.snapshot(), builder_ba.snapshot());
        }

        #[test]
        fn earlier_builds_survive_any_later_mutation(
            edge in strategy_edge(),
            n_color in 0u16..=64,
            if_wrap in any::<bool>(),
        ) {
            let mut builder = derive_builder();
            let style_before = builder.build();
            let spec_before = style_before.spec().clone();

            builder
                .border_all(edge)
                .wrap_text(if_wrap)
                .background_color_index(n_color)
                .expect("in range");
            let _style_after = builder.build();

            prop_assert_eq!(style_before.spec(), &spec_before);
        }
    }
}
