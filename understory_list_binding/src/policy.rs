// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative item sizing and its resolution against container geometry.
//!
//! An item's size is described per axis by an [`AxisSpec`]. Resolution is a pure
//! function of the item size rule, the container size, the section's insets and spacing,
//! and (for content-sized axes) a measurement callback supplied by the caller.

use kurbo::{Insets, Size};

use crate::LayoutError;

/// How one axis of an item is sized.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AxisSpec {
    /// A constant extent.
    Fixed(f64),
    /// Split the available extent into this many equal slots.
    ///
    /// The available extent is the container extent minus the section insets
    /// on that axis and the spacing between slots. The count may be fractional:
    /// `1.5` shows one full item and half of the next.
    FillEqually(f64),
    /// Derive this axis from the other one: `other * multiplier`.
    AspectRatio(f64),
    /// Ask the item's content for its preferred extent.
    Flexible,
}

impl AxisSpec {
    /// Fill the whole available extent. Same as `FillEqually(1.0)`.
    pub const FILL: Self = Self::FillEqually(1.0);
}

/// Size specification for one item: a width and a height [`AxisSpec`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ItemSizeSpec {
    /// Horizontal axis.
    pub width: AxisSpec,
    /// Vertical axis.
    pub height: AxisSpec,
}

impl ItemSizeSpec {
    /// Creates a spec from its two axes.
    #[must_use]
    pub const fn new(width: AxisSpec, height: AxisSpec) -> Self {
        Self { width, height }
    }

    /// A constant item size.
    #[must_use]
    pub const fn fixed(size: Size) -> Self {
        Self::new(AxisSpec::Fixed(size.width), AxisSpec::Fixed(size.height))
    }

    /// A regular grid of `horizontally` × `vertically` equally sized items
    /// filling the container.
    #[must_use]
    pub const fn grid(horizontally: f64, vertically: f64) -> Self {
        Self::new(
            AxisSpec::FillEqually(horizontally),
            AxisSpec::FillEqually(vertically),
        )
    }

    /// `per_row` columns of the given height.
    #[must_use]
    pub const fn columns_with_height(per_row: f64, height: f64) -> Self {
        Self::new(AxisSpec::FillEqually(per_row), AxisSpec::Fixed(height))
    }

    /// `per_row` columns whose height is `width * multiplier`.
    #[must_use]
    pub const fn columns_with_aspect_ratio(per_row: f64, multiplier: f64) -> Self {
        Self::new(
            AxisSpec::FillEqually(per_row),
            AxisSpec::AspectRatio(multiplier),
        )
    }

    /// `per_row` columns whose height comes from their content.
    #[must_use]
    pub const fn columns_with_flexible_height(per_row: f64) -> Self {
        Self::new(AxisSpec::FillEqually(per_row), AxisSpec::Flexible)
    }

    /// `per_column` rows of the given width.
    #[must_use]
    pub const fn rows_with_width(per_column: f64, width: f64) -> Self {
        Self::new(AxisSpec::Fixed(width), AxisSpec::FillEqually(per_column))
    }

    /// `per_column` rows whose width is `height * multiplier`.
    #[must_use]
    pub const fn rows_with_aspect_ratio(per_column: f64, multiplier: f64) -> Self {
        Self::new(
            AxisSpec::AspectRatio(multiplier),
            AxisSpec::FillEqually(per_column),
        )
    }

    /// `per_column` rows whose width comes from their content.
    #[must_use]
    pub const fn rows_with_flexible_width(per_column: f64) -> Self {
        Self::new(AxisSpec::Flexible, AxisSpec::FillEqually(per_column))
    }

    /// Both axes sized by content.
    #[must_use]
    pub const fn flexible() -> Self {
        Self::new(AxisSpec::Flexible, AxisSpec::Flexible)
    }
}

/// Height of a table row. Rows always span the full width.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RowHeight {
    /// A constant height.
    Fixed(f64),
    /// Height from the row's content at full width.
    Flexible,
}

impl From<RowHeight> for ItemSizeSpec {
    fn from(height: RowHeight) -> Self {
        match height {
            RowHeight::Fixed(h) => Self::new(AxisSpec::FILL, AxisSpec::Fixed(h)),
            RowHeight::Flexible => Self::new(AxisSpec::FILL, AxisSpec::Flexible),
        }
    }
}

/// Main-axis extent of a section header or footer.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum SupplementaryHeight {
    /// No view; zero size.
    #[default]
    None,
    /// A constant extent along the scroll axis.
    Fixed(f64),
    /// Extent from the view's content.
    Flexible,
}

/// Direction the list scrolls and flows items in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Items flow left to right, lines stack top to bottom.
    #[default]
    Vertical,
    /// Items flow top to bottom, lines stack left to right.
    Horizontal,
}

impl ScrollDirection {
    /// Returns `(horizontal, vertical)` spacing for the given section metrics.
    ///
    /// Interitem spacing separates items within a line and line spacing
    /// separates lines, so the two swap axes with the scroll direction.
    #[must_use]
    pub const fn axis_spacing(self, metrics: &SectionMetrics) -> (f64, f64) {
        match self {
            Self::Vertical => (metrics.interitem_spacing, metrics.line_spacing),
            Self::Horizontal => (metrics.line_spacing, metrics.interitem_spacing),
        }
    }
}

/// Per-section insets and spacing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SectionMetrics {
    /// Insets around the section's items. `x0`/`x1` are left/right, `y0`/`y1` top/bottom.
    pub insets: Insets,
    /// Spacing between lines of items.
    pub line_spacing: f64,
    /// Spacing between items within a line.
    pub interitem_spacing: f64,
}

impl SectionMetrics {
    /// No insets and no spacing.
    pub const ZERO: Self = Self {
        insets: Insets::ZERO,
        line_spacing: 0.0,
        interitem_spacing: 0.0,
    };
}

impl Default for SectionMetrics {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Constraints for a content-fit measurement. `None` lets that axis float.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FitConstraints {
    /// Required width, if any.
    pub width: Option<f64>,
    /// Required height, if any.
    pub height: Option<f64>,
}

impl FitConstraints {
    /// Both axes float.
    pub const UNCONSTRAINED: Self = Self {
        width: None,
        height: None,
    };

    /// Width is required, height floats.
    #[must_use]
    pub const fn width(width: f64) -> Self {
        Self {
            width: Some(width),
            height: None,
        }
    }

    /// Height is required, width floats.
    #[must_use]
    pub const fn height(height: f64) -> Self {
        Self {
            width: None,
            height: Some(height),
        }
    }
}

/// Geometry an item is resolved against.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LayoutContext {
    /// Size of the scrolling container.
    pub container: Size,
    /// Insets and spacing of the item's section.
    pub metrics: SectionMetrics,
    /// Scroll direction of the list.
    pub direction: ScrollDirection,
}

/// Result of resolving one axis in isolation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AxisResolution {
    /// The extent is known.
    Resolved(f64),
    /// The extent is the other axis times this multiplier.
    DependsOnOtherAxis(f64),
    /// The extent must come from a content-fit measurement.
    NeedsMeasurement,
}

/// Resolves one axis.
///
/// `leading` and `trailing` are the section insets on this axis and `spacing`
/// the gap between adjacent slots. Fixed and fill-equally results are clamped
/// to zero.
///
/// # Errors
///
/// [`LayoutError::InvalidSlotCount`] if a fill-equally count is not positive
/// and finite.
pub fn resolve_axis(
    spec: AxisSpec,
    available: f64,
    leading: f64,
    trailing: f64,
    spacing: f64,
) -> Result<AxisResolution, LayoutError> {
    match spec {
        AxisSpec::Fixed(value) => Ok(AxisResolution::Resolved(non_negative(value))),
        AxisSpec::FillEqually(count) => {
            if !(count.is_finite() && count > 0.0) {
                return Err(LayoutError::InvalidSlotCount(count));
            }
            let gaps = spacing * (count - 1.0);
            let extent = (available - leading - trailing - gaps) / count;
            Ok(AxisResolution::Resolved(non_negative(extent)))
        }
        AxisSpec::AspectRatio(multiplier) => Ok(AxisResolution::DependsOnOtherAxis(multiplier)),
        AxisSpec::Flexible => Ok(AxisResolution::NeedsMeasurement),
    }
}

/// Resolves a full item size.
///
/// Non-aspect axes are resolved first. A flexible axis is measured through
/// `measure`, with the other axis required when it is already known and both
/// axes floating otherwise. Both axes flexible costs exactly one measurement.
/// An aspect-ratio axis is derived from the other axis last.
///
/// `measure` returns `None` when no view is available to measure.
///
/// # Errors
///
/// - [`LayoutError::CircularAspectRatio`] if both axes use aspect ratio.
/// - [`LayoutError::InvalidSlotCount`] for a bad fill-equally count.
/// - [`LayoutError::MeasurementUnavailable`] if `measure` returns `None`.
pub fn resolve_item_size(
    spec: ItemSizeSpec,
    ctx: &LayoutContext,
    mut measure: impl FnMut(FitConstraints) -> Option<Size>,
) -> Result<Size, LayoutError> {
    use AxisResolution::{DependsOnOtherAxis, NeedsMeasurement, Resolved};

    if let (AxisSpec::AspectRatio(_), AxisSpec::AspectRatio(_)) = (spec.width, spec.height) {
        return Err(LayoutError::CircularAspectRatio);
    }

    let insets = ctx.metrics.insets;
    let (h_spacing, v_spacing) = ctx.direction.axis_spacing(&ctx.metrics);
    let width = resolve_axis(
        spec.width,
        ctx.container.width,
        insets.x0,
        insets.x1,
        h_spacing,
    )?;
    let height = resolve_axis(
        spec.height,
        ctx.container.height,
        insets.y0,
        insets.y1,
        v_spacing,
    )?;

    let mut fit = |constraints| {
        measure(constraints)
            .map(|size: Size| Size::new(non_negative(size.width), non_negative(size.height)))
            .ok_or(LayoutError::MeasurementUnavailable)
    };

    let size = match (width, height) {
        (Resolved(w), Resolved(h)) => Size::new(w, h),
        (Resolved(w), DependsOnOtherAxis(m)) => Size::new(w, w * m),
        (DependsOnOtherAxis(m), Resolved(h)) => Size::new(h * m, h),
        (Resolved(w), NeedsMeasurement) => Size::new(w, fit(FitConstraints::width(w))?.height),
        (NeedsMeasurement, Resolved(h)) => Size::new(fit(FitConstraints::height(h))?.width, h),
        (NeedsMeasurement, NeedsMeasurement) => fit(FitConstraints::UNCONSTRAINED)?,
        (NeedsMeasurement, DependsOnOtherAxis(m)) => {
            let w = fit(FitConstraints::UNCONSTRAINED)?.width;
            Size::new(w, w * m)
        }
        (DependsOnOtherAxis(m), NeedsMeasurement) => {
            let h = fit(FitConstraints::UNCONSTRAINED)?.height;
            Size::new(h * m, h)
        }
        (DependsOnOtherAxis(_), DependsOnOtherAxis(_)) => {
            return Err(LayoutError::CircularAspectRatio);
        }
    };
    Ok(Size::new(non_negative(size.width), non_negative(size.height)))
}

/// Resolves the size of a section header or footer.
///
/// Supplementary views span the full cross axis of the container. A flexible
/// view is measured with the cross axis required and the scroll axis floating;
/// if the container has no cross-axis extent yet, it resolves to zero without
/// measuring.
///
/// # Errors
///
/// [`LayoutError::MeasurementUnavailable`] if a flexible view cannot be measured.
pub fn resolve_supplementary_size(
    height: SupplementaryHeight,
    container: Size,
    direction: ScrollDirection,
    mut measure: impl FnMut(FitConstraints) -> Option<Size>,
) -> Result<Size, LayoutError> {
    match (height, direction) {
        (SupplementaryHeight::None, _) => Ok(Size::ZERO),
        (SupplementaryHeight::Fixed(h), ScrollDirection::Vertical) => {
            Ok(Size::new(container.width, non_negative(h)))
        }
        (SupplementaryHeight::Fixed(h), ScrollDirection::Horizontal) => {
            Ok(Size::new(non_negative(h), container.height))
        }
        (SupplementaryHeight::Flexible, ScrollDirection::Vertical) => {
            if container.width <= 0.0 {
                return Ok(Size::ZERO);
            }
            let fitted = measure(FitConstraints::width(container.width))
                .ok_or(LayoutError::MeasurementUnavailable)?;
            Ok(Size::new(container.width, non_negative(fitted.height)))
        }
        (SupplementaryHeight::Flexible, ScrollDirection::Horizontal) => {
            if container.height <= 0.0 {
                return Ok(Size::ZERO);
            }
            let fitted = measure(FitConstraints::height(container.height))
                .ok_or(LayoutError::MeasurementUnavailable)?;
            Ok(Size::new(non_negative(fitted.width), container.height))
        }
    }
}

fn non_negative(value: f64) -> f64 {
    debug_assert!(!value.is_nan(), "resolved extent must not be NaN");
    value.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(width: f64, height: f64) -> LayoutContext {
        LayoutContext {
            container: Size::new(width, height),
            ..LayoutContext::default()
        }
    }

    fn no_measure(_: FitConstraints) -> Option<Size> {
        panic!("no measurement expected");
    }

    #[test]
    fn fill_equally_subtracts_insets_and_gaps() {
        let r = resolve_axis(AxisSpec::FillEqually(3.0), 320.0, 10.0, 10.0, 5.0).unwrap();
        assert_eq!(r, AxisResolution::Resolved(100.0));
    }

    #[test]
    fn fill_equally_allows_fractional_counts() {
        let r = resolve_axis(AxisSpec::FillEqually(1.5), 300.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(r, AxisResolution::Resolved(200.0));
    }

    #[test]
    fn fill_equally_clamps_to_zero() {
        let r = resolve_axis(AxisSpec::FillEqually(2.0), 10.0, 20.0, 20.0, 0.0).unwrap();
        assert_eq!(r, AxisResolution::Resolved(0.0));
    }

    #[test]
    fn fill_equally_rejects_bad_counts() {
        for count in [0.0, -1.0, f64::INFINITY] {
            assert_eq!(
                resolve_axis(AxisSpec::FillEqually(count), 100.0, 0.0, 0.0, 0.0),
                Err(LayoutError::InvalidSlotCount(count))
            );
        }
        assert!(matches!(
            resolve_axis(AxisSpec::FillEqually(f64::NAN), 100.0, 0.0, 0.0, 0.0),
            Err(LayoutError::InvalidSlotCount(_))
        ));
    }

    #[test]
    fn aspect_ratio_follows_resolved_width() {
        let spec = ItemSizeSpec::columns_with_aspect_ratio(3.0, 0.5);
        let size = resolve_item_size(spec, &ctx(300.0, 600.0), no_measure).unwrap();
        assert_eq!(size, Size::new(100.0, 50.0));
    }

    #[test]
    fn aspect_ratio_follows_resolved_height() {
        let spec = ItemSizeSpec::rows_with_aspect_ratio(2.0, 1.5);
        let size = resolve_item_size(spec, &ctx(300.0, 200.0), no_measure).unwrap();
        assert_eq!(size, Size::new(150.0, 100.0));
    }

    #[test]
    fn dual_aspect_ratio_is_rejected() {
        let spec = ItemSizeSpec::new(AxisSpec::AspectRatio(1.0), AxisSpec::AspectRatio(2.0));
        assert_eq!(
            resolve_item_size(spec, &ctx(300.0, 300.0), no_measure),
            Err(LayoutError::CircularAspectRatio)
        );
    }

    #[test]
    fn grid_uses_spacing_per_scroll_direction() {
        let mut context = ctx(210.0, 100.0);
        context.metrics.interitem_spacing = 10.0;
        context.metrics.line_spacing = 20.0;

        let vertical = resolve_item_size(ItemSizeSpec::grid(3.0, 1.0), &context, no_measure);
        assert_eq!(vertical, Ok(Size::new(63.333_333_333_333_336, 100.0)));

        context.direction = ScrollDirection::Horizontal;
        let horizontal = resolve_item_size(ItemSizeSpec::grid(3.0, 2.0), &context, no_measure);
        assert_eq!(horizontal, Ok(Size::new(56.666_666_666_666_664, 45.0)));
    }

    #[test]
    fn grid_uses_insets_per_axis() {
        let mut context = ctx(300.0, 300.0);
        context.metrics.insets = Insets::new(10.0, 20.0, 30.0, 40.0);
        let size = resolve_item_size(ItemSizeSpec::grid(2.0, 1.0), &context, no_measure);
        assert_eq!(size, Ok(Size::new(130.0, 240.0)));
    }

    #[test]
    fn flexible_height_is_measured_at_known_width() {
        let mut seen = None;
        let size = resolve_item_size(
            ItemSizeSpec::columns_with_flexible_height(2.0),
            &ctx(300.0, 600.0),
            |c| {
                seen = Some(c);
                Some(Size::new(999.0, 44.0))
            },
        );
        assert_eq!(size, Ok(Size::new(150.0, 44.0)));
        assert_eq!(seen, Some(FitConstraints::width(150.0)));
    }

    #[test]
    fn flexible_width_is_measured_at_known_height() {
        let mut seen = None;
        let size = resolve_item_size(
            ItemSizeSpec::rows_with_flexible_width(4.0),
            &ctx(300.0, 400.0),
            |c| {
                seen = Some(c);
                Some(Size::new(80.0, 1.0))
            },
        );
        assert_eq!(size, Ok(Size::new(80.0, 100.0)));
        assert_eq!(seen, Some(FitConstraints::height(100.0)));
    }

    #[test]
    fn fully_flexible_measures_once_unconstrained() {
        let mut calls = 0;
        let size = resolve_item_size(ItemSizeSpec::flexible(), &ctx(300.0, 600.0), |c| {
            calls += 1;
            assert_eq!(c, FitConstraints::UNCONSTRAINED);
            Some(Size::new(120.0, 44.0))
        });
        assert_eq!(size, Ok(Size::new(120.0, 44.0)));
        assert_eq!(calls, 1);
    }

    #[test]
    fn aspect_ratio_can_follow_a_measured_axis() {
        let spec = ItemSizeSpec::new(AxisSpec::Flexible, AxisSpec::AspectRatio(2.0));
        let size = resolve_item_size(spec, &ctx(300.0, 600.0), |_| Some(Size::new(40.0, 7.0)));
        assert_eq!(size, Ok(Size::new(40.0, 80.0)));
    }

    #[test]
    fn missing_measurement_is_an_error() {
        let size = resolve_item_size(ItemSizeSpec::flexible(), &ctx(300.0, 600.0), |_| None);
        assert_eq!(size, Err(LayoutError::MeasurementUnavailable));
    }

    #[test]
    fn table_rows_fill_the_width() {
        let spec: ItemSizeSpec = RowHeight::Fixed(44.0).into();
        let size = resolve_item_size(spec, &ctx(375.0, 667.0), no_measure);
        assert_eq!(size, Ok(Size::new(375.0, 44.0)));

        let spec: ItemSizeSpec = RowHeight::Flexible.into();
        assert_eq!(spec.height, AxisSpec::Flexible);
        assert_eq!(spec.width, AxisSpec::FILL);
    }

    #[test]
    fn supplementary_sizes_follow_scroll_direction() {
        let container = Size::new(320.0, 480.0);
        let fixed = SupplementaryHeight::Fixed(30.0);
        assert_eq!(
            resolve_supplementary_size(fixed, container, ScrollDirection::Vertical, no_measure),
            Ok(Size::new(320.0, 30.0))
        );
        assert_eq!(
            resolve_supplementary_size(fixed, container, ScrollDirection::Horizontal, no_measure),
            Ok(Size::new(30.0, 480.0))
        );
        assert_eq!(
            resolve_supplementary_size(
                SupplementaryHeight::None,
                container,
                ScrollDirection::Vertical,
                no_measure
            ),
            Ok(Size::ZERO)
        );
    }

    #[test]
    fn flexible_supplementary_is_measured_across_the_container() {
        let size = resolve_supplementary_size(
            SupplementaryHeight::Flexible,
            Size::new(320.0, 480.0),
            ScrollDirection::Vertical,
            |c| {
                assert_eq!(c, FitConstraints::width(320.0));
                Some(Size::new(10.0, 28.0))
            },
        );
        assert_eq!(size, Ok(Size::new(320.0, 28.0)));

        let collapsed = resolve_supplementary_size(
            SupplementaryHeight::Flexible,
            Size::new(0.0, 480.0),
            ScrollDirection::Vertical,
            no_measure,
        );
        assert_eq!(collapsed, Ok(Size::ZERO));
    }
}
