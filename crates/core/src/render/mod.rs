use std::fmt::Write as _;
use std::path::Path;

use crate::palette::{ColorTable, Rgb};
use crate::{AuraError, Result};

/// Stroke width used when the caller does not pick one.
const DEFAULT_STROKE_WIDTH: u32 = 4;

/// Breathing room between the outermost stroke and the SVG canvas edge.
const CANVAS_MARGIN: u32 = 10;

/// Minimal drawing capability the renderer depends on: full circle strokes of
/// a chosen color around a fixed origin. Backends may rasterize, write SVG or
/// simply record the calls; the renderer does not care.
pub trait Surface {
    /// Sets the stroke width used by subsequent circles.
    fn set_stroke_width(&mut self, width: u32) -> Result<()>;

    /// Strokes a full circle of `color` at `radius` around the origin.
    fn stroke_circle(&mut self, radius: u32, color: Rgb) -> Result<()>;
}

/// One recorded stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub radius: u32,
    pub color: Rgb,
}

/// Headless backend that records every stroke instead of drawing it. Unit
/// tests assert on the call sequence; any consumer without a real canvas can
/// use it the same way.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    stroke_width: u32,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the strokes recorded so far, in draw order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }
}

impl Surface for RecordingSurface {
    fn set_stroke_width(&mut self, width: u32) -> Result<()> {
        self.stroke_width = width;
        Ok(())
    }

    fn stroke_circle(&mut self, radius: u32, color: Rgb) -> Result<()> {
        self.calls.push(DrawCall { radius, color });
        Ok(())
    }
}

/// Backend that accumulates strokes and serializes them as a standalone SVG
/// document: square canvas, black background, origin at the centre, matching
/// the look of the original artwork window.
#[derive(Debug)]
pub struct SvgSurface {
    stroke_width: u32,
    circles: Vec<(DrawCall, u32)>,
    max_radius: u32,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self {
            stroke_width: 1,
            circles: Vec::new(),
            max_radius: 0,
        }
    }

    /// Serializes the recorded strokes into an SVG document. The canvas is
    /// sized from the outermost radius plus its stroke width so no circle is
    /// clipped.
    pub fn to_svg(&self) -> String {
        let half = self.max_radius + self.stroke_width + CANVAS_MARGIN;
        let size = half * 2;

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" \
             viewBox=\"-{half} -{half} {size} {size}\">"
        );
        let _ = writeln!(
            svg,
            "  <rect x=\"-{half}\" y=\"-{half}\" width=\"{size}\" height=\"{size}\" fill=\"black\"/>"
        );
        for (call, width) in &self.circles {
            let Rgb { r, g, b } = call.color;
            let _ = writeln!(
                svg,
                "  <circle cx=\"0\" cy=\"0\" r=\"{}\" fill=\"none\" \
                 stroke=\"rgb({r},{g},{b})\" stroke-width=\"{width}\"/>",
                call.radius
            );
        }
        svg.push_str("</svg>\n");
        svg
    }

    /// Writes the SVG document to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_svg())?;
        Ok(())
    }
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for SvgSurface {
    fn set_stroke_width(&mut self, width: u32) -> Result<()> {
        if width == 0 {
            return Err(AuraError::surface("stroke width must be at least 1"));
        }
        self.stroke_width = width;
        Ok(())
    }

    fn stroke_circle(&mut self, radius: u32, color: Rgb) -> Result<()> {
        self.max_radius = self.max_radius.max(radius);
        self.circles.push((DrawCall { radius, color }, self.stroke_width));
        Ok(())
    }
}

/// Draws the aura: one ring per consecutive mood pair, each ring a stepped
/// radial gradient between the two mood colors.
///
/// The renderer owns its surface for the duration of the render; a single
/// linear pass draws the rings at strictly increasing radii and no ring is
/// revisited.
#[derive(Debug)]
pub struct RingRenderer<S: Surface> {
    surface: S,
    colors: ColorTable,
    factor: u32,
    stroke_width: u32,
}

impl<S: Surface> RingRenderer<S> {
    /// Creates a renderer drawing rings of radial width `factor`.
    ///
    /// # Errors
    /// Returns [`AuraError::Config`] for a zero `factor`.
    pub fn new(surface: S, colors: ColorTable, factor: u32) -> Result<Self> {
        if factor == 0 {
            return Err(AuraError::config("ring factor must be at least 1"));
        }
        Ok(Self {
            surface,
            colors,
            factor,
            stroke_width: DEFAULT_STROKE_WIDTH,
        })
    }

    /// Overrides the stroke width used for every circle.
    pub fn with_stroke_width(mut self, width: u32) -> Self {
        self.stroke_width = width.max(1);
        self
    }

    /// Renders the mood sequence as concentric rings.
    ///
    /// A sequence of length `n` yields `n - 1` rings; ring `i` (1-indexed)
    /// starts at radius `i * factor` and blends from `sequence[i - 1]` to
    /// `sequence[i]`. Sequences shorter than two moods draw nothing.
    ///
    /// # Errors
    /// [`AuraError::Config`] when a mood in the sequence has no color entry,
    /// raised before any stroke of that ring; any [`AuraError::Surface`] from
    /// the backend is fatal and propagates immediately.
    pub fn render(&mut self, sequence: &[String]) -> Result<()> {
        if sequence.len() < 2 {
            return Ok(());
        }

        self.surface.set_stroke_width(self.stroke_width)?;
        for (index, pair) in sequence.windows(2).enumerate() {
            let base = (index as u32 + 1) * self.factor;
            self.draw_ring(base, &pair[0], &pair[1])?;
        }
        Ok(())
    }

    /// Draws one ring of `factor` unit-width circle strokes starting at
    /// `base`. Both endpoint colors are resolved before the first stroke, so
    /// a missing palette entry never leaves a partial ring behind.
    fn draw_ring(&mut self, base: u32, from: &str, to: &str) -> Result<()> {
        let from = self.colors.color(from)?;
        let to = self.colors.color(to)?;

        for step in 1..=self.factor {
            let color = from.blend_step(to, step, self.factor);
            self.surface.stroke_circle(base + step - 1, color)?;
        }
        Ok(())
    }

    /// Returns a view of the drawing backend.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Hands the drawing backend back, e.g. to save an SVG document.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> ColorTable {
        let mut colors = ColorTable::default();
        colors.insert("yellow", Rgb::rgb(247, 247, 73));
        colors.insert("blue", Rgb::rgb(46, 103, 248));
        colors.insert("green", Rgb::rgb(48, 183, 0));
        colors
    }

    fn moods(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn draws_one_ring_less_than_the_sequence_length() {
        let mut renderer = RingRenderer::new(RecordingSurface::new(), palette(), 10).unwrap();
        renderer
            .render(&moods(&["yellow", "blue", "green", "yellow"]))
            .unwrap();

        // 3 rings of 10 sub-steps each.
        assert_eq!(renderer.surface().calls().len(), 30);
    }

    #[test]
    fn ring_radii_increase_by_factor_starting_at_factor() {
        let mut renderer = RingRenderer::new(RecordingSurface::new(), palette(), 5).unwrap();
        renderer.render(&moods(&["yellow", "blue", "green"])).unwrap();

        let radii: Vec<u32> = renderer
            .surface()
            .calls()
            .iter()
            .map(|call| call.radius)
            .collect();
        assert_eq!(radii, [5, 6, 7, 8, 9, 10, 11, 12, 13, 14]);
    }

    #[test]
    fn ring_gradient_ends_on_the_destination_color() {
        let mut renderer = RingRenderer::new(RecordingSurface::new(), palette(), 10).unwrap();
        renderer.render(&moods(&["yellow", "blue"])).unwrap();

        let calls = renderer.surface().calls();
        let from = Rgb::rgb(247, 247, 73);
        let to = Rgb::rgb(46, 103, 248);
        assert_eq!(calls[0].color, from.blend_step(to, 1, 10));
        assert_eq!(calls[9].color, to);
    }

    #[test]
    fn short_sequences_draw_nothing() {
        let mut renderer = RingRenderer::new(RecordingSurface::new(), palette(), 10).unwrap();
        renderer.render(&moods(&["yellow"])).unwrap();
        renderer.render(&[]).unwrap();
        assert!(renderer.surface().calls().is_empty());
    }

    #[test]
    fn zero_factor_is_rejected_at_construction() {
        let err = RingRenderer::new(RecordingSurface::new(), palette(), 0).unwrap_err();
        assert!(matches!(err, AuraError::Config(_)));
    }

    #[test]
    fn missing_color_fails_before_any_stroke_of_that_ring() {
        let mut renderer = RingRenderer::new(RecordingSurface::new(), palette(), 10).unwrap();
        let err = renderer
            .render(&moods(&["yellow", "blue", "violet"]))
            .unwrap_err();

        assert!(matches!(err, AuraError::Config(_)));
        // The first ring completed; the broken second ring left no strokes.
        assert_eq!(renderer.surface().calls().len(), 10);
    }

    #[test]
    fn svg_document_contains_one_circle_per_stroke() {
        let mut renderer = RingRenderer::new(SvgSurface::new(), palette(), 10)
            .unwrap()
            .with_stroke_width(4);
        renderer.render(&moods(&["yellow", "blue"])).unwrap();

        let svg = renderer.into_surface().to_svg();
        assert_eq!(svg.matches("<circle").count(), 10);
        assert!(svg.contains("stroke-width=\"4\""));
        assert!(svg.contains("fill=\"black\""));
    }

    #[test]
    fn svg_canvas_covers_the_outermost_ring() {
        let mut surface = SvgSurface::new();
        surface.set_stroke_width(4).unwrap();
        surface.stroke_circle(100, Rgb::rgb(1, 2, 3)).unwrap();

        let svg = surface.to_svg();
        // half = 100 + 4 + margin 10, size = 228
        assert!(svg.contains("width=\"228\""));
        assert!(svg.contains("viewBox=\"-114 -114 228 228\""));
    }
}
