//! Static SVG choropleth export.

mod path;
mod writer;

use std::{io::Write, path::Path};

use anyhow::{Context, Result, ensure};
use geo::{Coord, Rect};

use crate::{color::ColorName, render::RenderPass};
use path::{Projection, multipolygon_to_path};
use writer::{SvgWriter, escape_xml, write_svg_footer, write_svg_header, write_svg_styles};

const LEGEND_ROW: f64 = 18.0;
const LEGEND_SWATCH: f64 = 12.0;

/// Degrees of lon/lat shown around the configured center when no polygon has extent.
const EMPTY_VIEW_SPAN: f64 = 8.0;

impl RenderPass<'_> {
    /// Small wrapper with defaults.
    pub fn to_svg(&self, path: &Path) -> Result<()> {
        self.to_svg_with_size(path, 900, 10)
    }

    /// Draw every delegation filled with its style, plus a legend of the intervals.
    ///
    /// The document is rendered in memory first, so a failure leaves no file behind.
    pub fn to_svg_with_size(&self, path: &Path, width: u32, margin: u32) -> Result<()> {
        let mut buffer = Vec::new();
        self.write_svg(&mut buffer, width, margin)?;

        let mut writer = SvgWriter::new(path)?;
        writer.write_all(&buffer)
            .with_context(|| format!("[render::svg] Failed to write {}", path.display()))?;
        writer.flush()
            .with_context(|| format!("[render::svg] Failed to flush {}", path.display()))
    }

    /// Render the SVG document into a string.
    pub fn to_svg_string(&self, width: u32, margin: u32) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_svg(&mut buffer, width, margin)?;
        String::from_utf8(buffer).context("[render::svg] SVG output is not valid UTF-8")
    }

    fn write_svg<W: Write>(&self, writer: &mut W, width: u32, margin: u32) -> Result<()> {
        let (width, margin) = (width as f64, margin as f64);
        ensure!(width > 2.0 * margin, "[render::svg] Width {width} leaves no room inside a {margin}px margin");

        let bounds = self.view_bounds();
        let projection = Projection::fit(bounds, width, margin);
        let height = projection.height();

        write_svg_header(writer, width, height, margin, projection.scale(), &bounds)?;
        write_svg_styles(writer)?;

        for styled in self.styled() {
            let Some(shape) = styled.feature.shape() else { continue };
            let style = &styled.style;
            writeln!(
                writer,
                r#"<path class="deleg" fill-rule="evenodd" style="fill:{fill};fill-opacity:{opacity};stroke:{stroke};stroke-width:{weight}" d="{d}"><title>{title}</title></path>"#,
                fill = escape_xml(style.fill_color.as_str()),
                opacity = style.fill_opacity,
                stroke = escape_xml(style.stroke_color.as_str()),
                weight = style.stroke_weight,
                d = multipolygon_to_path(&shape, &projection),
                title = escape_xml(&styled.tooltip.lines().join("\n")),
            )?;
        }

        self.write_legend(writer, width, margin)?;
        write_svg_footer(writer)?;
        Ok(())
    }

    /// Extent of the drawable features, or a square around the configured center
    /// when there is nothing with area to fit.
    fn view_bounds(&self) -> Rect<f64> {
        if let Some(bounds) = self.boundaries().bounds().filter(|b| b.width() > 0.0 && b.height() > 0.0) {
            return bounds;
        }
        let [lat, lon] = self.config().center;
        tracing::warn!("[render::svg] no polygon geometry to fit; using the default view around ({lat}, {lon})");
        let half = EMPTY_VIEW_SPAN / 2.0;
        Rect::new(Coord { x: lon - half, y: lat - half }, Coord { x: lon + half, y: lat + half })
    }

    /// Legend in the top-right corner: one row per interval slot, then the fallback color.
    fn write_legend<W: Write>(&self, writer: &mut W, width: f64, margin: f64) -> Result<()> {
        let x = width - margin - 140.0;
        writeln!(writer, r#"<g class="legend">"#)?;
        let rows = self.legend().into_iter()
            .map(|entry| {
                let label = if entry.valid { entry.interval.as_str().to_string() } else { format!("{} (invalid)", entry.interval.as_str()) };
                (entry.color, label)
            })
            .chain(std::iter::once((ColorName::fallback(), "No data".to_string())));
        for (i, (color, label)) in rows.enumerate() {
            let y = margin + i as f64 * LEGEND_ROW;
            writeln!(
                writer,
                r#"<rect x="{x:.1}" y="{y:.1}" width="{LEGEND_SWATCH}" height="{LEGEND_SWATCH}" style="fill:{fill}"/><text x="{tx:.1}" y="{ty:.1}">{label}</text>"#,
                fill = escape_xml(color.as_str()),
                tx = x + LEGEND_SWATCH + 6.0,
                ty = y + LEGEND_SWATCH - 2.0,
                label = escape_xml(&label),
            )?;
        }
        writeln!(writer, "</g>")?;
        Ok(())
    }
}
