#![forbid(unsafe_code)]

//! PNG, JPG and PDF output, produced from the SVG rendering.

use crate::render::HeadlessError;
use stagechart_core::Rgb;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Headless(#[from] HeadlessError),
    #[error("cannot read the rendered SVG: {0}")]
    Svg(String),
    #[error("cannot allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Png(String),
    #[error("JPG needs an opaque background, got `transparent`")]
    TransparentJpeg,
    #[error("JPG encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),
    #[error("PDF conversion failed: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, RasterError>;

/// What sits behind the figure once it is rasterized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    Transparent,
    Solid(Rgb),
}

impl Background {
    fn color(self) -> tiny_skia::Color {
        match self {
            Self::Transparent => tiny_skia::Color::TRANSPARENT,
            Self::Solid(rgb) => {
                let [r, g, b] = rgb.to_rgb8();
                tiny_skia::Color::from_rgba8(r, g, b, u8::MAX)
            }
        }
    }
}

/// `transparent`/`none`, or anything [`Rgb`] parses.
impl FromStr for Background {
    type Err = stagechart_core::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transparent" | "none" => Ok(Self::Transparent),
            _ => s.parse().map(Self::Solid),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Multiplies the figure's pixel size.
    pub scale: f32,
    /// `None` keeps the SVG's own figure background (and means white for JPG).
    pub background: Option<Background>,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
            jpeg_quality: 90,
        }
    }
}

const FONT_FAMILY: &str = "DejaVu Sans";

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = rasterize(svg, options.scale, options.background)?;
    pixmap.encode_png().map_err(|err| RasterError::Png(err.to_string()))
}

pub fn svg_to_jpeg(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let background = match options.background {
        Some(Background::Transparent) => return Err(RasterError::TransparentJpeg),
        Some(bg) => bg,
        None => Background::Solid(Rgb::WHITE),
    };
    let pixmap = rasterize(svg, options.scale, Some(background))?;
    let (width, height) = (pixmap.width(), pixmap.height());

    // Opaque fill underneath, so premultiplied RGBA is plain RGBA here.
    let rgba = image::RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or(RasterError::Pixmap { width, height })?;
    let rgb = image::DynamicImage::ImageRgba8(rgba).to_rgb8();

    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, options.jpeg_quality)
        .encode_image(&rgb)?;
    Ok(out)
}

/// Vector output: the PDF page takes the figure's size.
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = FONT_FAMILY.to_string();
    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt)
        .map_err(|err| RasterError::Svg(err.to_string()))?;

    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|err| RasterError::Pdf(err.to_string()))
}

fn rasterize(svg: &str, scale: f32, background: Option<Background>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = FONT_FAMILY.to_string();
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|err| RasterError::Svg(err.to_string()))?;

    let size = tree.size().to_int_size().scale_by(scale);
    let (width, height) = size.map_or((0, 0), |s| (s.width(), s.height()));
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RasterError::Pixmap { width, height })?;
    if let Some(bg) = background {
        pixmap.fill(bg.color());
    }

    tracing::debug!(width, height, scale, "rasterizing diagram");
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessRenderer;

    /// Width and height from the IHDR chunk.
    fn png_size(bytes: &[u8]) -> (u32, u32) {
        let be = |at: usize| u32::from_be_bytes(bytes[at..at + 4].try_into().unwrap());
        (be(16), be(20))
    }

    #[test]
    fn preset_renders_to_png() {
        let bytes = HeadlessRenderer::default()
            .render_png(&RasterOptions::default())
            .unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        assert_eq!(png_size(&bytes), (900, 1200));
    }

    #[test]
    fn scale_multiplies_figure_size() {
        let bytes = HeadlessRenderer::default()
            .render_png(&RasterOptions {
                scale: 0.5,
                ..RasterOptions::default()
            })
            .unwrap();
        assert_eq!(png_size(&bytes), (450, 600));
    }

    #[test]
    fn preset_renders_to_jpeg() {
        let bytes = HeadlessRenderer::default()
            .render_jpeg(&RasterOptions::default())
            .unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8]));
    }

    #[test]
    fn jpeg_rejects_transparent_background() {
        let err = HeadlessRenderer::default()
            .render_jpeg(&RasterOptions {
                background: Some(Background::Transparent),
                ..RasterOptions::default()
            })
            .unwrap_err();
        assert!(matches!(err, RasterError::TransparentJpeg));
    }

    #[test]
    fn preset_renders_to_pdf() {
        let bytes = HeadlessRenderer::default().render_pdf().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn background_parses_through_rgb() {
        assert_eq!("none".parse::<Background>().unwrap(), Background::Transparent);
        assert_eq!(
            "#fff".parse::<Background>().unwrap(),
            Background::Solid(Rgb::WHITE)
        );
        assert!("chartreuse".parse::<Background>().is_err());
        assert!("#00000080".parse::<Background>().is_err());
    }

    #[test]
    fn solid_background_is_opaque() {
        let color = Background::Solid(Rgb::GRAY).color();
        assert_eq!(color.alpha(), 1.0);
        assert_eq!(Background::Transparent.color().alpha(), 0.0);
    }
}
