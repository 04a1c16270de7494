use anyhow::Context;
use image::Rgb;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub struct ConversionSummary {
    pub width: u32,
    pub height: u32,
    pub pixels: u64,
    pub bytes: u64,
}

/// Packs one RGB888 pixel into RGB565, red in the most significant bits.
/// The low channel bits are truncated, no rounding.
pub fn pack_rgb565(r: u8, g: u8, b: u8) -> u16 {
    let r5 = u16::from(r >> 3) & 0x1F;
    let g6 = u16::from(g >> 2) & 0x3F;
    let b5 = u16::from(b >> 3) & 0x1F;

    (r5 << 11) | (g6 << 5) | b5
}

/// Decodes the image at `input` and writes its pixels to `output` as a raw
/// RGB565 stream: row-major, top row first, 2 little-endian bytes per pixel,
/// no header. The stream is written to a temporary file next to `output` and
/// renamed on success, so a failed run leaves no partial output behind.
pub fn convert_image(input: &Path, output: &Path) -> anyhow::Result<ConversionSummary> {
    let img = image::ImageReader::open(input)
        .with_context(|| format!("Impossible to open image {}", input.display()))?
        .decode()
        .with_context(|| format!("Impossible to decode image {}", input.display()))?
        .to_rgb8();
    let (width, height) = img.dimensions();
    debug!("Decoded {}x{} image from {}", width, height, input.display());

    let out_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(out_dir)
        .with_context(|| format!("Impossible to create a temporary file in {}", out_dir.display()))?;
    debug!("Writing pixel stream to {}", temp.path().display());

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        for y in 0..height {
            for x in 0..width {
                let Rgb([r, g, b]) = *img.get_pixel(x, y);
                writer.write_all(&pack_rgb565(r, g, b).to_le_bytes())?;
            }
        }
        writer.flush()?;
    }
    temp.persist(output)
        .with_context(|| format!("Impossible to move the pixel stream to {}", output.display()))?;

    let pixels = u64::from(width) * u64::from(height);

    Ok(ConversionSummary {
        width,
        height,
        pixels,
        bytes: pixels * 2,
    })
}
