use crate::models::PALETTE_SIZE;
use crate::palette::format_hex;
use image::imageops::FilterType;
use image::ImageError;
use palette_extract::get_palette_rgb;

/// Pulls a five-color palette out of raw image bytes: decode, downscale to
/// 100x100, quantize. Low-color images can quantize to fewer than five
/// entries; the result is padded by cycling what was found.
pub fn extract_palette(bytes: &[u8]) -> Result<Vec<String>, ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let small = decoded.resize_exact(100, 100, FilterType::Triangle).to_rgb8();

    let mut colors: Vec<String> = get_palette_rgb(small.as_raw())
        .iter()
        .map(|color| format_hex([color.r, color.g, color.b]))
        .collect();

    if colors.is_empty() {
        colors.push(average_color(small.as_raw()));
    }
    colors.truncate(PALETTE_SIZE);
    let mut index = 0;
    while colors.len() < PALETTE_SIZE {
        colors.push(colors[index].clone());
        index += 1;
    }

    Ok(colors)
}

fn average_color(pixels: &[u8]) -> String {
    let count = (pixels.len() / 3).max(1) as u64;
    let mut sums = [0u64; 3];
    for pixel in pixels.chunks_exact(3) {
        for channel in 0..3 {
            sums[channel] += u64::from(pixel[channel]);
        }
    }
    format_hex([
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::parse_hex;
    use image::{DynamicImage, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes(image: RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    #[test]
    fn solid_image_extracts_a_red_leaning_palette() {
        let image = RgbImage::from_pixel(64, 64, Rgb([200, 30, 30]));
        let colors = extract_palette(&png_bytes(image)).expect("extract");

        assert_eq!(colors.len(), PALETTE_SIZE);
        let [r, g, b] = parse_hex(&colors[0]).expect("valid hex");
        assert!(r > g && r > b, "expected red-dominant, got {:?}", colors[0]);
    }

    #[test]
    fn two_tone_image_yields_five_valid_colors() {
        let mut image = RgbImage::from_pixel(64, 64, Rgb([10, 10, 200]));
        for x in 0..32 {
            for y in 0..64 {
                image.put_pixel(x, y, Rgb([240, 240, 20]));
            }
        }
        let colors = extract_palette(&png_bytes(image)).expect("extract");
        assert_eq!(colors.len(), PALETTE_SIZE);
        for color in &colors {
            assert!(parse_hex(color).is_some(), "bad color {color}");
        }
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(extract_palette(b"definitely not an image").is_err());
    }
}
