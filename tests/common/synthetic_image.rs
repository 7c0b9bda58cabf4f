#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use std::path::PathBuf;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A uniform canvas of the given color.
pub fn canvas(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    RgbaImage::from_pixel(width, height, color)
}

/// Paints an axis-aligned filled rectangle.
pub fn fill_rect(image: &mut RgbaImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgba<u8>) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            image.put_pixel(x, y, color);
        }
    }
}

/// Paints a filled disc centered at (cx, cy).
pub fn fill_disc(image: &mut RgbaImage, cx: i64, cy: i64, radius: i64, color: Rgba<u8>) {
    let (width, height) = image.dimensions();
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= radius * radius {
                image.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Number of pixels `fill_disc` paints when the disc lies fully inside the image.
pub fn disc_area(radius: i64) -> usize {
    let mut area = 0;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                area += 1;
            }
        }
    }
    area
}

/// A per-process scratch path under the system temp directory.
pub fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("silhouette_vision_it_{}_{name}", std::process::id()))
}

/// Writes `image` as a PNG fixture and returns its path.
pub fn write_png(name: &str, image: &RgbaImage) -> PathBuf {
    let path = scratch_path(name);
    image.save(&path).expect("failed to write PNG fixture");
    path
}
