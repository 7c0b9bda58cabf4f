// Decoding and encoding at the file boundary. The core never touches the disk;
// everything here turns paths into `RgbaImage`s and back.

pub mod image_helper {
    use crate::core_modules::silhouette::Silhouette;
    use crate::error::SilhouetteError;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder, ImageError, Rgba, RgbaImage};
    use std::fs::File;
    use std::io::BufWriter;
    use std::path::Path;

    /// Distinct, fully opaque colors cycled through when painting a mask.
    const MASK_PALETTE: [[u8; 3]; 8] = [
        [230, 25, 75],
        [60, 180, 75],
        [0, 130, 200],
        [245, 130, 48],
        [145, 30, 180],
        [70, 240, 240],
        [240, 50, 230],
        [128, 128, 0],
    ];

    /// Reads and decodes `path` into an RGBA8 buffer.
    pub fn load_rgba(path: &Path) -> Result<RgbaImage, SilhouetteError> {
        let decoded = image::open(path).map_err(|err| match err {
            ImageError::IoError(source) => SilhouetteError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => SilhouetteError::Decode {
                path: path.to_path_buf(),
                source: other,
            },
        })?;
        Ok(decoded.to_rgba8())
    }

    /// Encodes `image` as a PNG file at `path`.
    pub fn save(path: &Path, image: &RgbaImage) -> Result<(), SilhouetteError> {
        let output = File::create(path).map_err(|source| SilhouetteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let encoder = PngEncoder::new(BufWriter::new(output));
        let (width, height) = image.dimensions();

        encoder
            .write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
            .map_err(|source| SilhouetteError::Encode {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Paints `silhouettes` (image coordinates) onto a transparent image-sized canvas.
    pub fn render_mask(width: u32, height: u32, silhouettes: &[Silhouette]) -> RgbaImage {
        let mut mask = RgbaImage::new(width, height);
        for (n, silhouette) in silhouettes.iter().enumerate() {
            let [r, g, b] = MASK_PALETTE[n % MASK_PALETTE.len()];
            for point in &silhouette.pixel_coords {
                if point.x < width && point.y < height {
                    mask.put_pixel(point.x, point.y, Rgba([r, g, b, 255]));
                }
            }
        }
        mask
    }
}
