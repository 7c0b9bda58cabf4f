// THEORY:
// The `Pixel` module is the smallest unit of the engine: a "dumb" data container for
// one RGBA sample. It knows nothing about neighbors or backgrounds; comparison lives
// in the `color_classifier` module.
//
// Two kinds of comparison are made on pixels elsewhere:
// - exact equality, used as a hash key when counting border colors
// - numeric distance over the four channels, used for classification
// so the type is `Copy + Eq + Hash` and exposes its channels as an array.

pub mod pixel {
    use serde::{Deserialize, Serialize};
    use std::fmt;

    pub type Byte = u8;
    pub type Channel = Byte;

    pub const CHANNELS: usize = 4;

    /// A single RGBA sample. Immutable once read.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (transparency) channel value (0-255).
        pub alpha: Channel,
    }

    impl Pixel {
        pub const fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        /// Fully opaque pixel.
        pub const fn opaque(red: Channel, green: Channel, blue: Channel) -> Self {
            Self::new(red, green, blue, 255)
        }

        /// Channels in R, G, B, A order.
        pub fn channels(&self) -> [Channel; CHANNELS] {
            [self.red, self.green, self.blue, self.alpha]
        }
    }

    impl From<[Byte; CHANNELS]> for Pixel {
        fn from(bytes: [Byte; CHANNELS]) -> Self {
            Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
        }
    }

    impl From<image::Rgba<u8>> for Pixel {
        fn from(rgba: image::Rgba<u8>) -> Self {
            Pixel::from(rgba.0)
        }
    }

    impl From<Pixel> for image::Rgba<u8> {
        fn from(pixel: Pixel) -> Self {
            image::Rgba(pixel.channels())
        }
    }

    impl fmt::Display for Pixel {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "rgba({}, {}, {}, {})",
                self.red, self.green, self.blue, self.alpha
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pixel::*;

    #[test]
    fn converts_to_and_from_image_rgba() {
        let pixel = Pixel::new(10, 20, 30, 40);
        let rgba: image::Rgba<u8> = pixel.into();
        assert_eq!(rgba.0, [10, 20, 30, 40]);
        assert_eq!(Pixel::from(rgba), pixel);
    }

    #[test]
    fn equality_covers_alpha() {
        assert_ne!(Pixel::new(1, 2, 3, 255), Pixel::new(1, 2, 3, 254));
        assert_eq!(Pixel::opaque(1, 2, 3), Pixel::new(1, 2, 3, 255));
    }

    #[test]
    fn displays_channels() {
        assert_eq!(Pixel::opaque(255, 0, 7).to_string(), "rgba(255, 0, 7, 255)");
    }
}
