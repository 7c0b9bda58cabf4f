// THEORY:
// The `ColorClassifier` answers one question for every other component: is this
// pixel part of the background? It wraps the inferred background `Pixel` and a
// similarity threshold, and compares candidates against it.
//
// The comparison is a plain Euclidean distance over the four RGBA channels,
// normalized into an "equivalence" score:
//
//     equivalence = (510 - d) / 510
//
// 510 is the largest distance two RGBA colors can have (sqrt(4 * 255^2)), so the
// score runs from 1.0 (identical) down to 0.0 (opposite corners of the cube).
// A pixel is background-like when its equivalence is strictly above the threshold.
//
// The classifier is `Copy` and has no hidden state; the scanner and the grid
// share the same instance by value.

pub mod color_classifier {
    use crate::core_modules::pixel::pixel::Pixel;

    pub type ChannelDistance = f64;
    pub type Equivalence = f64;

    /// The distance between two colors that differ maximally in every channel.
    pub const MAX_CHANNEL_DISTANCE: ChannelDistance = 510.0;

    pub const DEFAULT_SIMILARITY_THRESHOLD: Equivalence = 0.95;

    /// Euclidean distance over R, G, B and A.
    pub fn channel_distance(a: &Pixel, b: &Pixel) -> ChannelDistance {
        a.channels()
            .into_iter()
            .zip(b.channels())
            .map(|(ca, cb)| {
                let delta = ca as f64 - cb as f64;
                delta * delta
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Normalized similarity in `[0, 1]`, 1.0 meaning identical colors.
    pub fn equivalence(a: &Pixel, b: &Pixel) -> Equivalence {
        (MAX_CHANNEL_DISTANCE - channel_distance(a, b)) / MAX_CHANNEL_DISTANCE
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum PixelClass {
        Background,
        Foreground,
    }

    /// Background-vs-foreground predicate for one inferred background color.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct ColorClassifier {
        background: Pixel,
        threshold: Equivalence,
    }

    impl ColorClassifier {
        pub fn new(background: Pixel, threshold: Equivalence) -> Self {
            Self {
                background,
                threshold,
            }
        }

        pub fn background(&self) -> Pixel {
            self.background
        }

        pub fn threshold(&self) -> Equivalence {
            self.threshold
        }

        pub fn equivalence_to_background(&self, candidate: &Pixel) -> Equivalence {
            equivalence(&self.background, candidate)
        }

        #[inline]
        pub fn is_background_like(&self, candidate: &Pixel) -> bool {
            self.equivalence_to_background(candidate) > self.threshold
        }

        #[inline]
        pub fn is_foreground(&self, candidate: &Pixel) -> bool {
            !self.is_background_like(candidate)
        }

        pub fn classify(&self, candidate: &Pixel) -> PixelClass {
            if self.is_background_like(candidate) {
                PixelClass::Background
            } else {
                PixelClass::Foreground
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::color_classifier::*;
    use crate::core_modules::pixel::pixel::Pixel;

    const WHITE: Pixel = Pixel::opaque(255, 255, 255);

    #[test]
    fn distance_is_symmetric() {
        let samples = [
            Pixel::new(0, 0, 0, 0),
            Pixel::new(255, 255, 255, 255),
            Pixel::new(12, 200, 33, 90),
            Pixel::new(250, 250, 250, 255),
            Pixel::new(1, 254, 128, 7),
        ];
        for a in &samples {
            for b in &samples {
                assert_eq!(channel_distance(a, b), channel_distance(b, a));
            }
        }
    }

    #[test]
    fn extreme_colors_span_the_full_range() {
        let transparent_black = Pixel::new(0, 0, 0, 0);
        assert_eq!(channel_distance(&WHITE, &transparent_black), MAX_CHANNEL_DISTANCE);
        assert_eq!(equivalence(&WHITE, &transparent_black), 0.0);
        assert_eq!(equivalence(&WHITE, &WHITE), 1.0);
    }

    #[test]
    fn near_background_color_depends_on_threshold() {
        let off_white = Pixel::opaque(250, 250, 250);

        let lenient = ColorClassifier::new(WHITE, 0.95);
        assert!(lenient.is_background_like(&off_white));
        assert_eq!(lenient.classify(&off_white), PixelClass::Background);

        let strict = ColorClassifier::new(WHITE, 0.999);
        assert!(strict.is_foreground(&off_white));
        assert_eq!(strict.classify(&off_white), PixelClass::Foreground);
    }

    #[test]
    fn black_on_white_is_foreground() {
        let classifier = ColorClassifier::new(WHITE, DEFAULT_SIMILARITY_THRESHOLD);
        assert!(classifier.is_foreground(&Pixel::opaque(0, 0, 0)));
        assert!(classifier.is_background_like(&WHITE));
    }

    #[test]
    fn equivalence_equal_to_threshold_is_foreground() {
        // A zero threshold only rejects colors at the maximum distance.
        let classifier = ColorClassifier::new(WHITE, 0.0);
        assert!(classifier.is_foreground(&Pixel::new(0, 0, 0, 0)));
        assert!(classifier.is_background_like(&Pixel::opaque(0, 0, 0)));
    }
}
