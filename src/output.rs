// THEORY:
// Rendering of `SilhouetteReport`s for people and for other programs. Both writers
// take any `io::Write`, so the command-line binary points them at stdout and tests
// point them at a byte buffer.
//
// Text form, one line per retained silhouette with 1-based discovery indices, then
// the total:
//
//     Silhouette #1 - 4 pixels
//     Silhouette #2 - 25 pixels
//     Total number of silhouettes: 2
//
// In batch mode every report is preceded by a `<path>:` header line. The JSON form
// is the serialized report with the input path added as a top-level `path` field.

use crate::pipeline::SilhouetteReport;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// A report tagged with the image it came from.
#[derive(Debug, Serialize)]
pub struct PathReport<'a> {
    pub path: &'a Path,
    #[serde(flatten)]
    pub report: &'a SilhouetteReport,
}

/// Writes the text summary. `header` is printed as `<path>:` before the lines.
pub fn write_text<W: Write>(
    out: &mut W,
    report: &SilhouetteReport,
    header: Option<&Path>,
) -> io::Result<()> {
    if let Some(path) = header {
        writeln!(out, "{}:", path.display())?;
    }
    for (n, silhouette) in report.silhouettes.iter().enumerate() {
        writeln!(out, "Silhouette #{} - {} pixels", n + 1, silhouette.pixel_count)?;
    }
    writeln!(out, "Total number of silhouettes: {}", report.silhouette_count())
}

/// Writes `report` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(
    out: &mut W,
    path: &Path,
    report: &SilhouetteReport,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &PathReport { path, report })?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::pipeline::{Point, Silhouette};

    fn silhouette(id: u64, pixel_count: usize) -> Silhouette {
        let seed = Point::new(id as u32, 0);
        Silhouette {
            id,
            seed,
            pixel_count,
            pixel_coords: Vec::new(),
            bounding_box: (seed, seed),
        }
    }

    fn report(sizes: &[usize]) -> SilhouetteReport {
        SilhouetteReport {
            background: Pixel::opaque(255, 255, 255),
            image_width: 20,
            image_height: 10,
            total_cells: 264,
            size_threshold: 0.132,
            discovered_components: sizes.len(),
            background_visits: 264 - sizes.iter().sum::<usize>(),
            silhouettes: sizes
                .iter()
                .enumerate()
                .map(|(n, &size)| silhouette(n as u64, size))
                .collect(),
        }
    }

    fn text(report: &SilhouetteReport, header: Option<&Path>) -> String {
        let mut buffer = Vec::new();
        write_text(&mut buffer, report, header).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn text_lists_sizes_with_one_based_indices() {
        assert_eq!(
            text(&report(&[4, 25]), None),
            "Silhouette #1 - 4 pixels\n\
             Silhouette #2 - 25 pixels\n\
             Total number of silhouettes: 2\n"
        );
    }

    #[test]
    fn no_silhouettes_prints_only_the_total() {
        assert_eq!(text(&report(&[]), None), "Total number of silhouettes: 0\n");
    }

    #[test]
    fn batch_header_precedes_the_lines() {
        let path = Path::new("shots/first.png");
        assert_eq!(
            text(&report(&[9]), Some(path)),
            "shots/first.png:\n\
             Silhouette #1 - 9 pixels\n\
             Total number of silhouettes: 1\n"
        );
    }

    #[test]
    fn json_flattens_the_report_next_to_the_path() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, Path::new("shots/first.png"), &report(&[4, 25])).unwrap();
        let rendered = String::from_utf8(buffer).unwrap();
        assert!(rendered.ends_with("}\n"));

        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["path"], "shots/first.png");
        assert_eq!(value["image_width"], 20);
        assert_eq!(value["total_cells"], 264);
        assert!(value.get("report").is_none());
        assert_eq!(value["background"]["red"], 255);

        let silhouettes = value["silhouettes"].as_array().unwrap();
        assert_eq!(silhouettes.len(), 2);
        assert_eq!(silhouettes[1]["pixel_count"], 25);
        assert_eq!(silhouettes[1]["seed"]["x"], 1);
        assert!(silhouettes[1].get("pixel_coords").is_none());
    }
}
