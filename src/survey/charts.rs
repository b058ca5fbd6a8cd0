//! Chart rendering for the survey aggregates.
//!
//! Charts are written as PNG files with the [`plotters`] bitmap backend.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::PI;

use crate::survey::*;

pub const DEFAULT_PLOT_SIZE: (u32, u32) = (1200, 800);

/// Something that turns aggregates into image files.
pub trait ChartRenderer {
    /// A pie chart of the proportions of a distribution.
    fn render_distribution(
        &self,
        title: &str,
        distribution: &Distribution,
        file_name: &str,
        size: Option<(u32, u32)>,
    ) -> SurveyResult<PathBuf>;

    /// A grouped bar chart of the deflation and inflation counts per level.
    fn render_comparison(
        &self,
        title: &str,
        comparison: &FrequencyComparison,
        file_name: &str,
        size: Option<(u32, u32)>,
    ) -> SurveyResult<PathBuf>;
}

/// Renders the charts of a report: one pie per distribution and the comparison.
pub fn render_report_charts(
    renderer: &dyn ChartRenderer,
    report: &SurveyReport,
    size: Option<(u32, u32)>,
) -> SurveyResult<Vec<PathBuf>> {
    let pies = [
        (
            "Priority deflation",
            &report.deflation,
            "deflation_frequency.png",
        ),
        (
            "Priority inflation",
            &report.inflation,
            "inflation_frequency.png",
        ),
        ("Impact", &report.impact, "impact.png"),
    ];
    let mut res: Vec<PathBuf> = Vec::new();
    for (title, distribution, file_name) in pies {
        if distribution.total == 0 {
            warn!("render_report_charts: no answers for {}, skipping", title);
            continue;
        }
        res.push(renderer.render_distribution(title, distribution, file_name, size)?);
    }
    res.push(renderer.render_comparison(
        "Priority deflation vs. inflation",
        &report.comparison,
        "deflation_vs_inflation.png",
        size,
    )?);
    Ok(res)
}

pub struct PlottersRenderer {
    pub output_dir: PathBuf,
}

impl PlottersRenderer {
    pub fn new(output_dir: &Path) -> PlottersRenderer {
        PlottersRenderer {
            output_dir: output_dir.to_path_buf(),
        }
    }
}

fn chart_error<E: std::fmt::Display>(path: &Path) -> impl Fn(E) -> SurveyError + '_ {
    move |e| SurveyError::Chart {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

/// Labels on the left half of a pie end at the pie, the others start there.
fn label_alignment(angle: f64) -> HPos {
    if angle.cos() < 0.0 {
        HPos::Right
    } else {
        HPos::Left
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render_distribution(
        &self,
        title: &str,
        distribution: &Distribution,
        file_name: &str,
        size: Option<(u32, u32)>,
    ) -> SurveyResult<PathBuf> {
        let path = self.output_dir.join(file_name);
        info!("render_distribution: writing {:?}", path);
        let (width, height) = size.unwrap_or(DEFAULT_PLOT_SIZE);
        let root = BitMapBackend::new(&path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error(&path))?;
        let area = root
            .titled(title, ("sans-serif", 40).into_font())
            .map_err(chart_error(&path))?;

        let (w, h) = area.dim_in_pixel();
        let center = ((w / 2) as f64, (h / 2) as f64);
        let radius = (w.min(h) as f64) * 0.35;
        // Clockwise from the top
        let mut start = -PI / 2.0;
        for (idx, share) in distribution.categories.iter().enumerate() {
            let sweep = share.proportion * 2.0 * PI;
            let steps = ((sweep * 60.0) as usize).max(2);
            let mut points: Vec<(i32, i32)> = vec![(center.0 as i32, center.1 as i32)];
            for step in 0..=steps {
                let angle = start + sweep * (step as f64) / (steps as f64);
                points.push((
                    (center.0 + radius * angle.cos()) as i32,
                    (center.1 + radius * angle.sin()) as i32,
                ));
            }
            area.draw(&Polygon::new(points, Palette99::pick(idx).filled()))
                .map_err(chart_error(&path))?;

            let middle = start + sweep / 2.0;
            let label_pos = (
                (center.0 + radius * 1.1 * middle.cos()) as i32,
                (center.1 + radius * 1.1 * middle.sin()) as i32,
            );
            let anchor = Pos::new(label_alignment(middle), VPos::Center);
            let style: TextStyle = ("sans-serif", 22).into_font().into();
            area.draw(&Text::new(
                format!("{} ({:.1}%)", share.label, share.proportion * 100.0),
                label_pos,
                style.pos(anchor),
            ))
            .map_err(chart_error(&path))?;
            start += sweep;
        }

        root.present().map_err(chart_error(&path))?;
        Ok(path.clone())
    }

    fn render_comparison(
        &self,
        title: &str,
        comparison: &FrequencyComparison,
        file_name: &str,
        size: Option<(u32, u32)>,
    ) -> SurveyResult<PathBuf> {
        let path = self.output_dir.join(file_name);
        info!("render_comparison: writing {:?}", path);
        let (width, height) = size.unwrap_or(DEFAULT_PLOT_SIZE);
        let root = BitMapBackend::new(&path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error(&path))?;

        let num_levels = comparison.levels.len() as f64;
        let y_max = (comparison.max_count().max(1) as f64) * 1.15;
        let level_names: Vec<&'static str> =
            comparison.levels.iter().map(|l| l.level.label()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 40))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(85)
            .build_cartesian_2d(0.0..num_levels, 0.0..y_max)
            .map_err(chart_error(&path))?;

        // One label in the middle of each group
        let x_formatter = |x: &f64| {
            let idx = x.floor() as usize;
            if (x.fract() - 0.5).abs() < 1e-6 && idx < level_names.len() {
                level_names[idx].to_string()
            } else {
                "".to_string()
            }
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(2 * comparison.levels.len() + 1)
            .x_label_formatter(&x_formatter)
            .y_desc("Responses")
            .label_style(("sans-serif", 25))
            .draw()
            .map_err(chart_error(&path))?;

        chart
            .draw_series(comparison.levels.iter().enumerate().map(|(idx, l)| {
                let x = idx as f64;
                Rectangle::new([(x + 0.1, 0.0), (x + 0.5, l.deflation as f64)], BLUE.filled())
            }))
            .map_err(chart_error(&path))?
            .label("Deflation")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BLUE.filled()));

        chart
            .draw_series(comparison.levels.iter().enumerate().map(|(idx, l)| {
                let x = idx as f64;
                Rectangle::new([(x + 0.5, 0.0), (x + 0.9, l.inflation as f64)], RED.filled())
            }))
            .map_err(chart_error(&path))?
            .label("Inflation")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], RED.filled()));

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(("sans-serif", 25))
            .draw()
            .map_err(chart_error(&path))?;

        root.present().map_err(chart_error(&path))?;
        Ok(path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingRenderer {
        calls: RefCell<Vec<(String, String)>>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn render_distribution(
            &self,
            title: &str,
            _distribution: &Distribution,
            file_name: &str,
            _size: Option<(u32, u32)>,
        ) -> SurveyResult<PathBuf> {
            self.calls
                .borrow_mut()
                .push((title.to_string(), file_name.to_string()));
            Ok(PathBuf::from(file_name))
        }

        fn render_comparison(
            &self,
            title: &str,
            _comparison: &FrequencyComparison,
            file_name: &str,
            _size: Option<(u32, u32)>,
        ) -> SurveyResult<PathBuf> {
            self.calls
                .borrow_mut()
                .push((title.to_string(), file_name.to_string()));
            Ok(PathBuf::from(file_name))
        }
    }

    #[test]
    fn one_chart_per_aggregate() {
        let report = tests_common::small_report();
        let renderer = RecordingRenderer::default();
        let paths = render_report_charts(&renderer, &report, None).unwrap();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("deflation_frequency.png"),
                PathBuf::from("inflation_frequency.png"),
                PathBuf::from("impact.png"),
                PathBuf::from("deflation_vs_inflation.png"),
            ]
        );
        assert_eq!(renderer.calls.borrow().len(), 4);
    }

    // Width and height from the IHDR chunk.
    fn png_size(path: &Path) -> (u32, u32) {
        let bytes = fs::read(path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(&bytes[12..16], b"IHDR");
        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        (width, height)
    }

    #[test]
    fn plotters_writes_every_chart() {
        let dir = tempdir().unwrap();
        let renderer = PlottersRenderer::new(dir.path());
        let report = tests_common::small_report();
        let paths = render_report_charts(&renderer, &report, Some((640, 480))).unwrap();
        assert_eq!(paths.len(), 4);
        for name in [
            "deflation_frequency.png",
            "inflation_frequency.png",
            "impact.png",
            "deflation_vs_inflation.png",
        ] {
            let path = dir.path().join(name);
            assert!(paths.contains(&path));
            assert!(path.exists(), "{:?} not written", path);
        }
        assert_eq!(
            png_size(&dir.path().join("deflation_vs_inflation.png")),
            (640, 480)
        );
        assert_eq!(png_size(&dir.path().join("impact.png")), (640, 480));
    }

    #[test]
    fn plotters_default_size() {
        let dir = tempdir().unwrap();
        let renderer = PlottersRenderer::new(dir.path());
        let report = tests_common::small_report();
        let path = renderer
            .render_distribution("Impact", &report.impact, "impact.png", None)
            .unwrap();
        assert_eq!(png_size(&path), DEFAULT_PLOT_SIZE);
    }

    #[test]
    fn pie_labels_stay_outside() {
        // Angles go clockwise from the right, the top is -PI/2.
        assert!(matches!(label_alignment(0.0), HPos::Left));
        assert!(matches!(label_alignment(-PI / 2.0 + 0.1), HPos::Left));
        assert!(matches!(label_alignment(PI), HPos::Right));
        assert!(matches!(label_alignment(3.0 * PI / 4.0), HPos::Right));
        assert!(matches!(label_alignment(3.0 * PI / 2.0 - 0.1), HPos::Right));
    }

    #[test]
    fn empty_distributions_are_skipped() {
        let mut report = tests_common::small_report();
        report.impact.total = 0;
        report.impact.categories.clear();
        let renderer = RecordingRenderer::default();
        let paths = render_report_charts(&renderer, &report, None).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(!paths.contains(&PathBuf::from("impact.png")));
    }
}
