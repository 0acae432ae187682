use tracing::{debug, info};

use crate::dom::traits::Document;
use crate::errors::CoreError;
use crate::models::chart::{
    AxisScale, ChartConfig, ChartData, ChartHandle, ChartKind, ChartOptions, Dataset,
    LegendOptions, PluginOptions, Scales, SeriesData,
};
use crate::models::palette::Palette;
use crate::models::settings::ChartSettings;
use crate::render::traits::ChartRenderer;

/// Upper end of the GPA scale.
pub const MAX_GPA: f64 = 4.0;

/// Sample students shown on the performance chart.
pub const PERFORMANCE_LABELS: [&str; 5] = ["Alice", "Bob", "Charlie", "David", "Eva"];
pub const PERFORMANCE_GPA: [f64; 5] = [3.8, 3.2, 3.5, 3.9, 3.6];

/// Sample months shown on the enrollment chart.
pub const ENROLLMENT_LABELS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
pub const ENROLLMENT_COUNTS: [f64; 6] = [50.0, 65.0, 80.0, 70.0, 95.0, 110.0];

/// Builds the two dashboard chart descriptors and hands them to a renderer.
///
/// The core decides every label, number and color; the renderer only draws.
/// Palette selection happens once, at render time, from the root theme
/// attribute. Charts already drawn are never re-colored.
pub struct ChartService {
    settings: ChartSettings,
}

impl ChartService {
    pub fn new(settings: ChartSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Palette for the page: the dark pair when the root theme attribute is
    /// `"dark"`, the light pair otherwise.
    pub fn palette_for(&self, document: &dyn Document) -> Palette {
        match document.root_attribute(&self.settings.theme_attribute).as_deref() {
            Some("dark") => self.settings.dark_palette,
            _ => self.settings.light_palette,
        }
    }

    /// GPA bar chart over the sample students.
    pub fn student_performance_chart(&self, palette: &Palette) -> ChartConfig {
        let series = SeriesData::from_static(&PERFORMANCE_LABELS, &PERFORMANCE_GPA);
        self.build_performance(series, palette)
    }

    /// GPA bar chart over caller-supplied students.
    /// The series must be well formed and every value must lie on the 0–4 GPA scale.
    pub fn student_performance_chart_with(
        &self,
        series: SeriesData,
        palette: &Palette,
    ) -> Result<ChartConfig, CoreError> {
        series.validate()?;
        if let Some(v) = series.values().iter().find(|v| !(0.0..=MAX_GPA).contains(*v)) {
            return Err(CoreError::ValidationError(format!(
                "GPA {v} is outside 0..={MAX_GPA}"
            )));
        }
        Ok(self.build_performance(series, palette))
    }

    /// Monthly enrollment line chart over the sample months.
    pub fn course_analytics_chart(&self, palette: &Palette) -> ChartConfig {
        let series = SeriesData::from_static(&ENROLLMENT_LABELS, &ENROLLMENT_COUNTS);
        self.build_enrollment(series, palette)
    }

    /// Enrollment line chart over caller-supplied periods.
    /// The series must be well formed; counts can't be negative.
    pub fn course_analytics_chart_with(
        &self,
        series: SeriesData,
        palette: &Palette,
    ) -> Result<ChartConfig, CoreError> {
        series.validate()?;
        if let Some(v) = series.values().iter().find(|v| **v < 0.0) {
            return Err(CoreError::ValidationError(format!(
                "enrollment count {v} is negative"
            )));
        }
        Ok(self.build_enrollment(series, palette))
    }

    /// Draw both charts with the palette the page asks for.
    ///
    /// The two creation calls are independent; each one requires its canvas
    /// to exist and fails fast with `MissingElement` otherwise.
    pub fn render_all(
        &self,
        document: &dyn Document,
        renderer: &mut dyn ChartRenderer,
    ) -> Result<Vec<ChartHandle>, CoreError> {
        let palette = self.palette_for(document);
        debug!(?palette, "chart palette selected");

        let configs = [
            self.student_performance_chart(&palette),
            self.course_analytics_chart(&palette),
        ];

        let mut handles = Vec::with_capacity(configs.len());
        for config in &configs {
            document.require_element(&config.canvas_id)?;
            let handle = renderer.create_chart(config)?;
            info!(
                renderer = renderer.name(),
                canvas = %handle.canvas_id,
                kind = %handle.kind,
                id = %handle.id,
                "chart created"
            );
            handles.push(handle);
        }
        Ok(handles)
    }

    fn build_performance(&self, series: SeriesData, palette: &Palette) -> ChartConfig {
        let (labels, values) = series.into_parts();
        let mut dataset = Dataset::new("GPA", values);
        dataset.background_color = Some(palette.performance);
        dataset.border_radius = Some(8);

        ChartConfig {
            canvas_id: self.settings.performance_canvas_id.clone(),
            kind: ChartKind::Bar,
            data: ChartData {
                labels,
                datasets: vec![dataset],
            },
            options: options(
                false,
                AxisScale {
                    begin_at_zero: true,
                    min: None,
                    max: Some(MAX_GPA),
                },
            ),
        }
    }

    fn build_enrollment(&self, series: SeriesData, palette: &Palette) -> ChartConfig {
        let (labels, values) = series.into_parts();
        let mut dataset = Dataset::new("Enrollments", values);
        dataset.border_color = Some(palette.enrollment);
        dataset.background_color = Some(palette.enrollment);
        dataset.tension = Some(0.4);
        dataset.fill = Some(true);
        dataset.point_radius = Some(5);

        ChartConfig {
            canvas_id: self.settings.enrollment_canvas_id.clone(),
            kind: ChartKind::Line,
            data: ChartData {
                labels,
                datasets: vec![dataset],
            },
            options: options(
                true,
                AxisScale {
                    begin_at_zero: true,
                    ..AxisScale::default()
                },
            ),
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new(ChartSettings::default())
    }
}

fn options(show_legend: bool, y: AxisScale) -> ChartOptions {
    ChartOptions {
        responsive: true,
        plugins: PluginOptions {
            legend: LegendOptions {
                display: show_legend,
            },
        },
        scales: Scales { y },
    }
}
