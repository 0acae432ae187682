// ═══════════════════════════════════════════════════════════════════
// Service Tests — ThemeService, ChartService, renderers, MemoryDocument
// ═══════════════════════════════════════════════════════════════════

use campus_dashboard_core::dom::memory::MemoryDocument;
use campus_dashboard_core::dom::traits::Document;
use campus_dashboard_core::errors::CoreError;
use campus_dashboard_core::models::chart::{ChartConfig, ChartHandle, ChartKind, SeriesData};
use campus_dashboard_core::models::palette::Palette;
use campus_dashboard_core::models::theme::Theme;
use campus_dashboard_core::render::script::ChartJsScriptRenderer;
use campus_dashboard_core::render::traits::ChartRenderer;
use campus_dashboard_core::services::chart_service::ChartService;
use campus_dashboard_core::services::theme_service::ThemeService;
use campus_dashboard_core::storage::memory::MemoryPreferenceStore;
use campus_dashboard_core::storage::traits::PreferenceStore;

// ═══════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════

const DEFAULT_LABEL: &str = r#"<i class="bi bi-moon"></i> Dark Mode"#;

fn page() -> MemoryDocument {
    MemoryDocument::new()
        .with_element("themeToggle", DEFAULT_LABEL)
        .with_element("studentPerformanceChart", "")
        .with_element("courseAnalyticsChart", "")
}

/// Renderer that keeps every descriptor it was asked to draw.
#[derive(Default)]
struct RecordingRenderer {
    configs: Vec<ChartConfig>,
    fail_on: Option<String>,
}

impl ChartRenderer for RecordingRenderer {
    fn name(&self) -> &str {
        "recording"
    }

    fn create_chart(&mut self, config: &ChartConfig) -> Result<ChartHandle, CoreError> {
        if self.fail_on.as_deref() == Some(config.canvas_id.as_str()) {
            return Err(CoreError::Render {
                renderer: self.name().into(),
                message: "boom".into(),
            });
        }
        self.configs.push(config.clone());
        Ok(ChartHandle::new(config, self.name()))
    }
}

/// Store that reads fine but refuses every write.
struct ReadOnlyStore(MemoryPreferenceStore);

impl PreferenceStore for ReadOnlyStore {
    fn name(&self) -> &str {
        "read-only"
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        self.0.get_item(key)
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), CoreError> {
        Err(CoreError::Storage("quota exceeded".into()))
    }

    fn remove_item(&mut self, _key: &str) -> Result<(), CoreError> {
        Err(CoreError::Storage("quota exceeded".into()))
    }
}

// ═══════════════════════════════════════════════════════════════════
// MemoryDocument
// ═══════════════════════════════════════════════════════════════════

mod memory_document {
    use super::*;

    #[test]
    fn toggle_body_class_reports_membership() {
        let mut doc = MemoryDocument::new();
        assert!(doc.toggle_body_class("dark-mode"));
        assert!(doc.body_has_class("dark-mode"));
        assert!(!doc.toggle_body_class("dark-mode"));
        assert!(!doc.body_has_class("dark-mode"));
    }

    #[test]
    fn set_inner_html_requires_element() {
        let mut doc = MemoryDocument::new();
        let err = doc.set_inner_html("nope", "x").unwrap_err();
        assert!(matches!(err, CoreError::MissingElement(ref id) if id == "nope"));
    }

    #[test]
    fn root_attribute() {
        let mut doc = MemoryDocument::new().with_root_attribute("data-bs-theme", "dark");
        assert_eq!(doc.root_attribute("data-bs-theme").as_deref(), Some("dark"));
        doc.set_root_attribute("data-bs-theme", "light");
        assert_eq!(doc.root_attribute("data-bs-theme").as_deref(), Some("light"));
        assert_eq!(doc.root_attribute("lang"), None);
    }

    #[test]
    fn body_classes_listed() {
        let mut doc = MemoryDocument::new();
        doc.add_body_class("b");
        doc.add_body_class("a");
        assert_eq!(doc.body_classes().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ThemeService
// ═══════════════════════════════════════════════════════════════════

mod theme_service {
    use super::*;

    #[test]
    fn initialize_with_stored_dark() {
        let svc = ThemeService::default();
        let store = MemoryPreferenceStore::with_entry("theme", "dark");
        let mut doc = page();

        let theme = svc.initialize(&store, &mut doc).unwrap();

        assert_eq!(theme, Theme::Dark);
        assert!(doc.body_has_class("dark-mode"));
        assert!(doc.inner_html("themeToggle").unwrap().contains("Light Mode"));
    }

    #[test]
    fn initialize_with_stored_light_leaves_page_untouched() {
        let svc = ThemeService::default();
        let store = MemoryPreferenceStore::with_entry("theme", "light");
        let mut doc = page();

        let theme = svc.initialize(&store, &mut doc).unwrap();

        assert_eq!(theme, Theme::Light);
        assert!(!doc.body_has_class("dark-mode"));
        assert_eq!(doc.inner_html("themeToggle"), Some(DEFAULT_LABEL));
    }

    #[test]
    fn initialize_without_preference_is_light() {
        let svc = ThemeService::default();
        let store = MemoryPreferenceStore::new();
        let mut doc = page();

        assert_eq!(svc.initialize(&store, &mut doc).unwrap(), Theme::Light);
        assert!(!doc.body_has_class("dark-mode"));
        assert!(doc.inner_html("themeToggle").unwrap().contains("Dark Mode"));
    }

    #[test]
    fn initialize_does_not_write_storage() {
        let svc = ThemeService::default();
        let store = MemoryPreferenceStore::new();
        let mut doc = page();
        svc.initialize(&store, &mut doc).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn initialize_without_toggle_fails_fast() {
        let svc = ThemeService::default();
        let store = MemoryPreferenceStore::with_entry("theme", "dark");
        let mut doc = MemoryDocument::new();

        let err = svc.initialize(&store, &mut doc).unwrap_err();
        assert!(matches!(err, CoreError::MissingElement(ref id) if id == "themeToggle"));
        assert!(!doc.body_has_class("dark-mode"));
    }

    #[test]
    fn toggle_from_light_goes_dark_and_persists() {
        let svc = ThemeService::default();
        let mut store = MemoryPreferenceStore::new();
        let mut doc = page();

        let theme = svc.toggle(&mut store, &mut doc).unwrap();

        assert_eq!(theme, Theme::Dark);
        assert!(doc.body_has_class("dark-mode"));
        assert_eq!(
            doc.inner_html("themeToggle"),
            Some(r#"<i class="bi bi-brightness-high"></i> Light Mode"#)
        );
        assert_eq!(store.get_item("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn toggle_from_dark_goes_light_and_persists() {
        let svc = ThemeService::default();
        let mut store = MemoryPreferenceStore::with_entry("theme", "dark");
        let mut doc = page();
        svc.initialize(&store, &mut doc).unwrap();

        let theme = svc.toggle(&mut store, &mut doc).unwrap();

        assert_eq!(theme, Theme::Light);
        assert!(!doc.body_has_class("dark-mode"));
        assert_eq!(doc.inner_html("themeToggle"), Some(DEFAULT_LABEL));
        assert_eq!(store.get_item("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn double_toggle_restores_class_and_storage() {
        let svc = ThemeService::default();
        let mut store = MemoryPreferenceStore::with_entry("theme", "light");
        let mut doc = page();
        svc.initialize(&store, &mut doc).unwrap();

        svc.toggle(&mut store, &mut doc).unwrap();
        svc.toggle(&mut store, &mut doc).unwrap();

        assert!(!doc.body_has_class("dark-mode"));
        assert_eq!(store.get_item("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn displayed_and_stored_agree_after_every_toggle() {
        let svc = ThemeService::default();
        let mut store = MemoryPreferenceStore::new();
        let mut doc = page();
        for _ in 0..5 {
            svc.toggle(&mut store, &mut doc).unwrap();
            assert_eq!(svc.displayed_theme(&doc), svc.stored_theme(&store).unwrap());
        }
    }

    #[test]
    fn toggle_follows_body_class_not_storage() {
        // Body already dark by markup, storage says light: the click flips
        // what is shown.
        let svc = ThemeService::default();
        let mut store = MemoryPreferenceStore::with_entry("theme", "light");
        let mut doc = page();
        doc.add_body_class("dark-mode");

        assert_eq!(svc.toggle(&mut store, &mut doc).unwrap(), Theme::Light);
        assert_eq!(store.get_item("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn toggle_with_failing_store_updates_page_then_reports_error() {
        let svc = ThemeService::default();
        let mut store = ReadOnlyStore(MemoryPreferenceStore::with_entry("theme", "light"));
        let mut doc = page();

        let err = svc.toggle(&mut store, &mut doc).unwrap_err();

        assert!(matches!(err, CoreError::Storage(_)));
        assert_eq!(svc.displayed_theme(&doc), Theme::Dark);
        assert!(doc.inner_html("themeToggle").unwrap().ends_with("Light Mode"));
        assert_eq!(svc.stored_theme(&store).unwrap(), Theme::Light);
    }

    #[test]
    fn custom_settings_are_honoured() {
        let settings = campus_dashboard_core::models::settings::ThemeSettings {
            storage_key: "ui".into(),
            dark_class: "night".into(),
            toggle_element_id: "switch".into(),
        };
        let svc = ThemeService::new(settings);
        let mut store = MemoryPreferenceStore::new();
        let mut doc = MemoryDocument::new().with_element("switch", "");

        svc.toggle(&mut store, &mut doc).unwrap();

        assert!(doc.body_has_class("night"));
        assert_eq!(store.get_item("ui").unwrap().as_deref(), Some("dark"));
        assert_eq!(store.get_item("theme").unwrap(), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartService
// ═══════════════════════════════════════════════════════════════════

mod chart_service {
    use super::*;

    #[test]
    fn palette_dark_attribute() {
        let svc = ChartService::default();
        let doc = page().with_root_attribute("data-bs-theme", "dark");
        assert_eq!(svc.palette_for(&doc), Palette::DARK);
    }

    #[test]
    fn palette_light_or_missing_attribute() {
        let svc = ChartService::default();
        assert_eq!(svc.palette_for(&page()), Palette::LIGHT);
        let doc = page().with_root_attribute("data-bs-theme", "light");
        assert_eq!(svc.palette_for(&doc), Palette::LIGHT);
        let doc = page().with_root_attribute("data-bs-theme", "auto");
        assert_eq!(svc.palette_for(&doc), Palette::LIGHT);
    }

    #[test]
    fn palette_ignores_body_class() {
        let svc = ChartService::default();
        let mut doc = page();
        doc.add_body_class("dark-mode");
        assert_eq!(svc.palette_for(&doc), Palette::LIGHT);
    }

    #[test]
    fn performance_chart_descriptor() {
        let svc = ChartService::default();
        let c = svc.student_performance_chart(&Palette::LIGHT);

        assert_eq!(c.canvas_id, "studentPerformanceChart");
        assert_eq!(c.kind, ChartKind::Bar);
        assert_eq!(c.data.labels, vec!["Alice", "Bob", "Charlie", "David", "Eva"]);
        let ds = &c.data.datasets[0];
        assert_eq!(ds.label, "GPA");
        assert_eq!(ds.data, vec![3.8, 3.2, 3.5, 3.9, 3.6]);
        assert_eq!(ds.background_color, Some(Palette::LIGHT.performance));
        assert_eq!(ds.border_radius, Some(8));
        assert!(!c.options.legend_visible());
        assert!(c.options.responsive);
    }

    #[test]
    fn performance_axis_is_zero_to_four_in_both_themes() {
        let svc = ChartService::default();
        for palette in [Palette::LIGHT, Palette::DARK] {
            let y = svc.student_performance_chart(&palette).options.scales.y;
            assert_eq!(y.lower_bound(), Some(0.0));
            assert_eq!(y.upper_bound(), Some(4.0));
        }
    }

    #[test]
    fn enrollment_chart_descriptor() {
        let svc = ChartService::default();
        let c = svc.course_analytics_chart(&Palette::DARK);

        assert_eq!(c.canvas_id, "courseAnalyticsChart");
        assert_eq!(c.kind, ChartKind::Line);
        assert_eq!(c.point_count(), 6);
        assert_eq!(c.data.labels, vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
        let ds = &c.data.datasets[0];
        assert_eq!(ds.label, "Enrollments");
        assert_eq!(ds.data, vec![50.0, 65.0, 80.0, 70.0, 95.0, 110.0]);
        assert_eq!(ds.border_color, Some(Palette::DARK.enrollment));
        assert_eq!(ds.background_color, Some(Palette::DARK.enrollment));
        assert_eq!(ds.tension, Some(0.4));
        assert_eq!(ds.fill, Some(true));
        assert_eq!(ds.point_radius, Some(5));
        assert!(c.options.legend_visible());
        assert_eq!(c.options.scales.y.lower_bound(), Some(0.0));
        assert_eq!(c.options.scales.y.upper_bound(), None);
    }

    #[test]
    fn enrollment_data_is_theme_independent() {
        let svc = ChartService::default();
        let light = svc.course_analytics_chart(&Palette::LIGHT);
        let dark = svc.course_analytics_chart(&Palette::DARK);
        assert_eq!(light.data.labels, dark.data.labels);
        assert_eq!(light.data.datasets[0].data, dark.data.datasets[0].data);
    }

    #[test]
    fn performance_with_custom_series() {
        let svc = ChartService::default();
        let series = SeriesData::new(["Zoe", "Yan"], vec![0.0, 4.0]).unwrap();
        let c = svc
            .student_performance_chart_with(series, &Palette::LIGHT)
            .unwrap();
        assert_eq!(c.data.labels, vec!["Zoe", "Yan"]);
        assert_eq!(c.options.scales.y.upper_bound(), Some(4.0));
    }

    #[test]
    fn performance_rejects_out_of_scale_gpa() {
        let svc = ChartService::default();
        for bad in [4.1, -0.5] {
            let series = SeriesData::new(["Zoe"], vec![bad]).unwrap();
            let err = svc
                .student_performance_chart_with(series, &Palette::LIGHT)
                .unwrap_err();
            assert!(matches!(err, CoreError::ValidationError(_)));
        }
    }

    #[test]
    fn builders_reject_malformed_series() {
        let svc = ChartService::default();
        for json in [
            r#"{ "labels": ["Zoe"], "values": [] }"#,
            r#"{ "labels": [], "values": [50.0, 5.0] }"#,
            r#"{ "labels": [], "values": [] }"#,
        ] {
            let series: SeriesData = serde_json::from_str(json).unwrap();
            let err = svc
                .student_performance_chart_with(series.clone(), &Palette::LIGHT)
                .unwrap_err();
            assert!(matches!(err, CoreError::ValidationError(_)), "{json}");
            let err = svc
                .course_analytics_chart_with(series, &Palette::LIGHT)
                .unwrap_err();
            assert!(matches!(err, CoreError::ValidationError(_)), "{json}");
        }
    }

    #[test]
    fn enrollment_rejects_non_finite_counts() {
        let err = SeriesData::new(["Jan", "Feb"], vec![f64::NAN, 5.0]).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        let err = SeriesData::new(["Jan"], vec![f64::INFINITY]).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn enrollment_rejects_negative_counts() {
        let svc = ChartService::default();
        let series = SeriesData::new(["Jan", "Feb"], vec![10.0, -1.0]).unwrap();
        let err = svc
            .course_analytics_chart_with(series, &Palette::LIGHT)
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn render_all_creates_both_charts_in_order() {
        let svc = ChartService::default();
        let doc = page().with_root_attribute("data-bs-theme", "dark");
        let mut renderer = RecordingRenderer::default();

        let handles = svc.render_all(&doc, &mut renderer).unwrap();

        assert_eq!(handles.len(), 2);
        assert_eq!(handles[0].kind, ChartKind::Bar);
        assert_eq!(handles[1].kind, ChartKind::Line);
        assert_eq!(handles[0].renderer, "recording");
        assert_eq!(renderer.configs.len(), 2);
        assert_eq!(
            renderer.configs[0].data.datasets[0].background_color,
            Some(Palette::DARK.performance)
        );
        assert_eq!(
            renderer.configs[1].data.datasets[0].border_color,
            Some(Palette::DARK.enrollment)
        );
    }

    #[test]
    fn render_all_missing_canvas_fails_fast() {
        let svc = ChartService::default();
        let doc = MemoryDocument::new().with_element("studentPerformanceChart", "");
        let mut renderer = RecordingRenderer::default();

        let err = svc.render_all(&doc, &mut renderer).unwrap_err();

        assert!(matches!(err, CoreError::MissingElement(ref id) if id == "courseAnalyticsChart"));
        assert_eq!(renderer.configs.len(), 1);
    }

    #[test]
    fn render_all_propagates_renderer_error() {
        let svc = ChartService::default();
        let mut renderer = RecordingRenderer {
            fail_on: Some("studentPerformanceChart".into()),
            ..RecordingRenderer::default()
        };
        let err = svc.render_all(&page(), &mut renderer).unwrap_err();
        assert!(matches!(err, CoreError::Render { .. }));
        assert!(renderer.configs.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartJsScriptRenderer
// ═══════════════════════════════════════════════════════════════════

mod script_renderer {
    use super::*;

    #[test]
    fn emits_one_statement_per_chart() {
        let svc = ChartService::default();
        let mut renderer = ChartJsScriptRenderer::new();
        svc.render_all(&page(), &mut renderer).unwrap();

        assert_eq!(renderer.charts().len(), 2);
        let first = &renderer.charts()[0].statement;
        assert!(first.starts_with(
            "new Chart(document.getElementById(\"studentPerformanceChart\").getContext('2d'), {"
        ));
        assert!(first.ends_with("});"));
        assert!(first.contains("\"type\":\"bar\""));
        assert!(renderer.charts()[1].statement.contains("\"type\":\"line\""));
    }

    #[test]
    fn statement_embeds_library_json() {
        let svc = ChartService::default();
        let config = svc.course_analytics_chart(&Palette::LIGHT);
        let mut renderer = ChartJsScriptRenderer::new();
        renderer.create_chart(&config).unwrap();

        let stmt = &renderer.charts()[0].statement;
        let json_start = stmt.find(", {").unwrap() + 2;
        let json = &stmt[json_start..stmt.len() - 2];
        let v: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(v["data"]["datasets"][0]["pointRadius"], 5);
        assert_eq!(v["data"]["datasets"][0]["borderColor"], "rgba(255,193,7,0.5)");
    }

    #[test]
    fn script_wraps_in_dom_ready_listener() {
        let svc = ChartService::default();
        let mut renderer = ChartJsScriptRenderer::new();
        svc.render_all(&page(), &mut renderer).unwrap();

        let script = renderer.script();
        assert!(script.starts_with("document.addEventListener(\"DOMContentLoaded\", () => {\n"));
        assert!(script.ends_with("});\n"));
        assert_eq!(script.matches("new Chart(").count(), 2);
    }

    #[test]
    fn closing_script_tag_is_escaped() {
        let svc = ChartService::default();
        let series = SeriesData::new(["</script>"], vec![3.0]).unwrap();
        let config = svc
            .student_performance_chart_with(series, &Palette::LIGHT)
            .unwrap();
        let mut renderer = ChartJsScriptRenderer::new();
        renderer.create_chart(&config).unwrap();
        assert!(!renderer.script().contains("</script>"));
    }
}
