//! App module - contains the main application state and logic

mod controller;
#[cfg(test)]
mod fake_api;
mod requests;

use crate::api::{ConverterApi, HttpApi};
use crate::error::StartupError;
use crate::settings::Settings;
use crate::theme;
use controller::{Controller, Outcome};
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) controller: Controller,
    pub(crate) api: Arc<dyn ConverterApi>,
    pub(crate) api_base_url: String,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) outcome_tx: UnboundedSender<Outcome>,
    pub(crate) outcome_rx: UnboundedReceiver<Outcome>,
    // In-flight request guards
    pub(crate) units_cancel: Option<CancellationToken>,
    pub(crate) conversion_cancel: Option<CancellationToken>,
    // First-frame startup work
    pub(crate) started: bool,
    // Settings
    pub(crate) settings: Settings,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Result<Self, StartupError> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let api = HttpApi::new(&settings.api_base_url, settings.request_timeout())?;
        Self::with_api(Arc::new(api), settings, data_dir)
    }

    /// Build the app around any API implementation. Does not touch egui.
    pub fn with_api(
        api: Arc<dyn ConverterApi>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Result<Self, StartupError> {
        let (outcome_tx, outcome_rx) = unbounded_channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("metrix-io")
            .build()?;

        Ok(Self {
            controller: Controller::new(settings.last_category),
            api,
            api_base_url: settings.api_base_url.clone(),
            runtime,
            outcome_tx,
            outcome_rx,
            units_cancel: None,
            conversion_cancel: None,
            started: false,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
            settings,
        })
    }

    /// Load units for the initial category and probe the backend once.
    pub fn start(&mut self, ctx: &egui::Context) {
        if self.started {
            return;
        }
        self.started = true;
        let category = self.controller.category;
        self.change_category(category, ctx);
        self.check_health(ctx);
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            last_category: self.controller.category,
            ..self.settings.clone()
        };
        settings.save(&self.data_dir);
    }
}

#[cfg(test)]
mod tests {
    use super::fake_api::{Call, FakeApi};
    use super::*;
    use crate::error::ClientError;
    use crate::types::*;

    fn length_units() -> Vec<Unit> {
        vec![
            Unit { code: "m".into(), name: "Meter".into() },
            Unit { code: "km".into(), name: "Kilometer".into() },
            Unit { code: "ft".into(), name: "Foot".into() },
        ]
    }

    fn app_with(api: Arc<FakeApi>) -> App {
        let data_dir = std::env::temp_dir().join(format!("metrix-app-{}", std::process::id()));
        App::with_api(api, Settings::default(), data_dir).unwrap()
    }

    /// Block until `n` outcomes have been applied.
    fn settle(app: &mut App, n: usize) {
        for _ in 0..n {
            let outcome = app.outcome_rx.blocking_recv().expect("outcome channel closed");
            app.controller.apply(outcome);
        }
    }

    #[test]
    fn startup_loads_units_and_checks_health() {
        let api = Arc::new(FakeApi::new().with_units(Category::Length, length_units()));
        let mut app = app_with(api.clone());
        let ctx = egui::Context::default();
        app.start(&ctx);
        app.start(&ctx);
        settle(&mut app, 2);

        assert_eq!(app.controller.from_unit().unwrap().code, "m");
        assert_eq!(app.controller.to_unit().unwrap().code, "km");
        assert_eq!(app.controller.health, HealthStatus::Online);
        let mut calls = api.calls();
        calls.sort_by_key(|c| matches!(c, Call::Health));
        assert_eq!(calls, vec![Call::Units(Category::Length), Call::Health]);
    }

    #[test]
    fn invalid_value_makes_no_network_call() {
        let api = Arc::new(FakeApi::new().with_units(Category::Length, length_units()));
        let mut app = app_with(api.clone());
        let ctx = egui::Context::default();
        app.change_category(Category::Length, &ctx);
        settle(&mut app, 1);

        for raw in ["", "abc", "1e999"] {
            app.controller.value_input = raw.into();
            app.convert(&ctx);
            app.convert_batch(&ctx);
            assert!(matches!(app.controller.display, Display::Error(_)));
        }
        assert_eq!(api.calls(), vec![Call::Units(Category::Length)]);
    }

    #[test]
    fn server_rejection_shows_error() {
        let api = Arc::new(
            FakeApi::new()
                .with_units(Category::Length, length_units())
                .with_convert(Err(ClientError::Rejected("unsupported unit".into()))),
        );
        let mut app = app_with(api);
        let ctx = egui::Context::default();
        app.change_category(Category::Length, &ctx);
        settle(&mut app, 1);

        app.controller.value_input = "5".into();
        app.convert(&ctx);
        assert!(app.controller.is_converting());
        settle(&mut app, 1);

        assert_eq!(app.controller.display.error_message(), Some("Conversion failed: unsupported unit"));
        assert!(!app.controller.is_converting());
    }

    #[test]
    fn empty_batch_result_is_rendered() {
        let api = Arc::new(FakeApi::new().with_units(Category::Length, length_units()));
        let mut app = app_with(api.clone());
        let ctx = egui::Context::default();
        app.change_category(Category::Length, &ctx);
        settle(&mut app, 1);

        app.controller.value_input = "2".into();
        app.convert_batch(&ctx);
        settle(&mut app, 1);

        let Display::BatchResult(batch) = &app.controller.display else {
            panic!("expected batch result, got {:?}", app.controller.display);
        };
        assert!(batch.rows.is_empty());
        assert_eq!(batch.header(), "2 Meter converted to other units:");
        assert_eq!(
            api.calls().last(),
            Some(&Call::Batch(BatchConvertRequest {
                value: 2.0,
                from_unit: "m".into(),
                category: Category::Length,
            }))
        );
    }

    #[test]
    fn partial_batch_lists_failed_units() {
        let api = Arc::new(
            FakeApi::new()
                .with_units(Category::Length, length_units())
                .with_batch(Ok(BatchConvertResponse {
                    success: true,
                    original_value: 1000.0,
                    from_unit: "m".into(),
                    results: vec![BatchItem { to_unit: "km".into(), value: 1.0 }],
                    failed_units: Some(vec!["ft".into(), "league".into()]),
                })),
        );
        let mut app = app_with(api);
        let ctx = egui::Context::default();
        app.change_category(Category::Length, &ctx);
        settle(&mut app, 1);

        app.controller.value_input = "1000".into();
        app.convert_batch(&ctx);
        assert!(app.controller.is_batch_converting());
        settle(&mut app, 1);

        let Display::BatchResult(batch) = &app.controller.display else {
            panic!("expected batch result, got {:?}", app.controller.display);
        };
        assert_eq!(batch.rows, vec![BatchRow { unit_name: "Kilometer".into(), value: 1.0 }]);
        assert_eq!(
            batch.warning().as_deref(),
            Some("Warning: conversion failed for the following units: ft, league")
        );
        assert!(!app.controller.is_batch_converting());
    }

    #[test]
    fn batch_rejection_uses_batch_prefix() {
        let api = Arc::new(
            FakeApi::new()
                .with_units(Category::Length, length_units())
                .with_batch(Err(ClientError::Rejected("Invalid unit".into()))),
        );
        let mut app = app_with(api);
        let ctx = egui::Context::default();
        app.change_category(Category::Length, &ctx);
        settle(&mut app, 1);

        app.controller.value_input = "3".into();
        app.convert_batch(&ctx);
        settle(&mut app, 1);

        assert_eq!(app.controller.display.error_message(), Some("Batch conversion failed: Invalid unit"));
    }

    #[test]
    fn unknown_category_surfaces_load_error() {
        let api = Arc::new(FakeApi::new());
        let mut app = app_with(api);
        let ctx = egui::Context::default();
        app.change_category(Category::Temperature, &ctx);
        settle(&mut app, 1);
        assert_eq!(
            app.controller.display.error_message(),
            Some("Failed to load units: HTTP 404 Not Found")
        );
    }

    #[test]
    fn category_switch_cancels_pending_conversion() {
        let api = Arc::new(FakeApi::new().hanging());
        let mut app = app_with(api);
        let ctx = egui::Context::default();
        app.controller.units = length_units();
        app.controller.from_idx = Some(0);
        app.controller.to_idx = Some(1);
        app.controller.value_input = "1".into();
        app.convert(&ctx);
        let guard = app.conversion_cancel.clone().unwrap();

        app.change_category(Category::Weight, &ctx);
        assert!(guard.is_cancelled());
        assert!(!app.controller.is_converting());
        assert!(app.controller.is_loading_units());
    }
}
