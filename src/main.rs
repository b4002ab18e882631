mod app;
mod assistant;
mod config;
mod error;
mod event;
mod highlight;
mod project;
mod theme;
mod ui;
mod workbench;

use app::{AssistantStatus, DroidArchitectApp};
use assistant::gemini::GeminiClient;
use assistant::AssistantClient;
use config::AppConfig;
use eframe::egui;
use std::sync::{mpsc, Arc};
use theme::Theme;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use workbench::Workbench;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("droid_architect=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = AppConfig::from_env();
    if config.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set, assistant requests will fail");
    }
    info!(model = %config.model, timeout = ?config.request_timeout, "starting DroidArchitect");

    let forest = project::fixture::android_project()?;
    if forest.is_empty() {
        warn!("project tree is empty");
    }
    let files = forest.iter().filter(|node| !node.is_folder()).count();
    info!(nodes = forest.len(), files, "project tree loaded");
    let (tx, rx) = mpsc::channel();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("droid-architect-runtime")
        .build()?;

    let backend = Arc::new(GeminiClient::from_config(&config));
    let assistant = AssistantClient::new(
        runtime.handle().clone(),
        backend,
        tx,
        config.request_timeout,
    );
    let mut workbench = Workbench::new(forest);
    if let Some(path) = &config.open_file {
        if let Err(err) = workbench.activate_path(path) {
            warn!(error = %err, "cannot open startup file");
        }
    }
    let status = AssistantStatus::from_config(&config);
    let _runtime = runtime;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1024.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "DroidArchitect AI",
        native_options,
        Box::new(move |creation_context| {
            let ctx = creation_context.egui_ctx.clone();
            let theme = Theme::default();
            theme.apply_visuals(&ctx);
            let assistant = assistant.with_waker(move || ctx.request_repaint());
            Ok(Box::new(DroidArchitectApp::new(
                rx, assistant, workbench, theme, status,
            )))
        }),
    )?;

    Ok(())
}
