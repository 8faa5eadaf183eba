use quakemap::{
    core::geo::Point,
    runtime::{spawn_with_result, TaskHandle},
    ui::{widget::MapWidgetExt, QuakeMapWidget},
    HttpFeedSource, Map, MapContainer, QuakeMapConfig,
};
use std::time::Duration;

/// Desktop viewer: fetches the weekly USGS feed once and shows the map
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = QuakeMapConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Earthquakes - past week"),
        ..Default::default()
    };

    eframe::run_native(
        "quakemap-app",
        options,
        Box::new(move |cc| Box::new(QuakeMapApp::new(cc, config))),
    )?;

    Ok(())
}

enum LoadState {
    Loading(TaskHandle<quakemap::Result<Map>>),
    Ready(QuakeMapWidget),
    Failed(String),
}

struct QuakeMapApp {
    state: LoadState,
}

impl QuakeMapApp {
    fn new(_cc: &eframe::CreationContext<'_>, config: QuakeMapConfig) -> Self {
        let container = MapContainer::new(config.container_id.clone(), Point::new(1200.0, 800.0));

        let loading = spawn_with_result(async move {
            let source = HttpFeedSource::new(config.feed_url.clone());
            quakemap::load_earthquake_map(&config, &source, &container).await
        });

        let state = match loading {
            Ok(handle) => LoadState::Loading(handle),
            Err(e) => {
                log::error!("cannot start feed fetch: {}", e);
                LoadState::Failed(e.to_string())
            }
        };

        Self { state }
    }

    fn poll_loading(&mut self) {
        if let LoadState::Loading(handle) = &mut self.state {
            match handle.try_result() {
                Some(Ok(Ok(map))) => {
                    log::info!("earthquake map ready");
                    self.state = LoadState::Ready(QuakeMapWidget::new(map));
                }
                Some(Ok(Err(e))) | Some(Err(e)) => {
                    log::error!("failed to load earthquake map: {}", e);
                    self.state = LoadState::Failed(e.to_string());
                }
                None => {}
            }
        }
    }
}

impl eframe::App for QuakeMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loading();

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| match &mut self.state {
                LoadState::Loading(_) => {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                    ctx.request_repaint_after(Duration::from_millis(100));
                }
                LoadState::Ready(widget) => {
                    ui.quake_map(widget);
                }
                LoadState::Failed(message) => {
                    ui.centered_and_justified(|ui| {
                        ui.label(format!("Could not load earthquakes: {}", message));
                    });
                }
            });
    }
}
