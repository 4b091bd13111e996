//! Wiring & DI. Entry point: bootstrap adapters, inject into the service,
//! run the UI. No business logic here.

use regdesk::adapters::camera::{FileCamera, MockBehavior, MockCamera};
use regdesk::adapters::http::HttpRegistrationApi;
use regdesk::adapters::media::ImageRsEncoder;
use regdesk::adapters::ui::tui::TuiInputPort;
use regdesk::ports::{CameraPort, FrameEncoder, InputPort, RegistrationApi};
use regdesk::shared::config::AppConfig;
use regdesk::usecases::RegistrationService;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    regdesk::adapters::ui::init_ui();

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "configuration load failed, using defaults");
            AppConfig::default()
        }
    };
    let base_url = cfg.api_base_url_or_default();
    let timeout = Duration::from_secs(cfg.http_timeout_secs_or_default());
    info!(base_url = %base_url, timeout_secs = timeout.as_secs(), "backend target");

    let api: Arc<dyn RegistrationApi> = Arc::new(
        HttpRegistrationApi::new(&base_url, timeout)
            .map_err(|e| anyhow::anyhow!("HTTP client: {}", e))?,
    );

    let camera: Arc<dyn CameraPort> = match cfg.frames_dir.as_deref() {
        Some(dir) => {
            info!(frames_dir = dir, "file-backed camera enabled");
            Arc::new(FileCamera::new(dir))
        }
        None => {
            warn!("REGDESK_FRAMES_DIR not set, using mock camera");
            Arc::new(MockCamera::new(MockBehavior::Ready))
        }
    };
    let encoder: Arc<dyn FrameEncoder> = Arc::new(ImageRsEncoder::new());

    let service = RegistrationService::new(api, camera, encoder);
    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(service));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
