use brief_app::platform::logging::{self, LogDestination};
use brief_app::platform::{self, ServerSettings};
use brief_engine::CompletionSettings;
use log::LevelFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::initialize(LogDestination::Both, LevelFilter::Info);
    platform::run_app(ServerSettings::default(), CompletionSettings::default()).await
}
