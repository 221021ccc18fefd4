use lamp_base::{log, log_fatal};
use lamp_detect::Detector;
use lamp_video::{Source, SourceConfig};
use lampwatch::{LoopConfig, WindowDisplay};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // lampwatch [SOURCE] [LOG_DIR]
    let mut args = std::env::args().skip(1);
    let source_arg = args.next();
    match args.next() {
        Some(dir) => lamp_base::init_file_logger(dir)?,
        None => lamp_base::init_stdout_logger(),
    }

    let source_config = source_arg
        .as_deref()
        .map(SourceConfig::from_arg)
        .unwrap_or_default();

    log::info!("Traffic light detection");
    log::info!("Opening {:?}", source_config.kind());
    let source = match Source::open(&source_config).await {
        Ok(source) => source,
        Err(e) => log_fatal!("Cannot open video source: {}", e),
    };

    let loop_config = LoopConfig::default();
    let display = WindowDisplay::new(&loop_config);
    let summary = lampwatch::run(source, display, &Detector::default(), &loop_config).await?;
    log::info!("Exiting ({:?})", summary.exit);
    Ok(())
}
