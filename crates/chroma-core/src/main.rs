use anyhow::Context;
use chroma_core::console::prompt;
use chroma_core::window::WindowDisplay;
use chroma_core::{bootstrap, open_source, ConsoleSink, SegmentationSession};
use chroma_detection::ColorRegistry;

fn main() -> anyhow::Result<()> {
    let config = bootstrap();
    tracing::info!("chroma waking up...");

    let source = open_source(&config).context("could not open video source")?;
    let mut window = WindowDisplay::new(
        &config.session.window_title,
        config.camera.width as usize,
        config.camera.height as usize,
        config.camera.fps as usize,
    )
    .context("could not open window")?;

    let mut sink = ConsoleSink;
    let mut session = SegmentationSession::new(source, ColorRegistry::with_builtin());
    session.announce_colors(&mut sink);
    match config.session.initial_color.as_deref() {
        Some(color) => session
            .start(color, &mut sink)
            .context("configured initial color is not registered")?,
        None => {
            let started =
                session.start_prompted(|| prompt("Specify Color Mask: "), &mut sink)?;
            anyhow::ensure!(started, "no color given");
        }
    }

    session
        .drive(&mut window, &mut sink)
        .context("segmentation session failed")?;

    tracing::info!("chroma shutting down");
    Ok(())
}
