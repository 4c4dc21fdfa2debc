use anyhow::Context;
use chroma_core::window::WindowDisplay;
use chroma_core::{bootstrap, open_source, ConsoleSink, ControlEvent, SegmentationSession, View};
use chroma_detection::ColorRegistry;

// Calibration tool: shows the raw feed, prints every representation of
// each clicked pixel and derives a range from the clicks.
fn main() -> anyhow::Result<()> {
    let config = bootstrap();
    tracing::info!("range picker waking up...");

    let registry = ColorRegistry::with_builtin();
    let color = config
        .session
        .initial_color
        .clone()
        .or_else(|| registry.names().next().map(str::to_string))
        .context("registry has no colors")?;

    let source = open_source(&config).context("could not open video source")?;
    let mut window = WindowDisplay::new(
        "range picker",
        config.camera.width as usize,
        config.camera.height as usize,
        config.camera.fps as usize,
    )
    .context("could not open window")?;

    println!(
        "Click pixels to sample them. [f] name and save range, [k] restart, [r] masked view, [c] color, [q] quit"
    );

    let mut sink = ConsoleSink;
    let mut session = SegmentationSession::new(source, registry).with_view(View::Raw);
    session.announce_colors(&mut sink);
    session.start(&color, &mut sink)?;
    session.handle(ControlEvent::CalibrationStarted, &mut sink)?;
    session
        .drive(&mut window, &mut sink)
        .context("calibration session failed")?;

    let colors: Vec<&str> = session.registry().names().collect();
    tracing::info!(?colors, "range picker shutting down");
    Ok(())
}
