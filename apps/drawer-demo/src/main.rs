mod app;

use anyhow::{ensure, Context};
use app::DemoApp;
use vdrawer_ui::{DrawerConfig, DEFAULT_PEEK_HEIGHT};

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let peek_height = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<f32>()
            .with_context(|| format!("peek height must be a number, got {arg:?}"))?,
        None => DEFAULT_PEEK_HEIGHT,
    };
    ensure!(peek_height >= 0.0, "peek height must not be negative");

    println!("=== Vertical Drawer Demo ===");
    println!("Replays a few gestures against a 1080x1920 screen with a 1000px drawer.");
    println!("Set RUST_LOG=debug to watch every placement.");
    println!();

    let config = DrawerConfig::default()
        .with_can_scroll(true)
        .with_peek_height(peek_height);
    let mut app = DemoApp::new(config, true);
    report("initial", &app);

    // From the top edge band, then hold so the release has no fling.
    app.swipe(4.0, 700.0, 16, true);
    let frames = app.run_frames();
    report(&format!("edge swipe ({frames} frames)"), &app);
    ensure!(app.drawer().is_open(), "edge swipe did not open the drawer");

    app.swipe(900.0, 700.0, 4, false);
    let frames = app.run_frames();
    report(&format!("upward fling ({frames} frames)"), &app);
    ensure!(!app.drawer().is_open(), "upward fling did not close the drawer");

    app.drawer().toggle();
    let frames = app.run_frames();
    report(&format!("toggle ({frames} frames)"), &app);

    app.drawer().toggle();
    app.run_frames();
    app.set_peek_height(peek_height / 2.0);
    report("half peek", &app);

    Ok(())
}

fn report(label: &str, app: &DemoApp) {
    let screen = app.screen();
    println!(
        "{label:>28}: top {:>7.1}  showing {:>4}px  open {:<5}  content {}",
        screen.drawer_top(),
        app.drawer().show_height(),
        app.drawer().is_open(),
        if screen.content_visible() {
            "visible"
        } else {
            "gone"
        }
    );
}
