//! samOS: an Aqua-style desktop with a window manager, dock and applets

use eframe::NativeOptions;
use samdesktop::DesktopApp;
use std::io::Write;

const CRASH_LOG: &str = "/tmp/samos-crash.log";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    setup_panic_handler();

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([360.0, 480.0])
            .with_title("samOS"),
        ..Default::default()
    };
    let result = eframe::run_native(
        "samOS",
        options,
        Box::new(|cc| {
            samcore::AquaTheme::default().apply(&cc.egui_ctx);
            Box::new(DesktopApp::new(cc))
        }),
    );
    match result {
        Ok(()) => log::info!("clean shutdown"),
        Err(e) => {
            log::error!("eframe error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Log panics and keep a copy for post-mortem.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        log::error!("PANIC at {}: {}", location, msg);

        if let Ok(mut file) = std::fs::OpenOptions::new().create(true).append(true).open(CRASH_LOG) {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            let _ = writeln!(file, "[{}] PANIC at {}: {}", timestamp, location, msg);
        }
    }));
}
