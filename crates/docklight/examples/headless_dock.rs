//! Drives a dock without a window: a pointer sweeps across five items,
//! clicks one, and leaves so the dock hides.
//!
//! Run with: cargo run -p docklight --example headless_dock
//!
//! Set `DOCKLIGHT_PROFILE=1` to serve puffin scopes to `puffin_viewer`.

use std::time::Duration;

use docklight::core::profiling::{ProfilingBackend, init_profiling};
use docklight::prelude::*;

fn main() {
    docklight::core::logging::init();
    if std::env::var_os("DOCKLIGHT_PROFILE").is_some() {
        init_profiling(ProfilingBackend::PuffinHttp);
    }

    let config = DockConfig::default()
        .with_autohide(true)
        .with_hide_timing(200, 0, 250);
    let mut dock = match Dock::new(config, ThemeSpec::default(), MonitorInfo::single(1920, 1080)) {
        Ok(dock) => dock,
        Err(err) => {
            eprintln!("invalid configuration: {}", err);
            return;
        }
    };
    dock.set_items(
        (1..=5)
            .map(|id| ItemSnapshot::application(id).running((id % 2) as u32))
            .collect(),
        Duration::ZERO,
    );
    dock.tick(Duration::ZERO);
    println!("window: {:?}", dock.window_rect());
    println!("reserved: {} px", dock.reserved_space().thickness);

    let mut compositor = Compositor::new();
    let mut now = Duration::ZERO;
    let y = dock.frame().items[0].center().y;
    let start = dock.frame().items[0].center().x;
    let end = dock.frame().items[4].center().x;
    dock.handle_pointer(PointerEvent::Enter { position: Vec2::new(start, y) }, now);

    let mut x = start;
    while x <= end {
        now += Duration::from_millis(16);
        dock.handle_pointer(PointerEvent::Motion { position: Vec2::new(x, y) }, now);
        let output = dock.tick(now);
        for action in &output.actions {
            println!("{:>6} ms  {:?}", now.as_millis(), action);
        }
        if output.redraw && compositor.draw(dock.frame(), dock.theme()).is_err() {
            eprintln!("failed to draw frame");
        }
        x += 8.0;
    }

    let scales: Vec<String> = dock
        .frame()
        .items
        .iter()
        .map(|item| format!("{:.2}", item.scale))
        .collect();
    println!("scales at the last item: [{}]", scales.join(", "));

    let target = Vec2::new(end, y);
    for button in [PointerButton::Left, PointerButton::Right] {
        let press = PointerEvent::Press {
            button,
            position: target,
            modifiers: Default::default(),
        };
        let release = PointerEvent::Release {
            button,
            position: target,
            modifiers: Default::default(),
        };
        dock.handle_pointer(press, now);
        for action in dock.handle_pointer(release, now) {
            println!("{:>6} ms  {:?}", now.as_millis(), action);
        }
    }

    dock.handle_pointer(PointerEvent::Leave, now);
    loop {
        let output = dock.tick(now);
        for change in &output.state_changes {
            println!("{:>6} ms  autohide {} -> {}", change.at.as_millis(), change.from, change.to);
        }
        match output.next.deadline() {
            Some(at) if at > now => now = at,
            _ => break,
        }
    }
    println!("final state: {}", dock.autohide_state());
}
