//! End-to-end: items in, pointer events through, pixels out.

use std::sync::Arc;
use std::time::Duration;

use docklight_test_utils::RecordingTarget;
use docklight_ui::{
    AutohideState, Color, Compositor, Dock, DockAction, DockConfig, DockEdge, IconImage, ItemId,
    ItemSnapshot, MonitorInfo, PointerEvent, PumpCommand, Rect, ThemeSpec, Vec2,
};

fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

fn icon(color: Color) -> Arc<IconImage> {
    Arc::new(IconImage::solid(48, 48, color).unwrap())
}

/// Run the pump until it goes idle, the way an event loop would.
fn settle(dock: &mut Dock, mut now: Duration) -> Duration {
    for _ in 0..1_000 {
        match dock.tick(now).next {
            PumpCommand::Tick { at } => now = at,
            PumpCommand::Sleep { until } => now = until,
            PumpCommand::Idle => return now,
        }
    }
    panic!("pump never settled");
}

#[test]
fn test_rendered_pixels_match_hit_test() {
    let mut dock = Dock::new(DockConfig::default(), ThemeSpec::default(), MonitorInfo::single(1280, 800)).unwrap();
    dock.set_items(
        vec![
            ItemSnapshot::application(1).with_icon(icon(Color::rgb(1.0, 0.0, 0.0))),
            ItemSnapshot::application(2).with_icon(icon(Color::rgb(0.0, 0.0, 1.0))).running(1),
        ],
        ms(0),
    );
    let out = dock.tick(ms(0));
    assert!(out.redraw);

    let target = RecordingTarget::new();
    let mut compositor = Compositor::new();
    compositor.render(dock.frame(), dock.theme(), &target).unwrap();
    let frame = target.last_frame().unwrap();

    let window = dock.window_rect();
    assert_eq!(frame.width as i32, window.width);
    assert_eq!(frame.height as i32, window.height);

    for (id, expected) in [(1, [255, 0, 0, 255]), (2, [0, 0, 255, 255])] {
        let c = dock.frame().item(ItemId(id)).unwrap().center();
        assert_eq!(dock.hit_test(c).item(), Some(ItemId(id)));
        assert_eq!(frame.pixel(c.x as u32, c.y as u32), Some(expected));
    }
}

#[test]
fn test_pump_goes_idle_after_hover_and_leave() {
    let mut dock = Dock::new(DockConfig::default(), ThemeSpec::default(), MonitorInfo::single(1280, 800)).unwrap();
    dock.set_items((1..=5).map(ItemSnapshot::application).collect(), ms(0));
    assert_eq!(dock.tick(ms(0)).next, PumpCommand::Idle);

    let c = dock.frame().items[2].center();
    dock.handle_pointer(PointerEvent::Enter { position: c }, ms(10));
    let out = dock.tick(ms(10));
    assert!(matches!(out.next, PumpCommand::Tick { .. }));
    let now = settle(&mut dock, ms(10));
    assert!((dock.frame().items[2].scale - 1.5).abs() < 1e-4);

    dock.handle_pointer(PointerEvent::Leave, now);
    settle(&mut dock, now);
    assert!(dock.frame().items.iter().all(|item| item.scale == 1.0));
}

#[test]
fn test_reserved_space_follows_autohide_toggle() {
    let monitor = MonitorInfo::single(1920, 1080);
    let mut dock = Dock::new(DockConfig::default(), ThemeSpec::default(), monitor).unwrap();
    dock.tick(ms(0));
    let shown = dock.reserved_space();
    assert_eq!(shown.edge, DockEdge::Bottom);
    assert!(shown.thickness > 0);
    let strut = dock.strut_partial();
    assert_eq!(strut[3], shown.thickness);
    assert_eq!((strut[10], strut[11]), (0, 1919));

    dock.set_autohide(true, ms(100));
    let out = dock.tick(ms(100));
    assert_eq!(out.reserved_space.map(|r| r.thickness), Some(0));
    assert_eq!(dock.strut_partial(), [0; 12]);
    assert_eq!(dock.autohide_state(), AutohideState::Hiding);

    dock.set_autohide(false, ms(150));
    let out = dock.tick(ms(150));
    assert_eq!(dock.autohide_state(), AutohideState::Visible);
    assert_eq!(out.reserved_space, Some(shown));
}

#[test]
fn test_left_dock_window_and_preview_anchor() {
    let config = DockConfig::default().with_position(DockEdge::Left);
    let mut dock = Dock::new(config, ThemeSpec::default(), MonitorInfo::single(1280, 800)).unwrap();
    dock.set_items(vec![ItemSnapshot::application(9).running(2)], ms(0));
    dock.tick(ms(0));

    let window = dock.window_rect();
    assert_eq!(window.x, 0);
    assert_eq!(window.height, 800);

    let c = dock.frame().items[0].center();
    dock.handle_pointer(PointerEvent::Enter { position: c }, ms(0));
    dock.tick(ms(0));
    let out = dock.tick(ms(400));
    let anchor: Option<Rect<f32>> = out.actions.iter().find_map(|action| match action {
        DockAction::ShowPreview { item, anchor } if *item == ItemId(9) => Some(*anchor),
        _ => None,
    });
    let anchor = anchor.expect("preview requested");
    assert!(anchor.contains(c));
}

#[test]
fn test_drag_over_opens_gap() {
    let mut dock = Dock::new(DockConfig::default().without_zoom(), ThemeSpec::default(), MonitorInfo::single(1280, 800))
        .unwrap();
    dock.set_items((1..=3).map(ItemSnapshot::application).collect(), ms(0));
    dock.tick(ms(0));
    let (a, b) = (dock.frame().items[0].center(), dock.frame().items[1].center());

    let index = dock.drag_over(Some(Vec2::new((a.x + b.x) * 0.5, a.y)));
    assert_eq!(index, Some(1));
    dock.tick(ms(0));
    let gapped = dock.frame().items[1].rect.x - dock.frame().items[0].rect.x;
    assert!(gapped > b.x - a.x + 1.0);

    assert_eq!(dock.drag_over(None), None);
    dock.tick(ms(0));
    let closed = dock.frame().items[1].rect.x - dock.frame().items[0].rect.x;
    assert!((closed - (b.x - a.x)).abs() < 1e-3);
}

#[test]
fn test_autohide_round_trip_through_the_trigger_strip() {
    let config = DockConfig::default()
        .with_autohide(true)
        .with_hide_timing(100, 100, 250);
    let mut dock = Dock::new(config, ThemeSpec::default(), MonitorInfo::single(1280, 800)).unwrap();
    dock.set_items((1..=3).map(ItemSnapshot::application).collect(), ms(0));
    dock.tick(ms(0));
    let strip = Vec2::new(20.0, dock.frame().window.height - 1.0);
    let item = dock.frame().items[1].center();

    dock.handle_pointer(PointerEvent::Enter { position: item }, ms(10));
    dock.tick(ms(10));
    assert_eq!(dock.autohide_state(), AutohideState::Visible);
    assert_eq!(dock.input_region().rects().len(), 1);
    assert!(dock.input_region().contains(item));
    assert_eq!(dock.reserved_space().thickness, 0);
    assert_eq!(dock.strut_partial(), [0; 12]);

    dock.handle_pointer(PointerEvent::Leave, ms(20));
    dock.tick(ms(20));
    assert_eq!(dock.autohide_state(), AutohideState::Visible);
    let out = dock.tick(ms(120));
    assert_eq!(dock.autohide_state(), AutohideState::Hiding);
    assert_eq!(out.state_changes.len(), 1);
    assert_eq!(dock.input_region().rects().len(), 2);
    assert!(dock.input_region().contains(strip));

    dock.tick(ms(360));
    assert_eq!(dock.autohide_state(), AutohideState::Hiding);

    // The run ends at 370; the pointer reaches the strip before the next tick.
    dock.handle_pointer(PointerEvent::Enter { position: strip }, ms(372));
    assert_eq!(dock.autohide_state(), AutohideState::Hidden);
    let out = dock.tick(ms(372));
    assert_eq!(dock.autohide_state(), AutohideState::Hidden);
    assert_eq!(
        out.state_changes.iter().map(|c| c.to).collect::<Vec<_>>(),
        vec![AutohideState::Hidden]
    );
    assert_eq!(dock.input_region().rects().len(), 1);
    assert!(dock.input_region().contains(strip));
    assert!(!dock.input_region().contains(item));
    assert!(out.next.deadline().is_some_and(|at| at <= ms(472)));
    assert_eq!(dock.reserved_space().thickness, 0);

    dock.tick(ms(472));
    assert_eq!(dock.autohide_state(), AutohideState::Showing);
    assert_eq!(dock.input_region().rects().len(), 2);

    settle(&mut dock, ms(472));
    assert_eq!(dock.autohide_state(), AutohideState::Visible);
    let item = dock.frame().items[1].center();
    assert!(dock.input_region().contains(item));
    assert_eq!(dock.reserved_space().thickness, 0);
}
