use tui_snake::core::GameState;
use tui_snake::term::RenderThrottle;
use tui_snake::types::{Direction, GridSize, Point, GAME_OVER_REDRAW_MS};

#[test]
fn render_throttle_renders_first_frame() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
}

#[test]
fn render_throttle_static_renders_on_change() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
    assert!(t.should_render(1, 2, true));
}

#[test]
fn render_throttle_static_throttles_when_unchanged() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
    assert!(!t.should_render(10, 1, true));
    assert!(!t.should_render(249, 1, true));
    assert!(t.should_render(250, 1, true));
}

#[test]
fn render_throttle_dynamic_always_renders() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, false));
    assert!(t.should_render(1, 1, false));
    assert!(t.should_render(2, 1, false));
}

#[test]
fn render_throttle_reset_forces_next_frame() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
    assert!(!t.should_render(5, 1, true));
    t.reset();
    assert!(t.should_render(6, 1, true));
}

#[test]
fn game_over_frame_is_drawn_once_then_held() {
    let mut game = GameState::from_layout(
        GridSize::new(10, 10),
        3,
        &[Point::new(0, 4), Point::new(1, 4), Point::new(2, 4)],
        Direction::Left,
        Point::new(8, 8),
    );
    let mut t = RenderThrottle::new(GAME_OVER_REDRAW_MS);

    let running = game.snapshot();
    assert!(t.should_render(0, running.fingerprint(), running.game_over()));

    game.tick();
    let over = game.snapshot();
    assert!(over.game_over());
    assert_ne!(over.fingerprint(), running.fingerprint());

    // The transition frame is drawn, then the static frame is held.
    assert!(t.should_render(100, over.fingerprint(), true));
    game.tick();
    assert!(!t.should_render(200, game.snapshot().fingerprint(), true));

    // Restart changes the frame again.
    game.reset();
    let restarted = game.snapshot();
    assert!(t.should_render(210, restarted.fingerprint(), restarted.game_over()));
}
