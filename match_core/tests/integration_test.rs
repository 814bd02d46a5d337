use glam::Vec2;
use match_core::*;
use std::cell::RefCell;
use std::rc::Rc;

const FRAME_MS: f64 = 16.0;

struct Harness {
    sim: Simulator,
    clock: ManualClock,
    results: Rc<RefCell<Vec<MatchResult>>>,
}

impl Harness {
    fn start(setup: MatchSetup) -> Self {
        let clock = ManualClock::new();
        let results = Rc::new(RefCell::new(Vec::new()));
        let sink = results.clone();
        let sim = Simulator::start(setup, Config::new(), Box::new(clock.clone()), move |r| {
            sink.borrow_mut().push(r)
        })
        .expect("valid setup");
        Self {
            sim,
            clock,
            results,
        }
    }

    fn tick(&mut self) {
        self.clock.advance(FRAME_MS);
        self.sim.tick();
    }
}

fn area() -> PlayArea {
    PlayArea::new(0.0, 800.0, 600.0).expect("valid area")
}

fn setup() -> MatchSetup {
    MatchSetup::new(area(), "player1", "player2").with_seed(7)
}

#[test]
fn test_match_point_ends_match_and_freezes_state() {
    let mut h = Harness::start(setup().resume_at(9, 9));
    // Left paddle parked at the top, ball running along the bottom
    h.sim.place_paddle(Side::Left, 0.0);
    h.sim.serve(Vec2::new(100.0, 500.0), Vec2::new(-5.0, 0.0));

    let mut ticks = 0;
    while h.sim.is_running() && ticks < 100 {
        h.tick();
        ticks += 1;
    }

    assert_eq!(h.sim.phase(), MatchPhase::Finished);
    assert_eq!(h.sim.score(), Score { left: 9, right: 10 });
    {
        let results = h.results.borrow();
        assert_eq!(results.len(), 1, "callback fires exactly once");
        assert_eq!(
            results[0],
            MatchResult {
                winner: "player2".to_string(),
                winner_side: Side::Right,
                left_score: 9,
                right_score: 10,
            }
        );
    }
    assert_eq!(h.sim.result(), Some(&h.results.borrow()[0]));

    let ball = h.sim.ball();
    let left = h.sim.paddle(Side::Left);
    let ticks_before = h.sim.ticks();
    h.sim.handle_key_down(Key::DownLeft);
    for _ in 0..50 {
        h.tick();
    }
    assert_eq!(h.sim.ball(), ball);
    assert_eq!(h.sim.paddle(Side::Left), left);
    assert_eq!(h.sim.ticks(), ticks_before);
    assert_eq!(h.sim.score(), Score { left: 9, right: 10 });
    assert_eq!(h.results.borrow().len(), 1);
}

#[test]
fn test_full_match_fires_callback_once() {
    let mut h = Harness::start(setup());
    h.sim.place_paddle(Side::Left, 0.0);

    let mut last = h.sim.score();
    let mut points = 0;
    while h.sim.is_running() {
        h.sim.serve(Vec2::new(100.0, 500.0), Vec2::new(-5.0, 0.0));
        loop {
            h.tick();
            if h.sim.events().scored.is_some() || !h.sim.is_running() {
                break;
            }
        }
        let now = h.sim.score();
        assert!(now.left >= last.left && now.right >= last.right);
        assert!(now.right <= 10);
        last = now;
        points += 1;
        assert!(points <= 10, "match should end at the tenth point");
    }

    assert_eq!(points, 10);
    assert_eq!(h.results.borrow().len(), 1);
    assert_eq!(h.results.borrow()[0].right_score, 10);
    assert_eq!(h.results.borrow()[0].left_score, 0);
}

#[test]
fn test_stop_after_completion_is_harmless() {
    let mut h = Harness::start(setup().resume_at(0, 9));
    h.sim.place_paddle(Side::Left, 0.0);
    h.sim.serve(Vec2::new(100.0, 500.0), Vec2::new(-5.0, 0.0));
    while h.sim.is_running() {
        h.tick();
    }

    h.sim.stop();
    h.sim.stop();

    assert_eq!(h.sim.phase(), MatchPhase::Finished);
    assert_eq!(h.results.borrow().len(), 1);
}

#[test]
fn test_ai_returns_to_centre_when_ball_moves_away() {
    let mut h = Harness::start(setup().with_ai(true));
    let interval = h.sim.config().ai_decision_interval_ms;

    // First decision: ball heading at the AI along y = 50
    h.sim.serve(Vec2::new(400.0, 50.0), Vec2::new(5.0, 0.0));
    h.tick();
    let first = h.sim.ai_state().expect("ai state present");
    let predicted = first.target_y.expect("target set on first tick");
    assert_eq!(first.phase(), AiPhase::Tracking);
    assert!((predicted - 56.0).abs() < 1e-3);

    // Now the ball heads away; the AI only notices at its next decision
    h.sim.serve(Vec2::new(700.0, 50.0), Vec2::new(-5.0, 0.0));
    let decided_at = first.last_decision_ms.expect("decision recorded");
    let centre = area().center_y();
    let mut elapsed = 0.0;
    loop {
        h.tick();
        elapsed += FRAME_MS;
        let ai = h.sim.ai_state().expect("ai state present");
        if ai.target_y == Some(centre) {
            assert!(ai.last_decision_ms.expect("decided") - decided_at >= interval);
            break;
        }
        assert_eq!(ai.target_y, Some(predicted), "target held between decisions");
        assert!(elapsed <= interval + FRAME_MS, "AI never returned to centre");
    }
}

#[test]
fn test_ai_paddle_tracks_then_holds() {
    let mut h = Harness::start(setup().with_ai(true));
    h.sim.serve(Vec2::new(400.0, 50.0), Vec2::new(-5.0, 0.0));

    // Ball moving away -> target is the centre, where the paddle already is
    h.tick();
    let right = h.sim.paddle(Side::Right);
    assert_eq!(right.vy, 0.0);
    assert_eq!(right.center_y(), 300.0);
}

#[test]
fn test_resize_clamps_on_next_tick() {
    let mut h = Harness::start(setup());
    h.sim.place_paddle(Side::Left, 500.0);
    h.sim.place_paddle(Side::Right, 500.0);
    h.sim.serve(Vec2::new(400.0, 100.0), Vec2::new(5.0, 1.0));

    let smaller = PlayArea::new(0.0, 800.0, 300.0).expect("valid area");
    h.sim.resize(smaller).expect("valid resize");
    h.tick();

    for side in [Side::Left, Side::Right] {
        let paddle = h.sim.paddle(side);
        assert!(paddle.y >= smaller.top());
        assert!(
            paddle.y <= smaller.bottom() - paddle.height,
            "{:?} paddle at {} escapes the resized area",
            side,
            paddle.y
        );
        assert_eq!(paddle.y, 250.0);
    }
}

#[test]
fn test_shrinking_the_field_does_not_score() {
    let mut h = Harness::start(setup());
    h.sim.serve(Vec2::new(600.0, 300.0), Vec2::new(-5.0, 0.0));

    let smaller = PlayArea::new(0.0, 400.0, 300.0).expect("valid area");
    h.sim.resize(smaller).expect("valid resize");
    let ball = h.sim.ball();
    assert!(ball.pos.x >= 0.0 && ball.pos.x + ball.size <= smaller.width);

    h.tick();
    assert_eq!(h.sim.events().scored, None);
    assert_eq!(h.sim.score(), Score::new());
    assert!(h.sim.ball().pos.x < ball.pos.x);
}

#[test]
fn test_paddle_hit_speeds_ball_and_ramps_ai() {
    let mut h = Harness::start(setup().with_ai(true));
    // Left paddle spans y 250..350 at x 20..30
    h.sim.serve(Vec2::new(33.0, 290.0), Vec2::new(-5.0, 0.0));
    h.tick();

    let ball = h.sim.ball();
    assert_eq!(h.sim.events().paddle_hit, Some(Side::Left));
    assert!((ball.vel.x - 5.0 * 1.02).abs() < 1e-5);
    assert_eq!(ball.pos.x, 30.0);
    let ai = h.sim.ai_state().expect("ai state present");
    assert_eq!(ai.decision_interval_ms, 990.0);

    // No double hit on the way out
    h.tick();
    assert_eq!(h.sim.events().paddle_hit, None);
    assert!(h.sim.ball().vel.x > 0.0);
}

struct CountingRenderer {
    frames: usize,
    last_score: Option<Score>,
}

impl Renderer for CountingRenderer {
    fn render(&mut self, frame: &Snapshot<'_>) {
        self.frames += 1;
        self.last_score = Some(frame.score);
    }
}

#[test]
fn test_renderer_consumes_snapshots() {
    let mut h = Harness::start(setup());
    let mut renderer = CountingRenderer {
        frames: 0,
        last_score: None,
    };
    for _ in 0..10 {
        h.tick();
        renderer.render(&h.sim.snapshot());
    }
    assert_eq!(renderer.frames, 10);
    assert_eq!(renderer.last_score, Some(h.sim.score()));
}
