use crate::{Ball, Config, Events, GameRng, Geometry, PlayArea, Score, Side};
use hecs::World;

/// Check if the ball left the field on either side.
///
/// Returns the side that scored. The ball is re-served unless the point
/// finished the match, in which case it stays where it went out.
pub fn check_scoring(
    world: &mut World,
    area: &PlayArea,
    geometry: &Geometry,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
    config: &Config,
) -> Option<Side> {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let scorer = if ball.pos.x < 0.0 {
            Side::Right
        } else if ball.pos.x + ball.size > area.width {
            Side::Left
        } else {
            continue;
        };

        score.increment(scorer, config.max_score);
        events.scored = Some(scorer);
        log::info!(
            "{:?} scores, {}-{}",
            scorer,
            score.left,
            score.right
        );

        if score.has_winner(config.max_score).is_some() {
            events.match_over = true;
        } else {
            ball.reset(
                geometry.ball_spawn(area),
                config.ball_speed_initial,
                config.reset_min_dy(),
                rng,
            );
            log::debug!("Ball served with velocity {:?}", ball.vel);
        }
        return Some(scorer);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_ball;
    use glam::Vec2;

    fn setup_world() -> (World, Config, PlayArea, Geometry, Score, Events, GameRng) {
        let world = World::new();
        let config = Config::new();
        let area = PlayArea::new(0.0, 800.0, 600.0).expect("valid area");
        let geometry = Geometry::for_area(&area, &config);
        let rng = GameRng::new(12345); // Fixed seed for deterministic tests
        (world, config, area, geometry, Score::new(), Events::new(), rng)
    }

    fn ball(world: &World) -> Ball {
        world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_e, ball)| *ball)
            .expect("ball exists")
    }

    #[test]
    fn test_right_player_scores_when_ball_exits_left() {
        let (mut world, config, area, geometry, mut score, mut events, mut rng) = setup_world();
        create_ball(
            &mut world,
            Ball::new(Vec2::new(-0.1, 300.0), Vec2::new(-5.0, 1.0), 12.0),
        );

        let scorer = check_scoring(
            &mut world, &area, &geometry, &mut score, &mut events, &mut rng, &config,
        );

        assert_eq!(scorer, Some(Side::Right));
        assert_eq!(score, Score { left: 0, right: 1 });
        assert_eq!(events.scored, Some(Side::Right));
        assert!(!events.match_over);
    }

    #[test]
    fn test_left_player_scores_when_ball_exits_right() {
        let (mut world, config, area, geometry, mut score, mut events, mut rng) = setup_world();
        create_ball(
            &mut world,
            Ball::new(Vec2::new(789.0, 300.0), Vec2::new(5.0, 1.0), 12.0),
        );

        let scorer = check_scoring(
            &mut world, &area, &geometry, &mut score, &mut events, &mut rng, &config,
        );

        assert_eq!(scorer, Some(Side::Left));
        assert_eq!(score, Score { left: 1, right: 0 });
    }

    #[test]
    fn test_ball_resets_after_scoring() {
        let (mut world, config, area, geometry, mut score, mut events, mut rng) = setup_world();
        create_ball(
            &mut world,
            Ball::new(Vec2::new(-0.1, 300.0), Vec2::new(-5.0, 1.0), 12.0),
        );

        check_scoring(
            &mut world, &area, &geometry, &mut score, &mut events, &mut rng, &config,
        );

        let b = ball(&world);
        assert_eq!(b.pos, geometry.ball_spawn(&area));
        assert_eq!(b.vel.x.abs(), config.ball_speed_initial);
        assert!(b.vel.y.abs() >= config.reset_min_dy());
    }

    #[test]
    fn test_no_scoring_when_ball_in_bounds() {
        let (mut world, config, area, geometry, mut score, mut events, mut rng) = setup_world();
        create_ball(
            &mut world,
            Ball::new(Vec2::new(0.0, 300.0), Vec2::new(-5.0, 1.0), 12.0),
        );

        let scorer = check_scoring(
            &mut world, &area, &geometry, &mut score, &mut events, &mut rng, &config,
        );

        assert_eq!(scorer, None);
        assert_eq!(score, Score::new());
        assert_eq!(events.scored, None);
    }

    #[test]
    fn test_winning_point_leaves_ball_in_place() {
        let (mut world, config, area, geometry, _score, mut events, mut rng) = setup_world();
        let mut score = Score { left: 9, right: 0 };
        create_ball(
            &mut world,
            Ball::new(Vec2::new(790.0, 300.0), Vec2::new(5.0, 1.0), 12.0),
        );

        check_scoring(
            &mut world, &area, &geometry, &mut score, &mut events, &mut rng, &config,
        );

        assert_eq!(score.left, 10);
        assert!(events.match_over);
        assert_eq!(ball(&world).pos, Vec2::new(790.0, 300.0));
    }
}
