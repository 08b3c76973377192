use rand::Rng;

use wgpufun_engine::coords::Vec2;
use wgpufun_engine::input::KeyState;
use wgpufun_engine::mesh::MeshBuilder;

use super::{Ball, Controls, GameEvent, LoseZone, Paddle};

/// What the renderer needs from one simulation tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub mesh: MeshBuilder,
    pub camera_x: f32,
}

/// All game state, advanced one fixed tick at a time.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub lose_zone: LoseZone,
    pub paddle: Paddle,
    pub ball: Ball,
    pub controls: Controls,
    pub camera_x: f32,

    /// Set when the ball hits the lose zone; applied at the start of the next tick.
    reset_pending: bool,
}

impl Simulation {
    /// Paddle acceleration per tick while a single direction is held.
    pub const PADDLE_ACCEL: f32 = 0.05;
    /// Paddle velocity multiplier per tick while not steering.
    pub const PADDLE_DAMPING: f32 = 0.95;
    /// Paddle velocity (in -1..=1) is divided by this to get world units per tick.
    pub const PADDLE_SPEED_DIVISOR: f32 = 20.0;
    /// Horizontal bound for the paddle and the ball.
    pub const WORLD_HALF_WIDTH: f32 = 5.5;
    /// Horizontal bound for the camera center.
    pub const CAMERA_LIMIT: f32 = 5.0;
    /// Camera easing: new = (old * N + target) / (N + 1).
    pub const CAMERA_LAG: f32 = 10.0;

    pub const GRAVITY: f32 = 0.01;
    pub const BALL_DAMPING: f32 = 0.95;
    pub const BALL_MAX_SPEED: f32 = 0.1;
    pub const BOUNCE_JITTER: f32 = 0.01;

    pub fn new() -> Self {
        Self {
            lose_zone: LoseZone,
            paddle: Paddle::new(),
            ball: Ball::new(),
            controls: Controls::default(),
            camera_x: 0.0,
            reset_pending: false,
        }
    }

    /// Advances one tick after applying `events` in order.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        events: impl IntoIterator<Item = GameEvent>,
        rng: &mut R,
    ) {
        if std::mem::take(&mut self.reset_pending) {
            self.apply(GameEvent::Reset);
        }
        for event in events {
            self.apply(event);
        }

        self.steer_paddle();
        self.move_ball(rng);

        if self.lose_zone.contains(self.ball.position) {
            log::debug!("ball lost at x = {:.2}", self.ball.position.x);
            self.reset_pending = true;
        }

        self.camera_x = ((self.camera_x * Self::CAMERA_LAG + self.paddle.x)
            / (Self::CAMERA_LAG + 1.0))
            .clamp(-Self::CAMERA_LIMIT, Self::CAMERA_LIMIT);
    }

    fn apply(&mut self, event: GameEvent) {
        match event {
            GameEvent::Reset => self.ball.respawn(),
            other => self.controls.apply(other),
        }
    }

    fn steer_paddle(&mut self) {
        let paddle = &mut self.paddle;
        paddle.velocity = match (self.controls.left, self.controls.right) {
            (KeyState::Pressed, KeyState::Released) => (paddle.velocity - Self::PADDLE_ACCEL).max(-1.0),
            (KeyState::Released, KeyState::Pressed) => (paddle.velocity + Self::PADDLE_ACCEL).min(1.0),
            _ => paddle.velocity * Self::PADDLE_DAMPING,
        };

        paddle.x = (paddle.x + paddle.velocity / Self::PADDLE_SPEED_DIVISOR)
            .clamp(-Self::WORLD_HALF_WIDTH, Self::WORLD_HALF_WIDTH);
    }

    fn move_ball<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let ball = &mut self.ball;

        // Gravity scales with downward speed, bounded so it never stalls or runs away.
        ball.velocity.y += ball.velocity.y.clamp(-0.5, -0.1) * Self::GRAVITY;

        if self.paddle.contains(ball) {
            ball.velocity += self.paddle.normal();
            ball.velocity.x += (rng.random::<f32>() * 2.0 - 0.5) * Self::BOUNCE_JITTER;
        }

        ball.velocity = (ball.velocity * Self::BALL_DAMPING)
            .map(|v| v.clamp(-Self::BALL_MAX_SPEED, Self::BALL_MAX_SPEED));

        ball.position += ball.velocity;
        ball.position.x = ball
            .position
            .x
            .clamp(-Self::WORLD_HALF_WIDTH, Self::WORLD_HALF_WIDTH);
    }

    /// Builds the frame geometry: lose zone, paddle, then ball.
    pub fn snapshot(&self) -> Snapshot {
        let mut mesh = MeshBuilder::new();
        self.lose_zone.push(&mut mesh);
        self.paddle.push(&mut mesh);
        self.ball.push(&mut mesh);

        Snapshot {
            mesh,
            camera_x: self.camera_x,
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn run(sim: &mut Simulation, ticks: usize, rng: &mut StdRng) {
        for _ in 0..ticks {
            sim.step([], rng);
        }
    }

    // ── ball ──────────────────────────────────────────────────────────────

    #[test]
    fn ball_falls_from_rest() {
        let mut sim = Simulation::new();
        sim.step([], &mut rng());
        assert!(sim.ball.position.y < Ball::SPAWN.y);
        assert!(sim.ball.velocity.y < 0.0);
        assert_eq!(sim.ball.position.x, 0.0);
    }

    #[test]
    fn ball_speed_is_capped() {
        let mut sim = Simulation::new();
        sim.ball.velocity = Vec2::new(3.0, -3.0);
        sim.step([], &mut rng());
        assert_eq!(sim.ball.velocity, Vec2::new(0.1, -0.1));
    }

    #[test]
    fn ball_bounces_off_paddle() {
        let mut sim = Simulation::new();
        sim.ball.position = Vec2::new(0.0, -0.56);
        sim.ball.velocity = Vec2::new(0.0, -0.05);
        sim.step([], &mut rng());
        assert!(sim.ball.velocity.y > 0.0);
        assert!(sim.ball.position.y > -0.56);
    }

    #[test]
    fn ball_x_is_clamped_to_world() {
        let mut sim = Simulation::new();
        sim.ball.position = Vec2::new(5.48, 0.5);
        sim.ball.velocity = Vec2::new(0.1, 0.0);
        sim.step([], &mut rng());
        assert_eq!(sim.ball.position.x, Simulation::WORLD_HALF_WIDTH);
    }

    // ── lose zone / reset ─────────────────────────────────────────────────

    #[test]
    fn reset_event_respawns_ball() {
        let mut sim = Simulation::new();
        sim.ball.position = Vec2::new(2.0, 0.0);
        sim.step([GameEvent::Reset], &mut rng());
        // Respawned, then moved by one tick of gravity.
        assert_eq!(sim.ball.position.x, 0.0);
        assert!((sim.ball.position.y - Ball::SPAWN.y).abs() < 0.01);
    }

    #[test]
    fn entering_lose_zone_resets_on_next_tick() {
        let mut sim = Simulation::new();
        sim.ball.position = Vec2::new(3.0, -0.95);
        sim.ball.velocity = Vec2::zero();

        let mut rng = rng();
        sim.step([], &mut rng);
        assert!(sim.ball.position.y < -0.9);

        sim.step([], &mut rng);
        assert_eq!(sim.ball.position.x, 0.0);
        assert!(sim.ball.position.y > 0.5);
    }

    // ── paddle ────────────────────────────────────────────────────────────

    #[test]
    fn paddle_accelerates_while_left_held() {
        let mut sim = Simulation::new();
        sim.step([GameEvent::Left(KeyState::Pressed)], &mut rng());
        assert_eq!(sim.paddle.velocity, -0.05);
        assert!(sim.paddle.x < 0.0);
    }

    #[test]
    fn paddle_velocity_and_position_are_bounded() {
        let mut sim = Simulation::new();
        let mut rng = rng();
        sim.step([GameEvent::Right(KeyState::Pressed)], &mut rng);
        run(&mut sim, 400, &mut rng);
        assert_eq!(sim.paddle.velocity, 1.0);
        assert_eq!(sim.paddle.x, Simulation::WORLD_HALF_WIDTH);
    }

    #[test]
    fn paddle_coasts_to_rest_when_both_or_neither_held() {
        let mut sim = Simulation::new();
        sim.paddle.velocity = 1.0;
        let mut rng = rng();
        sim.step(
            [GameEvent::Left(KeyState::Pressed), GameEvent::Right(KeyState::Pressed)],
            &mut rng,
        );
        assert_eq!(sim.paddle.velocity, 0.95);

        sim.step([GameEvent::Left(KeyState::Released), GameEvent::Right(KeyState::Released)], &mut rng);
        assert!(sim.paddle.velocity < 0.95);
    }

    // ── camera / snapshot ─────────────────────────────────────────────────

    #[test]
    fn camera_eases_towards_paddle() {
        let mut sim = Simulation::new();
        sim.paddle.x = 5.5;
        sim.step([], &mut rng());
        assert!((sim.camera_x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn camera_is_bounded() {
        let mut sim = Simulation::new();
        sim.paddle.x = 5.5;
        run(&mut sim, 500, &mut rng());
        assert_eq!(sim.camera_x, Simulation::CAMERA_LIMIT);
    }

    #[test]
    fn snapshot_contains_all_entities() {
        let snap = Simulation::new().snapshot();
        assert_eq!(snap.mesh.vertices().len(), 4 + 4 + Ball::SEGMENTS + 2);
        assert_eq!(snap.mesh.index_count() as usize, 6 + 6 + Ball::SEGMENTS * 3);
        assert_eq!(snap.camera_x, 0.0);
    }
}
