//! World/session: player registry and per-frame orchestration
//!
//! The registry keeps players in join order; iteration order is the
//! tie-breaker for simultaneous collisions and the draw order of the render
//! pass. Event routing is best-effort: an event addressed to an unknown
//! player is counted and dropped, never an error that could halt the loop.

use rand::Rng;
use tracing::{debug, info};

use crate::game::player::{Player, PlayerId};
use crate::net::protocol::InputEvent;
use crate::render::{palette_color, Canvas, BACKGROUND, PALETTE};
use crate::util::vec2::Vec2;

/// The shared arena: all active players plus the display bounds
pub struct World {
    width: f32,
    height: f32,
    /// Players in join order
    players: Vec<Player>,
    /// Events dropped because their player id was unknown
    dropped_events: u64,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            players: Vec::new(),
            dropped_events: 0,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Events dropped so far due to unknown player ids
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events
    }

    /// Find a player by id; the single routing primitive
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Register a player for `id`. Idempotent: a duplicate join leaves the
    /// existing player untouched. Spawns at a uniform-random in-bounds
    /// position with a random palette color.
    pub fn add_player(&mut self, id: &str) {
        if self.player(id).is_some() {
            debug!(id, "duplicate join ignored");
            return;
        }

        let mut rng = rand::thread_rng();
        let radius = crate::game::constants::player::RADIUS;
        let position = Vec2::new(
            rng.gen_range(radius..self.width - radius),
            rng.gen_range(radius..self.height - radius),
        );
        let color_index = rng.gen_range(0..PALETTE.len()) as u8;

        info!(id, x = position.x, y = position.y, "player joined");
        self.players
            .push(Player::new(id.to_string(), position, color_index));
    }

    /// Remove a player. Returns the removed entity if it existed.
    pub fn remove_player(&mut self, id: &str) -> Option<Player> {
        let index = self.players.iter().position(|p| p.id == id)?;
        info!(id, "player left");
        Some(self.players.remove(index))
    }

    /// Route one inbound event. Unknown ids are a counted no-op.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Join { id } => self.add_player(&id),
            InputEvent::Stick {
                id,
                angle,
                magnitude,
            } => match self.player_mut(&id) {
                Some(player) => player.controller.set_stick(angle, magnitude),
                None => self.drop_event("stick", &id),
            },
            InputEvent::Button { id, button, status } => match self.player_mut(&id) {
                Some(player) => player.controller.set_button(&button, status),
                None => self.drop_event("button", &id),
            },
        }
    }

    fn drop_event(&mut self, kind: &str, id: &str) {
        self.dropped_events += 1;
        debug!(kind, id, total = self.dropped_events, "event for unknown player dropped");
    }

    /// Advance the simulation one tick. Players update in join order; each
    /// runs its motion stages, then pairwise collision resolution against
    /// everyone not yet resolved this tick, then the boundary clamp.
    pub fn advance(&mut self, dt_ms: f32) {
        for player in &mut self.players {
            player.begin_tick();
        }

        for i in 0..self.players.len() {
            self.players[i].integrate(dt_ms);
            self.resolve_collisions(i);
            let (width, height) = (self.width, self.height);
            self.players[i].clamp_to_bounds(width, height);
        }
    }

    /// Resolve collisions between player `i` and every later-checked partner.
    /// Both sides of a resolved pair are marked so the pair cannot resolve
    /// again this tick under either iteration order.
    fn resolve_collisions(&mut self, i: usize) {
        for j in 0..self.players.len() {
            if j == i || self.players[i].already_resolved(j) {
                continue;
            }
            let (a, b) = pair_mut(&mut self.players, i, j);
            if a.touches(b) {
                a.collide(b);
                a.mark_resolved(j);
                b.mark_resolved(i);
            }
        }
    }

    /// Draw pass: full clear, then one filled circle per player in join order
    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.clear(BACKGROUND);
        for player in &self.players {
            canvas.fill_circle(
                player.position,
                player.radius,
                palette_color(player.color_index),
            );
        }
    }

    /// One full frame: advance the simulation, then render
    pub fn tick(&mut self, dt_ms: f32, canvas: &mut dyn Canvas) {
        self.advance(dt_ms);
        self.render(canvas);
    }
}

/// Mutable references to two distinct players by registry index
fn pair_mut(players: &mut [Player], i: usize, j: usize) -> (&mut Player, &mut Player) {
    debug_assert!(i != j);
    if i < j {
        let (left, right) = players.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = players.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
