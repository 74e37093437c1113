//! Frame loop driving the shared display
//!
//! One session owns the world and the inbound event buffer. Each frame it
//! drains whatever the transport queued since the last frame, advances the
//! simulation by the measured wall-clock delta, and redraws.

use std::time::Duration;

use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::info;

use crate::config::DisplayConfig;
use crate::game::world::World;
use crate::net::event_buffer::{EventBuffer, EventSender};
use crate::render::Canvas;

pub struct Session {
    world: World,
    events: EventBuffer,
    frame_duration: Duration,
    frame_rate: u32,
}

impl Session {
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            world: World::new(config.width, config.height),
            events: EventBuffer::new(config.event_buffer_capacity),
            frame_duration: config.frame_duration(),
            frame_rate: config.frame_rate,
        }
    }

    /// Sender handle for a connection handler
    pub fn event_sender(&self) -> EventSender {
        self.events.sender()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// One frame: apply pending input, advance by `dt_ms`, redraw
    pub fn frame(&mut self, dt_ms: f32, canvas: &mut dyn Canvas) {
        for event in self.events.drain() {
            self.world.apply(event);
        }
        self.world.tick(dt_ms, canvas);
    }

    /// Run frames until the task is cancelled. Timing comes from a tokio
    /// interval; the simulation still receives the measured delta so skill
    /// cooldowns stay wall-clock accurate across missed ticks.
    pub async fn run(&mut self, canvas: &mut dyn Canvas) {
        let mut ticker = interval(self.frame_duration);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!("Frame loop started at {} Hz", self.frame_rate);
        let start = Instant::now();
        let mut last_frame = start;
        let mut frame_count: u64 = 0;

        loop {
            ticker.tick().await;
            frame_count += 1;

            let now = Instant::now();
            let dt_ms = now.duration_since(last_frame).as_secs_f32() * 1000.0;
            last_frame = now;

            self.frame(dt_ms, canvas);

            // Stats every 30 seconds
            if frame_count % (self.frame_rate as u64 * 30) == 0 {
                info!(
                    "Session: {}s, frame {}, {} players, {} events dropped",
                    start.elapsed().as_secs(),
                    frame_count,
                    self.world.player_count(),
                    self.world.dropped_events()
                );
            }
        }
    }
}
