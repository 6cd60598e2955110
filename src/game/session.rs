//! One playthrough: TITLE -> RUNNING -> DONE, then reset.
//!
//! The session is the whole aggregate (actor, active pair, spawner cursor,
//! history). Reset replaces it wholesale rather than patching fields, so no
//! stale cross-field state can survive a restart; the generation counter
//! fences off image deliveries addressed to a torn-down session.

use crate::assets::{PosterDelivery, PosterProvider};
use crate::config::Config;
use crate::game::actor::LaneActor;
use crate::game::catalog::Catalog;
use crate::game::poster::Poster;
use crate::game::select;
use crate::game::spawner::PairSpawner;
use log::{debug, info};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Title,
    Running,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    None,
    /// A pair resolved; the chosen title was appended to history.
    Selected(String),
    /// The pair pool ran out; the session moved to DONE.
    Finished,
}

pub struct GameSession {
    pub phase: Phase,
    pub generation: u64,
    pub actor: LaneActor,
    /// Invariant: 0 or 2 posters, never 1.
    pub active_pair: Vec<Poster>,
    pub spawner: PairSpawner,
    pub history: Vec<String>,
    spawn_delay: u32,
}

impl GameSession {
    pub fn new<R: Rng + ?Sized>(
        cfg: &Config,
        catalog: &Catalog,
        generation: u64,
        rng: &mut R,
    ) -> Self {
        let spawner = PairSpawner::new(catalog, rng);
        info!(
            "Session {generation}: {} pairs from {} categories.",
            spawner.total(),
            catalog.len()
        );
        Self {
            phase: Phase::Title,
            generation,
            actor: LaneActor::new(cfg.lane_count),
            active_pair: Vec::new(),
            spawner,
            history: Vec::new(),
            spawn_delay: 0,
        }
    }

    pub fn begin(&mut self) {
        if self.phase == Phase::Title {
            self.phase = Phase::Running;
        }
    }

    /// Explicit early finish; the history so far becomes the result.
    pub fn finish(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Done;
        }
    }

    pub fn total_pairs(&self) -> usize {
        self.spawner.total()
    }

    /// One fixed-rate gameplay tick: spawn, advance, select.
    pub fn tick(&mut self, cfg: &Config, images: &mut dyn PosterProvider) -> TickEvent {
        if self.phase != Phase::Running {
            return TickEvent::None;
        }

        if self.active_pair.is_empty() {
            if self.spawner.remaining() == 0 {
                self.phase = Phase::Done;
                return TickEvent::Finished;
            }
            if self.spawn_delay > 0 {
                self.spawn_delay -= 1;
                return TickEvent::None;
            }
            if let Some((left, right)) = self.spawner.next() {
                debug!("Spawning pair: '{left}' vs '{right}'");
                let left_bitmap = images.acquire(self.generation, 0, &left);
                let right_bitmap = images.acquire(self.generation, 1, &right);
                self.active_pair = vec![
                    Poster::new(cfg, 0, left, left_bitmap),
                    Poster::new(cfg, 1, right, right_bitmap),
                ];
            }
        }

        for poster in &mut self.active_pair {
            poster.advance();
        }

        // Both halves share spawn height and speed, so they leave together.
        if !self.active_pair.is_empty() && self.active_pair.iter().all(|p| p.is_offscreen(cfg)) {
            debug!("Pair fell past the bottom unselected.");
            self.active_pair.clear();
            self.spawn_delay = cfg.round_delay_ticks;
            return TickEvent::None;
        }

        let actor_box = self.actor.bounding_box(cfg);
        match select::resolve_tick(cfg, actor_box, &mut self.active_pair, &mut self.history) {
            Some(title) => {
                self.spawn_delay = cfg.round_delay_ticks;
                TickEvent::Selected(title)
            }
            None => TickEvent::None,
        }
    }

    /// Applies a remote image result to the poster that requested it, if the
    /// delivery belongs to this session and the pair is still active.
    pub fn apply_delivery(&mut self, delivery: PosterDelivery) {
        if delivery.generation != self.generation {
            debug!(
                "Dropping stale poster delivery for '{}' (generation {}).",
                delivery.title, delivery.generation
            );
            return;
        }
        if let Some(poster) = self
            .active_pair
            .iter_mut()
            .find(|p| p.lane == delivery.lane && p.title == delivery.title)
        {
            poster.bitmap = delivery.bitmap;
        }
    }
}
