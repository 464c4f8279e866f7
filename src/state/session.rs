//! Per-page flight session: all mutable loop state in one place, stepped once
//! per animation frame by the view.

use super::heading::{Heading, target_heading};
use super::pan::PanAccumulator;
use super::proximity::{WinLatch, haversine_km};
use super::touch::TouchState;
use super::velocity::{Velocity, target_velocity};
use crate::config::{FlightConfig, PanPolicy, WinBehavior};
use crate::map::MapWidget;

/// What the host has to apply after a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    pub rotation_deg: f64,
    /// The win fired on this frame (show the modal).
    pub won_now: bool,
    /// Schedule another frame.
    pub keep_running: bool,
    /// Distance to target, if a map was available this frame.
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct FlightSession {
    pub config: FlightConfig,
    pub touch: TouchState,
    pub velocity: Velocity,
    pub accumulator: PanAccumulator,
    pub heading: Heading,
    pub win: WinLatch,
}

impl FlightSession {
    pub fn new(config: FlightConfig) -> Self {
        Self {
            config,
            touch: TouchState::default(),
            velocity: Velocity::default(),
            accumulator: PanAccumulator::default(),
            heading: Heading::default(),
            win: WinLatch::default(),
        }
    }

    pub fn touch_move(&mut self, x: f64, y: f64, viewport: (f64, f64)) {
        self.touch.record(x, y, viewport.0, viewport.1);
    }

    pub fn touch_end(&mut self) {
        self.touch.release();
    }

    /// touchstart/touchmove: `first` is the first active touch, if any.
    /// Events without an active touch leave the state untouched.
    pub fn touch_event(&mut self, first: Option<(f64, f64)>, viewport: (f64, f64)) {
        if let Some((x, y)) = first {
            self.touch_move(x, y, viewport);
        }
    }

    /// touchend/touchcancel: `remaining` is a finger still on the screen.
    /// Only lifting the last finger counts as a release.
    pub fn touch_lifted(&mut self, remaining: Option<(f64, f64)>, viewport: (f64, f64)) {
        match remaining {
            Some((x, y)) => self.touch_move(x, y, viewport),
            None => self.touch_end(),
        }
    }

    fn is_finished(&self) -> bool {
        self.win.won && self.config.on_win == WinBehavior::Stop
    }

    /// Velocity, pan, heading, proximity; in that order.
    pub fn step<M: MapWidget + ?Sized>(&mut self, mut map: Option<&mut M>) -> FrameOutcome {
        let cfg = &self.config;
        let (dx, dy) = self.touch.offset();

        let target = target_velocity(self.touch.is_touching, dx, dy, cfg.speed);
        let factor = if self.touch.is_touching {
            cfg.touch_smoothing
        } else {
            cfg.release_smoothing
        };
        self.velocity.step_toward(target, factor);

        if let Some(map) = map.as_deref_mut() {
            let (px, py) = (-self.velocity.vel_x, -self.velocity.vel_y);
            match cfg.pan_policy {
                PanPolicy::Direct => map.pan_by(px, py),
                PanPolicy::Accumulated => {
                    if let Some((wx, wy)) = self.accumulator.push(px, py) {
                        map.pan_by(wx, wy);
                    }
                }
            }
        }

        let rotation_deg = self.heading.step_toward(
            target_heading(dx, dy, cfg.heading_offset_deg),
            cfg.rotation_smoothing,
        );

        let mut won_now = false;
        let mut distance_km = None;
        if let Some(map) = map.as_deref() {
            if !self.win.won {
                let d = haversine_km(map.center(), cfg.target);
                distance_km = Some(d);
                won_now = self.win.check(d, cfg.threshold_km);
            }
        }

        FrameOutcome {
            rotation_deg,
            won_now,
            keep_running: !self.is_finished(),
            distance_km,
        }
    }
}
