//! Pointer interaction primitives.
//!
//! Input arrives asynchronously through [`MenuInputLatch`] and is sampled once per
//! frame. The hold-to-toggle gesture, trigger edge detection and hover hysteresis
//! below turn those samples into discrete widget events.
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use bevy::prelude::*;

use crate::systems::ui::tree::WidgetId;

pub mod hit_test;
pub mod pointer;

use pointer::LaserPointer;

/// Haptic pulse emitted when the menu toggles.
pub const TOGGLE_PULSE_INTENSITY: f32 = 0.5;
pub const TOGGLE_PULSE_SECS: f32 = 0.2;
/// Hover pulses play at this fraction of the configured intensity.
pub const HOVER_PULSE_FACTOR: f32 = 0.5;

/// Button state written by input callbacks on any thread and read by the frame loop.
#[derive(Resource, Clone, Debug, Default)]
pub struct MenuInputLatch {
    grip: Arc<AtomicBool>,
    trigger: Arc<AtomicBool>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub grip_held: bool,
    pub trigger_held: bool,
}

impl MenuInputLatch {
    pub fn set_grip(&self, held: bool) {
        self.grip.store(held, Ordering::Release);
    }

    pub fn set_trigger(&self, held: bool) {
        self.trigger.store(held, Ordering::Release);
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            grip_held: self.grip.load(Ordering::Acquire),
            trigger_held: self.trigger.load(Ordering::Acquire),
        }
    }
}

/// Hold-to-toggle on the menu hand's grip. Fires once per hold.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActivationGesture {
    held_for: f32,
    fired: bool,
}

impl ActivationGesture {
    pub fn tick(&mut self, held: bool, delta: f32, hold_threshold: f32) -> bool {
        if !held {
            self.held_for = 0.0;
            self.fired = false;
            return false;
        }
        self.held_for += delta;
        if !self.fired && self.held_for >= hold_threshold {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn held_for(&self) -> f32 {
        self.held_for
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEdge {
    Pressed,
    Released,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TriggerState {
    pressed: bool,
}

impl TriggerState {
    pub fn update(&mut self, held: bool) -> Option<TriggerEdge> {
        let edge = match (self.pressed, held) {
            (false, true) => Some(TriggerEdge::Pressed),
            (true, false) => Some(TriggerEdge::Released),
            _ => None,
        };
        self.pressed = held;
        edge
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn clear(&mut self) {
        self.pressed = false;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTransition<T> {
    Unchanged,
    Changed { exited: Option<T>, entered: Option<T> },
}

/// Hovered target with a short lock that rides out single-frame ray jitter.
///
/// While the lock is running a different raw hit (or no hit) does not steal hover
/// from the current target; every frame the current target is hit again refreshes
/// the lock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverTracker<T> {
    hovered: Option<T>,
    lock_timer: f32,
}

impl<T> Default for HoverTracker<T> {
    fn default() -> Self {
        Self {
            hovered: None,
            lock_timer: 0.0,
        }
    }
}

impl<T: Copy + PartialEq> HoverTracker<T> {
    pub fn hovered(&self) -> Option<T> {
        self.hovered
    }

    pub fn lock_timer(&self) -> f32 {
        self.lock_timer
    }

    pub fn resolve(&mut self, raw: Option<T>, delta: f32, lock_secs: f32) -> HoverTransition<T> {
        if self.lock_timer > 0.0 {
            self.lock_timer -= delta;
        }

        let mut target = raw;
        if let Some(current) = self.hovered {
            if raw == Some(current) {
                self.lock_timer = lock_secs;
            } else if self.lock_timer > 0.0 {
                target = Some(current);
            }
        }

        if target == self.hovered {
            return HoverTransition::Unchanged;
        }

        let exited = self.hovered;
        self.hovered = target;
        if target.is_some() {
            self.lock_timer = lock_secs;
        }
        HoverTransition::Changed {
            exited,
            entered: target,
        }
    }

    /// Drops the hovered target without a transition. Returns what was hovered.
    pub fn clear(&mut self) -> Option<T> {
        self.lock_timer = 0.0;
        self.hovered.take()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hand {
    Menu,
    Pointer,
}

#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct HapticPulse {
    pub hand: Hand,
    pub intensity: f32,
    pub duration: f32,
}

/// Per-frame interaction state owned by the menu.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    pub gesture: ActivationGesture,
    pub hover: HoverTracker<WidgetId>,
    pub trigger: TriggerState,
    pub laser: LaserPointer,
}

impl InteractionController {
    pub fn hovered(&self) -> Option<WidgetId> {
        self.hover.hovered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 0.016;
    const LOCK: f32 = 0.16;

    #[test]
    fn gesture_fires_once_per_hold() {
        let mut gesture = ActivationGesture::default();
        let fired: Vec<bool> = (0..40).map(|_| gesture.tick(true, 0.016, 0.3)).collect();
        assert_eq!(fired.iter().filter(|fired| **fired).count(), 1);
        assert!(fired[18]);

        assert!(!gesture.tick(false, 0.016, 0.3));
        assert_eq!(gesture.held_for(), 0.0);
        let refired = (0..40).any(|_| gesture.tick(true, 0.016, 0.3));
        assert!(refired);
    }

    #[test]
    fn trigger_reports_edges_only() {
        let mut trigger = TriggerState::default();
        assert_eq!(trigger.update(false), None);
        assert_eq!(trigger.update(true), Some(TriggerEdge::Pressed));
        assert_eq!(trigger.update(true), None);
        assert_eq!(trigger.update(false), Some(TriggerEdge::Released));
    }

    #[test]
    fn latch_is_shared_between_clones() {
        let latch = MenuInputLatch::default();
        let callback_side = latch.clone();
        std::thread::spawn(move || callback_side.set_trigger(true))
            .join()
            .expect("input thread");
        assert_eq!(
            latch.snapshot(),
            InputSnapshot {
                grip_held: false,
                trigger_held: true
            }
        );
    }

    #[test]
    fn hover_enters_immediately() {
        let mut tracker = HoverTracker::<u32>::default();
        assert_eq!(
            tracker.resolve(Some(1), FRAME, LOCK),
            HoverTransition::Changed {
                exited: None,
                entered: Some(1)
            }
        );
        assert_eq!(tracker.hovered(), Some(1));
    }

    #[test]
    fn hover_lock_absorbs_jitter_then_exits_once() {
        let mut tracker = HoverTracker::<u32>::default();
        tracker.resolve(Some(1), FRAME, LOCK);

        for frame in 0..6 {
            let raw = if frame % 2 == 0 { Some(2) } else { None };
            assert_eq!(tracker.resolve(raw, FRAME, LOCK), HoverTransition::Unchanged);
            assert_eq!(tracker.hovered(), Some(1));
        }

        let mut exits = 0;
        for _ in 0..20 {
            if let HoverTransition::Changed { exited, entered } = tracker.resolve(None, FRAME, LOCK) {
                assert_eq!((exited, entered), (Some(1), None));
                exits += 1;
            }
        }
        assert_eq!(exits, 1);
        assert_eq!(tracker.hovered(), None);
    }

    #[test]
    fn rehit_refreshes_lock() {
        let mut tracker = HoverTracker::<u32>::default();
        tracker.resolve(Some(1), FRAME, LOCK);
        for _ in 0..5 {
            tracker.resolve(None, FRAME, LOCK);
        }
        tracker.resolve(Some(1), FRAME, LOCK);
        assert_eq!(tracker.lock_timer(), LOCK);
    }

    #[test]
    fn expired_lock_switches_directly_between_targets() {
        let mut tracker = HoverTracker::<u32>::default();
        tracker.resolve(Some(1), LOCK, LOCK);
        assert_eq!(
            tracker.resolve(Some(2), LOCK, LOCK),
            HoverTransition::Changed {
                exited: Some(1),
                entered: Some(2)
            }
        );
    }

    #[test]
    fn clear_reports_previous_target() {
        let mut tracker = HoverTracker::<u32>::default();
        tracker.resolve(Some(7), FRAME, LOCK);
        assert_eq!(tracker.clear(), Some(7));
        assert_eq!(tracker.hovered(), None);
        assert_eq!(tracker.clear(), None);
    }
}
