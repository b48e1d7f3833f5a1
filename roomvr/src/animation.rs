//! Per-frame animation ticking.

use std::cell::RefCell;
use std::rc::Rc;

/// Anything advanced once per frame by the scheduler.
pub trait Tickable {
    fn tick(&mut self, delta: f32);
}

/// Drives every registered animated element once per frame. Elements are
/// shared with whoever reads their output, so registration hands over an
/// `Rc<RefCell<..>>` rather than ownership.
#[derive(Default)]
pub struct TickScheduler {
    items: Vec<Rc<RefCell<dyn Tickable>>>,
}

impl TickScheduler {
    pub fn new() -> TickScheduler {
        TickScheduler { items: Vec::new() }
    }

    pub fn register(&mut self, item: Rc<RefCell<dyn Tickable>>) {
        self.items.push(item);
    }

    pub fn tick(&mut self, delta: f32) {
        for item in &self.items {
            item.borrow_mut().tick(delta);
        }
    }
}

/// Pulsing scale for the pointer indicator: `0.8 + 0.3 * sin(3t)`.
pub struct PulseAnimation {
    time: f32,
}

impl PulseAnimation {
    pub fn new() -> PulseAnimation {
        PulseAnimation { time: 0.0 }
    }

    pub fn scale(&self) -> f32 {
        0.8 + (self.time * 3.0).sin() * 0.3
    }
}

impl Default for PulseAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl Tickable for PulseAnimation {
    fn tick(&mut self, delta: f32) {
        self.time += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn scale_starts_at_the_trough_baseline() {
        assert_eq!(PulseAnimation::new().scale(), 0.8);
    }

    #[test]
    fn scale_peaks_a_quarter_period_in() {
        let mut pulse = PulseAnimation::new();
        // sin(3t) = 1 at t = pi/6
        pulse.tick(PI / 6.0);
        assert!((pulse.scale() - 1.1).abs() < 1e-6);
    }

    #[test]
    fn time_accumulates_across_ticks() {
        let mut pulse = PulseAnimation::new();
        for _ in 0..10 {
            pulse.tick(PI / 60.0);
        }
        assert!((pulse.scale() - 1.1).abs() < 1e-5);
    }

    #[test]
    fn scheduler_ticks_every_registered_item() {
        let a = Rc::new(RefCell::new(PulseAnimation::new()));
        let b = Rc::new(RefCell::new(PulseAnimation::new()));

        let mut scheduler = TickScheduler::new();
        scheduler.register(a.clone());
        scheduler.register(b.clone());
        scheduler.tick(PI / 6.0);

        assert!((a.borrow().scale() - 1.1).abs() < 1e-6);
        assert!((b.borrow().scale() - 1.1).abs() < 1e-6);
    }
}
