//! Countdown timer component
//!
//! Counts down while active and fires its callback once, on the tick the
//! remaining time crosses zero. Restarting is explicit via [`Timer::start`].

use std::fmt;
use std::rc::Rc;

use crate::ecs::{Component, ComponentId, World};

/// Callback run when a timer runs out
pub type OnTimerEnd = Rc<dyn Fn(&mut World, ComponentId<Timer>)>;

/// Countdown component
#[derive(Clone, Default)]
pub struct Timer {
    remaining: f32,
    on_end: Option<OnTimerEnd>,
}

impl Timer {
    /// A stopped timer with no callback
    pub fn new() -> Self {
        Self::default()
    }

    /// A timer already counting down `duration` seconds
    pub fn started(duration: f32) -> Self {
        let mut timer = Self::new();
        timer.start(duration);
        timer
    }

    /// Set the callback run when the timer runs out
    #[must_use]
    pub fn with_on_end(mut self, on_end: impl Fn(&mut World, ComponentId<Self>) + 'static) -> Self {
        self.set_on_end(on_end);
        self
    }

    /// Replace the callback run when the timer runs out
    pub fn set_on_end(&mut self, on_end: impl Fn(&mut World, ComponentId<Self>) + 'static) {
        self.on_end = Some(Rc::new(on_end));
    }

    /// (Re)start the countdown
    pub fn start(&mut self, duration: f32) {
        self.remaining = duration;
    }

    /// Seconds left, zero or less once finished
    pub const fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Whether the countdown is still running
    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }
}

impl Component for Timer {
    fn update(world: &mut World, id: ComponentId<Self>, delta_time: f32) {
        let Some(timer) = world.get_component_mut(id) else {
            return;
        };
        if !timer.is_running() {
            return;
        }

        timer.remaining -= delta_time;
        if timer.remaining <= 0.0 {
            if let Some(on_end) = timer.on_end.clone() {
                on_end(world, id);
            }
        }
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("remaining", &self.remaining)
            .field("on_end", &self.on_end.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_fires_once_when_crossing_zero() {
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);

        let mut world = World::new();
        let timer = world.add_component(
            Timer::started(0.25).with_on_end(move |_, _| counter.set(counter.get() + 1)),
        );

        world.update(0.1);
        world.update(0.1);
        assert_eq!(fired.get(), 0);

        world.update(0.1);
        assert_eq!(fired.get(), 1);
        assert!(!world.get_component(timer).unwrap().is_running());

        world.update(0.1);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_callback_can_restart_timer() {
        let mut world = World::new();
        let timer = world.add_component(Timer::started(0.5).with_on_end(|world, id| {
            if let Some(timer) = world.get_component_mut(id) {
                timer.start(1.0);
            }
        }));

        world.update(0.5);
        assert!((world.get_component(timer).unwrap().remaining() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_callback_can_destroy_timer() {
        let mut world = World::new();
        let timer = world.add_component(Timer::started(0.1).with_on_end(|world, id| {
            world.destroy_component(id);
        }));

        world.update(0.2);
        assert!(!world.contains_component(timer));
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);

        let mut world = World::new();
        world.add_component(Timer::new().with_on_end(move |_, _| flag.set(true)));
        world.update(1.0);

        assert!(!fired.get());
    }
}
