use alloc::boxed::Box;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Identifies one started countdown. Handles are never reused within a [`Timer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

/// Plain countdown state, one second per step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: Seconds,
    running: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountdownStep {
    Idle,
    Ticked(Seconds),
    Expired,
}

impl Countdown {
    pub const fn new(seconds: Seconds) -> Self {
        Self {
            remaining: seconds,
            running: true,
        }
    }

    pub const fn remaining(&self) -> Seconds {
        self.remaining
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Counts down one second. Reaching zero yields `Expired` once and stops the countdown.
    pub fn step(&mut self) -> CountdownStep {
        if !self.running {
            return CountdownStep::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            CountdownStep::Expired
        } else {
            CountdownStep::Ticked(self.remaining)
        }
    }
}

type TickFn<C> = Box<dyn FnMut(&mut C, Seconds)>;
type ExpireFn<C> = Box<dyn FnOnce(&mut C)>;

struct Scheduled<C> {
    handle: TimerHandle,
    countdown: Countdown,
    on_tick: TickFn<C>,
    on_expire: Option<ExpireFn<C>>,
}

/// Cooperative countdown scheduler.
///
/// Nothing runs on its own: the host event loop calls [`Timer::tick`] once per second and the callbacks of each
/// running countdown are invoked in place with the supplied context. Any number of countdowns may run at once,
/// callers wanting a single one cancel before starting.
pub struct Timer<C> {
    scheduled: Vec<Scheduled<C>>,
    next_handle: u64,
}

impl<C> Timer<C> {
    pub fn new() -> Self {
        Self {
            scheduled: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn start(
        &mut self,
        seconds: Seconds,
        on_tick: impl FnMut(&mut C, Seconds) + 'static,
        on_expire: impl FnOnce(&mut C) + 'static,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.scheduled.push(Scheduled {
            handle,
            countdown: Countdown::new(seconds),
            on_tick: Box::new(on_tick),
            on_expire: Some(Box::new(on_expire)),
        });
        log::trace!("timer {:?} started for {}s", handle, seconds);
        handle
    }

    pub fn cancel(&mut self, handle: TimerHandle) {
        let before = self.scheduled.len();
        self.scheduled.retain(|scheduled| scheduled.handle != handle);
        if self.scheduled.len() != before {
            log::trace!("timer {:?} cancelled", handle);
        }
    }

    pub fn is_running(&self, handle: TimerHandle) -> bool {
        self.remaining(handle).is_some()
    }

    pub fn remaining(&self, handle: TimerHandle) -> Option<Seconds> {
        self.scheduled
            .iter()
            .find(|scheduled| scheduled.handle == handle)
            .map(|scheduled| scheduled.countdown.remaining())
    }

    pub fn active_count(&self) -> usize {
        self.scheduled.len()
    }

    /// Advances every running countdown by one second.
    pub fn tick(&mut self, ctx: &mut C) {
        let mut expired = Vec::new();
        for scheduled in &mut self.scheduled {
            match scheduled.countdown.step() {
                CountdownStep::Idle => {}
                CountdownStep::Ticked(remaining) => (scheduled.on_tick)(ctx, remaining),
                CountdownStep::Expired => {
                    (scheduled.on_tick)(ctx, 0);
                    if let Some(on_expire) = scheduled.on_expire.take() {
                        expired.push((scheduled.handle, on_expire));
                    }
                }
            }
        }
        self.scheduled
            .retain(|scheduled| scheduled.countdown.is_running());

        for (handle, on_expire) in expired {
            log::trace!("timer {:?} expired", handle);
            on_expire(ctx);
        }
    }
}

impl<C> Default for Timer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> core::fmt::Debug for Timer<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timer")
            .field(
                "scheduled",
                &self
                    .scheduled
                    .iter()
                    .map(|scheduled| (scheduled.handle, scheduled.countdown))
                    .collect::<Vec<_>>(),
            )
            .field("next_handle", &self.next_handle)
            .finish()
    }
}
