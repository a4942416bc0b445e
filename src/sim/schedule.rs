//! Deferred phase transitions
//!
//! Anything that wants a transition "later" (a menu button, a replay timer)
//! schedules it here instead of mutating state from outside the frame. Each
//! request carries the run generation it was made in; `tick` applies a due
//! request only if that generation is still current at the moment it would
//! run, so a timer left over from a previous run is dropped instead of
//! corrupting the new one.

use serde::{Deserialize, Serialize};

/// Transitions that may be requested from outside the tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Back to the idle start screen
    ToStart,
    /// Begin (or restart) the tutorial from its first step
    BeginTutorial,
    /// Begin a fresh endless run
    StartRun,
    /// Begin a fresh endless run only if the current one has ended
    Restart,
}

/// Handle returned when scheduling; identifies the run it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleToken {
    pub generation: u32,
    pub id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Pending {
    due: f64,
    token: ScheduleToken,
    transition: Transition,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    pending: Vec<Pending>,
    next_id: u32,
}

impl Scheduler {
    /// Queue `transition` to fire at clock time `due`, tagged with `generation`
    pub fn schedule(&mut self, due: f64, generation: u32, transition: Transition) -> ScheduleToken {
        let token = ScheduleToken {
            generation,
            id: self.next_id,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.push(Pending {
            due,
            token,
            transition,
        });
        token
    }

    /// Put a request back under its original token so it stays cancellable
    pub(crate) fn defer(&mut self, token: ScheduleToken, due: f64, transition: Transition) {
        self.pending.push(Pending {
            due,
            token,
            transition,
        });
    }

    /// Whether a request is still waiting to fire
    pub fn contains(&self, token: ScheduleToken) -> bool {
        self.pending.iter().any(|p| p.token == token)
    }

    /// Drop a pending request. Returns true if it was still queued.
    pub fn cancel(&mut self, token: ScheduleToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.token != token);
        before != self.pending.len()
    }

    /// Remove every request due at `now` and return them in due order.
    ///
    /// Tokens come back with their transitions: the caller checks each one
    /// against the run generation right before applying it, since an earlier
    /// transition in the same batch may already have reset the run.
    pub fn take_due(&mut self, now: f64) -> Vec<(ScheduleToken, Transition)> {
        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due <= now {
                due.push(p.clone());
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.token.id.cmp(&b.token.id)));
        due.into_iter().map(|p| (p.token, p.transition)).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
