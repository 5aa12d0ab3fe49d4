//! Reusable pool of notification display surfaces. Messages can arrive at an
//! arbitrary rate, so instead of creating a surface per message the pool is
//! prewarmed with a fixed set of inactive surfaces and reuses whichever is
//! free; when none is, the pool grows (soft prewarm size, not a hard cap).
//!
//! Each activated surface carries a dismissal deadline three seconds out.
//! The deadline is an explicit `Instant` supplied by the caller's clock and
//! advanced through `tick`, which makes expiry deterministic in tests and
//! keeps the surfaces free of shared mutable state. Reposting a message onto
//! an active surface cancels and restarts its deadline; releasing a surface
//! twice is harmless.

use std::time::{Duration, Instant};

/// Number of surfaces created up front.
pub const PREWARM_SURFACES: usize = 8;
/// How long a surface stays visible before auto-dismissal.
pub const DISMISS_AFTER: Duration = Duration::from_secs(3);

/// Index of a surface inside the pool. Stable for the pool's lifetime since
/// surfaces are only ever appended.
pub type SurfaceId = usize;

/// One display surface: either inactive (eligible for reuse) or showing a
/// message until its deadline passes.
#[derive(Debug, Clone)]
struct Surface {
    active: bool,
    message: String,
    expires_at: Option<Instant>,
}

impl Surface {
    fn idle() -> Self {
        Surface {
            active: false,
            message: String::new(),
            expires_at: None,
        }
    }
}

/// Fixed-prewarm pool of notification surfaces with timed auto-dismissal.
pub struct NotificationPool {
    surfaces: Vec<Surface>,
}

impl Default for NotificationPool {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationPool {
    /// Create the pool with [`PREWARM_SURFACES`] inactive surfaces.
    pub fn new() -> Self {
        NotificationPool {
            surfaces: vec![Surface::idle(); PREWARM_SURFACES],
        }
    }

    /// Display a message on the first inactive surface, growing the pool
    /// when every surface is busy. Returns the surface that took the
    /// message.
    pub fn post(&mut self, message: &str, now: Instant) -> SurfaceId {
        let id = match self.surfaces.iter().position(|s| !s.active) {
            Some(id) => id,
            None => {
                self.surfaces.push(Surface::idle());
                self.surfaces.len() - 1
            }
        };
        self.activate(id, message, now);
        id
    }

    /// Replace the message on an already-active surface, cancelling and
    /// restarting its dismissal deadline.
    pub fn repost(&mut self, id: SurfaceId, message: &str, now: Instant) {
        self.activate(id, message, now);
    }

    fn activate(&mut self, id: SurfaceId, message: &str, now: Instant) {
        let surface = &mut self.surfaces[id];
        surface.active = true;
        surface.message = message.to_string();
        surface.expires_at = Some(now + DISMISS_AFTER);
    }

    /// Release a surface back to the inactive set. Idempotent.
    pub fn release(&mut self, id: SurfaceId) {
        let surface = &mut self.surfaces[id];
        surface.active = false;
        surface.expires_at = None;
    }

    /// Expire every surface whose deadline has passed, returning how many
    /// were dismissed.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut dismissed = 0;
        for surface in &mut self.surfaces {
            if surface.active && surface.expires_at.is_some_and(|at| at <= now) {
                surface.active = false;
                surface.expires_at = None;
                dismissed += 1;
            }
        }
        dismissed
    }

    /// Messages currently on display, in surface order.
    pub fn active_messages(&self) -> Vec<&str> {
        self.surfaces
            .iter()
            .filter(|s| s.active)
            .map(|s| s.message.as_str())
            .collect()
    }

    /// Total surfaces in the pool, active or not.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prewarms_fixed_number_of_idle_surfaces() {
        let pool = NotificationPool::new();
        assert_eq!(pool.len(), PREWARM_SURFACES);
        assert!(pool.active_messages().is_empty());
    }

    #[test]
    fn reuses_surfaces_released_by_expiry() {
        let mut pool = NotificationPool::new();
        let now = Instant::now();

        let id = pool.post("saved", now);
        assert_eq!(pool.active_messages(), vec!["saved"]);

        // Not yet due.
        assert_eq!(pool.tick(now + Duration::from_secs(2)), 0);
        assert_eq!(pool.tick(now + DISMISS_AFTER), 1);
        assert!(pool.active_messages().is_empty());

        // The freed surface is picked up again; the pool did not grow.
        let reused = pool.post("again", now + Duration::from_secs(4));
        assert_eq!(reused, id);
        assert_eq!(pool.len(), PREWARM_SURFACES);
    }

    #[test]
    fn grows_past_prewarm_when_all_surfaces_busy() {
        let mut pool = NotificationPool::new();
        let now = Instant::now();

        for i in 0..PREWARM_SURFACES {
            pool.post(&format!("message {i}"), now);
        }
        assert_eq!(pool.len(), PREWARM_SURFACES);

        let overflow = pool.post("one more", now);
        assert_eq!(overflow, PREWARM_SURFACES);
        assert_eq!(pool.len(), PREWARM_SURFACES + 1);
        assert_eq!(pool.active_messages().len(), PREWARM_SURFACES + 1);
    }

    #[test]
    fn repost_restarts_the_dismissal_deadline() {
        let mut pool = NotificationPool::new();
        let now = Instant::now();

        let id = pool.post("first", now);
        pool.repost(id, "second", now + Duration::from_secs(2));

        // The original deadline has passed but the restarted one has not.
        assert_eq!(pool.tick(now + DISMISS_AFTER), 0);
        assert_eq!(pool.active_messages(), vec!["second"]);

        assert_eq!(pool.tick(now + Duration::from_secs(5)), 1);
        assert!(pool.active_messages().is_empty());
    }

    #[test]
    fn release_is_idempotent() {
        let mut pool = NotificationPool::new();
        let id = pool.post("gone", Instant::now());
        pool.release(id);
        pool.release(id);
        assert!(pool.active_messages().is_empty());
        // Releasing means the later tick has nothing left to dismiss.
        assert_eq!(pool.tick(Instant::now() + DISMISS_AFTER), 0);
    }
}
