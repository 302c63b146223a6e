use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Default number of lookups allowed in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Fixed-capacity, non-blocking admission control.
///
/// Callers never wait for a slot: [`try_acquire`](Self::try_acquire) either
/// hands out an [`AdmissionToken`] or fails immediately. Clones share the
/// same counter.
#[derive(Clone)]
pub struct AdmissionGate {
    capacity: usize,
    in_flight: Arc<AtomicUsize>,
}

impl AdmissionGate {
    /// Creates a gate that admits at most `capacity` concurrent holders.
    ///
    /// A zero-capacity gate rejects everything.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Claims one slot if fewer than `capacity` are held.
    ///
    /// The check and the claim are a single compare-and-swap, so concurrent
    /// callers can never push the count past capacity.
    pub fn try_acquire(&self) -> Option<AdmissionToken> {
        let capacity = self.capacity;
        self.in_flight
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |held| {
                (held < capacity).then_some(held + 1)
            })
            .ok()
            .map(|_| AdmissionToken {
                in_flight: Arc::clone(&self.in_flight),
            })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of tokens currently held.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Number of slots a caller could claim right now.
    pub fn available(&self) -> usize {
        self.capacity.saturating_sub(self.in_flight())
    }

    pub fn is_saturated(&self) -> bool {
        self.available() == 0
    }
}

impl Default for AdmissionGate {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

impl fmt::Debug for AdmissionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdmissionGate")
            .field("capacity", &self.capacity)
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

/// One slot of lookup capacity.
///
/// Not `Clone`; dropping it is the only way to release, so each successful
/// acquire is released exactly once on every exit path, unwinding included.
#[must_use = "dropping the token releases the slot immediately"]
pub struct AdmissionToken {
    in_flight: Arc<AtomicUsize>,
}

impl AdmissionToken {
    /// Returns the slot to the gate. Equivalent to dropping the token.
    pub fn release(self) {}
}

impl Drop for AdmissionToken {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}

impl fmt::Debug for AdmissionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdmissionToken").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_acquire_up_to_capacity() {
        let gate = AdmissionGate::new(3);
        let tokens: Vec<_> = (0..3).map(|_| gate.try_acquire()).collect();
        assert!(tokens.iter().all(Option::is_some));
        assert!(gate.try_acquire().is_none());
        assert!(gate.is_saturated());
        assert_eq!(gate.in_flight(), 3);
    }

    #[test]
    fn test_release_frees_slot() {
        let gate = AdmissionGate::new(1);
        let token = gate.try_acquire().unwrap();
        assert!(gate.try_acquire().is_none());

        token.release();
        assert_eq!(gate.available(), 1);
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn test_zero_capacity_rejects() {
        let gate = AdmissionGate::new(0);
        assert!(gate.try_acquire().is_none());
        assert_eq!(gate.available(), 0);
    }

    #[test]
    fn test_clones_share_counter() {
        let gate = AdmissionGate::new(2);
        let other = gate.clone();
        let _a = gate.try_acquire().unwrap();
        let _b = other.try_acquire().unwrap();
        assert!(gate.try_acquire().is_none());
        assert_eq!(other.in_flight(), 2);
    }

    #[test]
    fn test_token_released_on_panic() {
        let gate = AdmissionGate::new(1);
        let g = gate.clone();
        let result = thread::spawn(move || {
            let _token = g.try_acquire().unwrap();
            panic!("handler failed");
        })
        .join();

        assert!(result.is_err());
        assert_eq!(gate.in_flight(), 0);
    }

    #[test]
    fn test_concurrent_acquire_never_exceeds_capacity() {
        const THREADS: usize = 32;
        let gate = AdmissionGate::new(4);
        let barrier = Arc::new(Barrier::new(THREADS));
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let gate = gate.clone();
                let barrier = Arc::clone(&barrier);
                let peak = Arc::clone(&peak);
                thread::spawn(move || {
                    barrier.wait();
                    let mut admitted = 0;
                    for _ in 0..1000 {
                        if let Some(token) = gate.try_acquire() {
                            peak.fetch_max(gate.in_flight(), Ordering::AcqRel);
                            admitted += 1;
                            drop(token);
                        }
                    }
                    admitted
                })
            })
            .collect();

        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert!(admitted > 0);
        assert!(peak.load(Ordering::Acquire) <= 4);
        assert_eq!(gate.in_flight(), 0);
    }
}
