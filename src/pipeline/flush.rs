//! Flush-boundary bookkeeping for packets in flight.
//!
//! Every pool slot carries a floor: the smallest row its current contents
//! can still contribute to. The boundary handed to the output sink is the
//! minimum floor over all slots. Floors only ever rise, so the boundary
//! never moves backwards.

#[derive(Debug, Clone, Copy)]
struct SlotState {
    floor: i32,
    held: bool,
}

/// Tracks which pool slots the manager currently holds and their floors.
#[derive(Debug)]
pub struct FlushTracker {
    slots: Vec<SlotState>,
    held: usize,
}

impl FlushTracker {
    /// All slots start outside the manager with floor `initial_floor`.
    pub fn new(pool_size: usize, initial_floor: i32) -> Self {
        Self {
            slots: vec![
                SlotState {
                    floor: initial_floor,
                    held: false,
                };
                pool_size
            ],
            held: 0,
        }
    }

    /// Number of slots currently in a queue or inside a worker.
    pub fn outstanding(&self) -> usize {
        self.slots.len() - self.held
    }

    /// Records that the manager has taken custody of `slot`.
    ///
    /// # Panics
    ///
    /// Panics if the manager already holds the slot.
    pub fn checkout(&mut self, slot: usize) {
        let state = &mut self.slots[slot];
        assert!(!state.held, "packet slot {} checked out twice", slot);
        state.held = true;
        self.held += 1;
    }

    /// Hands `slot` back to the system with the floor of its new contents.
    ///
    /// # Panics
    ///
    /// Panics if the manager does not hold the slot or if the floor would
    /// move backwards.
    pub fn release(&mut self, slot: usize, floor: i32) {
        let state = &mut self.slots[slot];
        assert!(state.held, "packet slot {} released without checkout", slot);
        assert!(
            floor >= state.floor,
            "floor of packet slot {} regressed from {} to {}",
            slot,
            state.floor,
            floor
        );
        state.floor = floor;
        state.held = false;
        self.held -= 1;
    }

    /// Keeps `slot` with the manager for good and raises its floor to `floor`.
    ///
    /// Used once the pattern is exhausted: the slot holds nothing and will
    /// not be refilled.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`FlushTracker::release`].
    pub fn retire(&mut self, slot: usize, floor: i32) {
        let state = &mut self.slots[slot];
        assert!(state.held, "packet slot {} retired without checkout", slot);
        assert!(
            floor >= state.floor,
            "floor of packet slot {} regressed from {} to {}",
            slot,
            state.floor,
            floor
        );
        state.floor = floor;
    }

    /// Smallest row any slot may still contribute to.
    pub fn boundary(&self) -> i32 {
        self.slots
            .iter()
            .map(|s| s.floor)
            .min()
            .unwrap_or(i32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_minimum_floor() {
        let mut tracker = FlushTracker::new(3, 0);
        assert_eq!(tracker.boundary(), 0);

        tracker.checkout(0);
        tracker.release(0, 5);
        assert_eq!(tracker.boundary(), 0);

        tracker.checkout(1);
        tracker.release(1, 6);
        tracker.checkout(2);
        tracker.release(2, 7);
        assert_eq!(tracker.boundary(), 5);
    }

    #[test]
    fn test_outstanding_plus_held_equals_pool() {
        let mut tracker = FlushTracker::new(4, 0);
        assert_eq!(tracker.outstanding(), 4);
        tracker.checkout(1);
        tracker.checkout(3);
        assert_eq!(tracker.outstanding(), 2);
        tracker.release(1, 0);
        assert_eq!(tracker.outstanding(), 3);
    }

    #[test]
    #[should_panic(expected = "checked out twice")]
    fn test_double_checkout_panics() {
        let mut tracker = FlushTracker::new(2, 0);
        tracker.checkout(1);
        tracker.checkout(1);
    }

    #[test]
    #[should_panic(expected = "released without checkout")]
    fn test_release_without_checkout_panics() {
        let mut tracker = FlushTracker::new(2, 0);
        tracker.release(0, 1);
    }

    #[test]
    #[should_panic(expected = "regressed")]
    fn test_floor_regression_panics() {
        let mut tracker = FlushTracker::new(1, 0);
        tracker.checkout(0);
        tracker.release(0, 4);
        tracker.checkout(0);
        tracker.release(0, 3);
    }

    #[test]
    fn test_retired_slots_stay_held() {
        let mut tracker = FlushTracker::new(2, 0);
        tracker.checkout(0);
        tracker.retire(0, 9);
        assert_eq!(tracker.outstanding(), 1);
        assert_eq!(tracker.boundary(), 0);

        tracker.checkout(1);
        tracker.retire(1, 9);
        assert_eq!(tracker.outstanding(), 0);
        assert_eq!(tracker.boundary(), 9);
    }

    #[test]
    fn test_empty_pool_boundary_is_unbounded() {
        assert_eq!(FlushTracker::new(0, 0).boundary(), i32::MAX);
    }
}
