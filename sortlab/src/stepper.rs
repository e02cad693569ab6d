//! Lazy, restartable-from-scratch operation sequences for the three sorts.
//!
//! A [`Stepper`] turns a sorting algorithm into an explicit state machine
//! that yields one observable [`Operation`] per call. Each operation is
//! applied to the caller's array inside the same [`Stepper::advance`] call
//! that returns it; the stepper never buffers a plan to replay later. That
//! invariant is what makes mid-run pause and cancellation safe: the array
//! is always exactly the result of the operations delivered so far.

use crate::algorithm::Algorithm;

/// One observable step of a sorting algorithm.
///
/// Operations are the only channel through which an algorithm communicates
/// with the outside world: a renderer that applies a run's operations to
/// its own copy of the input stays in lockstep with the real array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    /// The elements at the two indices were compared.
    Compare(usize, usize),
    /// The elements at the two indices were exchanged.
    Swap(usize, usize),
    /// The element at the index was replaced with the value.
    Overwrite(usize, i32),
    /// The run finished; carries wall-clock elapsed milliseconds.
    ///
    /// Produced by the scheduler when a stepper is exhausted, never by the
    /// stepper itself.
    Done(f64),
}

/// Per-algorithm resumable execution state.
///
/// Index invariants per variant:
/// - `Bubble`: pass `i`, cursor `j` with `j + 1 < n - i`, `swapped` tracks
///   the current pass, `pending` holds a swap decided by the previous
///   compare but not yet applied.
/// - `Selection`: sorted prefix ends at `i`, scan cursor `j` in `i+1..n`,
///   `min` is the index of the smallest value seen this round.
/// - `Insertion`: round `i`, `hole` is the index the held `key` would
///   currently land in.
enum State {
    Bubble {
        i: usize,
        j: usize,
        swapped: bool,
        pending: Option<(usize, usize)>,
    },
    Selection {
        i: usize,
        j: usize,
        min: usize,
    },
    Insertion {
        i: usize,
        hole: usize,
        key: i32,
        phase: InsertPhase,
    },
    Finished,
}

enum InsertPhase {
    /// Pick up `data[i]` as the key and open the hole at `i`.
    PickKey,
    /// Compare the key against the element left of the hole.
    Check,
    /// Shift the left element into the hole.
    Shift,
    /// Drop the key into the hole and start the next round.
    Place,
}

/// A lazy, finite, non-restartable operation sequence over an array of a
/// fixed length.
///
/// The stepper is constructed for a specific array length and must be
/// driven with slices of exactly that length. Fully consuming the
/// sequence leaves the array sorted ascending; the result is always a
/// permutation of the input (ties may reorder).
pub struct Stepper {
    algorithm: Algorithm,
    len: usize,
    state: State,
}

impl Stepper {
    /// Creates a stepper for `algorithm` over arrays of length `len`.
    #[must_use]
    pub fn new(algorithm: Algorithm, len: usize) -> Self {
        let state = match algorithm {
            Algorithm::Bubble => State::Bubble {
                i: 0,
                j: 0,
                swapped: false,
                pending: None,
            },
            Algorithm::Selection => State::Selection { i: 0, j: 1, min: 0 },
            Algorithm::Insertion => State::Insertion {
                i: 1,
                hole: 0,
                key: 0,
                phase: InsertPhase::PickKey,
            },
        };
        Self {
            algorithm,
            len,
            state,
        }
    }

    /// The algorithm this stepper executes.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Whether the operation sequence is exhausted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Finished)
    }

    /// Produces the next operation, applying it to `data` before returning.
    ///
    /// Returns `None` once the sequence is exhausted, at which point `data`
    /// is sorted ascending.
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` differs from the length the stepper was
    /// created with.
    pub fn advance(&mut self, data: &mut [i32]) -> Option<Operation> {
        assert_eq!(
            data.len(),
            self.len,
            "stepper driven with an array of the wrong length"
        );
        let n = self.len;

        match &mut self.state {
            State::Bubble {
                i,
                j,
                swapped,
                pending,
            } => {
                if let Some((a, b)) = pending.take() {
                    data.swap(a, b);
                    *swapped = true;
                    return Some(Operation::Swap(a, b));
                }
                loop {
                    if *i + 1 >= n {
                        self.state = State::Finished;
                        return None;
                    }
                    if *j + 1 >= n - *i {
                        // End of a full pass: a swap-free pass means the
                        // array is sorted, so the round loop exits early.
                        if !*swapped {
                            self.state = State::Finished;
                            return None;
                        }
                        *i += 1;
                        *j = 0;
                        *swapped = false;
                        continue;
                    }
                    let (a, b) = (*j, *j + 1);
                    *j += 1;
                    if data[a] > data[b] {
                        *pending = Some((a, b));
                    }
                    return Some(Operation::Compare(a, b));
                }
            }

            State::Selection { i, j, min } => loop {
                if *i + 1 >= n {
                    self.state = State::Finished;
                    return None;
                }
                if *j < n {
                    let candidate = *j;
                    let against = *min;
                    *j += 1;
                    if data[candidate] < data[*min] {
                        // Tracking the running minimum is not observable.
                        *min = candidate;
                    }
                    return Some(Operation::Compare(candidate, against));
                }
                // Scan finished: at most one swap closes the round. When
                // the minimum is already in place the attempt is a no-op
                // and emits nothing.
                let (slot, min_idx) = (*i, *min);
                *i += 1;
                *j = *i + 1;
                *min = *i;
                if min_idx != slot {
                    data.swap(slot, min_idx);
                    return Some(Operation::Swap(slot, min_idx));
                }
            },

            State::Insertion {
                i,
                hole,
                key,
                phase,
            } => loop {
                match phase {
                    InsertPhase::PickKey => {
                        if *i >= n {
                            self.state = State::Finished;
                            return None;
                        }
                        *key = data[*i];
                        *hole = *i;
                        *phase = InsertPhase::Check;
                    }
                    InsertPhase::Check => {
                        if *hole == 0 {
                            *phase = InsertPhase::Place;
                            continue;
                        }
                        let left = *hole - 1;
                        *phase = if data[left] > *key {
                            InsertPhase::Shift
                        } else {
                            InsertPhase::Place
                        };
                        return Some(Operation::Compare(left, *hole));
                    }
                    InsertPhase::Shift => {
                        let value = data[*hole - 1];
                        data[*hole] = value;
                        let target = *hole;
                        *hole -= 1;
                        *phase = InsertPhase::Check;
                        return Some(Operation::Overwrite(target, value));
                    }
                    InsertPhase::Place => {
                        data[*hole] = *key;
                        let op = Operation::Overwrite(*hole, *key);
                        *i += 1;
                        *phase = InsertPhase::PickKey;
                        return Some(op);
                    }
                }
            },

            State::Finished => None,
        }
    }
}
