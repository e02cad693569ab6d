//! The three quadratic sorting algorithms the engine animates and measures.

use crate::stepper::Stepper;
use std::fmt;
use std::str::FromStr;

/// Identifies one of the supported quadratic sorting algorithms.
///
/// Descriptors carry no state of their own; each run builds a fresh
/// [`Stepper`] from a descriptor, so descriptors are freely copyable and
/// interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Adjacent-pair exchange sort with early exit on a swap-free pass.
    Bubble,
    /// Repeated minimum selection into the sorted prefix.
    Selection,
    /// Incremental insertion into the sorted prefix via right shifts.
    Insertion,
}

impl Algorithm {
    /// All algorithms in the fixed comparison order.
    pub const ALL: [Self; 3] = [Self::Bubble, Self::Selection, Self::Insertion];

    /// Human-readable display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
        }
    }

    /// Sorts `data` ascending by driving a stepper to exhaustion.
    ///
    /// This is the unanimated execution path: it performs exactly the same
    /// operation sequence the animated path does, with no callbacks and no
    /// delays, so measured times are comparable to animated runs.
    pub fn sort(self, data: &mut [i32]) {
        let mut stepper = Stepper::new(self, data.len());
        while stepper.advance(data).is_some() {}
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bubble" => Ok(Self::Bubble),
            "selection" => Ok(Self::Selection),
            "insertion" => Ok(Self::Insertion),
            other => Err(format!(
                "unknown algorithm '{other}' (expected bubble, selection or insertion)"
            )),
        }
    }
}
