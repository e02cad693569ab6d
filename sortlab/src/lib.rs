//! Sortlab: an educational engine for animating quadratic sorting
//! algorithms.
//!
//! The crate decomposes Bubble, Selection and Insertion Sort into typed
//! per-operation events so a UI can draw them one at a time, paces those
//! events on a background worker with pause, resume, cancel and live
//! speed control, and measures raw wall-clock runtimes for side-by-side
//! comparison against theoretical n-squared curves.
//!
//! # Overview
//!
//! The heart of the crate is the [`Stepper`]: a pull-based state machine
//! that emits one [`Operation`] per call and applies it to the array in
//! the same call, so the array always reflects exactly the operations
//! delivered so far. Everything else is built on top of it:
//!
//! - [`Scheduler`] runs a stepper on a worker thread with a slider-scale
//!   delay between operations, delivering events over a bounded channel.
//! - [`sampler`] drains a stepper as fast as possible to measure the
//!   real runtime of one algorithm on one dataset.
//! - [`comparison`] samples all three algorithms on copies of one
//!   dataset and pairs the results with theoretical curves.
//!
//! # Usage
//!
//! ```no_run
//! use sortlab::{Algorithm, Distribution, Engine, Speed};
//!
//! let mut engine = Engine::new(50, Distribution::Random, None)?;
//! engine.select_algorithm(Algorithm::Bubble);
//! engine.set_speed(Speed::new(120));
//!
//! let run = engine.start()?;
//! for event in run.events() {
//!     println!("{event:?}");
//! }
//! # Ok::<(), sortlab::Error>(())
//! ```

pub mod algorithm;
pub mod comparison;
pub mod dataset;
mod error;
pub mod import;
mod lock;
pub mod report;
pub mod sampler;
pub mod scheduler;
pub mod stepper;

pub use algorithm::Algorithm;
pub use dataset::Distribution;
pub use error::Error;
pub use scheduler::{Engine, Event, Renderer, RunHandle, RunState, Scheduler, Speed};
pub use stepper::{Operation, Stepper};
