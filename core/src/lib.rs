//! Projection engine for the marketing ROI calculator.
//!
//! Data flows one way:
//!   1. state       — point-in-time metrics from a store snapshot
//!   2. scenario    — CVR multiplier lookup
//!   3. ramp        — implementation curve
//!   4. projection  — month-by-month simulation (three revenue tracks)
//!   5. roi         — ROI multiple and curve-aware payback
//!
//! Every public function is pure and synchronous. `calculator` wires the
//! pieces together the way a presentation layer consumes them.

pub mod calculator;
pub mod config;
pub mod error;
pub mod projection;
pub mod qualification;
pub mod ramp;
pub mod roi;
pub mod scenario;
pub mod state;
pub mod types;
