// SPDX-License-Identifier: MPL-2.0
//! Submitting a form to its prediction service.
//!
//! A [`Controller`] validates the form, sends it through a
//! [`Transport`](crate::transport::Transport), and races the request against
//! two timers:
//!
//! - the slow-warning timer raises an advisory flag while the hosted service
//!   wakes up from a cold start
//! - the optional hard ceiling cancels the request
//!
//! Whatever wins, the submission settles once into a [`SubmissionOutcome`]
//! and both timers are gone.

mod controller;
mod outcome;
mod policy;
mod state;
mod status;

pub use controller::Controller;
pub use outcome::SubmissionOutcome;
pub use policy::TimingPolicy;
pub use state::FormState;
pub use status::{Phase, Status};
