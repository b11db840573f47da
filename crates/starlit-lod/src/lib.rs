//! Level-of-detail management: proximity-based near/far selection and the
//! per-group representation state machine.

mod group;
mod selector;

pub use group::{LodGroup, LodPair, LodState, LodSwitch};
pub use selector::{LodSelector, NEAR_THRESHOLD, PointSet, Representation};
