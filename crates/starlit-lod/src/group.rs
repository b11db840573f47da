//! Per-group representation state: uninitialized until both representations
//! exist, then switching atomically between near and far.

use glam::Vec3;

use crate::selector::{LodSelector, PointSet, Representation};

/// A geometry together with the material it must be drawn with.
///
/// The pair is swapped as one unit so a near geometry is never drawn with a
/// far material or the other way round.
#[derive(Clone, Debug, PartialEq)]
pub struct LodPair<G, M> {
    pub geometry: G,
    pub material: M,
}

/// Lifecycle of a LOD group.
#[derive(Clone, Debug, PartialEq)]
pub enum LodState<G, M> {
    /// Materials have not arrived yet. The group is not drawn and the selector
    /// leaves it alone.
    Uninitialized,
    /// Both representations exist; `active` is the one currently drawn.
    Ready {
        near: LodPair<G, M>,
        far: LodPair<G, M>,
        active: Representation,
    },
}

/// A representation change reported by [`LodGroup::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LodSwitch {
    pub from: Representation,
    pub to: Representation,
}

/// A point group with a pivot and a near/far representation.
#[derive(Clone, Debug)]
pub struct LodGroup<G, M> {
    pivot: Vec3,
    state: LodState<G, M>,
}

impl<G: PointSet, M> LodGroup<G, M> {
    /// Create an uninitialized group placed at `pivot`.
    pub fn new(pivot: Vec3) -> Self {
        Self {
            pivot,
            state: LodState::Uninitialized,
        }
    }

    /// World-space offset applied to every local point.
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &LodState<G, M> {
        &self.state
    }

    /// Whether both representations are attached.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, LodState::Ready { .. })
    }

    /// Install both representations. A fresh group starts on `Far`.
    ///
    /// Returns `true` if the group was uninitialized. Attaching again replaces
    /// the pairs but keeps the active representation.
    pub fn attach(&mut self, near: LodPair<G, M>, far: LodPair<G, M>) -> bool {
        let (active, fresh) = match self.state {
            LodState::Uninitialized => (Representation::Far, true),
            LodState::Ready { active, .. } => (active, false),
        };
        self.state = LodState::Ready { near, far, active };
        fresh
    }

    /// The representation currently drawn, if any.
    pub fn active(&self) -> Option<Representation> {
        match self.state {
            LodState::Uninitialized => None,
            LodState::Ready { active, .. } => Some(active),
        }
    }

    /// The geometry/material pair currently drawn, if any.
    pub fn active_pair(&self) -> Option<&LodPair<G, M>> {
        match &self.state {
            LodState::Uninitialized => None,
            LodState::Ready { near, far, active } => Some(match active {
                Representation::Near => near,
                Representation::Far => far,
            }),
        }
    }

    /// Both pairs, near first, once the group is ready.
    pub fn pairs(&self) -> Option<(&LodPair<G, M>, &LodPair<G, M>)> {
        match &self.state {
            LodState::Uninitialized => None,
            LodState::Ready { near, far, .. } => Some((near, far)),
        }
    }

    /// Mutable access to both pairs.
    pub fn pairs_mut(&mut self) -> Option<(&mut LodPair<G, M>, &mut LodPair<G, M>)> {
        match &mut self.state {
            LodState::Uninitialized => None,
            LodState::Ready { near, far, .. } => Some((near, far)),
        }
    }

    /// Re-evaluate the representation against the camera.
    ///
    /// Scans the points of the active geometry. Returns the switch performed,
    /// or `None` when the group is uninitialized or already on the target.
    pub fn update(&mut self, selector: &LodSelector, camera: Vec3) -> Option<LodSwitch> {
        let pivot = self.pivot;
        let LodState::Ready { near, far, active } = &mut self.state else {
            return None;
        };
        let current = match active {
            Representation::Near => &near.geometry,
            Representation::Far => &far.geometry,
        };
        let target = selector.select(current.points(), pivot, camera);
        if target == *active {
            return None;
        }
        let switch = LodSwitch {
            from: *active,
            to: target,
        };
        *active = target;
        Some(switch)
    }
}
