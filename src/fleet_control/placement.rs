use crate::bridge::{CorrelationId, ObjectHandle};
use crate::catalog::{FormationTemplate, MemberSlot};

/// A formation member sent to the simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedUnit {
    slot: MemberSlot,
    /// `None` until the simulator acknowledges the creation, and again once
    /// the object is gone.
    handle: Option<ObjectHandle>,
}

impl PlacedUnit {
    pub fn slot(&self) -> &MemberSlot { &self.slot }
    pub fn handle(&self) -> Option<ObjectHandle> { self.handle }
}

/// The units of the formation currently in the simulator.
///
/// Unit `i` was created with correlation id `base + i`, which is how handle
/// assignments find their unit.
#[derive(Debug, Clone)]
pub struct Placement {
    title: String,
    base: CorrelationId,
    units: Vec<PlacedUnit>,
}

impl Placement {
    pub fn new(formation: &FormationTemplate, base: CorrelationId) -> Self {
        let units = formation
            .members()
            .iter()
            .map(|slot| PlacedUnit { slot: slot.clone(), handle: None })
            .collect();
        Self { title: formation.title().to_string(), base, units }
    }

    pub fn title(&self) -> &str { &self.title }

    pub fn units(&self) -> &[PlacedUnit] { &self.units }

    pub fn correlation_of(&self, index: usize) -> Option<CorrelationId> { self.base.offset(index) }

    /// Stores the handle for the unit created under `correlation`.
    ///
    /// # Returns
    /// - The unit index, or `None` if `correlation` is not one of this placement's.
    pub fn assign(&mut self, correlation: CorrelationId, handle: ObjectHandle) -> Option<usize> {
        let index = correlation.index_from(self.base, self.units.len())?;
        self.units[index].handle = Some(handle);
        Some(index)
    }

    /// Forgets `handle`, returning the index of the unit that held it.
    pub fn release(&mut self, handle: ObjectHandle) -> Option<usize> {
        let index = self.units.iter().position(|u| u.handle == Some(handle))?;
        self.units[index].handle = None;
        Some(index)
    }

    pub fn live_handles(&self) -> impl Iterator<Item = ObjectHandle> + '_ {
        self.units.iter().filter_map(|u| u.handle)
    }

    pub fn live_count(&self) -> usize { self.live_handles().count() }

    /// First unit with a handle; the formation sails as one so its position
    /// stands for the fleet.
    pub fn lead_handle(&self) -> Option<ObjectHandle> { self.live_handles().next() }
}
