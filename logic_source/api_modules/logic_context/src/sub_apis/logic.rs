use logic_ids::ObjectID;
use logic_variant::Variant;

use crate::Result;

pub trait LogicAPI {
    /// Current value of input `slot`, pulled from its upstream producer on every call.
    fn input(&mut self, slot: usize) -> Result<Variant>;

    /// Object the running tree is attached to; stands in for a null object input.
    fn owner(&self) -> ObjectID;

    /// Schedules the nodes connected to action output `output`.
    fn run_output(&mut self, output: usize);
}
