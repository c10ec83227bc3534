// ==========================================
// Seal Inventory - engine layer
// ==========================================
// Pure business rules. No SQL, no I/O.
// ==========================================

pub mod assembly_costing;
pub mod cost_allocation;
pub mod stock_valuation;

pub use assembly_costing::{
    AssemblyCostCalculator, AssemblyCosting, AssemblyError, ComponentLine, CostedComponent,
};
pub use cost_allocation::{
    round_money, round_to, AllocatedLine, AllocationError, AllocationLine, AllocationResult,
    CostAllocator,
};
pub use stock_valuation::StockError;
