mod inventory;
mod walk;

pub use inventory::CompareInventory;
pub use walk::{scan, scan_with_ignores};
