pub mod clock;
pub mod delivery;
pub mod memory;
pub mod payroll;
pub mod sweeper;
