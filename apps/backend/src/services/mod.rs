pub mod ai;
pub mod extract;
