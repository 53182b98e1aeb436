pub mod elements;
pub mod molecules;
