pub mod fiscal;
pub mod handpump;
pub mod region;
pub mod requisition;
pub mod selection;
