pub mod order;
pub mod part;
pub mod report;
