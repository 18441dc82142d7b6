pub mod deviation;
pub mod validation;
