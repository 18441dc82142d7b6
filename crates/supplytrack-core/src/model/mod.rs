pub mod order;
pub mod part;
pub mod report;

pub use order::{NewOrder, OrderId, OrderRecord};
pub use part::{DeliveryStatus, NewPart, PartId, PartRecord, PartUpdate};
pub use report::{OrderDeviation, PartDeviation};
