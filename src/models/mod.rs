mod entity_type;
mod record;

pub use entity_type::{Entity, EntityType};
pub use record::{Record, RecordId};
