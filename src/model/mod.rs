//! Local snapshots of the objects FwESI exposes
//!
//! - `Save` / `ActiveSave`: loadable scenes and the one currently running
//! - `OperatorActor`: a controllable object with its properties, enums and actions
//! - `FilterList`: filterable views over any of the above

mod action;
mod actor;
mod filter;
mod property;
mod property_enum;
mod save;
mod value;

pub use action::Action;
pub use actor::{OperatorActor, PropertyArray};
pub use filter::{Attributes, FilterList};
pub use property::{Property, PropertyType};
pub use property_enum::{EnumField, PropertyEnum};
pub use save::{ActiveSave, Save};
pub use value::AttrValue;
