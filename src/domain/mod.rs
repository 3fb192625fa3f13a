pub mod account;
pub mod category;
pub mod common;
pub mod operation;
pub mod window;

pub use account::{Account, AccountKind};
pub use category::{Category, CategoryKind};
pub use common::{Displayable, EntityId, EntityKind, Identifiable, NamedEntity};
pub use operation::{Operation, OperationDraft, OperationKind};
pub use window::{parse_timestamp, DateRange};
