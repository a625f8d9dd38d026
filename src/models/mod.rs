mod forms;
mod task;
mod taxonomy;
pub mod timestamp;
mod user;

pub use forms::{LoginForm, NewTask, RegisterForm};
pub use task::{TaskDocument, TaskMap, TaskRecord, TaskStatus};
pub use taxonomy::{TaxonomyDocument, TaxonomyField, DEFAULT_COST_CENTER};
pub use user::{CredentialDocument, Role, Session};
