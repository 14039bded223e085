//! Arbor Client Model
//!
//! Browser-side state for the Arbor outline editor, kept free of any
//! rendering environment so the mutation logic is unit-testable:
//!
//! - [`model`] - `OutlineModel`, the owned application state. Mutations apply
//!   optimistically and emit [`model::OutlineCommand`]s describing the server
//!   call to issue; the model never talks to the network itself.
//! - [`view`] - pure computation of visible, indented rows from the model.
//! - [`api`] - reqwest transport that executes commands against the server
//!   and logs failures. A failed call leaves local and server state diverged
//!   until the next full reload; there is no retry and no rollback.

pub mod api;
pub mod model;
pub mod view;

pub use api::ApiClient;
pub use model::{OutlineCommand, OutlineModel, TreeItem, ROOT_ID};
pub use view::{visible_rows, Row, INDENT_PX};
