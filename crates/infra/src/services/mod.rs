//! Application services over a [`SharedStore`](crate::store::SharedStore).
//!
//! Every write runs inside a single `SharedStore::write` closure: lookups,
//! uniqueness checks, guards and the mutation itself see one snapshot.

pub mod error;
pub mod profiles;
pub mod session;
pub mod users;

pub use error::{ServiceError, ServiceResult};
pub use profiles::ProfileService;
pub use session::{Session, SessionService};
pub use users::UserService;
