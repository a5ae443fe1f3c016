//! Record and parameter types shared by all storage backends.

pub mod groups;
pub mod ids;
pub mod messages;
pub mod users;

pub use groups::*;
pub use ids::*;
pub use messages::*;
pub use users::*;
