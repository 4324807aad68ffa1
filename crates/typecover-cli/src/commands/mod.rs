//! Command implementations.

pub mod analyze;
pub mod compare;
pub mod recommend;
pub mod team;

pub use self::analyze::execute_analyze;
pub use self::compare::execute_compare;
pub use self::recommend::execute_recommend;
pub use self::team::execute_team;
