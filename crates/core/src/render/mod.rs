pub mod script;
pub mod traits;
