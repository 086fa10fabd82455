pub mod actions;
pub mod encounter;
pub mod log;
