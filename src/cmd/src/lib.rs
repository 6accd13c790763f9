pub mod cmd;
pub mod gateway;

pub use cmd::run;
