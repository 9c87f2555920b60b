pub mod context;
pub mod inspect;
pub mod run;
pub mod scenarios;

pub use context::HandlerContext;
