pub mod builders;
pub mod parser;

pub use builders::*;
pub use parser::{parse_blocks, shape_issue, tally};
