mod console;
mod inspect;
mod json;

pub use console::ConsoleSink;
pub use inspect::{EntityCount, InspectReport, MalformedBlock};
pub use json::{ScenarioListing, ScenarioReport, print_json};
