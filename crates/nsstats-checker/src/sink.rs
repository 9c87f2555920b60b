use nsstats_types::AssertionRecord;

/// Receives each assertion as soon as it is evaluated.
///
/// The checker keeps its own list of records regardless; a sink exists so a
/// front end can print lines while the scenario is still running.
pub trait ReportSink {
    fn report(&mut self, prefix: &str, record: &AssertionRecord);
}
