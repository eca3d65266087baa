//! Module interfaces
//!
//! Each module run by the main loop of `vel_cmd_filter` implements [`State`].

// ---------------------------------------------------------------------------
// MODULE STATE
// ---------------------------------------------------------------------------

/// The internal state of a module processed once per cycle.
///
/// Processing cannot fail. Anything a module has to say about the cycle, such as an input it had
/// to limit, goes in the status report.
pub trait State {
    /// Data required for cyclic processing.
    type InputData;
    /// Data produced by cyclic processing.
    type OutputData;
    /// A report on the status of the cyclic processing.
    type StatusReport: Copy + Default;

    /// Main module processing function.
    ///
    /// Returns the output data and the status report for this cycle.
    fn proc(&mut self, input_data: &Self::InputData)
        -> (Self::OutputData, Self::StatusReport);

    /// Status report from the most recent cycle, or the default before the first cycle.
    fn status_report(&self) -> Self::StatusReport;
}
