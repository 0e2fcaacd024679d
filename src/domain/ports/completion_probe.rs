/// Port for a single framework's "finished" signal
///
/// Each test framework that can run inside a page gets one implementation.
/// Probes are read-only: evaluating one must never change page state, and an
/// absent framework simply reports `false`.
///
/// # Examples
///
/// ```
/// use quiesce::domain::ports::CompletionProbe;
///
/// struct AlwaysDone;
///
/// impl CompletionProbe for AlwaysDone {
///     fn name(&self) -> &str {
///         "always"
///     }
///
///     fn is_complete(&self) -> bool {
///         true
///     }
/// }
///
/// assert!(AlwaysDone.is_complete());
/// ```
pub trait CompletionProbe: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Whether the framework has signalled that its run is over
    fn is_complete(&self) -> bool;
}
