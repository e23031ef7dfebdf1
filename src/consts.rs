pub mod cli_consts {
    //! Dashboard Constants

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of event buffer size for background tasks
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Buffer for analysis results; only the newest request matters.
    pub const ANALYSIS_QUEUE_SIZE: usize = 8;

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    /// How long the splash screen stays up (milliseconds)
    pub const SPLASH_DURATION_MS: u64 = 2000;

    /// Terminal event poll interval (milliseconds)
    pub const POLL_INTERVAL_MS: u64 = 100;

    /// Multiplicative step for the `+`/`-` zoom keys
    pub const ZOOM_STEP: f64 = 1.25;

    /// Horizontal pan per `h`/`l` key press (chart units)
    pub const PAN_STEP: f64 = 40.0;
}
