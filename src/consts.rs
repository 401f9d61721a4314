pub mod dashboard_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains the configuration constants for the dashboard,
    //! organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Buffer size of the channel between fetch tasks and the UI loop
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // REFRESH CONFIGURATION
    // =============================================================================

    /// Market refresh cadence
    pub mod refresh {
        /// Period between scheduled market fetches (milliseconds)
        pub const REFRESH_INTERVAL_MS: u64 = 500_000;

        /// How long the "Loading Dashboard..." gate is shown at startup (seconds)
        pub const PRELOAD_GATE_SECS: u64 = 3;
    }

    // =============================================================================
    // STORAGE CONFIGURATION
    // =============================================================================

    pub mod storage {
        /// Durable storage key holding the persisted card list
        pub const LAYOUT_STORAGE_KEY: &str = "crypto-dashboard-layout";

        /// File name used by layout export and import
        pub const EXPORT_FILE_NAME: &str = "dashboard-layout.json";

        /// Directory under $HOME holding config, layout and logs
        pub const DATA_DIR_NAME: &str = ".crypto-dashboard";

        pub const CONFIG_FILE_NAME: &str = "config.json";

        pub const LOG_DIR_NAME: &str = "logs";
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    pub mod network {
        /// Public CoinGecko API root
        pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

        /// Market table endpoint, priced in USD
        pub const MARKETS_ENDPOINT: &str = "coins/markets?vs_currency=usd";

        /// Connect and request timeout (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        /// Environment variable overriding the API root
        pub const API_URL_ENV_VAR: &str = "CRYPTO_DASHBOARD_API_URL";
    }
}
