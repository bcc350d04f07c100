/// Control sockets and admin API endpoints exposed by each instance
pub mod sockets {
    /// Watchdog admin socket (relative to the instance directory)
    pub const WATCHDOG: &str = "agents.s/watchdog_api";

    /// Core agent admin socket
    pub const CORE: &str = "agents.s/core_api";

    /// UstRouter agent admin socket
    pub const UST_ROUTER: &str = "agents.s/ust_router_api";

    /// Endpoint telling the watchdog to reopen its log file
    pub const REOPEN_LOGS_PATH: &str = "/reopen_logs.json";

    /// Endpoint telling an agent to reinherit the log file from the watchdog
    pub const REINHERIT_LOGS_PATH: &str = "/reinherit_logs.json";

    /// Error code reported by agents started without a log file
    pub const NO_LOG_FILE: &str = "NO_LOG_FILE";

    /// Timeout for connecting to a control socket, in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Timeout for a single control socket exchange, in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Base URL for requests; the host is ignored when dialing a socket
    pub const BASE_URL: &str = "http://localhost";
}

/// Configuration constants for the instance registry
pub mod registry {
    /// Environment variable overriding the registry directory
    pub const DIR_ENV_VAR: &str = "PASSENGER_INSTANCE_REGISTRY_DIR";

    /// Environment variable naming the temp directory (second registry location)
    pub const TMPDIR_ENV_VAR: &str = "TMPDIR";

    /// Fallback temp directory when TMPDIR is unset
    pub const DEFAULT_TMPDIR: &str = "/tmp";

    /// System-wide registry directory
    pub const SYSTEM_DIR: &str = "/var/run/passenger-instreg";

    /// Prefix of instance directory names
    pub const INSTANCE_DIR_PREFIX: &str = "passenger.";

    /// Marker file written once an instance directory is fully set up
    pub const CREATION_FINALIZED_FILE: &str = "creation_finalized";

    /// Instance metadata file
    pub const PROPERTIES_FILE: &str = "properties.json";
}

/// Configuration constants for admin authentication
pub mod admin {
    /// Basic auth user for full admin access
    pub const FULL_ADMIN_USER: &str = "admin";

    /// Password file for full admin access (relative to the instance directory)
    pub const FULL_ADMIN_PASSWORD_FILE: &str = "full_admin_password.txt";
}

/// Default values for CLI
pub mod defaults {
    /// Product name used in user-facing messages
    pub const PROGRAM_NAME: &str = "Passenger";

    /// Executable name of the agents, used when naming them in errors
    pub const AGENT_EXE: &str = "PassengerAgent";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}
