//! Global Constants
//!
//! Sheet names, column names and output conventions shared across modules.

/// Workbook layout
pub mod sheet {
    /// Required sheet holding one dependency edge per row
    pub const DEPENDENCIES: &str = "Dependencies";

    /// Optional sheet holding per-object metadata
    pub const OBJECTS: &str = "Objects";
}

/// Normalized column names
pub mod column {
    pub const OBJECT: &str = "Object";
    pub const DEPENDS_ON: &str = "Depends_On";
    pub const GROUP: &str = "Group";
    pub const TAGS: &str = "Tags";
    pub const DESCRIPTION: &str = "Description";
}

/// Generated project layout
pub mod output {
    /// Directory (inside the project) holding the stub models
    pub const MODELS_DIR: &str = "models";

    /// Group used when an object has none
    pub const DEFAULT_GROUP: &str = "database";

    /// Stub file extension
    pub const STUB_EXTENSION: &str = "sql";

    /// Prefix for freshly created destination directories
    pub const TEMP_DIR_PREFIX: &str = "depdocs-";
}

/// External documentation tool
pub mod tool {
    pub const DEFAULT_PROGRAM: &str = "dbt";

    pub const GENERATE: [&str; 2] = ["docs", "generate"];
    pub const SERVE: [&str; 2] = ["docs", "serve"];

    pub const PROJECT_DIR_FLAG: &str = "--project-dir";
    pub const PROFILES_DIR_FLAG: &str = "--profiles-dir";
}

/// Log file naming
pub mod logging {
    pub const DEFAULT_RUN_NAME: &str = "depdocs";

    /// Full debug transcript: `<run>.log`
    pub const DEBUG_LOG_SUFFIX: &str = ".log";

    /// Warnings and errors only: `<run>.errors.log`
    pub const ERROR_LOG_SUFFIX: &str = ".errors.log";

    /// Events with this target reach the log files but never the console
    pub const FILE_ONLY_TARGET: &str = "depdocs::file_only";
}
