/// Repository configuration file, relative to the repository root.
pub const CONFIG_FILE: &str = ".alloy.json";

/// Dependency name of the bootstrap framework in `.alloy.json`.
pub const BOOTSTRAP_DEPENDENCY: &str = "twitter-bootstrap";

pub const SRC_DIR: &str = "src";
pub const BUILD_DIR: &str = "build";

/// Component whose build regenerates the loader metadata.
pub const LOADER_COMPONENT: &str = "aui-base";

/// Build output directory of the CSS phase, relative to the build dir.
pub const CSS_OUTPUT_DIR: &str = "aui-css";

pub const SHIFTER_ENV: &str = "YALLOY_SHIFTER";
pub const CSS_COMPILER_ENV: &str = "YALLOY_CSS_COMPILER";
