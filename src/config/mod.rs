mod filesystem;
mod loader;
mod model;

pub use filesystem::{FileSystem, RealFileSystem};
pub use loader::{ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME};
pub use model::{
    BuiltinConfig, CONFIG_VERSION, Config, CrossFileConfig, RulesConfig, ScannerConfig,
    TestFilesConfig,
};
