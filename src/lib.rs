pub mod autoload;
pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod exception;
pub mod loader;
pub mod param;
pub mod registry;
pub mod util;

pub use autoload::AutoloadRegistry;
pub use bootstrap::{Bootloader, Kernel};
pub use cache::{ClassCache, ProcessCache, SharedStore, SourceCache, StaticClassMap};
pub use config::Config;
pub use exception::Exception;
pub use loader::{ClassResolver, LoadedClass, Loader};
pub use registry::NamespaceRegistry;
