pub mod keys;
pub mod registry;

pub use keys::{KeySource, SshKeyDir, StaticKeys};
pub use registry::{HostRegistry, MemoryRegistry, SshConfigFile};
