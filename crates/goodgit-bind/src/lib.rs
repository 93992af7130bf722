pub mod engine;
pub mod url;

pub use engine::{Binding, BindingEngine, CloneOutcome, RemoteAction};
pub use url::{is_qualified, qualified_host, qualify_url, unqualify_url, RewriteKind, UrlRewrite};
