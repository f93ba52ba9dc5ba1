//! CDP plumbing for tabpilot.
//!
//! Connects to a running Chrome over the DevTools protocol, attaches
//! page sessions to the two tabs tabpilot cares about, and keeps the
//! tab registry current as targets open, navigate and close.

pub mod chrome;
pub mod client;
pub mod error;
pub mod js;
pub mod protocol;
pub mod registry;
pub mod session;

pub use chrome::{find_chrome, launch_chrome};
pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::{BrowserVersion, CdpRequest, CdpResponse, TargetInfo};
pub use registry::{ResolvedTabs, TabRef, TabRegistry, TabRole};
pub use session::PageSession;
