//! Seams between the resolution pipeline and the editor hosting it.
//!
//! The host owns document symbols and knows which tools are installed; the
//! pipeline only talks to it through these traits.

pub mod host_capabilities;
pub mod symbol_provider;

pub use host_capabilities::HostCapabilities;
pub use symbol_provider::{HostSymbols, SymbolProvider, TreeSitterSymbols};
