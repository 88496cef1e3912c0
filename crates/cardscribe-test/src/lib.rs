//! cardscribe - integration test support.
//!
//! Re-exports the workspace crates under one `component` path so the
//! integration tests read the same way regardless of which crate a type
//! lives in.

pub mod component {
    pub use cardscribe_core::{config, constants};

    pub mod error {
        pub use cardscribe_core::error::{CoreError, CoreResult};
        pub use cardscribe_rfc::error::{DispatchError, DispatchResult};
    }

    pub mod vcard {
        pub use cardscribe_rfc::rfc::vcard::*;
    }
}
