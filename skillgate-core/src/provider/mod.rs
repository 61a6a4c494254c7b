//! Assessment providers
//!
//! The provider is the session's only collaborator: it fetches assessment
//! definitions, acknowledges starts, and scores submissions. Swapping the
//! implementation swaps the transport — HTTP against the platform API,
//! an in-process generator, or scripted mocks for tests.

pub mod http;
pub mod local;
pub mod mock;
pub mod slow_mock;
pub mod traits;

// Re-export key types for convenience
pub use http::{HttpProvider, HttpProviderConfig};
pub use local::LocalProvider;
pub use mock::{MockProbe, MockProvider};
pub use slow_mock::SlowMockProvider;
pub use traits::AssessmentProvider;
