pub mod fixtures;
pub mod mock_provider;

pub use fixtures::{coordinator_with, photos_job, submission};
pub use mock_provider::MockProvider;
