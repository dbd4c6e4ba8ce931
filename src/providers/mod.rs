pub mod fallback;
pub mod frankfurter;
pub mod util;

pub use fallback::FallbackDataset;
pub use frankfurter::FrankfurterProvider;
pub use util::{RetryPolicy, with_retry};
