mod http;
mod retrying;
mod types;

pub use http::{API_KEY_ENV, HttpGeminiClient};
pub use retrying::{RetryPolicy, RetryingGenerator};
