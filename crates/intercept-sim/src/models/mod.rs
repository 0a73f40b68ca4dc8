//! Physical actors in the engagement.

pub mod interceptor;
pub mod target;

pub use interceptor::{Interceptor, InterceptorParams};
pub use target::Target;
