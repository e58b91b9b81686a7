//! Request handlers for the rollup dapp
//!
//! ## Key Components
//!
//! - [`RequestHandler`] - Trait every handler implements
//! - [`AdvanceHandler`] - Classifies advance payloads and emits notices
//! - [`InspectHandler`] - Echoes inspect payloads back as reports
//! - [`HandlerRegistry`] - One handler per request type
//!
//! ## Example
//!
//! ```rust,ignore
//! use sentiment_dapp::handlers::HandlerRegistry;
//!
//! let registry = HandlerRegistry::with_defaults(model);
//! let handler = registry.get(request.kind()?);
//! let status = handler.handle(&request.data, &client).await?;
//! ```

mod advance;
mod inspect;
mod registry;
mod traits;

pub use advance::AdvanceHandler;
pub use inspect::InspectHandler;
pub use registry::HandlerRegistry;
pub use traits::{HandlerError, RequestHandler};
