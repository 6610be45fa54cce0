//! Request and response bodies on the wire
//!
//! Whether a body is enveloped is decided per endpoint by an explicit
//! [`EndpointPolicy`], never inferred from the payload shape.

pub mod body;
pub mod mode;
pub mod policy;
pub mod response;

pub use body::BodyCodec;
pub use mode::{BodyMode, EndpointModes};
pub use policy::{normalize_path, EndpointPolicy};
pub use response::{ApiResponse, SUCCESS_STATUS};
