//! Builds and validates Firebase Cloud Messaging legacy HTTP API payloads.
//!
//! Parameters go in as an [`FcmParams`](models::fcm::FcmParams) (or untyped
//! JSON), and come out as an [`FcmPackage`](models::fcm::FcmPackage) that is
//! known to satisfy the field rules FCM enforces server side.

pub mod clients;
pub mod config;
pub mod errors;
pub mod models;
pub mod utils;

pub use clients::fcm::FcmClient;
pub use errors::{ClientError, ValidationError};
pub use models::fcm::{FcmPackage, FcmParams, MessageTarget, Notice, Priority};
pub use utils::{build_package, build_package_from_value, build_package_with_notices};
