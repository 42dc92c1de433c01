//! Session credential types shared between the identity service (issuer)
//! and anything that validates its tokens: cookie builders, JWT claims and
//! validation, and the axum session extractors.

pub mod cookie;
pub mod session;
pub mod token;
