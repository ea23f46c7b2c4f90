//! Request middleware.
//!
//! - [`session::require_admin`] -- gates the admin routes behind the session cookie.

pub mod session;
