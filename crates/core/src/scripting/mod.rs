//! Script staging and execution.
//!
//! [`staging`] turns submitted code into a scoped file on disk, the
//! [`python`] executor runs it through [`subprocess`], and [`result`] holds
//! the classified outcome handed back to callers.

pub mod executor;
pub mod python;
pub mod result;
pub mod staging;
pub mod subprocess;
