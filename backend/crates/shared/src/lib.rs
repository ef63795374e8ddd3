//! Shared Kernel
//!
//! Vocabulary shared by every wallet bounded context:
//! - Unified error type and result alias
//! - Typed entity IDs
//! - Pagination primitives for list endpoints
//!
//! Only things whose meaning is identical across `auth` and `wallet`
//! belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod pagination;
