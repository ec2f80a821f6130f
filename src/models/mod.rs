//! Data models for the vManage API.
//!
//! This module contains the various data structures used in the vManage API.

// Export submodules
pub mod api_response;
pub mod auth;
pub mod device;
pub mod template;
