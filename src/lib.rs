//! # vmanage-client
//!
//! A Rust client library for the Cisco vManage (SD-WAN controller) REST API.
//!
//! This crate provides an async interface for talking to a vManage
//! controller: every call returns a normalized [`ApiResponse`], and a
//! template importer replicates exported device templates, with their
//! feature templates and policies, onto another controller.
//!
//! ## Features
//!
//! - 🔐 Session login with cookie-based authentication
//! - 📦 Uniform response normalization across envelope styles
//! - 🧩 Feature template, device template and policy management
//! - 🚚 Idempotent bulk template import with ID remapping
//!
//! ## Example
//!
//! ```rust,no_run
//! use vmanage_client::{TemplateImporter, TemplateSet, VManageClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a client; build() logs in
//!     let client = VManageClient::builder()
//!         .server("vmanage.example.com")
//!         .username("admin")
//!         .password_from_env("VMANAGE_PASSWORD")
//!         .verify_ssl(false)
//!         .build()
//!         .await?;
//!
//!     // List what the controller already has
//!     for template in client.templates().list_device_templates().await? {
//!         println!("{}", template.template_name);
//!     }
//!
//!     // Import an exported template set
//!     let set = TemplateSet::from_dir("./backup")?;
//!     let report = TemplateImporter::new(&client).import(&set).await?;
//!     println!("{} device templates created", report.created());
//!
//!     Ok(())
//! }
//! ```

mod api;
mod client;
pub mod constants;
mod error;
mod gateway;
mod models;
mod normalize;
mod provisioning;

pub use api::device::DeviceApi;
pub use api::settings::SettingsApi;
pub use api::template::TemplateApi;
pub use client::{VManageClient, VManageClientBuilder};
pub use error::{UrlParseError, VManageError, VManageResult};
pub use gateway::{standard_headers, Gateway, RequestOptions};
pub use models::api_response::{check_post_response, ApiResponse, RawResponse};
pub use models::auth::LoginRequest;
pub use models::device::{DeviceCategory, DeviceStatistic};
pub use models::template::{
    DeviceTemplate, FeatureTemplate, PolicySummary, PolicyTemplate, TemplateReference,
    TemplateSummary,
};
pub use normalize::{ResponseEnvelope, ResponseNormalizer};
pub use provisioning::{
    IdMapping, ImportOptions, ImportReport, TemplateImporter, TemplateOutcome, TemplateSet,
};
