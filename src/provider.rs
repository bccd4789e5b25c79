//! Client-facing identity (data) and provider strategies (behavior).
//!
//! `identity` defines [`ClientIdentity`], the read-only capability set the engine pulls
//! request parameters from, and `config` ships [`ClientConfig`], a serde-friendly
//! implementation of it. `strategy` defines [`ProviderStrategy`], an HTTP-client-agnostic
//! hook used by flows to pick the authorization URI encoding and to augment outgoing token
//! requests.

pub mod config;
pub mod identity;
pub mod strategy;

pub use config::*;
pub use identity::*;
pub use strategy::*;
