//! Connector manifests + settings resolution.
//!
//! A connector manifest is the static descriptor of a connector: its id, its
//! display name, and the named settings that back its metadata categories in
//! the external settings store. This crate owns the manifest wire types, the
//! well-known category setting ids, and the async seam for resolving a
//! setting's runtime value.
//!
//! It intentionally contains **no** knowledge of how manifests are parsed or
//! how raw settings are stored; both live with the deployment's settings
//! backend, behind [`resolver::SettingsValueResolver`].

pub mod error;
pub mod manifest;
pub mod resolver;
