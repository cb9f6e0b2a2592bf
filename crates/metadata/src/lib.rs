//! Connector metadata categories: items, site resolution, type-map rewriting.
//!
//! A connector ships up to five categories of metadata: config, schemas,
//! charting schemes, type maps, and transforms. All but the config and the
//! transforms are site-tagged collections: a reporting site may override the
//! category, and an untagged item acts as the wildcard fallback for every
//! other site.
//!
//! This crate owns the category wire types, the uniform site-resolution
//! policy ([`site::find_for_site`]), the type-map rewriting that derives a
//! site-specific config at read time ([`config::mapped_config`]), and the
//! async store seams the runtime loads each category through.

pub mod charting;
pub mod config;
pub mod error;
pub mod schema;
pub mod site;
pub mod stores;
pub mod transform;
pub mod typemap;
