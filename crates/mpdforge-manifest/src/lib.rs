//! mpdforge-manifest: typed attribute decoding and representation descriptors.
//!
//! This crate sits between a DASH manifest walker and the playlist builder.
//!
//! # Modules
//!
//! - [`attributes`] - Per-name decoding of raw attribute strings
//! - [`time`] - ISO-8601 duration and date-time decoding
//! - [`representation`] - Representation descriptors, segments and media kind
//!   classification

pub mod attributes;
pub mod error;
pub mod representation;
pub mod time;

pub use attributes::{
    decode, parse_attributes, parse_int, AttributeList, AttributeName, AttributeValue,
    Attributes, Element, Numeric,
};
pub use error::{Error, Result};
pub use representation::{
    load_representations, MediaKind, Representation, RepresentationAttributes, Role, Segment,
};
