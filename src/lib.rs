//! Invoice seeding and credit-to-transfer settlement service.
//!
//! Layers follow the usual split: `domain` holds entities, value objects and
//! ports; `application` orchestrates them; `infrastructure` implements the
//! ports; `adapters` exposes the HTTP surface.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
