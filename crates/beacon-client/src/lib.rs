//! Beacon Client - Content API access for the Beacon site.
//!
//! This crate provides:
//!
//! - [`client`] - the GraphQL-over-HTTP client with a per-query response
//!   cache and selectable freshness policy
//! - [`graphql`] - query documents and the wire envelope
//! - [`schema`] - raw response shapes, including the download-reference
//!   sum type
//! - [`content`] - per-content-type fetch functions and normalizers
//!
//! # Overview
//!
//! Pages talk to [`content`]'s fetch functions only. Those functions
//! never return errors: failures degrade into an empty [`ContentBatch`]
//! carrying a [`Diagnostic`], and detail lookups collapse to `None`
//! (a not-found outcome).
//!
//! [`ContentBatch`]: beacon_core::ContentBatch
//! [`Diagnostic`]: beacon_core::Diagnostic

pub mod client;
pub mod content;
pub mod graphql;
pub mod schema;

pub use client::{ContentClient, FetchPolicy, QueryReply};
pub use content::{
    fetch_news, fetch_news_detail, fetch_publication_detail, fetch_publications,
    fetch_resource_detail, fetch_resources, HOME_NEWS_LIMIT, HOME_PUBLICATIONS_LIMIT,
    LIST_PAGE_LIMIT,
};
