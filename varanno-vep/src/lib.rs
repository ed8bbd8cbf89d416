//! # varanno-vep
//!
//! Batch annotation of VCF records against the Ensembl Variant Effect Predictor.
//!
//! The pieces, from the wire up:
//!
//! - [client::VepClient]: blocking client for the VEP HGVS endpoints
//! - [service::EnrichmentService]: the seam between the annotator and whatever
//!   answers its requests; the client implements it, and so does any closure
//! - [realign]: matching results back to the request by the notation they echo
//! - [assembler::annotation_factory]: one [varanno_core::Annotation] per record
//! - [batch::BatchAnnotator]: lazy, order-preserving batching over a record stream
//! - [config::AnnotatorConfig]: run settings from TOML, flags and environment
pub mod assembler;
pub mod batch;
pub mod client;
pub mod config;
pub mod consts;
pub mod realign;
pub mod result;
pub mod service;
pub mod utils;

pub use assembler::annotation_factory;
pub use batch::{BatchAnnotator, BatchStats};
pub use client::{VepClient, VepClientBuilder};
pub use config::AnnotatorConfig;
pub use result::EnrichmentResult;
pub use service::EnrichmentService;
