//! ISCN Core Types and Definitions
//!
//! This crate provides the foundational types shared by the ISCN karyotype
//! parser and its consumers. It includes:
//!
//! - **Chromosomes**: Chromosome identifiers and sex chromosomes ([`chromosome`] module)
//! - **Semantic**: Structured karyotype summaries extracted from parse trees ([`semantic`] module)

pub mod chromosome;
pub mod semantic;
