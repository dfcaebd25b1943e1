//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate keyed-store persistence into the domain operation set.
//! - Keep the presentation layer decoupled from storage details.

pub mod case_service;
pub mod seed;
