//! chainapi Core Library
//!
//! This library turns per-chain Swagger v2 documents into a single TypeScript
//! catalogue of REST operations indexed by chain, and provides a small client
//! for calling the RPC and REST nodes of the supported chains.

pub mod catalogue;
pub mod chains;
pub mod client;
pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod generate;
pub mod options;
pub mod params;
pub mod rpc;
pub mod swagger;
pub mod translate;
pub mod utils;

pub use crate::{
    catalogue::{Catalogue, HttpMethod, OperationRecord},
    chains::ChainInfo,
    client::{ChainClient, Pagination},
    config::Config,
    emit::{CatalogueEmitter, emit},
    error::{Error, Result},
    extract::extract_operations,
    generate::{generate, generate_catalogue},
    options::{BodyParamPolicy, GenerateOptions, RefPolicy},
    rpc::RpcMethod,
    swagger::SourceDocument,
    translate::Translator,
};
