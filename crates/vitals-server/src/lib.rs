#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod extract;
pub mod handler;
pub mod service;

pub use crate::handler::{Error, ErrorKind, Result, routes};
pub use crate::service::{ServiceConfig, ServiceError, ServiceState};
