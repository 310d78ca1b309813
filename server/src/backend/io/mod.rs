//! # IO Layer
//!
//! HTTP surface of the relay server. Everything lives under [`rest`].

pub mod rest;
