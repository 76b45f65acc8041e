//! # IO Module
//!
//! Adapter layer between the browser and the domain services. Translates
//! HTTP requests into domain calls and domain errors into status codes.

pub mod rest;
