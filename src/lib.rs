//! Core library exports for the course catalog and timetable service.
//!
//! The `data` feature exposes the persistence and domain layer on its own.
//! The `server` feature adds the scraper, services and HTTP routes used by
//! the web application.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod sugang;
