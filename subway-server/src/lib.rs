//! Subway line manager.
//!
//! Keeps subway lines as sets of directed sections between stations and
//! maintains, through every insertion and removal, that each line runs as a
//! single path from one terminus to the other.

pub mod config;
pub mod domain;
pub mod repository;
pub mod service;
pub mod web;
