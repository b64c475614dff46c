//! Vehicle maintenance scheduling service
//!
//! Historial de mantenimientos, predicción del próximo servicio y
//! normalización de sugerencias del servicio generativo.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
