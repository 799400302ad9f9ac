// [apps/hunter-worker/src/lib.rs]
/*!
 * =================================================================
 * APARATO: HUNTER SHELL LIBRARY (V4.0 - VETA MADRE)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L3)
 * RESPONSABILIDAD: EXPOSICIÓN DE DIRECTIVAS Y CONFIGURACIÓN VALIDADA
 * =================================================================
 */

/// Directivas de mando, validación y dominio de fallo de arranque.
pub mod config;

pub use config::{ConfigError, HunterConfig, HunterDirectives, SecretSourcePlan};
