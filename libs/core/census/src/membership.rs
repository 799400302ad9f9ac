// [libs/core/census/src/membership.rs]
/*!
 * =================================================================
 * APARATO: MEMBERSHIP PROBE CONTRACT (V5.0 - VETA MADRE)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: CONTRATO DE SONDA Y BACKEND EXACTO EN MEMORIA
 * =================================================================
 */

use crate::errors::CensusError;
use std::collections::HashSet;

/**
 * Contrato estrecho de consulta del censo de direcciones.
 *
 * Es la única superficie que el Hot-Loop de los consumidores conoce:
 * una sonda O(1) sobre la huella HASH160 de 20 bytes.
 *
 * # Concurrency:
 * Toda implementación debe ser de solo-lectura tras su construcción y
 * segura para consulta simultánea desde todos los hilos consumidores.
 */
pub trait AddressCensus: Send + Sync {
    /**
     * Consulta la existencia de una huella en el censo.
     *
     * # Returns:
     * - `Ok(true)` ante una colisión (probable, si el backend es probabilístico).
     * - `Ok(false)` ante la ausencia del rastro.
     *
     * # Errors:
     * `CensusError::ProbeFailure` si el backend colapsa; el consumidor
     * registra el fallo y salta la llave afectada.
     */
    fn contains(&self, hash160_payload: &[u8; 20]) -> Result<bool, CensusError>;
}

/// Censo exacto en memoria para cacerías sembradas a mano y Proving Grounds.
///
/// A diferencia de la matriz de Bloom, no admite falsos positivos.
#[derive(Debug, Default)]
pub struct InMemoryCensus {
    indexed_identities: HashSet<[u8; 20]>,
}

impl InMemoryCensus {
    /// Inicializa un censo vacío.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra una huella HASH160 en el censo.
    pub fn register(&mut self, fingerprint: [u8; 20]) {
        self.indexed_identities.insert(fingerprint);
    }

    /// Retorna el volumen de identidades registradas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indexed_identities.len()
    }

    /// Evalúa si el censo está vacío.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indexed_identities.is_empty()
    }
}

impl AddressCensus for InMemoryCensus {
    #[inline(always)]
    fn contains(&self, hash160_payload: &[u8; 20]) -> Result<bool, CensusError> {
        Ok(self.indexed_identities.contains(hash160_payload))
    }
}

impl FromIterator<[u8; 20]> for InMemoryCensus {
    fn from_iter<I: IntoIterator<Item = [u8; 20]>>(identities: I) -> Self {
        Self {
            indexed_identities: identities.into_iter().collect(),
        }
    }
}
