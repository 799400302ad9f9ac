// [libs/core/census/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CENSUS MASTER HUB (V5.0 - VETA MADRE)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: ORQUESTACIÓN DE LA SONDA DE MEMBRESÍA HASH160
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NARROW PROBE: Toda la superficie de consulta del censo se reduce
 *    al contrato 'contains(&[u8; 20])' del trait AddressCensus.
 * 2. DUAL BACKEND: Matriz de Bloom persistente para censos masivos,
 *    conjunto exacto en memoria para cacerías sembradas y Proving Grounds.
 * 3. CONCURRENT READS: Ambos backends son de solo-lectura tras la
 *    hidratación y seguros para consulta simultánea de N consumidores.
 * =================================================================
 */

/// Catálogo de fallos del censo (I/O, serialización, artefactos vacíos).
pub mod errors;
/// Matriz de Bloom persistente con hidratación mmap y fallback buffered.
pub mod filter;
/// Contrato de sonda de membresía y backend exacto en memoria.
pub mod membership;

pub use errors::CensusError;
pub use filter::CensusFilter;
pub use membership::{AddressCensus, InMemoryCensus};
