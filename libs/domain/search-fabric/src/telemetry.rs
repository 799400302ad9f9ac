// [libs/domain/search-fabric/src/telemetry.rs]
/*!
 * =================================================================
 * APARATO: SEARCH TELEMETRY ACCUMULATORS (V7.0 - VETA MADRE)
 * CLASIFICACIÓN: DOMAIN FABRIC (ESTRATO L2)
 * RESPONSABILIDAD: CONTADORES ATÓMICOS DE ESFUERZO COMPUTACIONAL
 *
 * # Mathematical Proof (Eventual Consistency):
 * Cada contador es un átomo independiente con incrementos monótonos
 * 'Relaxed'. El lector (StatsReporter) solo requiere consistencia
 * eventual: cualquier intercalado consistente con el happens-before
 * de cada átomo individual es un reporte válido.
 * =================================================================
 */

use std::sync::atomic::{AtomicU64, Ordering};

/// Acumuladores de proceso escritos por todos los hilos del tejido.
///
/// Monótonos, sin cerrojos; la única estructura compartida además de
/// la cola de lotes.
#[derive(Debug, Default)]
pub struct SearchTelemetry {
    /// Sondas de membresía ejecutadas (una por forma de serialización).
    pub checked_keys: AtomicU64,
    /// Nanosegundos acumulados dentro de la sonda `contains`.
    pub checked_keys_contains_nanos: AtomicU64,
    /// Rondas de consumidor que encontraron la cola vacía.
    pub empty_consumer_rounds: AtomicU64,
    /// Colisiones confirmadas contra el censo (una por forma que colisiona).
    pub hits: AtomicU64,
    /// Direcciones que satisficieron el patrón vanity.
    pub vanity_hits: AtomicU64,
}

impl SearchTelemetry {
    /// Inicializa los acumuladores en cero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toma una instantánea eventual-consistente de todos los contadores.
    #[must_use]
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            checked_keys: self.checked_keys.load(Ordering::Relaxed),
            checked_keys_contains_nanos: self.checked_keys_contains_nanos.load(Ordering::Relaxed),
            empty_consumer_rounds: self.empty_consumer_rounds.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            vanity_hits: self.vanity_hits.load(Ordering::Relaxed),
        }
    }
}

/// Instantánea inmutable de los acumuladores para un tick del reportero.
#[derive(Debug, Clone, Copy)]
pub struct TelemetrySnapshot {
    /// Sondas de membresía ejecutadas.
    pub checked_keys: u64,
    /// Nanosegundos acumulados en sondas.
    pub checked_keys_contains_nanos: u64,
    /// Rondas vacías del estrato consumidor.
    pub empty_consumer_rounds: u64,
    /// Colisiones contra el censo.
    pub hits: u64,
    /// Coincidencias del patrón vanity.
    pub vanity_hits: u64,
}

impl TelemetrySnapshot {
    /// Latencia media de la sonda `contains` en nanosegundos.
    #[must_use]
    pub fn average_contains_latency_nanos(&self) -> u64 {
        if self.checked_keys == 0 {
            return 0;
        }
        self.checked_keys_contains_nanos / self.checked_keys
    }
}
