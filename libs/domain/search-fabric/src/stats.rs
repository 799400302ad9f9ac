// [libs/domain/search-fabric/src/stats.rs]
/*!
 * =================================================================
 * APARATO: THROUGHPUT STATS REPORTER (V7.1 - VETA MADRE)
 * CLASIFICACIÓN: DOMAIN FABRIC (ESTRATO L2)
 * RESPONSABILIDAD: REPORTE PERIÓDICO DE CAUDAL, LATENCIA Y HALLAZGOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NON-BLOCKING OBSERVER: Solo lee átomos y la profundidad de la
 *    cola; jamás bloquea un trabajador del Hot-Path.
 * 2. SLICED SLEEP: La siesta entre ticks se trocea para observar la
 *    señal de parada con latencia acotada.
 * =================================================================
 */

use crate::batch_queue::BatchQueue;
use crate::telemetry::SearchTelemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, instrument};

/// Granularidad de observación de la parada dentro de la siesta del tick.
const STOP_OBSERVATION_SLICE: Duration = Duration::from_millis(250);

/// Reportero periódico de telemetría del tejido.
pub struct StatsReporter {
    telemetry: Arc<SearchTelemetry>,
    batch_queue: BatchQueue,
    report_period: Duration,
    stop_signal: Arc<AtomicBool>,
}

impl StatsReporter {
    /// Ensambla el reportero con su período de emisión (> 0).
    #[must_use]
    pub fn new(
        telemetry: Arc<SearchTelemetry>,
        batch_queue: BatchQueue,
        report_period: Duration,
        stop_signal: Arc<AtomicBool>,
    ) -> Self {
        Self {
            telemetry,
            batch_queue,
            report_period,
            stop_signal,
        }
    }

    /**
     * Bucle del reportero: duerme el período (troceado) y emite un tick.
     *
     * La parada corta la siesta en curso; el reportero emite un tick
     * final de despedida antes de sellarse.
     */
    #[instrument(skip_all)]
    pub fn run(self) {
        let ignition_timestamp = Instant::now();

        'reporting: loop {
            let mut slept_so_far = Duration::ZERO;
            while slept_so_far < self.report_period {
                if self.stop_signal.load(Ordering::Relaxed) {
                    break 'reporting;
                }
                let nap = STOP_OBSERVATION_SLICE.min(self.report_period - slept_so_far);
                std::thread::sleep(nap);
                slept_so_far += nap;
            }
            self.emit_tick(ignition_timestamp.elapsed());
        }

        // Tick final: deja el último estado sellado en el rastro.
        self.emit_tick(ignition_timestamp.elapsed());
        info!("🏁 [STATS]: Reporter sealed.");
    }

    /// Emite una línea de resumen con la instantánea eventual-consistente.
    fn emit_tick(&self, uptime: Duration) {
        let snapshot = self.telemetry.snapshot();
        let uptime_seconds = uptime.as_secs_f64().max(f64::MIN_POSITIVE);
        let keys_per_second = snapshot.checked_keys as f64 / uptime_seconds;

        info!(
            "📊 [STATS]: uptime {}s | {:.0} keys/s | avg contains {} ns | queue depth {} | empty rounds {} | hits {} | vanity hits {}",
            uptime.as_secs(),
            keys_per_second,
            snapshot.average_contains_latency_nanos(),
            self.batch_queue.len(),
            snapshot.empty_consumer_rounds,
            snapshot.hits,
            snapshot.vanity_hits
        );
    }
}
