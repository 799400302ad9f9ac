// [libs/domain/search-fabric/src/consumer.rs]
/*!
 * =================================================================
 * APARATO: BATCH CONSUMER WORKER (V7.4 - VETA MADRE)
 * CLASIFICACIÓN: DOMAIN FABRIC (ESTRATO L2)
 * RESPONSABILIDAD: TUBERÍA DE VERIFICACIÓN POR LLAVE Y EMISIÓN DE HALLAZGOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DRAIN-FIRST LOOP: El trabajador drena la cola por completo antes
 *    de evaluar la parada; el apagado normal jamás abandona lotes.
 * 2. SAFE LOG FIRST: Ante cualquier colisión, el registro crudo se
 *    emite antes del formateo falible del detalle.
 * 3. PRIVATE SCRATCH: El buffer de sonda de 20 bytes pertenece al
 *    trabajador durante toda su vida; cero aliasing entre hilos.
 * 4. FAULT ISOLATION: Una sonda o auto-verificación colapsada registra
 *    el fallo y salta la llave; el trabajador sobrevive.
 * =================================================================
 */

use crate::batch_queue::{BatchQueue, KeyBatch};
use crate::hit_sink::HitSink;
use crate::telemetry::SearchTelemetry;
use crate::vanity::VanityMatcher;
use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};
use veta_core_census::membership::AddressCensus;
use veta_core_keys::address::{format_key_details, hash160_to_address};
use veta_core_keys::candidate::CandidateKeyMaterial;
use veta_core_keys::wif::Network;

/// Ajustes de operación del estrato consumidor.
#[derive(Debug, Clone, Copy)]
pub struct ConsumerSettings {
    /// Siesta tras una ronda con la cola vacía.
    pub delay_empty_consumer: Duration,
    /// Re-deriva cada llave vía la librería de referencia y compara byte a byte.
    pub runtime_public_key_calculation_check: bool,
    /// Red de destino para WIF y direcciones del rastro.
    pub network: Network,
}

/// Sello de finalización de un trabajador consumidor.
#[derive(Debug, Clone, Copy)]
pub struct ConsumerCompletion {
    /// Identificador del trabajador dentro del pool.
    pub worker_identifier: usize,
    /// Lotes auditados durante la vida del trabajador.
    pub audited_batches: u64,
}

/// Trabajador consumidor: drena lotes y ejecuta la tubería por llave.
pub struct BatchConsumer {
    worker_identifier: usize,
    batch_queue: BatchQueue,
    address_census: Arc<dyn AddressCensus>,
    telemetry: Arc<SearchTelemetry>,
    hit_sink: Arc<dyn HitSink>,
    vanity_matcher: Option<Arc<VanityMatcher>>,
    settings: ConsumerSettings,
    stop_signal: Arc<AtomicBool>,
    completion_sender: Sender<ConsumerCompletion>,
    /// Buffer de sonda reutilizable, privado del trabajador de por vida.
    probe_scratch_buffer: [u8; 20],
}

impl BatchConsumer {
    /// Ensambla un trabajador listo para encarnarse en su hilo.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        worker_identifier: usize,
        batch_queue: BatchQueue,
        address_census: Arc<dyn AddressCensus>,
        telemetry: Arc<SearchTelemetry>,
        hit_sink: Arc<dyn HitSink>,
        vanity_matcher: Option<Arc<VanityMatcher>>,
        settings: ConsumerSettings,
        stop_signal: Arc<AtomicBool>,
        completion_sender: Sender<ConsumerCompletion>,
    ) -> Self {
        Self {
            worker_identifier,
            batch_queue,
            address_census,
            telemetry,
            hit_sink,
            vanity_matcher,
            settings,
            stop_signal,
            completion_sender,
            probe_scratch_buffer: [0u8; 20],
        }
    }

    /**
     * Bucle principal del trabajador.
     *
     * 1. Drena la cola: audita lotes hasta que `poll` retorne vacío.
     * 2. Incrementa las rondas vacías.
     * 3. Evalúa la parada; si sigue operativo, duerme la siesta y repite.
     */
    #[instrument(skip_all, fields(worker = self.worker_identifier))]
    pub fn run(mut self) {
        let mut audited_batches: u64 = 0;

        loop {
            while let Some(pending_batch) = self.batch_queue.poll() {
                self.audit_batch(&pending_batch);
                audited_batches += 1;
            }

            self.telemetry.empty_consumer_rounds.fetch_add(1, Ordering::Relaxed);

            if self.stop_signal.load(Ordering::Relaxed) {
                break;
            }
            std::thread::sleep(self.settings.delay_empty_consumer);
        }

        info!(
            "🏁 [CONSUMER]: Worker {} sealed after {} batches.",
            self.worker_identifier, audited_batches
        );
        let _ = self.completion_sender.send(ConsumerCompletion {
            worker_identifier: self.worker_identifier,
            audited_batches,
        });
    }

    /// Audita un lote completo en orden de rejilla.
    fn audit_batch(&mut self, batch: &KeyBatch) {
        for candidate in batch.entries() {
            self.audit_candidate(candidate);
        }
    }

    /**
     * Tubería de verificación de una llave candidata.
     *
     * Orden sellado: salto de inválidas, sonda no-comprimida, sonda
     * comprimida, auto-verificación opcional, gestión de colisiones,
     * cotejo vanity y rastro de fallo de cotejo.
     */
    fn audit_candidate(&mut self, candidate: &CandidateKeyMaterial) {
        if candidate.invalid {
            return;
        }

        let hit_on_uncompressed = match self.timed_membership_probe(&candidate.hash160_uncompressed) {
            Ok(verdict) => verdict,
            Err(probe_fault) => {
                error!(
                    "❌ [PROBE_FAULT]: Worker {} skipping key {}: {}",
                    self.worker_identifier,
                    hex::encode(candidate.secret),
                    probe_fault
                );
                return;
            }
        };

        let hit_on_compressed = match self.timed_membership_probe(&candidate.hash160_compressed) {
            Ok(verdict) => verdict,
            Err(probe_fault) => {
                error!(
                    "❌ [PROBE_FAULT]: Worker {} skipping key {}: {}",
                    self.worker_identifier,
                    hex::encode(candidate.secret),
                    probe_fault
                );
                return;
            }
        };

        if self.settings.runtime_public_key_calculation_check {
            self.run_reference_self_check(candidate);
        }

        // Gestión de colisiones: registro seguro SIEMPRE antes del detalle.
        if hit_on_uncompressed {
            self.hit_sink.safe_log(candidate);
            self.telemetry.hits.fetch_add(1, Ordering::Relaxed);
            self.hit_sink.address_hit(&format_key_details(candidate, false, self.settings.network));
        }
        if hit_on_compressed {
            self.hit_sink.safe_log(candidate);
            self.telemetry.hits.fetch_add(1, Ordering::Relaxed);
            self.hit_sink.address_hit(&format_key_details(candidate, true, self.settings.network));
        }

        // Cotejo vanity: independiente de la colisión contra el censo.
        if let Some(vanity_matcher) = self.vanity_matcher.as_deref() {
            for (use_compression, fingerprint) in [
                (false, &candidate.hash160_uncompressed),
                (true, &candidate.hash160_compressed),
            ] {
                let base58_address = hash160_to_address(fingerprint, self.settings.network);
                if vanity_matcher.matches_entire(&base58_address) {
                    self.hit_sink.safe_log(candidate);
                    self.telemetry.vanity_hits.fetch_add(1, Ordering::Relaxed);
                    self.hit_sink.vanity_hit(&format_key_details(candidate, use_compression, self.settings.network));
                }
            }
        }

        if !hit_on_uncompressed && !hit_on_compressed && self.hit_sink.wants_miss_records() {
            self.hit_sink.miss(&format_key_details(candidate, false, self.settings.network));
            self.hit_sink.miss(&format_key_details(candidate, true, self.settings.network));
        }
    }

    /**
     * Sonda de membresía cronometrada sobre el buffer privado.
     *
     * Acumula la latencia en nanosegundos e incrementa el contador de
     * llaves sondeadas, una vez por forma de serialización.
     */
    #[inline(always)]
    fn timed_membership_probe(
        &mut self,
        fingerprint: &[u8; 20],
    ) -> Result<bool, veta_core_census::errors::CensusError> {
        self.probe_scratch_buffer.copy_from_slice(fingerprint);

        let probe_timer = Instant::now();
        let membership_verdict = self.address_census.contains(&self.probe_scratch_buffer);
        self.telemetry
            .checked_keys_contains_nanos
            .fetch_add(probe_timer.elapsed().as_nanos() as u64, Ordering::Relaxed);
        self.telemetry.checked_keys.fetch_add(1, Ordering::Relaxed);

        membership_verdict
    }

    /**
     * Auto-verificación contra la librería de referencia.
     *
     * Re-deriva el punto desde el secreto y compara byte a byte ambas
     * serializaciones y ambas huellas. Un desajuste emite un registro
     * ERROR estructurado con todos los campos; jamás aborta la cacería.
     */
    fn run_reference_self_check(&self, candidate: &CandidateKeyMaterial) {
        match CandidateKeyMaterial::derive(candidate.secret) {
            Ok(reference) => {
                let mismatch = reference.uncompressed != candidate.uncompressed
                    || reference.compressed != candidate.compressed
                    || reference.hash160_uncompressed != candidate.hash160_uncompressed
                    || reference.hash160_compressed != candidate.hash160_compressed;

                if mismatch {
                    error!(
                        secret = %hex::encode(candidate.secret),
                        batch_uncompressed = %hex::encode(candidate.uncompressed),
                        batch_compressed = %hex::encode(candidate.compressed),
                        batch_hash160_uncompressed = %hex::encode(candidate.hash160_uncompressed),
                        batch_hash160_compressed = %hex::encode(candidate.hash160_compressed),
                        reference_uncompressed = %hex::encode(reference.uncompressed),
                        reference_compressed = %hex::encode(reference.compressed),
                        reference_hash160_uncompressed = %hex::encode(reference.hash160_uncompressed),
                        reference_hash160_compressed = %hex::encode(reference.hash160_compressed),
                        "❌ [SELF_CHECK_MISMATCH]: Batch material diverges from reference derivation."
                    );
                }
            }
            Err(rederivation_fault) => {
                error!(
                    "❌ [SELF_CHECK_FAULT]: Reference rederivation of {} collapsed: {}",
                    hex::encode(candidate.secret),
                    rederivation_fault
                );
            }
        }
    }
}
