// [libs/domain/search-fabric/src/fabric.rs]
/*!
 * =================================================================
 * APARATO: SEARCH FABRIC ORCHESTRATOR (V7.5 - VETA MADRE)
 * CLASIFICACIÓN: DOMAIN FABRIC (ESTRATO L2)
 * RESPONSABILIDAD: IGNICIÓN, DRENADO Y APAGADO COOPERATIVO DEL TEJIDO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. IGNITION ORDER: Consumidores primero, productores después,
 *    reportero al final; ningún lote nace sin destino posible.
 * 2. EXPLICIT COMPLETION: La finalización de cada hilo se sella por
 *    canal crossbeam; cero grafos de callbacks mutables.
 * 3. BOUNDED DRAIN: El apagado espera el drenado hasta
 *    'await_queue_empty'; al vencer, los lotes restantes se descartan
 *    y el evento queda en el rastro a nivel WARN.
 * =================================================================
 */

use crate::batch_queue::BatchQueue;
use crate::consumer::{BatchConsumer, ConsumerCompletion, ConsumerSettings};
use crate::errors::FabricError;
use crate::hit_sink::HitSink;
use crate::producer::{GridKernel, GridParameters, GridProducer, ProducerCompletion};
use crate::secret_source::SecretSource;
use crate::stats::StatsReporter;
use crate::telemetry::{SearchTelemetry, TelemetrySnapshot};
use crate::vanity::VanityMatcher;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};
use veta_core_census::membership::AddressCensus;

/// Ajustes globales del tejido de búsqueda.
#[derive(Debug, Clone, Copy)]
pub struct FabricSettings {
    /// Cantidad T de trabajadores consumidores.
    pub consumer_thread_count: usize,
    /// Capacidad Q de la cola de lotes.
    pub queue_capacity: usize,
    /// Siesta del consumidor tras una ronda vacía.
    pub delay_empty_consumer: Duration,
    /// Cota superior de espera de drenado durante el apagado.
    pub await_queue_empty: Duration,
    /// Período del reportero de estadísticas; `None` lo deshabilita.
    pub statistics_period: Option<Duration>,
    /// Auto-verificación de derivación en el consumidor.
    pub runtime_public_key_calculation_check: bool,
    /// Red de destino para WIF y direcciones del rastro.
    pub network: veta_core_keys::wif::Network,
}

/// Plano de construcción del tejido: colaboradores y parámetros sellados.
pub struct FabricBlueprint {
    /// Ajustes globales del tejido.
    pub settings: FabricSettings,
    /// Parámetros de rejilla compartidos por todos los productores.
    pub grid_parameters: GridParameters,
    /// Una fuente privada por productor (P = cantidad de fuentes).
    pub secret_sources: Vec<Box<dyn SecretSource>>,
    /// Kernel de expansión compartido por el pool productor.
    pub expansion_kernel: Arc<dyn GridKernel>,
    /// Censo de direcciones de solo-lectura.
    pub address_census: Arc<dyn AddressCensus>,
    /// Sumidero de registros de hallazgo.
    pub hit_sink: Arc<dyn HitSink>,
    /// Cotejador vanity compilado; `None` deshabilita el cotejo.
    pub vanity_matcher: Option<Arc<VanityMatcher>>,
    /// Token de parada compartido con el mundo exterior (ctrl-c).
    pub stop_signal: Arc<AtomicBool>,
}

impl FabricBlueprint {
    /**
     * Enciende el tejido completo y retorna su manija de ciclo de vida.
     *
     * Orden de ignición sellado: consumidores, productores, reportero.
     *
     * # Errors:
     * `FabricError::ThreadSpawn` si el sistema operativo deniega la
     * encarnación de algún hilo.
     */
    #[instrument(skip_all, fields(consumers = self.settings.consumer_thread_count, producers = self.secret_sources.len()))]
    pub fn ignite(self) -> Result<FabricHandle, FabricError> {
        let telemetry = Arc::new(SearchTelemetry::new());
        let batch_queue = BatchQueue::with_capacity(self.settings.queue_capacity);
        let kernel_identifier = self.expansion_kernel.nominal_identifier();

        let (producer_completion_sender, producer_completion_receiver) = unbounded::<ProducerCompletion>();
        let (consumer_completion_sender, consumer_completion_receiver) = unbounded::<ConsumerCompletion>();

        let consumer_settings = ConsumerSettings {
            delay_empty_consumer: self.settings.delay_empty_consumer,
            runtime_public_key_calculation_check: self.settings.runtime_public_key_calculation_check,
            network: self.settings.network,
        };

        // 1. ESTRATO CONSUMIDOR (el destino nace antes que el trabajo)
        let mut consumer_join_handles = Vec::with_capacity(self.settings.consumer_thread_count);
        for worker_identifier in 0..self.settings.consumer_thread_count {
            let worker = BatchConsumer::new(
                worker_identifier,
                batch_queue.clone(),
                Arc::clone(&self.address_census),
                Arc::clone(&telemetry),
                Arc::clone(&self.hit_sink),
                self.vanity_matcher.clone(),
                consumer_settings,
                Arc::clone(&self.stop_signal),
                consumer_completion_sender.clone(),
            );
            let join_handle = std::thread::Builder::new()
                .name(format!("veta-consumer-{worker_identifier}"))
                .spawn(move || worker.run())
                .map_err(FabricError::ThreadSpawn)?;
            consumer_join_handles.push(join_handle);
        }
        drop(consumer_completion_sender);

        // 2. ESTRATO PRODUCTOR (una fuente privada por unidad)
        let producer_count = self.secret_sources.len();
        let mut producer_join_handles = Vec::with_capacity(producer_count);
        for (producer_identifier, secret_source) in self.secret_sources.into_iter().enumerate() {
            let producer = GridProducer::new(
                producer_identifier,
                secret_source,
                self.grid_parameters,
                Arc::clone(&self.expansion_kernel),
                batch_queue.clone(),
                Arc::clone(&self.stop_signal),
                producer_completion_sender.clone(),
            );
            let join_handle = std::thread::Builder::new()
                .name(format!("veta-producer-{producer_identifier}"))
                .spawn(move || producer.run())
                .map_err(FabricError::ThreadSpawn)?;
            producer_join_handles.push(join_handle);
        }
        drop(producer_completion_sender);

        // 3. ESTRATO DE OBSERVACIÓN (reportero opcional)
        let stats_join_handle = match self.settings.statistics_period {
            Some(report_period) => {
                let reporter = StatsReporter::new(
                    Arc::clone(&telemetry),
                    batch_queue.clone(),
                    report_period,
                    Arc::clone(&self.stop_signal),
                );
                Some(
                    std::thread::Builder::new()
                        .name("veta-stats".to_string())
                        .spawn(move || reporter.run())
                        .map_err(FabricError::ThreadSpawn)?,
                )
            }
            None => None,
        };

        info!(
            "🚀 [FABRIC]: Ignition complete. {} consumers, {} producers, kernel [{}].",
            self.settings.consumer_thread_count,
            producer_count,
            kernel_identifier
        );

        Ok(FabricHandle {
            stop_signal: self.stop_signal,
            telemetry,
            batch_queue,
            producer_join_handles,
            consumer_join_handles,
            stats_join_handle,
            producer_completion_receiver,
            consumer_completion_receiver,
            consumer_thread_count: self.settings.consumer_thread_count,
            await_queue_empty: self.settings.await_queue_empty,
        })
    }
}

/// Veredicto final del apagado del tejido.
#[derive(Debug, Clone, Copy)]
pub struct FabricReport {
    /// El pool consumidor terminó dentro de la ventana de drenado.
    pub drained_cleanly: bool,
    /// Lotes descartados al vencer la ventana de drenado.
    pub dropped_batches: usize,
    /// Instantánea final de la telemetría.
    pub telemetry: TelemetrySnapshot,
}

/// Manija de ciclo de vida del tejido encendido.
pub struct FabricHandle {
    stop_signal: Arc<AtomicBool>,
    telemetry: Arc<SearchTelemetry>,
    batch_queue: BatchQueue,
    producer_join_handles: Vec<JoinHandle<()>>,
    consumer_join_handles: Vec<JoinHandle<()>>,
    stats_join_handle: Option<JoinHandle<()>>,
    producer_completion_receiver: Receiver<ProducerCompletion>,
    consumer_completion_receiver: Receiver<ConsumerCompletion>,
    consumer_thread_count: usize,
    await_queue_empty: Duration,
}

impl FabricHandle {
    /// Eleva el token de parada sin esperar el apagado.
    pub fn request_stop(&self) {
        self.stop_signal.store(true, Ordering::SeqCst);
    }

    /// Instantánea eventual-consistente de la telemetría en caliente.
    #[must_use]
    pub fn telemetry_snapshot(&self) -> TelemetrySnapshot {
        self.telemetry.snapshot()
    }

    /// Profundidad instantánea de la cola de lotes.
    #[must_use]
    pub fn queue_depth(&self) -> usize {
        self.batch_queue.len()
    }

    /**
     * Bloquea hasta que todos los productores sellen su finalización.
     *
     * Es la espera natural de las cacerías `run_once` o con fuentes
     * finitas: cuando retorna, todo el trabajo emitido está en la cola
     * o ya auditado.
     */
    pub fn await_producers(&self) {
        while self.producer_completion_receiver.recv().is_ok() {}
    }

    /**
     * Apagado cooperativo completo del tejido.
     *
     * 1. Eleva el token de parada.
     * 2. Une el pool productor (el lote en vuelo termina; las ofertas
     *    bloqueadas retornan).
     * 3. Espera la finalización del pool consumidor hasta
     *    `await_queue_empty`; al vencer, descarta lo no procesado.
     * 4. Sella el reportero de estadísticas.
     */
    #[instrument(skip_all)]
    pub fn shutdown(mut self) -> FabricReport {
        self.stop_signal.store(true, Ordering::SeqCst);

        // 2. PRODUCTORES: retorno pronto garantizado por la oferta interrumpible.
        for producer_handle in self.producer_join_handles.drain(..) {
            let _ = producer_handle.join();
        }

        // 3. CONSUMIDORES: drenado acotado por la ventana de apagado.
        let drain_deadline = Instant::now() + self.await_queue_empty;
        let mut completed_consumers = 0usize;
        while completed_consumers < self.consumer_thread_count {
            let remaining_window = drain_deadline.saturating_duration_since(Instant::now());
            if remaining_window.is_zero() {
                break;
            }
            match self.consumer_completion_receiver.recv_timeout(remaining_window) {
                Ok(_) => completed_consumers += 1,
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        let drained_cleanly = completed_consumers == self.consumer_thread_count;
        let dropped_batches = self.batch_queue.len();

        if drained_cleanly {
            for consumer_handle in self.consumer_join_handles.drain(..) {
                let _ = consumer_handle.join();
            }
        } else {
            // Los trabajadores atascados quedan huérfanos a propósito: unir
            // aquí bloquearía el apagado más allá de la ventana pactada.
            warn!(
                "⚠️ [SHUTDOWN_TIMEOUT]: Consumer pool did not terminate within {:?}. Dropping {} unprocessed batches.",
                self.await_queue_empty, dropped_batches
            );
            self.consumer_join_handles.clear();
        }

        // 4. REPORTERO: observa la parada y se sella solo.
        if let Some(stats_handle) = self.stats_join_handle.take() {
            let _ = stats_handle.join();
        }

        let final_snapshot = self.telemetry.snapshot();
        info!(
            "🏁 [FABRIC]: Shutdown sealed. Drained cleanly: {}. Hits: {}.",
            drained_cleanly, final_snapshot.hits
        );

        FabricReport {
            drained_cleanly,
            dropped_batches,
            telemetry: final_snapshot,
        }
    }
}
