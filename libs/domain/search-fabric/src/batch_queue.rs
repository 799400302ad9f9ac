// [libs/domain/search-fabric/src/batch_queue.rs]
/*!
 * =================================================================
 * APARATO: BOUNDED BATCH QUEUE (V7.2 - VETA MADRE)
 * CLASIFICACIÓN: DOMAIN FABRIC (ESTRATO L2)
 * RESPONSABILIDAD: FIFO ACOTADO MULTI-PRODUCTOR / MULTI-CONSUMIDOR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SINGLE SYNC POINT: Es la única estructura mutable compartida del
 *    Hot-Path; la propiedad de cada lote se transfiere atómicamente.
 * 2. INTERRUPTIBLE BACKPRESSURE: Una oferta bloqueada re-evalúa la
 *    señal de parada en ventanas cortas; ningún productor queda
 *    atascado tras el apagado.
 * 3. SOFT SATURATION ALERT: Un intento de oferta sobre cola llena
 *    emite una advertencia de capacidad (el operador debe subir Q).
 * =================================================================
 */

use crate::errors::FabricError;
use crossbeam_channel::{bounded, Receiver, Sender, SendTimeoutError, TrySendError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::warn;
use veta_core_keys::candidate::CandidateKeyMaterial;

/// Ventana de reintento de una oferta bloqueada entre lecturas de la señal de parada.
const OFFER_RETRY_WINDOW: Duration = Duration::from_millis(50);

/// Secuencia ordenada e inmutable de candidatos producida como unidad de trabajo.
///
/// Un lote pertenece a exactamente un componente a la vez:
/// productor → cola → un consumidor.
#[derive(Debug)]
pub struct KeyBatch {
    entries: Vec<CandidateKeyMaterial>,
}

impl KeyBatch {
    /// Sella un lote a partir de los candidatos expandidos de una rejilla.
    #[must_use]
    pub fn new(entries: Vec<CandidateKeyMaterial>) -> Self {
        Self { entries }
    }

    /// Vista ordenada de los candidatos del lote.
    #[must_use]
    pub fn entries(&self) -> &[CandidateKeyMaterial] {
        &self.entries
    }

    /// Cantidad de candidatos del lote (2^g para una rejilla de g bits).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Evalúa si el lote está vacío.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// FIFO acotado de lotes entre el estrato productor y el consumidor.
///
/// FIFO por productor; sin orden global entre productores distintos.
#[derive(Debug, Clone)]
pub struct BatchQueue {
    batch_sender: Sender<KeyBatch>,
    batch_receiver: Receiver<KeyBatch>,
    nominal_capacity: usize,
}

impl BatchQueue {
    /// Construye la cola con capacidad acotada `Q`.
    #[must_use]
    pub fn with_capacity(nominal_capacity: usize) -> Self {
        let bounded_capacity = nominal_capacity.max(1);
        let (batch_sender, batch_receiver) = bounded(bounded_capacity);
        Self {
            batch_sender,
            batch_receiver,
            nominal_capacity: bounded_capacity,
        }
    }

    /**
     * Ofrece un lote, bloqueando hasta que haya espacio o suba la parada.
     *
     * # Returns:
     * - `Ok(true)`: el lote fue encolado.
     * - `Ok(false)`: la parada subió durante la espera; el lote se descarta.
     *
     * # Errors:
     * `FabricError::QueueDisconnected` si el estrato consumidor desapareció;
     * es fatal para el productor.
     */
    pub fn offer(&self, batch: KeyBatch, stop_signal: &AtomicBool) -> Result<bool, FabricError> {
        let mut pending_batch = match self.batch_sender.try_send(batch) {
            Ok(()) => return Ok(true),
            Err(TrySendError::Full(returned_batch)) => {
                warn!(
                    "⚠️ [QUEUE_SATURATED]: Capacity {} exhausted on offer. Raise the queue size to absorb producer bursts.",
                    self.nominal_capacity
                );
                returned_batch
            }
            Err(TrySendError::Disconnected(_)) => return Err(FabricError::QueueDisconnected),
        };

        loop {
            if stop_signal.load(Ordering::Relaxed) {
                return Ok(false);
            }
            match self.batch_sender.send_timeout(pending_batch, OFFER_RETRY_WINDOW) {
                Ok(()) => return Ok(true),
                Err(SendTimeoutError::Timeout(returned_batch)) => pending_batch = returned_batch,
                Err(SendTimeoutError::Disconnected(_)) => return Err(FabricError::QueueDisconnected),
            }
        }
    }

    /// Extrae un lote sin bloquear; `None` significa "vacía ahora".
    #[must_use]
    pub fn poll(&self) -> Option<KeyBatch> {
        self.batch_receiver.try_recv().ok()
    }

    /// Profundidad instantánea de la cola (para el reportero y el drenado).
    #[must_use]
    pub fn len(&self) -> usize {
        self.batch_receiver.len()
    }

    /// Evalúa si la cola está vacía.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batch_receiver.is_empty()
    }
}
