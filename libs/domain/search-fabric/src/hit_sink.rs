// [libs/domain/search-fabric/src/hit_sink.rs]
/*!
 * =================================================================
 * APARATO: HIT RECORD SINK (V7.1 - VETA MADRE)
 * CLASIFICACIÓN: DOMAIN FABRIC (ESTRATO L2)
 * RESPONSABILIDAD: EMISIÓN DE REGISTROS DE HALLAZGO CON FORMATO ESTABLE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SAFE LOG FIRST: El registro crudo (secreto + bytes derivados) se
 *    emite ANTES de cualquier formateo falible; si el formateo colapsa,
 *    el secreto ya quedó sellado en el rastro.
 * 2. STABLE LINE CONTRACT: Los prefijos de línea son constantes
 *    auditables externamente; jamás cambian entre versiones.
 * 3. SINK POLYMORPHISM: El Proving Grounds sustituye el sumidero de
 *    trazas por una grabadora en memoria sin tocar la tubería.
 * =================================================================
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{info, trace};
use veta_core_keys::candidate::CandidateKeyMaterial;

/// Prefijo estable de una línea de registro seguro (un campo por línea).
pub const SAFE_LOG_PREFIX: &str = "hit: safe log: ";
/// Prefijo estable de una colisión confirmada contra el censo.
pub const HIT_PREFIX: &str = "hit: Found the address: ";
/// Prefijo estable de un fallo de cotejo (solo a nivel TRACE).
pub const MISS_PREFIX: &str = "miss: Could not find the address: ";
/// Prefijo estable de una coincidencia del patrón vanity.
pub const VANITY_HIT_PREFIX: &str = "vanity pattern match: ";

/**
 * Sumidero de registros de hallazgo de la tubería de verificación.
 *
 * El contrato de orden lo impone el consumidor: ante cualquier colisión,
 * `safe_log` se invoca primero.
 */
pub trait HitSink: Send + Sync {
    /// Emite el registro seguro: secreto crudo y los cuatro campos derivados.
    fn safe_log(&self, candidate: &CandidateKeyMaterial);

    /// Emite la línea de colisión confirmada con el detalle de la llave.
    fn address_hit(&self, key_details: &str);

    /// Emite la línea de coincidencia vanity con el detalle de la llave.
    fn vanity_hit(&self, key_details: &str);

    /// Emite la línea de fallo de cotejo (rastro de depuración).
    fn miss(&self, key_details: &str);

    /// Evalúa si el sumidero desea recibir registros de fallo de cotejo.
    ///
    /// Permite al consumidor saltarse el formateo de detalles cuando el
    /// rastro TRACE está apagado.
    fn wants_miss_records(&self) -> bool {
        true
    }
}

/// Sumidero de producción: escribe el rastro estable vía `tracing`.
#[derive(Debug, Default)]
pub struct TracingHitSink;

impl TracingHitSink {
    /// Construye el sumidero de trazas.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HitSink for TracingHitSink {
    fn safe_log(&self, candidate: &CandidateKeyMaterial) {
        // Orden de campos fijo: secreto, no-comprimida, comprimida, huella
        // no-comprimida, huella comprimida.
        info!("{}secret: {}", SAFE_LOG_PREFIX, hex::encode(candidate.secret));
        info!("{}uncompressed: {}", SAFE_LOG_PREFIX, hex::encode(candidate.uncompressed));
        info!("{}compressed: {}", SAFE_LOG_PREFIX, hex::encode(candidate.compressed));
        info!("{}hash160 uncompressed: {}", SAFE_LOG_PREFIX, hex::encode(candidate.hash160_uncompressed));
        info!("{}hash160 compressed: {}", SAFE_LOG_PREFIX, hex::encode(candidate.hash160_compressed));
    }

    fn address_hit(&self, key_details: &str) {
        info!("{}{}", HIT_PREFIX, key_details);
    }

    fn vanity_hit(&self, key_details: &str) {
        info!("{}{}", VANITY_HIT_PREFIX, key_details);
    }

    fn miss(&self, key_details: &str) {
        trace!("{}{}", MISS_PREFIX, key_details);
    }

    fn wants_miss_records(&self) -> bool {
        tracing::enabled!(tracing::Level::TRACE)
    }
}

/// Evento capturado por la grabadora del Proving Grounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedHitEvent {
    /// Registro seguro (secreto en hexadecimal).
    SafeLog(String),
    /// Colisión confirmada (detalle completo).
    AddressHit(String),
    /// Coincidencia vanity (detalle completo).
    VanityHit(String),
    /// Fallo de cotejo (detalle completo).
    Miss(String),
}

/// Sumidero grabador en memoria para certificaciones extremo-a-extremo.
#[derive(Debug, Default)]
pub struct RecordingHitSink {
    recorded_events: Mutex<Vec<RecordedHitEvent>>,
    safe_log_count: AtomicU64,
    address_hit_count: AtomicU64,
    vanity_hit_count: AtomicU64,
    miss_count: AtomicU64,
}

impl RecordingHitSink {
    /// Construye una grabadora vacía.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copia del rastro capturado, en orden de emisión.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedHitEvent> {
        self.recorded_events.lock().expect("grabadora envenenada").clone()
    }

    /// Volumen de registros seguros capturados.
    #[must_use]
    pub fn safe_logs(&self) -> u64 {
        self.safe_log_count.load(Ordering::Relaxed)
    }

    /// Volumen de colisiones capturadas.
    #[must_use]
    pub fn address_hits(&self) -> u64 {
        self.address_hit_count.load(Ordering::Relaxed)
    }

    /// Volumen de coincidencias vanity capturadas.
    #[must_use]
    pub fn vanity_hits(&self) -> u64 {
        self.vanity_hit_count.load(Ordering::Relaxed)
    }

    /// Volumen de fallos de cotejo capturados.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.miss_count.load(Ordering::Relaxed)
    }

    fn record(&self, event: RecordedHitEvent) {
        self.recorded_events.lock().expect("grabadora envenenada").push(event);
    }
}

impl HitSink for RecordingHitSink {
    fn safe_log(&self, candidate: &CandidateKeyMaterial) {
        self.safe_log_count.fetch_add(1, Ordering::Relaxed);
        self.record(RecordedHitEvent::SafeLog(hex::encode(candidate.secret)));
    }

    fn address_hit(&self, key_details: &str) {
        self.address_hit_count.fetch_add(1, Ordering::Relaxed);
        self.record(RecordedHitEvent::AddressHit(key_details.to_string()));
    }

    fn vanity_hit(&self, key_details: &str) {
        self.vanity_hit_count.fetch_add(1, Ordering::Relaxed);
        self.record(RecordedHitEvent::VanityHit(key_details.to_string()));
    }

    fn miss(&self, key_details: &str) {
        self.miss_count.fetch_add(1, Ordering::Relaxed);
        self.record(RecordedHitEvent::Miss(key_details.to_string()));
    }
}
