// [libs/domain/search-fabric/src/producer.rs]
/*!
 * =================================================================
 * APARATO: GRID PRODUCER ENGINE (V7.3 - VETA MADRE)
 * CLASIFICACIÓN: DOMAIN FABRIC (ESTRATO L2)
 * RESPONSABILIDAD: EXPANSIÓN DE REJILLA Y EMISIÓN DE LOTES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. KERNEL STRATEGY: Ambas variantes de productor comparten el mismo
 *    contrato; solo difiere el expansor (multiplicación escalar plena
 *    o adición de puntos amortizada).
 * 2. FAULT TOLERANT GRID: Un secreto degradado se registra con su valor
 *    y marca su entrada inválida; la rejilla jamás aborta el bucle.
 * 3. COOPERATIVE EXIT: La parada deja terminar el lote en vuelo; la
 *    finalización se sella por canal explícito.
 *
 * # Mathematical Proof (Amortised Expansion):
 * Con $base = seed \land \lnot mask$ y $mask \supseteq 2^g - 1$, la
 * identidad $P(base|k) = P(base) + k \cdot G$ reduce las $2^g$
 * multiplicaciones escalares de la rejilla a una sola más $2^g - 1$
 * adiciones de punto.
 * =================================================================
 */

use crate::batch_queue::{BatchQueue, KeyBatch};
use crate::errors::FabricError;
use crate::secret_source::{SecretSource, SourceOutcome};
use crossbeam_channel::Sender;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, instrument};
use veta_core_keys::arithmetic::{compose_key, is_zero_u256, kill_bits, mask_covers_grid_bits};
use veta_core_keys::candidate::CandidateKeyMaterial;
use veta_core_keys::curve_point::CurvePoint;
use veta_core_keys::secret_scalar::SecretScalar;

/// Parámetros de rejilla compartidos por todos los productores.
#[derive(Debug, Clone, Copy)]
pub struct GridParameters {
    /// Bits bajos del secreto que se ENUMERAN en vez de muestrearse.
    pub grid_num_bits: u8,
    /// Máscara de aniquilación: sus bits se fuerzan a cero en la semilla.
    pub kill_mask: [u8; 32],
    /// Emite un único lote por productor y cierra.
    pub run_once: bool,
}

impl GridParameters {
    /// Cota superior del exponente de rejilla (lotes de hasta 2^24 llaves).
    pub const MAX_GRID_NUM_BITS: u8 = 24;

    /**
     * Valida y sella los parámetros de rejilla.
     *
     * # Errors:
     * - Bits de rejilla fuera de [0, 24].
     * - Máscara que no cubre los bits enumerables (dos índices distintos
     *   compondrían el mismo secreto).
     */
    pub fn new(grid_num_bits: u8, kill_mask: [u8; 32], run_once: bool) -> Result<Self, FabricError> {
        if grid_num_bits > Self::MAX_GRID_NUM_BITS {
            return Err(FabricError::GridConfiguration(format!(
                "gridNumBits {} fuera de rango [0, {}]",
                grid_num_bits,
                Self::MAX_GRID_NUM_BITS
            )));
        }
        if !mask_covers_grid_bits(&kill_mask, grid_num_bits) {
            return Err(FabricError::GridConfiguration(format!(
                "killBits no cubre los {grid_num_bits} bits bajos de la rejilla"
            )));
        }
        Ok(Self { grid_num_bits, kill_mask, run_once })
    }

    /// Tamaño de lote derivado: $2^g$ candidatos por rejilla.
    #[must_use]
    pub fn batch_size(&self) -> u64 {
        1u64 << self.grid_num_bits
    }
}

/**
 * Contrato del expansor de rejilla.
 *
 * Recibe la base (bits enumerables en cero) y el exponente `g`; retorna
 * los $2^g$ candidatos en orden de índice. Las degradaciones por secreto
 * se materializan como entradas inválidas, jamás como pánico.
 */
pub trait GridKernel: Send + Sync {
    /// Expande la rejilla completa de una base.
    fn expand(&self, grid_base: &[u8; 32], grid_num_bits: u8) -> Vec<CandidateKeyMaterial>;

    /// Identificador nominal del kernel para el rastro de ignición.
    fn nominal_identifier(&self) -> &'static str;
}

/// Kernel canónico de CPU: una multiplicación escalar plena por celda.
#[derive(Debug, Default)]
pub struct ScalarMultiplyKernel;

impl GridKernel for ScalarMultiplyKernel {
    fn expand(&self, grid_base: &[u8; 32], grid_num_bits: u8) -> Vec<CandidateKeyMaterial> {
        let batch_size = 1u64 << grid_num_bits;

        (0..batch_size)
            .into_par_iter()
            .map(|grid_index| {
                let composed_secret = compose_key(grid_base, grid_index);
                match CandidateKeyMaterial::derive(composed_secret) {
                    Ok(candidate) => candidate,
                    Err(derivation_fault) => {
                        error!(
                            "❌ [DERIVATION_FAULT]: secret {} degraded: {}",
                            hex::encode(composed_secret),
                            derivation_fault
                        );
                        CandidateKeyMaterial::invalid_entry(composed_secret)
                    }
                }
            })
            .collect()
    }

    fn nominal_identifier(&self) -> &'static str {
        "scalar_multiply"
    }
}

/**
 * Kernel por lotes: amortiza una sola multiplicación escalar por rejilla.
 *
 * Es la variante del contrato de despacho externo (GPU/SIMD): el ancla
 * $P(base|k_0)$ se calcula una vez y cada celda se alcanza con el ajuste
 * aditivo $+ (k - k_0) \cdot G$; la serialización y el HASH160 se sellan
 * en el host.
 */
#[derive(Debug, Default)]
pub struct PointAdditionKernel;

impl GridKernel for PointAdditionKernel {
    fn expand(&self, grid_base: &[u8; 32], grid_num_bits: u8) -> Vec<CandidateKeyMaterial> {
        let batch_size = 1u64 << grid_num_bits;

        // El escalar cero no tiene punto: con base cero el ancla se toma en k=1.
        let anchor_index: u64 = if is_zero_u256(grid_base) { 1 } else { 0 };
        if anchor_index >= batch_size {
            return vec![CandidateKeyMaterial::invalid_entry(*grid_base)];
        }

        let anchor_secret = compose_key(grid_base, anchor_index);
        let anchor_point = match SecretScalar::from_bytes(&anchor_secret)
            .map(|scalar_handle| CurvePoint::from_secret(&scalar_handle))
        {
            Ok(point) => point,
            Err(anchor_fault) => {
                // Ancla degenerada (base en el borde del orden): degradación
                // al kernel escalar para no perder la rejilla.
                error!(
                    "❌ [ANCHOR_FAULT]: base {} rejected ({}). Falling back to scalar kernel.",
                    hex::encode(grid_base),
                    anchor_fault
                );
                return ScalarMultiplyKernel.expand(grid_base, grid_num_bits);
            }
        };

        (0..batch_size)
            .into_par_iter()
            .map(|grid_index| {
                let composed_secret = compose_key(grid_base, grid_index);
                if grid_index < anchor_index {
                    return CandidateKeyMaterial::invalid_entry(composed_secret);
                }

                let mut offset_scalar_bytes = [0u8; 32];
                offset_scalar_bytes[24..32].copy_from_slice(&(grid_index - anchor_index).to_be_bytes());

                match anchor_point.add_scalar(&offset_scalar_bytes) {
                    Ok(cell_point) => CandidateKeyMaterial::from_point(composed_secret, &cell_point),
                    Err(tweak_fault) => {
                        error!(
                            "❌ [DERIVATION_FAULT]: secret {} degraded: {}",
                            hex::encode(composed_secret),
                            tweak_fault
                        );
                        CandidateKeyMaterial::invalid_entry(composed_secret)
                    }
                }
            })
            .collect()
    }

    fn nominal_identifier(&self) -> &'static str {
        "point_addition"
    }
}

/// Sello de finalización de un productor (canal explícito, sin callbacks).
#[derive(Debug, Clone, Copy)]
pub struct ProducerCompletion {
    /// Identificador del productor dentro del pool.
    pub producer_identifier: usize,
    /// Lotes efectivamente encolados durante la vida del productor.
    pub emitted_batches: u64,
}

/// Productor de rejilla: transforma semillas en lotes y los encola.
pub struct GridProducer {
    producer_identifier: usize,
    secret_source: Box<dyn SecretSource>,
    grid_parameters: GridParameters,
    expansion_kernel: Arc<dyn GridKernel>,
    batch_queue: BatchQueue,
    stop_signal: Arc<AtomicBool>,
    completion_sender: Sender<ProducerCompletion>,
}

impl GridProducer {
    /// Ensambla un productor listo para encarnarse en su hilo.
    #[must_use]
    pub fn new(
        producer_identifier: usize,
        secret_source: Box<dyn SecretSource>,
        grid_parameters: GridParameters,
        expansion_kernel: Arc<dyn GridKernel>,
        batch_queue: BatchQueue,
        stop_signal: Arc<AtomicBool>,
        completion_sender: Sender<ProducerCompletion>,
    ) -> Self {
        Self {
            producer_identifier,
            secret_source,
            grid_parameters,
            expansion_kernel,
            batch_queue,
            stop_signal,
            completion_sender,
        }
    }

    /**
     * Bucle principal del productor.
     *
     * 1. Extrae una semilla; agotamiento cierra el bucle.
     * 2. Aniquila los bits de la máscara para formar la base.
     * 3. Expande la rejilla con el kernel y encola el lote (bloqueante).
     * 4. Con `run_once`, cierra tras el primer lote encolado.
     *
     * La finalización siempre se sella por el canal explícito, incluso
     * ante colapso fatal de la cola.
     */
    #[instrument(skip_all, fields(producer = self.producer_identifier, kernel = self.expansion_kernel.nominal_identifier()))]
    pub fn run(mut self) {
        let mut emitted_batches: u64 = 0;

        loop {
            if self.stop_signal.load(Ordering::Relaxed) {
                break;
            }

            let seed_secret = match self.secret_source.next_secret() {
                SourceOutcome::Secret(seed) => seed,
                SourceOutcome::Skip => continue,
                SourceOutcome::Exhausted => break,
            };

            let grid_base = kill_bits(&seed_secret, &self.grid_parameters.kill_mask);
            let grid_entries = self.expansion_kernel.expand(&grid_base, self.grid_parameters.grid_num_bits);

            match self.batch_queue.offer(KeyBatch::new(grid_entries), &self.stop_signal) {
                Ok(true) => emitted_batches += 1,
                Ok(false) => break, // Parada observada durante la contrapresión.
                Err(enqueue_fault) => {
                    error!("❌ [FABRIC_COLLAPSE]: Producer {} cannot enqueue: {}", self.producer_identifier, enqueue_fault);
                    break;
                }
            }

            if self.grid_parameters.run_once {
                break;
            }
        }

        info!(
            "🏁 [PRODUCER]: Unit {} sealed after {} batches.",
            self.producer_identifier, emitted_batches
        );
        let _ = self.completion_sender.send(ProducerCompletion {
            producer_identifier: self.producer_identifier,
            emitted_batches,
        });
    }
}
