// [libs/domain/search-fabric/src/lib.rs]
/*!
 * =================================================================
 * APARATO: SEARCH FABRIC MASTER HUB (V7.0 - VETA MADRE)
 * CLASIFICACIÓN: DOMAIN FABRIC (ESTRATO L2)
 * RESPONSABILIDAD: ORQUESTACIÓN DEL TEJIDO PRODUCTOR/CONSUMIDOR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BACKPRESSURE FABRIC: Cola acotada multi-productor/multi-consumidor
 *    como único punto de sincronización del Hot-Path.
 * 2. KERNEL STRATEGY: Expansión de rejilla polimórfica (multiplicación
 *    escalar plena o adición de puntos amortizada) bajo un contrato único.
 * 3. COOPERATIVE LIFECYCLE: Un solo token de parada atómico más canales
 *    explícitos de finalización; cero grafos de callbacks.
 * 4. STABLE TRACE: Los registros de hallazgo conservan formatos
 *    línea-a-línea estables para auditoría externa.
 * =================================================================
 */

/// Cola acotada de lotes: el único punto de sincronización del Hot-Path.
pub mod batch_queue;
/// Trabajadores consumidores y tubería de verificación por llave.
pub mod consumer;
/// Catálogo de fallos del tejido de búsqueda.
pub mod errors;
/// Orquestador de ciclo de vida: ignición, drenado y apagado.
pub mod fabric;
/// Sumidero de registros de hallazgo con formatos estables.
pub mod hit_sink;
/// Productores de rejilla y kernels de expansión.
pub mod producer;
/// Fuentes de secretos semilla y formatos de decodificación.
pub mod secret_source;
/// Reportero periódico de caudal y latencia.
pub mod stats;
/// Contadores atómicos de proceso (telemetría de esfuerzo).
pub mod telemetry;
/// Cotejo de direcciones contra el patrón vanity configurado.
pub mod vanity;

pub use batch_queue::{BatchQueue, KeyBatch};
pub use consumer::{BatchConsumer, ConsumerSettings};
pub use errors::FabricError;
pub use fabric::{FabricBlueprint, FabricHandle, FabricReport, FabricSettings};
pub use hit_sink::{HitSink, RecordedHitEvent, RecordingHitSink, TracingHitSink};
pub use producer::{GridKernel, GridParameters, GridProducer, PointAdditionKernel, ScalarMultiplyKernel};
pub use secret_source::{FileSecretSource, RandomSecretSource, SecretFormat, SecretSource, SourceOutcome};
pub use stats::StatsReporter;
pub use telemetry::{SearchTelemetry, TelemetrySnapshot};
pub use vanity::VanityMatcher;
