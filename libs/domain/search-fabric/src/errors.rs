// [libs/domain/search-fabric/src/errors.rs]
// =================================================================
// APARATO: SEARCH FABRIC ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DEL TEJIDO DE BÚSQUEDA
// ESTADO: ELITE COMPLIANCE (FULL RUSTDOC)
// =================================================================

use thiserror::Error;

/// Define los errores posibles durante la operación del tejido de búsqueda.
#[derive(Error, Debug)]
pub enum FabricError {
    /// Una línea de la fuente de secretos no pudo decodificarse.
    ///
    /// La política es de tolerancia a fallos: la línea se registra con su
    /// número y la fuente continúa con la siguiente.
    #[error("Línea {line_number} ilegal para el formato de secreto: {reason}")]
    SourceParse {
        /// Número de línea (base 1) dentro del archivo de entrada.
        line_number: u64,
        /// Detalle del fallo de decodificación.
        reason: String,
    },

    /// La cola de lotes quedó sin consumidores vivos.
    ///
    /// Es un colapso fatal para el productor: no existe destino posible
    /// para el trabajo derivado.
    #[error("La cola de lotes fue desconectada: el estrato consumidor está ausente")]
    QueueDisconnected,

    /// Parámetros de rejilla ilegales (bits fuera de rango o máscara
    /// que no cubre los bits enumerables).
    #[error("Configuración de rejilla ilegal: {0}")]
    GridConfiguration(String),

    /// El sistema operativo denegó la encarnación de un hilo del tejido.
    #[error("No se pudo encarnar el hilo del tejido: {0}")]
    ThreadSpawn(#[from] std::io::Error),
}
