// [libs/core/census/src/errors.rs]
// =================================================================
// APARATO: CENSUS ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DE LA SONDA DE MEMBRESÍA
// ESTADO: ELITE COMPLIANCE (FULL RUSTDOC)
// =================================================================

use thiserror::Error;

/// Define los errores posibles durante la operación del censo HASH160.
///
/// Centraliza los fallos de la matriz probabilística: desde problemas del
/// sistema de archivos (I/O) hasta corrupción del artefacto binario.
#[derive(Error, Debug)]
pub enum CensusError {
    /// El cuerpo binario del artefacto colapsó en el codificador.
    ///
    /// Un cuerpo truncado a mitad de matriz o bytes basura tras un sello
    /// mágico legítimo terminan aquí.
    #[error("Error de serialización/deserialización: {0}")]
    SerializationError(#[from] bincode::Error),

    /// Fallo de Entrada/Salida al abrir, medir o leer el artefacto.
    #[error("Error de I/O: {0}")]
    IoError(#[from] std::io::Error),

    /// El artefacto no respeta el contrato de formato del censo.
    ///
    /// Ocurre ante un sello mágico desconocido, un tamaño fuera de la
    /// cota pactada o una revisión de layout de otra generación.
    #[error("Artefacto de censo malformado: {0}")]
    MalformedArtifact(String),

    /// Fallo del backend durante una consulta de membresía en caliente.
    ///
    /// El consumidor lo registra y salta la llave afectada sin morir.
    #[error("Fallo de sonda de membresía: {0}")]
    ProbeFailure(String),
}
