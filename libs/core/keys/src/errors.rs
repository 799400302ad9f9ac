// [libs/core/keys/src/errors.rs]
// =================================================================
// APARATO: KEY ENGINE ERRORS
// RESPONSABILIDAD: CATÁLOGO DE FALLOS DEL MOTOR DE LLAVES
// ESTADO: ELITE COMPLIANCE (FULL RUSTDOC)
// =================================================================

use thiserror::Error;

/// Define los errores posibles durante la derivación y codificación de llaves.
///
/// Este enum centraliza los fallos del estrato L1, desde escalares fuera del
/// orden de la curva hasta payloads Base58Check corruptos.
#[derive(Error, Debug)]
pub enum KeyError {
    /// La ráfaga de bytes no tiene la longitud canónica esperada.
    #[error("Longitud inválida: esperado {expected}, recibido {got}")]
    InvalidLength {
        /// Longitud canónica requerida por el protocolo.
        expected: usize,
        /// Longitud realmente recibida.
        got: usize,
    },

    /// Fallo reportado por la librería criptográfica subyacente.
    ///
    /// Ocurre típicamente si el escalar es cero o excede el orden $n$
    /// de la curva secp256k1.
    #[error("Error de curva elíptica: {0}")]
    EllipticCurveError(#[from] secp256k1::Error),

    /// El formato textual de la llave es ilegal (hex, decimal o WIF).
    #[error("Formato de llave ilegal: {0}")]
    InvalidKeyFormat(String),

    /// Fallo de decodificación Base58Check (checksum o alfabeto).
    #[error("Error de decodificación Base58Check: {0}")]
    Base58Error(#[from] bs58::decode::Error),
}
