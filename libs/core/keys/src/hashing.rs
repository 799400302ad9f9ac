// [libs/core/keys/src/hashing.rs]
/*!
 * =================================================================
 * APARATO: HASHING ENGINE (V9.0 - BITCOIN STANDARD)
 * CLASIFICACIÓN: CORE KEYS (ESTRATO L1)
 * RESPONSABILIDAD: HASHING CRIPTOGRÁFICO DE ALTO RENDIMIENTO
 *
 * VISION HIPER-HOLÍSTICA:
 * Implementa las funciones de resumen (Digest) requeridas por el
 * protocolo Bitcoin. Utiliza implementaciones Rust puras para evitar
 * dependencias de C (OpenSSL) y facilitar la compilación cruzada.
 * =================================================================
 */

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Realiza un HASH160 estándar de Bitcoin.
/// Algoritmo: $RIPEMD160(SHA256(data))$
///
/// Genera el Identificador de Llave Pública (KeyID) de 20 bytes que
/// forma parte de las direcciones P2PKH y es la llave del censo.
#[inline(always)]
#[must_use]
pub fn hash160(data: &[u8]) -> [u8; 20] {
    // Paso 1: SHA-256
    let mut sha_hasher = Sha256::new();
    sha_hasher.update(data);
    let sha_result = sha_hasher.finalize();

    // Paso 2: RIPEMD-160
    let mut ripe_hasher = Ripemd160::new();
    ripe_hasher.update(sha_result);

    // Copia segura al buffer de salida
    let mut output = [0u8; 20];
    output.copy_from_slice(&ripe_hasher.finalize());
    output
}

/// Transforma una frase UTF-8 en un escalar de 256 bits.
/// Algoritmo: $k = SHA256(UTF8(phrase))$
///
/// Es la transformación canónica del formato de secreto 'StringDoSha256'.
#[must_use]
pub fn sha256_of_utf8(phrase: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(phrase.as_bytes());
    let mut result = [0u8; 32];
    result.copy_from_slice(&hasher.finalize());
    result
}
