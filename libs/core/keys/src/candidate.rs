// [libs/core/keys/src/candidate.rs]
/*!
 * =================================================================
 * APARATO: CANDIDATE KEY MATERIAL (V9.2 - VETA MADRE)
 * CLASIFICACIÓN: CORE KEYS (ESTRATO L1)
 * RESPONSABILIDAD: ARTEFACTO INMUTABLE DE DERIVACIÓN DUAL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DUAL FINGERPRINT: Cada candidato transporta ambas serializaciones
 *    SEC1 y sus dos huellas HASH160 listas para la sonda del censo.
 * 2. INFINITY SHIELD: El escalar cero y los escalares fuera del orden
 *    degradan a entrada inválida, jamás a pánico del hilo.
 * 3. ZERO ALIASING: Los buffers de huella viven por valor dentro del
 *    artefacto; ningún candidato comparte memoria con otro.
 *
 * # Mathematical Proof (Fingerprint Integrity):
 * Para toda entrada no-inválida: $hash160_c = RIPEMD160(SHA256(SEC1_c))$
 * y $hash160_u = RIPEMD160(SHA256(SEC1_u))$, donde ambas serializaciones
 * provienen del mismo punto $k \cdot G$.
 * =================================================================
 */

use crate::arithmetic::is_zero_u256;
use crate::curve_point::CurvePoint;
use crate::errors::KeyError;
use crate::hashing::hash160;
use crate::secret_scalar::SecretScalar;

/// Artefacto emitido por un productor para un secreto candidato.
///
/// Viaja dentro de un lote desde el productor, a través de la cola,
/// hasta el consumidor que ejecuta la tubería de verificación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateKeyMaterial {
    /// Escalar secreto big-endian que originó el candidato.
    pub secret: [u8; 32],
    /// Serialización SEC1 no-comprimida (0x04 + X + Y).
    pub uncompressed: [u8; 65],
    /// Serialización SEC1 comprimida (0x02/0x03 + X).
    pub compressed: [u8; 33],
    /// Huella HASH160 de la forma no-comprimida.
    pub hash160_uncompressed: [u8; 20],
    /// Huella HASH160 de la forma comprimida.
    pub hash160_compressed: [u8; 20],
    /// Marca de degradación: escalar cero o derivación colapsada.
    pub invalid: bool,
}

impl CandidateKeyMaterial {
    /**
     * Deriva el material completo mediante multiplicación escalar plena.
     *
     * El escalar cero es una degradación conocida del protocolo (no existe
     * punto asociado) y produce una entrada inválida sin error; un escalar
     * fuera del orden de la curva sí se reporta como fallo para que el
     * productor lo registre con su valor.
     *
     * # Errors:
     * Retorna `KeyError::EllipticCurveError` si el escalar excede el orden $n$.
     */
    pub fn derive(secret: [u8; 32]) -> Result<Self, KeyError> {
        if is_zero_u256(&secret) {
            return Ok(Self::invalid_entry(secret));
        }

        let scalar_handle = SecretScalar::from_bytes(&secret)?;
        let derived_point = CurvePoint::from_secret(&scalar_handle);
        Ok(Self::from_point(secret, &derived_point))
    }

    /**
     * Materializa el artefacto desde un punto ya calculado.
     *
     * Es la vía de post-procesado del kernel por lotes: el punto llega del
     * expansor de rejilla y aquí se sellan serializaciones y huellas.
     */
    #[must_use]
    pub fn from_point(secret: [u8; 32], derived_point: &CurvePoint) -> Self {
        let uncompressed = derived_point.serialize_uncompressed();
        let compressed = derived_point.serialize_compressed();

        Self {
            secret,
            hash160_uncompressed: hash160(&uncompressed),
            hash160_compressed: hash160(&compressed),
            uncompressed,
            compressed,
            invalid: false,
        }
    }

    /// Construye una entrada degradada que la tubería del consumidor saltará.
    #[must_use]
    pub fn invalid_entry(secret: [u8; 32]) -> Self {
        Self {
            secret,
            uncompressed: [0u8; 65],
            compressed: [0u8; 33],
            hash160_uncompressed: [0u8; 20],
            hash160_compressed: [0u8; 20],
            invalid: true,
        }
    }
}
