// [libs/core/keys/src/curve_point.rs]
/*!
 * =================================================================
 * APARATO: CURVE POINT ENGINE (V9.0 - VETA MADRE)
 * CLASIFICACIÓN: CORE KEYS (ESTRATO L1)
 * RESPONSABILIDAD: GESTIÓN DE PUNTOS AFINES Y SERIALIZACIÓN SEC1
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. GRID IDENTITY: El ajuste escalar aditivo materializa la identidad
 *    $P(base|k) = P(base) + k \cdot G$, permitiendo al kernel por lotes
 *    amortizar una sola multiplicación escalar por rejilla.
 * 2. ZERO REGRESSIONS: Uso de 'secp256k1::PublicKey' con el contexto
 *    global pre-computado.
 * 3. PERFORMANCE: Marcadores #[inline(always)] en el Hot-Path.
 * =================================================================
 */

use crate::context::global_context;
use crate::errors::KeyError;
use crate::secret_scalar::SecretScalar;
use secp256k1::{PublicKey, Scalar};

/// Representa una Clave Pública en la curva secp256k1.
///
/// Es un punto $(x, y)$ que satisface $y^2 = x^3 + 7 \pmod p$ y actúa como
/// identificador soberano para la derivación de direcciones Bitcoin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurvePoint {
    /// El punto de curva gestionado por la librería criptográfica subyacente.
    internal_point: PublicKey,
}

impl CurvePoint {
    /**
     * Deriva el punto público a partir de un escalar secreto ($Q = k \cdot G$).
     *
     * # Performance:
     * Operación de alto coste amortizada por las tablas del Singleton
     * del contexto global.
     */
    #[inline(always)]
    #[must_use]
    pub fn from_secret(secret_scalar_handle: &SecretScalar) -> Self {
        let context = global_context();
        let point = PublicKey::from_secret_key(context, secret_scalar_handle.as_inner());
        Self { internal_point: point }
    }

    /**
     * Ajusta el punto sumándole un múltiplo del generador ($Q' = Q + s \cdot G$).
     *
     * # Mathematical Proof:
     * Equivale a desplazar el escalar privado original en $s$ unidades sin
     * conocer su valor, por la propiedad homomórfica de la curva. Es la
     * operación de salto de celda del kernel de rejilla.
     *
     * # Errors:
     * Retorna error si el escalar desborda el orden $n$ o si el resultado
     * degenera en el punto al infinito.
     */
    #[inline(always)]
    pub fn add_scalar(&self, scalar_bytes: &[u8; 32]) -> Result<Self, KeyError> {
        let context = global_context();
        let scalar_value = Scalar::from_be_bytes(*scalar_bytes)
            .map_err(|_| KeyError::InvalidKeyFormat("SCALAR_OVERFLOW".into()))?;

        let updated_point = self.internal_point.add_exp_tweak(context, &scalar_value)
            .map_err(KeyError::EllipticCurveError)?;

        Ok(Self { internal_point: updated_point })
    }

    /// Serializa el punto en formato SEC1 comprimido (prefijo 0x02/0x03 + X).
    #[inline(always)]
    #[must_use]
    pub fn serialize_compressed(&self) -> [u8; 33] {
        self.internal_point.serialize()
    }

    /// Serializa el punto en formato SEC1 no-comprimido (0x04 + X + Y).
    #[inline(always)]
    #[must_use]
    pub fn serialize_uncompressed(&self) -> [u8; 65] {
        self.internal_point.serialize_uncompressed()
    }
}
