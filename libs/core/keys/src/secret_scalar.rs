// [libs/core/keys/src/secret_scalar.rs]
// =================================================================
// APARATO: SECRET SCALAR MANAGER (V9.0 - VETA MADRE)
// RESPONSABILIDAD: GESTIÓN SEGURA DE ESCALARES SECRETOS
// =================================================================

use crate::errors::KeyError;
use secp256k1::SecretKey;

/// Wrapper seguro para una clave privada de curva elíptica secp256k1.
/// Garantiza: 0 < k < n
#[derive(Debug, Clone)]
pub struct SecretScalar {
    inner: SecretKey,
}

impl SecretScalar {
    /// Intenta construir un escalar secreto a partir de bytes crudos big-endian.
    ///
    /// # Errors:
    /// Retorna `KeyError::EllipticCurveError` si el escalar es cero o
    /// excede el orden de la curva.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != 32 {
            return Err(KeyError::InvalidLength {
                expected: 32,
                got: bytes.len(),
            });
        }

        let secret_key = SecretKey::from_slice(bytes).map_err(KeyError::EllipticCurveError)?;

        Ok(Self { inner: secret_key })
    }

    /// Serializa el escalar a 32 bytes big-endian.
    #[inline]
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.secret_bytes()
    }

    /// Referencia al objeto interno (Zero-Copy).
    #[inline(always)]
    #[must_use]
    pub fn as_inner(&self) -> &SecretKey {
        &self.inner
    }
}
