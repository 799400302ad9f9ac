// [libs/core/keys/src/lib.rs]
#![deny(missing_docs)]

/*!
 * =================================================================
 * APARATO: KEY ENGINE MASTER HUB (V9.0 - VETA MADRE)
 * CLASIFICACIÓN: CORE KEYS (ESTRATO L1)
 * RESPONSABILIDAD: ORQUESTACIÓN DE PRIMITIVAS DE LLAVE Y REJILLA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. GRID STRATA REGISTRATION: Inyecta el módulo 'arithmetic' con la
 *    identidad de expansión de rejilla (base OR k == base + k cuando la
 *    máscara de aniquilación cubre los bits bajos).
 * 2. DUAL SERIALIZATION: Derivación simultánea SEC1 comprimida y
 *    no-comprimida con sus dos huellas HASH160.
 * 3. NOMINAL PRELUDE ALIGNMENT: Re-exportación de los tipos calientes
 *    bajo un prelude único para los motores del tejido L2.
 * 4. HYGIENE: Cero advertencias de compilación y rustdoc completo.
 *
 * # Mathematical Proof (Derivation Integrity):
 * Para toda entrada no-inválida del lote, cada huella HASH160 equivale
 * bit-a-bit a $RIPEMD160(SHA256(SEC1(k \cdot G)))$, garantizando que una
 * colisión contra el censo identifica de forma única al escalar secreto.
 * =================================================================
 */

/// Direcciones Base58Check P2PKH y formateo del registro de hallazgo.
pub mod address;
/// Aritmética U256 cruda de rejilla: kill bits, composición OR y suma con acarreo.
pub mod arithmetic;
/// Material de llave candidata: secreto + serializaciones + huellas HASH160.
pub mod candidate;
/// Singleton del contexto secp256k1 para pre-cómputo de tablas.
pub mod context;
/// Puntos afines de curva y ajustes escalares aditivos (tweaks).
pub mod curve_point;
/// Catálogo de fallos criptográficos del motor de llaves.
pub mod errors;
/// Motores de resumen (Digest) Bitcoin Standard (HASH160, SHA256).
pub mod hashing;
/// Gestión segura de escalares secretos.
pub mod secret_scalar;
/// Codificación WIF (Wallet Import Format) y selector de red.
pub mod wif;

/**
 * ESTRATO DE EXPORTACIÓN NOMINAL (PRELUDE)
 *
 * Superficie única de importación para los motores del tejido de búsqueda.
 */
pub mod prelude {
    pub use crate::address::{format_key_details, hash160_to_address};
    pub use crate::arithmetic::{
        add_key, add_u64_to_u256_be, compose_key, is_zero_u256, kill_bits,
        mask_covers_grid_bits, parse_hex_u256,
    };
    pub use crate::candidate::CandidateKeyMaterial;
    pub use crate::curve_point::CurvePoint;
    pub use crate::errors::KeyError;
    pub use crate::hashing::{hash160, sha256_of_utf8};
    pub use crate::secret_scalar::SecretScalar;
    pub use crate::wif::{secret_to_wif, wif_to_secret, Network};
}
