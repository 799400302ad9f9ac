// [libs/core/keys/src/address.rs]
/*!
 * =================================================================
 * APARATO: LEGACY ADDRESS CODEC (V9.1 - VETA MADRE)
 * CLASIFICACIÓN: CORE KEYS (ESTRATO L1)
 * RESPONSABILIDAD: TRANSFORMACIÓN HASH160 -> BASE58CHECK Y REGISTRO DE HALLAZGO
 *
 * VISION HIPER-HOLÍSTICA:
 * Implementa la codificación de direcciones P2PKH sobre el Stack para
 * el cotejo vanity del Hot-Loop y el formateo del registro legible de
 * hallazgos (WIF + hex públicos + dirección).
 * =================================================================
 */

use crate::arithmetic::secret_to_decimal;
use crate::candidate::CandidateKeyMaterial;
use crate::wif::{secret_to_wif, Network};

/// Longitud del payload de dirección: 1 byte de versión + 20 bytes HASH160.
const ADDRESS_PAYLOAD_SIZE: usize = 21;

/**
 * Transforma una huella HASH160 en una dirección Bitcoin Legacy (P2PKH).
 *
 * # Performance (Hot-Loop):
 * El payload se construye sobre el Stack; bs58 sella el checksum doble
 * SHA256 durante la codificación.
 */
#[must_use]
#[inline(always)]
pub fn hash160_to_address(hash160_payload: &[u8; 20], network: Network) -> String {
    let mut address_payload = [0u8; ADDRESS_PAYLOAD_SIZE];
    address_payload[0] = network.address_version_byte();
    address_payload[1..21].copy_from_slice(hash160_payload);

    bs58::encode(address_payload).with_check().into_string()
}

/**
 * Produce el registro legible de una llave para el rastro de hallazgos.
 *
 * Contiene todo lo necesario para recuperar e importar la llave:
 * secreto decimal, WIF, llave pública hex, HASH160 hex y dirección,
 * para la forma de compresión indicada.
 */
#[must_use]
pub fn format_key_details(
    candidate: &CandidateKeyMaterial,
    use_compression: bool,
    network: Network,
) -> String {
    let (public_key_hex, hash160_payload) = if use_compression {
        (hex::encode(candidate.compressed), &candidate.hash160_compressed)
    } else {
        (hex::encode(candidate.uncompressed), &candidate.hash160_uncompressed)
    };

    format!(
        "privateKey (dec): {} | WiF: {} | publicKey: {} | hash160: {} | address: {} | compressed: {}",
        secret_to_decimal(&candidate.secret),
        secret_to_wif(&candidate.secret, use_compression, network),
        public_key_hex,
        hex::encode(hash160_payload),
        hash160_to_address(hash160_payload, network),
        use_compression
    )
}
