// [libs/core/keys/src/wif.rs]
/*!
 * =================================================================
 * APARATO: WIF CODEC (V9.1 - VETA MADRE)
 * CLASIFICACIÓN: CORE KEYS (ESTRATO L1)
 * RESPONSABILIDAD: CODIFICACIÓN WALLET IMPORT FORMAT Y SELECTOR DE RED
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NETWORK DUALITY: Mainnet y Testnet comparten el mismo códec con
 *    bytes de versión soberanos (0x80 / 0xef).
 * 2. COMPRESSION AWARENESS: El sufijo 0x01 distingue la forma
 *    comprimida, preservando la dirección que la cartera re-derivará.
 * 3. ROUND-TRIP SEAL: La decodificación acepta ambas redes y ambas
 *    formas, habilitando el formato de secreto 'DumpedPrivateKey'.
 * =================================================================
 */

use crate::errors::KeyError;

/// Red Bitcoin de destino para la codificación de llaves y direcciones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    /// Red principal (direcciones '1...', WIF '5/K/L...').
    #[default]
    Mainnet,
    /// Red de pruebas (direcciones 'm/n...', WIF '9/c...').
    Testnet,
}

impl Network {
    /// Byte de versión para direcciones P2PKH (0x00 -> '1', 0x6f -> 'm/n').
    #[inline]
    #[must_use]
    pub fn address_version_byte(self) -> u8 {
        match self {
            Network::Mainnet => 0x00,
            Network::Testnet => 0x6f,
        }
    }

    /// Byte de versión para el Wallet Import Format.
    #[inline]
    #[must_use]
    pub fn wif_version_byte(self) -> u8 {
        match self {
            Network::Mainnet => 0x80,
            Network::Testnet => 0xef,
        }
    }
}

/// Sufijo que marca una llave destinada a derivación comprimida.
const WIF_COMPRESSION_SUFFIX: u8 = 0x01;
/// Longitud del payload WIF sin sufijo (versión + 32 bytes de escalar).
const WIF_PAYLOAD_SIZE: usize = 33;

/**
 * Codifica un escalar secreto al Wallet Import Format (Base58Check).
 *
 * # Logic:
 * Payload = byte de versión de red + escalar big-endian + sufijo 0x01
 * cuando la llave apunta a la serialización comprimida.
 */
#[must_use]
pub fn secret_to_wif(secret: &[u8; 32], use_compression: bool, network: Network) -> String {
    let mut wif_payload = Vec::with_capacity(WIF_PAYLOAD_SIZE + 1);
    wif_payload.push(network.wif_version_byte());
    wif_payload.extend_from_slice(secret);
    if use_compression {
        wif_payload.push(WIF_COMPRESSION_SUFFIX);
    }

    bs58::encode(wif_payload).with_check().into_string()
}

/**
 * Decodifica un secreto desde su Wallet Import Format.
 *
 * Acepta ambas redes y ambas formas (con o sin sufijo de compresión);
 * el llamador decide la red de trabajo.
 *
 * # Errors:
 * - `KeyError::Base58Error` ante checksum o alfabeto corruptos.
 * - `KeyError::InvalidKeyFormat` ante versión o longitud ilegales.
 */
pub fn wif_to_secret(encoded_wif: &str) -> Result<[u8; 32], KeyError> {
    let decoded_payload = bs58::decode(encoded_wif.trim())
        .with_check(None)
        .into_vec()
        .map_err(KeyError::Base58Error)?;

    match decoded_payload.len() {
        len if len == WIF_PAYLOAD_SIZE => {}
        len if len == WIF_PAYLOAD_SIZE + 1 => {
            if decoded_payload[WIF_PAYLOAD_SIZE] != WIF_COMPRESSION_SUFFIX {
                return Err(KeyError::InvalidKeyFormat("WIF_SUFFIX_ILLEGAL".to_string()));
            }
        }
        len => {
            return Err(KeyError::InvalidLength {
                expected: WIF_PAYLOAD_SIZE,
                got: len,
            })
        }
    }

    let version_byte = decoded_payload[0];
    if version_byte != Network::Mainnet.wif_version_byte()
        && version_byte != Network::Testnet.wif_version_byte()
    {
        return Err(KeyError::InvalidKeyFormat(format!(
            "WIF_VERSION_ILLEGAL: 0x{version_byte:02x}"
        )));
    }

    let mut secret = [0u8; 32];
    secret.copy_from_slice(&decoded_payload[1..33]);
    Ok(secret)
}
