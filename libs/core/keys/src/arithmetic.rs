// [libs/core/keys/src/arithmetic.rs]
/*!
 * =================================================================
 * APARATO: U256 GRID ARITHMETIC (V9.1 - VETA MADRE)
 * CLASIFICACIÓN: CORE KEYS (ESTRATO L1)
 * RESPONSABILIDAD: ARITMÉTICA CRUDA DE REJILLA SOBRE BIG-ENDIAN U256
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. GRID IDENTITY: Expone la pareja compose/add cuya equivalencia
 *    sostiene la amortización del kernel por adición de puntos.
 * 2. ZERO HEAP: Toda la aritmética opera sobre [u8; 32] en el Stack.
 * 3. NOMINAL PURITY: Erradicación de abreviaciones en acumuladores.
 *
 * # Mathematical Proof (Grid Expansion):
 * Sea $base = seed \land \lnot mask$ con $mask \supseteq 2^g - 1$.
 * Los $g$ bits bajos de $base$ son cero, luego para todo $k < 2^g$:
 * $base \lor k = base + k$, y los $g$ bits bajos del resultado son $k$.
 * =================================================================
 */

use crate::errors::KeyError;
use num_bigint::BigUint;

/// Aniquila en el secreto los bits marcados por la máscara.
///
/// Retorna $secret \land \lnot mask$: la base de la rejilla cuyos bits
/// enumerables quedan forzados a cero.
#[inline(always)]
#[must_use]
pub fn kill_bits(secret: &[u8; 32], mask: &[u8; 32]) -> [u8; 32] {
    let mut grid_base = [0u8; 32];
    for byte_index in 0..32 {
        grid_base[byte_index] = secret[byte_index] & !mask[byte_index];
    }
    grid_base
}

/// Compone el secreto de la celda `grid_index` de la rejilla.
///
/// Retorna $base \lor k$. La disyunción es la forma canónica: dado que los
/// bits bajos de la base son cero, equivale a la suma pero no propaga
/// acarreo alguno.
#[inline(always)]
#[must_use]
pub fn compose_key(grid_base: &[u8; 32], grid_index: u64) -> [u8; 32] {
    let mut composed_secret = *grid_base;
    let index_big_endian = grid_index.to_be_bytes();
    for offset in 0..8 {
        composed_secret[24 + offset] |= index_big_endian[offset];
    }
    composed_secret
}

/// Alternativa con acarreo a [`compose_key`].
///
/// Retorna $base + k$. Produce el mismo resultado que la composición OR
/// siempre que los bits bajos de la base sean cero; se conserva como
/// referencia documentada y certificada por el Proving Grounds.
///
/// # Errors:
/// Retorna `KeyError::InvalidKeyFormat` si la suma desborda los 256 bits.
#[inline]
pub fn add_key(grid_base: &[u8; 32], grid_index: u64) -> Result<[u8; 32], KeyError> {
    let mut summed_secret = *grid_base;
    add_u64_to_u256_be(&mut summed_secret, grid_index)?;
    Ok(summed_secret)
}

/// Suma un u64 a un entero U256 big-endian in-place (acarreo portátil).
///
/// # Errors:
/// Retorna `KeyError::InvalidKeyFormat` si el acarreo final desborda el
/// espacio de 256 bits (fin del espacio de llaves).
pub fn add_u64_to_u256_be(buffer: &mut [u8; 32], value_to_add: u64) -> Result<(), KeyError> {
    let mut current_carry = value_to_add as u128;
    for chunk_index in (0..4).rev() {
        let start = chunk_index * 8;
        let limb_value = u64::from_be_bytes(buffer[start..start + 8].try_into().unwrap()) as u128;
        let partial_sum = limb_value + current_carry;
        buffer[start..start + 8].copy_from_slice(&(partial_sum as u64).to_be_bytes());
        current_carry = partial_sum >> 64;
    }
    if current_carry > 0 {
        return Err(KeyError::InvalidKeyFormat("SCALAR_SPACE_EXHAUSTED".to_string()));
    }
    Ok(())
}

/// Evalúa si el entero U256 es idénticamente cero.
///
/// El escalar cero no tiene punto asociado en la curva; la entrada
/// correspondiente del lote debe marcarse inválida.
#[inline(always)]
#[must_use]
pub fn is_zero_u256(value: &[u8; 32]) -> bool {
    value.iter().all(|byte| *byte == 0)
}

/// Verifica que la máscara de aniquilación cubra los `grid_num_bits` bajos.
///
/// Sin esta cobertura la rejilla colapsaría: dos índices distintos
/// compondrían el mismo secreto.
#[must_use]
pub fn mask_covers_grid_bits(mask: &[u8; 32], grid_num_bits: u8) -> bool {
    for bit_position in 0..u32::from(grid_num_bits) {
        let byte_index = 31 - (bit_position / 8) as usize;
        let bit_in_byte = (bit_position % 8) as u8;
        if mask[byte_index] & (1u8 << bit_in_byte) == 0 {
            return false;
        }
    }
    true
}

/// Decodifica un entero U256 desde su representación hexadecimal.
///
/// Acepta prefijo opcional `0x` y hasta 64 dígitos; el valor se alinea
/// a la derecha (big-endian) con relleno de ceros.
///
/// # Errors:
/// Retorna `KeyError::InvalidKeyFormat` ante dígitos ilegales o longitud
/// superior a 256 bits.
pub fn parse_hex_u256(hexadecimal_text: &str) -> Result<[u8; 32], KeyError> {
    let trimmed = hexadecimal_text.trim();
    let digits = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")).unwrap_or(trimmed);

    if digits.is_empty() || digits.len() > 64 {
        return Err(KeyError::InvalidKeyFormat(format!(
            "HEX_U256_LENGTH_ILLEGAL: {} dígitos",
            digits.len()
        )));
    }

    // Normalización a longitud par para la decodificación byte-a-byte.
    let padded = if digits.len() % 2 == 0 {
        digits.to_string()
    } else {
        format!("0{digits}")
    };

    let decoded_bytes = hex::decode(&padded)
        .map_err(|decoding_fault| KeyError::InvalidKeyFormat(format!("HEX_U256_MALFORMED: {decoding_fault}")))?;

    let mut aligned_value = [0u8; 32];
    aligned_value[32 - decoded_bytes.len()..].copy_from_slice(&decoded_bytes);
    Ok(aligned_value)
}

/// Decodifica un entero U256 desde su representación decimal arbitraria.
///
/// # Errors:
/// Retorna `KeyError::InvalidKeyFormat` ante dígitos ilegales o magnitud
/// superior a 256 bits.
pub fn secret_from_decimal(decimal_text: &str) -> Result<[u8; 32], KeyError> {
    let magnitude = BigUint::parse_bytes(decimal_text.trim().as_bytes(), 10)
        .ok_or_else(|| KeyError::InvalidKeyFormat(format!("DECIMAL_MALFORMED: '{}'", decimal_text.trim())))?;

    let magnitude_bytes = magnitude.to_bytes_be();
    if magnitude_bytes.len() > 32 {
        return Err(KeyError::InvalidKeyFormat("DECIMAL_EXCEEDS_256_BITS".to_string()));
    }

    let mut aligned_value = [0u8; 32];
    aligned_value[32 - magnitude_bytes.len()..].copy_from_slice(&magnitude_bytes);
    Ok(aligned_value)
}

/// Codifica un entero U256 big-endian a su representación decimal.
#[must_use]
pub fn secret_to_decimal(secret: &[u8; 32]) -> String {
    BigUint::from_bytes_be(secret).to_str_radix(10)
}
