// [tests/mirror/libs/core/keys/grid_arithmetic.test.rs]
/**
 * =================================================================
 * APARATO: GRID ARITHMETIC CERTIFIER (V1.1 - VETA MADRE)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-KEYS
 * RESPONSABILIDAD: INVARIANTES CUANTIFICADOS DE LA REJILLA U256
 *
 * # Mathematical Proof (Certified Invariants):
 * 1. Para todo seed, mask ⊇ 2^g - 1 y k < 2^g:
 *    los g bits bajos de (kill_bits(seed, mask) | k) valen exactamente k,
 *    y (secret XOR k) == base.
 * 2. compose_key == add_key siempre que la base tenga los bits bajos en cero.
 * =================================================================
 */

use proptest::prelude::*;
use veta_core_keys::arithmetic::{
    add_key, compose_key, is_zero_u256, kill_bits, mask_covers_grid_bits, parse_hex_u256,
};

/// Construye la máscara mínima que cubre los g bits bajos.
fn low_bits_mask(grid_num_bits: u8) -> [u8; 32] {
    let mut mask = [0u8; 32];
    for bit_position in 0..u32::from(grid_num_bits) {
        let byte_index = 31 - (bit_position / 8) as usize;
        mask[byte_index] |= 1u8 << (bit_position % 8);
    }
    mask
}

/// Extrae los g bits bajos de un U256 big-endian como u64.
fn low_bits_value(value: &[u8; 32], grid_num_bits: u8) -> u64 {
    let tail = u64::from_be_bytes(value[24..32].try_into().expect("8 bytes"));
    if grid_num_bits == 0 {
        0
    } else {
        tail & ((1u64 << grid_num_bits) - 1)
    }
}

proptest! {
    /// Los g bits bajos del secreto compuesto valen exactamente k,
    /// y el XOR con k reconstruye la base.
    #[test]
    fn certify_grid_low_bits_identity(
        seed in prop::array::uniform32(any::<u8>()),
        grid_num_bits in 0u8..=16,
        raw_index in any::<u64>(),
    ) {
        let mask = low_bits_mask(grid_num_bits);
        prop_assert!(mask_covers_grid_bits(&mask, grid_num_bits));

        let batch_size = 1u64 << grid_num_bits;
        let grid_index = raw_index % batch_size;

        let grid_base = kill_bits(&seed, &mask);
        let composed_secret = compose_key(&grid_base, grid_index);

        // Invariante 1: bits bajos == k
        prop_assert_eq!(low_bits_value(&composed_secret, grid_num_bits), grid_index);

        // Invariante 2: secret XOR k == base
        let mut reconstructed_base = composed_secret;
        let index_bytes = grid_index.to_be_bytes();
        for offset in 0..8 {
            reconstructed_base[24 + offset] ^= index_bytes[offset];
        }
        prop_assert_eq!(reconstructed_base, grid_base);
    }

    /// La composición OR equivale a la suma con acarreo sobre base limpia.
    #[test]
    fn certify_compose_equals_add_on_clean_base(
        seed in prop::array::uniform32(any::<u8>()),
        grid_num_bits in 0u8..=16,
        raw_index in any::<u64>(),
    ) {
        let mask = low_bits_mask(grid_num_bits);
        let grid_base = kill_bits(&seed, &mask);
        let grid_index = raw_index % (1u64 << grid_num_bits);

        let composed = compose_key(&grid_base, grid_index);
        let summed = add_key(&grid_base, grid_index).expect("base limpia jamás desborda");
        prop_assert_eq!(composed, summed);
    }

    /// La aniquilación es idempotente y deja en cero los bits de la máscara.
    #[test]
    fn certify_kill_bits_idempotence(
        seed in prop::array::uniform32(any::<u8>()),
        mask in prop::array::uniform32(any::<u8>()),
    ) {
        let once = kill_bits(&seed, &mask);
        let twice = kill_bits(&once, &mask);
        prop_assert_eq!(once, twice);

        for byte_index in 0..32 {
            prop_assert_eq!(once[byte_index] & mask[byte_index], 0);
        }
    }
}

#[test]
fn certify_full_mask_annihilates_any_seed() {
    println!("\n🧮 [PROVING_GROUNDS]: Grid arithmetic boundary audit...");

    let full_mask = parse_hex_u256(
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
    )
    .expect("máscara plena");

    let annihilated = kill_bits(&[0xa5u8; 32], &full_mask);
    assert!(is_zero_u256(&annihilated), "la máscara plena debe anular todo");
    assert!(mask_covers_grid_bits(&full_mask, 24));

    println!("🏁 [COMPLETE]: Grid arithmetic certified.\n");
}
