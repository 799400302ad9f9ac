// [tests/mirror/libs/domain/search_fabric/grid_expansion.test.rs]
/**
 * =================================================================
 * APARATO: GRID EXPANSION CERTIFIER (V1.2 - VETA MADRE)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-FABRIC
 * RESPONSABILIDAD: EXPANSIÓN 2^G, PARIDAD DE KERNELS Y DETERMINISMO
 * =================================================================
 */

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use crossbeam_channel::unbounded;
use veta_core_keys::arithmetic::{kill_bits, parse_hex_u256};
use veta_domain_fabric::batch_queue::{BatchQueue, KeyBatch};
use veta_domain_fabric::producer::{
    GridKernel, GridParameters, GridProducer, PointAdditionKernel, ScalarMultiplyKernel,
};
use veta_domain_fabric::secret_source::{SecretSource, SourceOutcome};

/// Fuente determinista de una sola semilla.
struct SingleSeedSource {
    seed: Option<[u8; 32]>,
}

impl SecretSource for SingleSeedSource {
    fn next_secret(&mut self) -> SourceOutcome {
        match self.seed.take() {
            Some(seed) => SourceOutcome::Secret(seed),
            None => SourceOutcome::Exhausted,
        }
    }
}

/// Ejecuta un productor run-once de forma síncrona y extrae su lote.
fn produce_single_batch(seed: [u8; 32], grid_parameters: GridParameters) -> KeyBatch {
    let batch_queue = BatchQueue::with_capacity(4);
    let (completion_sender, completion_receiver) = unbounded();

    let producer = GridProducer::new(
        0,
        Box::new(SingleSeedSource { seed: Some(seed) }),
        grid_parameters,
        Arc::new(ScalarMultiplyKernel),
        batch_queue.clone(),
        Arc::new(AtomicBool::new(false)),
        completion_sender,
    );
    producer.run();

    let completion = completion_receiver.recv().expect("sello de finalización");
    assert_eq!(completion.emitted_batches, 1, "run-once emite exactamente un lote");

    batch_queue.poll().expect("lote encolado")
}

/**
 * ESCENARIO: Semilla 0, killBits = 0xFF, g = 8 — exactamente 256
 * entradas con secretos 0..=255 en orden de índice.
 */
#[test]
fn certify_256_cell_expansion() {
    println!("\n🧩 [PROVING_GROUNDS]: 2^8 grid expansion audit...");

    let grid_parameters = GridParameters::new(
        8,
        parse_hex_u256("ff").expect("máscara de 8 bits"),
        true,
    )
    .expect("rejilla legal");

    let batch = produce_single_batch([0u8; 32], grid_parameters);

    assert_eq!(batch.len(), 256, "tamaño de lote 2^8");
    for (expected_index, entry) in batch.entries().iter().enumerate() {
        assert_eq!(entry.secret[31] as usize, expected_index);
        assert!(entry.secret[..31].iter().all(|byte| *byte == 0));
    }
    assert!(batch.entries()[0].invalid, "el secreto cero degrada");
    assert!(batch.entries()[1..].iter().all(|entry| !entry.invalid));

    println!("🏁 [COMPLETE]: Grid expansion certified.\n");
}

/**
 * ESCENARIO: La máscara aniquila los bits bajos de una semilla sucia
 * antes de enumerar la rejilla.
 */
#[test]
fn certify_dirty_seed_is_annihilated() {
    let kill_mask = parse_hex_u256("ff").expect("máscara de 8 bits");
    let mut dirty_seed = [0u8; 32];
    dirty_seed[30] = 0x02;
    dirty_seed[31] = 0xc7; // bits bajos sucios

    let grid_parameters = GridParameters::new(4, kill_mask, true).expect("rejilla legal");
    let batch = produce_single_batch(dirty_seed, grid_parameters);

    let expected_base = kill_bits(&dirty_seed, &kill_mask);
    assert_eq!(batch.len(), 16);
    for (index, entry) in batch.entries().iter().enumerate() {
        assert_eq!(entry.secret[30], expected_base[30], "bits altos preservados");
        assert_eq!(entry.secret[31], index as u8, "bits bajos enumerados");
    }
}

/**
 * INVARIANTE: Dos corridas run-once con la misma semilla producen
 * lotes idénticos byte a byte.
 */
#[test]
fn certify_run_once_determinism() {
    let grid_parameters = GridParameters::new(
        5,
        parse_hex_u256("1f").expect("máscara de 5 bits"),
        true,
    )
    .expect("rejilla legal");

    let mut seed = [0u8; 32];
    seed[20] = 0x77;

    let first_batch = produce_single_batch(seed, grid_parameters);
    let second_batch = produce_single_batch(seed, grid_parameters);

    assert_eq!(first_batch.entries(), second_batch.entries(), "determinismo roto");
}

/**
 * INVARIANTE: El kernel de adición de puntos es isomórfico al kernel
 * de multiplicación escalar sobre la misma rejilla.
 */
#[test]
fn certify_kernel_parity() {
    println!("\n⚗️  [PROVING_GROUNDS]: Kernel parity audit...");

    let kill_mask = parse_hex_u256("3f").expect("máscara de 6 bits");

    for seed_marker in [0u8, 1, 0x42, 0xff] {
        let mut seed = [0u8; 32];
        seed[16] = seed_marker;
        seed[31] = seed_marker; // bits bajos sucios: la máscara los aniquila
        let grid_base = kill_bits(&seed, &kill_mask);

        let scalar_entries = ScalarMultiplyKernel.expand(&grid_base, 6);
        let addition_entries = PointAdditionKernel.expand(&grid_base, 6);

        assert_eq!(scalar_entries.len(), 64);
        assert_eq!(
            scalar_entries, addition_entries,
            "divergencia de kernels con semilla {seed_marker}"
        );
    }

    println!("🏁 [COMPLETE]: Kernel parity certified.\n");
}
