// [tests/mirror/libs/domain/search_fabric/secret_sources.test.rs]
/**
 * =================================================================
 * APARATO: SECRET SOURCES CERTIFIER (V1.1 - VETA MADRE)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-FABRIC
 * RESPONSABILIDAD: FORMATOS DE DECODIFICACIÓN Y POLÍTICA DE LÍNEAS
 * =================================================================
 */

use sha2::{Digest, Sha256};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use veta_core_keys::wif::{secret_to_wif, Network};
use veta_domain_fabric::secret_source::{
    FileSecretSource, SecretFormat, SecretSource, SourceOutcome,
};

fn collect_secrets(source: &mut dyn SecretSource) -> (Vec<[u8; 32]>, u64) {
    let mut secrets = Vec::new();
    let mut skipped_lines = 0u64;
    loop {
        match source.next_secret() {
            SourceOutcome::Secret(secret) => secrets.push(secret),
            SourceOutcome::Skip => skipped_lines += 1,
            SourceOutcome::Exhausted => return (secrets, skipped_lines),
        }
    }
}

/**
 * CERTIFICACIÓN: Cada formato decodifica su representación canónica.
 */
#[test]
fn certify_every_secret_format() {
    println!("\n📜 [PROVING_GROUNDS]: Secret format audit...");

    // ALFA: decimal de precisión arbitraria
    let decimal_secret = SecretFormat::BigIntegerDecimal
        .decode("987654321987654321")
        .expect("decimal legal");
    assert_eq!(
        SecretFormat::BigIntegerDecimal.encode(&decimal_secret).expect("re-codificable"),
        "987654321987654321"
    );

    // BETA: hexadecimal (resumen pre-calculado)
    let hexadecimal_secret = SecretFormat::HexSha256
        .decode("deadbeef")
        .expect("hexadecimal legal");
    assert_eq!(hexadecimal_secret[28..32], [0xde, 0xad, 0xbe, 0xef]);

    // GAMMA: SHA256 de la frase UTF-8
    let phrase_secret = SecretFormat::StringDoSha256
        .decode("correct horse battery staple")
        .expect("frase siempre legal");
    let mut reference_hasher = Sha256::new();
    reference_hasher.update("correct horse battery staple".as_bytes());
    let reference_digest: [u8; 32] = reference_hasher.finalize().into();
    assert_eq!(phrase_secret, reference_digest);

    // DELTA: llave volcada en WIF
    let mut original_secret = [0u8; 32];
    original_secret[31] = 0x2a;
    let dumped_wif = secret_to_wif(&original_secret, true, Network::Mainnet);
    assert_eq!(
        SecretFormat::DumpedPrivateKey.decode(&dumped_wif).expect("WIF legal"),
        original_secret
    );

    println!("🏁 [COMPLETE]: Secret formats certified.\n");
}

/**
 * CERTIFICACIÓN: Una línea corrupta se salta con rastro; la fuente
 * entrega el resto y se agota limpiamente.
 */
#[test]
fn certify_fault_tolerant_line_policy() {
    let mut input_file = tempfile::NamedTempFile::new().expect("archivo temporal");
    writeln!(input_file, "42").expect("escritura");
    writeln!(input_file, "###corrupta###").expect("escritura");
    writeln!(input_file).expect("línea vacía");
    writeln!(input_file, "1000000").expect("escritura");

    let mut source = FileSecretSource::open(
        input_file.path(),
        SecretFormat::BigIntegerDecimal,
        Arc::new(AtomicBool::new(false)),
    )
    .expect("fuente legible");

    let (secrets, skipped_lines) = collect_secrets(&mut source);
    assert_eq!(secrets.len(), 2, "dos líneas legales");
    assert_eq!(skipped_lines, 2, "la corrupta y la vacía se saltan");
    assert_eq!(secrets[0][31], 42);
}

/**
 * CERTIFICACIÓN: La parada a mitad de archivo retorna de inmediato.
 */
#[test]
fn certify_prompt_stop_mid_file() {
    let mut input_file = tempfile::NamedTempFile::new().expect("archivo temporal");
    for line_value in 0..10_000u32 {
        writeln!(input_file, "{line_value}").expect("escritura");
    }

    let stop_signal = Arc::new(AtomicBool::new(false));
    let mut source = FileSecretSource::open(
        input_file.path(),
        SecretFormat::BigIntegerDecimal,
        Arc::clone(&stop_signal),
    )
    .expect("fuente legible");

    // Consumir un tramo y elevar la parada.
    for _ in 0..5 {
        let _ = source.next_secret();
    }
    stop_signal.store(true, Ordering::SeqCst);

    assert!(matches!(source.next_secret(), SourceOutcome::Exhausted));
}

/**
 * CERTIFICACIÓN: El archivo ausente es un fallo fatal de arranque,
 * no una degradación de línea.
 */
#[test]
fn certify_missing_input_file_is_fatal() {
    let verdict = FileSecretSource::open(
        "/ruta/inexistente/semillas.txt",
        SecretFormat::HexSha256,
        Arc::new(AtomicBool::new(false)),
    );
    assert!(verdict.is_err());
}
