// [tests/mirror/libs/core/census/census_persistence.test.rs]
/**
 * =================================================================
 * APARATO: CENSUS PERSISTENCE CERTIFIER (V2.0 - VETA MADRE)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-CENSUS
 * RESPONSABILIDAD: CONTRATO DEL ARTEFACTO SELLADO (SEAL -> OPEN -> PROBE)
 * =================================================================
 */

use rand::RngCore;
use veta_core_census::errors::CensusError;
use veta_core_census::filter::CensusFilter;
use veta_core_census::membership::{AddressCensus, InMemoryCensus};

fn random_fingerprints(volume: usize) -> Vec<[u8; 20]> {
    let mut entropy = rand::rngs::OsRng;
    (0..volume)
        .map(|_| {
            let mut fingerprint = [0u8; 20];
            entropy.fill_bytes(&mut fingerprint);
            fingerprint
        })
        .collect()
}

/**
 * CERTIFICACIÓN: El ciclo seal -> open preserva cada identidad y el
 * conteo declarado del censo.
 */
#[test]
fn certify_seal_and_open_round_trip() {
    println!("\n💾 [PROVING_GROUNDS]: Sealed-artifact round-trip audit...");

    let identities = random_fingerprints(5_000);
    let mut census = CensusFilter::with_capacity(identities.len(), 0.000_001);
    for identity in &identities {
        census.register(*identity);
    }

    let artifact_directory = tempfile::tempdir().expect("directorio temporal");
    let artifact_path = artifact_directory.path().join("census.bin");
    census.seal_to_disk(&artifact_path).expect("sellado");

    let hydrated_census = CensusFilter::open(&artifact_path).expect("apertura de arranque");
    assert_eq!(hydrated_census.identity_count(), identities.len() as u64);
    for identity in &identities {
        assert!(
            hydrated_census.contains(identity).expect("sonda"),
            "identidad perdida tras la hidratación"
        );
    }

    println!("🏁 [COMPLETE]: Round trip certified.\n");
}

/**
 * CERTIFICACIÓN: Cada clase de artefacto ilegal cae en su dominio de
 * fallo correcto, sin pánico.
 */
#[test]
fn certify_illegal_artifacts_are_rejected() {
    let artifact_directory = tempfile::tempdir().expect("directorio temporal");

    // Artefacto ausente: fallo de I/O.
    assert!(matches!(
        CensusFilter::open(artifact_directory.path().join("ausente.bin")),
        Err(CensusError::IoError(_))
    ));

    // Artefacto vacío: más corto que el sello mágico.
    let empty_path = artifact_directory.path().join("vacio.bin");
    std::fs::File::create(&empty_path).expect("archivo vacío");
    assert!(matches!(
        CensusFilter::open(&empty_path),
        Err(CensusError::MalformedArtifact(_))
    ));

    // Sello mágico ajeno: rechazado antes de decodificar.
    let impostor_path = artifact_directory.path().join("impostor.bin");
    std::fs::write(&impostor_path, b"ZZZZ-cuerpo-cualquiera").expect("escritura");
    assert!(matches!(
        CensusFilter::open(&impostor_path),
        Err(CensusError::MalformedArtifact(_))
    ));

    // Sello legítimo con cuerpo basura: colapso del decodificador.
    let garbled_path = artifact_directory.path().join("basura.bin");
    let mut garbled_bytes = b"VCNS".to_vec();
    garbled_bytes.extend_from_slice(&[0xee; 7]);
    std::fs::write(&garbled_path, garbled_bytes).expect("escritura");
    assert!(matches!(
        CensusFilter::open(&garbled_path),
        Err(CensusError::SerializationError(_))
    ));
}

/**
 * CERTIFICACIÓN: Un artefacto truncado a mitad de cuerpo jamás hidrata
 * un censo parcial.
 */
#[test]
fn certify_truncated_body_is_rejected() {
    let identities = random_fingerprints(500);
    let mut census = CensusFilter::with_capacity(identities.len(), 0.000_001);
    for identity in &identities {
        census.register(*identity);
    }

    let artifact_directory = tempfile::tempdir().expect("directorio temporal");
    let artifact_path = artifact_directory.path().join("census.bin");
    census.seal_to_disk(&artifact_path).expect("sellado");

    let sealed_bytes = std::fs::read(&artifact_path).expect("lectura");
    let truncated_path = artifact_directory.path().join("truncado.bin");
    std::fs::write(&truncated_path, &sealed_bytes[..sealed_bytes.len() / 2]).expect("escritura");

    assert!(CensusFilter::open(&truncated_path).is_err());
}

/**
 * CERTIFICACIÓN: El backend exacto y la matriz probabilística acuerdan
 * sobre las identidades registradas.
 */
#[test]
fn certify_exact_and_probabilistic_agreement() {
    let identities = random_fingerprints(1_000);

    let exact_census: InMemoryCensus = identities.iter().copied().collect();
    let mut bloom_census = CensusFilter::with_capacity(identities.len(), 0.000_001);
    for identity in &identities {
        bloom_census.register(*identity);
    }

    for identity in &identities {
        assert!(exact_census.contains(identity).expect("sonda exacta"));
        assert!(bloom_census.contains(identity).expect("sonda bloom"));
    }
}
