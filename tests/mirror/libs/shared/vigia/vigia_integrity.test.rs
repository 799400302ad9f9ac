// [tests/mirror/libs/shared/vigia/vigia_integrity.test.rs]
/**
 * =================================================================
 * APARATO: VIGÍA INTEGRITY CERTIFIER (V2.0 - VETA MADRE)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L4-SHARED
 * RESPONSABILIDAD: BOOTSTRAP IDEMPOTENTE Y BALIZA DE PÁNICOS ENCADENADA
 * =================================================================
 */

use std::panic;
use tracing::info;
use veta_shared_vigia::init_tracing;

/**
 * CERTIFICACIÓN: La ignición es idempotente, la baliza intercepta el
 * colapso y el proceso sobrevive para seguir trazando.
 */
#[test]
fn certify_vigia_bootstrap_and_beacon() {
    println!("\n👁️  [PROVING_GROUNDS]: Vigía bootstrap audit...");

    // 1. IGNICIÓN DOBLE: la segunda invocación debe degradar a
    // advertencia y reutilizar el suscriptor vigente, jamás colapsar.
    init_tracing("vigia_integrity_test");
    init_tracing("vigia_integrity_test_rerun");
    println!("   ✅ Idempotent ignition: OK.");

    // 2. BALIZA ENCADENADA: el colapso intencional queda aislado por
    // catch_unwind; la baliza y el hook heredado emiten su rastro.
    let collapse_verdict = panic::catch_unwind(|| {
        panic!("INTENTIONAL_STRATA_FAILURE_FOR_TESTING");
    });
    assert!(
        collapse_verdict.is_err(),
        "CRITICAL: el colapso simulado no fue aislado"
    );
    println!("   ✅ Beacon interception: OK.");

    // 3. SUPERVIVENCIA: el sistema de trazas sigue operativo tras el colapso.
    info!("📡 [SIGNAL]: Post-collapse trace emission.");
    println!("🏁 [COMPLETE]: Vigía strata certified.\n");
}

/**
 * CERTIFICACIÓN: Un payload de pánico dinámico (String) también queda
 * aislado sin romper el hilo certificador.
 */
#[test]
fn certify_beacon_handles_owned_payloads() {
    let collapse_verdict = panic::catch_unwind(|| {
        panic!("{}", String::from("colapso con payload dinámico"));
    });
    assert!(collapse_verdict.is_err());
}
