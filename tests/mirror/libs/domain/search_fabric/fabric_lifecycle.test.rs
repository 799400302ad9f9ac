// [tests/mirror/libs/domain/search_fabric/fabric_lifecycle.test.rs]
/**
 * =================================================================
 * APARATO: FABRIC LIFECYCLE CERTIFIER (V1.2 - VETA MADRE)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-FABRIC
 * RESPONSABILIDAD: IGNICIÓN, DRENADO ACOTADO Y TIMEOUT DE APAGADO
 * =================================================================
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use veta_core_census::errors::CensusError;
use veta_core_census::membership::{AddressCensus, InMemoryCensus};
use veta_core_keys::wif::Network;
use veta_domain_fabric::fabric::{FabricBlueprint, FabricSettings};
use veta_domain_fabric::hit_sink::{HitSink, RecordingHitSink};
use veta_domain_fabric::producer::{GridParameters, ScalarMultiplyKernel};
use veta_domain_fabric::secret_source::{RandomSecretSource, SecretSource, SourceOutcome};

/// Censo que retiene cada sonda hasta que el certificador lo libere.
struct StallingCensus {
    release_latch: Arc<AtomicBool>,
}

impl AddressCensus for StallingCensus {
    fn contains(&self, _hash160_payload: &[u8; 20]) -> Result<bool, CensusError> {
        while !self.release_latch.load(Ordering::Relaxed) {
            std::thread::sleep(Duration::from_millis(5));
        }
        Ok(false)
    }
}

/// Fuente determinista finita para cacerías de drenado limpio.
struct CountedSource {
    remaining_seeds: u8,
}

impl SecretSource for CountedSource {
    fn next_secret(&mut self) -> SourceOutcome {
        if self.remaining_seeds == 0 {
            return SourceOutcome::Exhausted;
        }
        self.remaining_seeds -= 1;
        let mut seed = [0u8; 32];
        seed[31] = self.remaining_seeds + 1;
        SourceOutcome::Secret(seed)
    }
}

fn base_settings() -> FabricSettings {
    FabricSettings {
        consumer_thread_count: 2,
        queue_capacity: 4,
        delay_empty_consumer: Duration::from_millis(5),
        await_queue_empty: Duration::from_secs(30),
        statistics_period: None,
        runtime_public_key_calculation_check: false,
        network: Network::Mainnet,
    }
}

/**
 * ESCENARIO: Apagado normal — la cola queda vacía y todos los hilos
 * sellan su finalización dentro de la ventana.
 */
#[test]
fn certify_clean_drain_on_normal_shutdown() {
    println!("\n🔄 [PROVING_GROUNDS]: Clean drain audit...");

    let blueprint = FabricBlueprint {
        settings: base_settings(),
        grid_parameters: GridParameters::new(3, {
            let mut mask = [0u8; 32];
            mask[31] = 0x07;
            mask
        }, false)
        .expect("rejilla legal"),
        secret_sources: vec![
            Box::new(CountedSource { remaining_seeds: 5 }),
            Box::new(CountedSource { remaining_seeds: 5 }),
        ],
        expansion_kernel: Arc::new(ScalarMultiplyKernel),
        address_census: Arc::new(InMemoryCensus::new()) as Arc<dyn AddressCensus>,
        hit_sink: Arc::new(RecordingHitSink::new()) as Arc<dyn HitSink>,
        vanity_matcher: None,
        stop_signal: Arc::new(AtomicBool::new(false)),
    };

    let handle = blueprint.ignite().expect("ignición");
    handle.await_producers();
    let report = handle.shutdown();

    assert!(report.drained_cleanly, "el pool consumidor debe sellarse");
    assert_eq!(report.dropped_batches, 0, "apagado normal: cola vacía");
    // Las semillas < 8 colapsan a base 0: cada lote de 8 celdas degrada la
    // celda cero y sondea las 7 restantes en ambas formas.
    assert_eq!(report.telemetry.checked_keys, 2 * 5 * 7 * 2);
    assert!(report.telemetry.empty_consumer_rounds >= 1);

    println!("🏁 [COMPLETE]: Clean drain certified.\n");
}

/**
 * ESCENARIO: Cola saturada con consumidores retenidos — la parada
 * desbloquea a los productores y el apagado respeta la ventana de
 * drenado, descartando lo no procesado con rastro WARN.
 */
#[test]
fn certify_shutdown_timeout_with_stalled_consumers() {
    println!("\n⏱️  [PROVING_GROUNDS]: Stalled-consumer shutdown audit...");

    let release_latch = Arc::new(AtomicBool::new(false));
    let drain_window = Duration::from_millis(400);

    let mut settings = base_settings();
    settings.consumer_thread_count = 1;
    settings.queue_capacity = 1;
    settings.await_queue_empty = drain_window;

    let blueprint = FabricBlueprint {
        settings,
        grid_parameters: GridParameters::new(2, {
            let mut mask = [0u8; 32];
            mask[31] = 0x03;
            mask
        }, false)
        .expect("rejilla legal"),
        secret_sources: vec![Box::new(RandomSecretSource::new())],
        expansion_kernel: Arc::new(ScalarMultiplyKernel),
        address_census: Arc::new(StallingCensus {
            release_latch: Arc::clone(&release_latch),
        }) as Arc<dyn AddressCensus>,
        hit_sink: Arc::new(RecordingHitSink::new()) as Arc<dyn HitSink>,
        vanity_matcher: None,
        stop_signal: Arc::new(AtomicBool::new(false)),
    };

    let handle = blueprint.ignite().expect("ignición");

    // Dejar que el productor sature la cola y quede bloqueado en la oferta.
    std::thread::sleep(Duration::from_millis(250));
    assert_eq!(handle.queue_depth(), 1, "la cola debe estar saturada");
    assert_eq!(
        handle.telemetry_snapshot().checked_keys,
        0,
        "el trabajador sigue retenido dentro de su primera sonda"
    );

    handle.request_stop();
    let shutdown_timer = Instant::now();
    let report = handle.shutdown();
    let shutdown_latency = shutdown_timer.elapsed();

    assert!(
        shutdown_latency < drain_window + Duration::from_secs(2),
        "el apagado excedió la ventana pactada: {shutdown_latency:?}"
    );
    assert!(!report.drained_cleanly, "el timeout de drenado debe reportarse");
    assert_eq!(report.dropped_batches, 1, "el lote retenido en cola se descarta");

    // Liberar los trabajadores huérfanos para un cierre de proceso limpio.
    release_latch.store(true, Ordering::SeqCst);
    std::thread::sleep(Duration::from_millis(100));

    println!("🏁 [COMPLETE]: Shutdown timeout certified.\n");
}

/**
 * ESCENARIO: El reportero de estadísticas convive con el tejido y se
 * sella con el apagado sin bloquear a ningún trabajador.
 */
#[test]
fn certify_stats_reporter_lifecycle() {
    let mut settings = base_settings();
    settings.statistics_period = Some(Duration::from_millis(100));

    let blueprint = FabricBlueprint {
        settings,
        grid_parameters: GridParameters::new(0, [0u8; 32], false).expect("rejilla unicelular"),
        secret_sources: vec![Box::new(CountedSource { remaining_seeds: 3 })],
        expansion_kernel: Arc::new(ScalarMultiplyKernel),
        address_census: Arc::new(InMemoryCensus::new()) as Arc<dyn AddressCensus>,
        hit_sink: Arc::new(RecordingHitSink::new()) as Arc<dyn HitSink>,
        vanity_matcher: None,
        stop_signal: Arc::new(AtomicBool::new(false)),
    };

    let handle = blueprint.ignite().expect("ignición");
    handle.await_producers();
    std::thread::sleep(Duration::from_millis(250)); // al menos dos ticks
    let report = handle.shutdown();

    assert!(report.drained_cleanly);
    assert_eq!(report.telemetry.checked_keys, 6, "tres semillas, dos sondas cada una");
}
