// [apps/hunter-worker/src/main.rs]
/*!
 * =================================================================
 * APARATO: HUNTER WORKER SHELL (V4.3 - VETA MADRE)
 * CLASIFICACIÓN: APPLICATION LAYER (ENTRY POINT)
 * RESPONSABILIDAD: BOOTSTRAP DE ENTORNO E IGNICIÓN DEL TEJIDO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ARCHITECTURAL PURITY: El caparazón solo parsea directivas, abre el
 *    censo, cablea señales y delega la totalidad de la operación al
 *    tejido de búsqueda L2.
 * 2. SINGLE FAILURE LINE: Un fallo de arranque imprime exactamente una
 *    línea de error nombrando el campo ofensor y retorna código
 *    distinto de cero.
 * 3. ORDERLY SEAL: ctrl-c eleva el token de parada; el apagado drena,
 *    une y reporta antes de retornar cero.
 *
 * # Mathematical Proof (Deterministic Init):
 * El nodo solo enciende si el censo hidrató y las directivas validaron.
 * El Arc<AtomicBool> único garantiza que la señal de apagado se propague
 * sin condiciones de carrera entre los hilos del tejido.
 * =================================================================
 */

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

use veta_core_census::filter::CensusFilter;
use veta_core_census::membership::AddressCensus;
use veta_domain_fabric::fabric::FabricBlueprint;
use veta_domain_fabric::hit_sink::TracingHitSink;
use veta_domain_fabric::producer::{GridKernel, PointAdditionKernel, ScalarMultiplyKernel};
use veta_domain_fabric::secret_source::{FileSecretSource, RandomSecretSource, SecretSource};
use veta_hunter_lib::config::{HunterConfig, HunterDirectives, KernelDirective, SecretSourcePlan};

fn main() -> Result<()> {
    // 1. INICIALIZACIÓN DEL SISTEMA DE OBSERVABILIDAD
    veta_shared_vigia::init_tracing("veta_hunter");

    info!(
        "💠 [SHELL]: Sovereign hunt ignition sequence V4.3 starting at {}.",
        chrono::Utc::now().to_rfc3339()
    );

    // 2. PARSEO Y VALIDACIÓN DE DIRECTIVAS ESTRATÉGICAS
    let directives = HunterDirectives::parse();
    let hunter_config = match HunterConfig::from_directives(&directives) {
        Ok(validated_config) => validated_config,
        Err(config_fault) => {
            error!("❌ [CONFIG_FAULT]: {}", config_fault);
            std::process::exit(1);
        }
    };

    // 3. HIDRATACIÓN DEL CENSO (una sola apertura, inmutable de por vida)
    let address_census: Arc<dyn AddressCensus> =
        match CensusFilter::open(&hunter_config.address_index_path) {
            Ok(census_filter) => Arc::new(census_filter),
            Err(census_fault) => {
                error!("❌ [CONFIG_FAULT]: campo 'addressIndexPath': {}", census_fault);
                std::process::exit(1);
            }
        };

    // 4. PROTOCOLO DE SEÑALES DE SISTEMA (Terminación Ordenada)
    let stop_signal = Arc::new(AtomicBool::new(false));
    let stop_signal_for_handler = Arc::clone(&stop_signal);
    ctrlc::set_handler(move || {
        warn!("⚠️ [SIGNAL]: Termination requested by host. Sealing current strata...");
        stop_signal_for_handler.store(true, Ordering::SeqCst);
    })
    .context("SIGNAL_FAULT: unable to claim the ctrl-c handler")?;

    // 5. ENSAMBLADO DE FUENTES PRIVADAS (una por productor)
    let secret_sources: Vec<Box<dyn SecretSource>> = match &hunter_config.secret_source_plan {
        SecretSourcePlan::Random => (0..hunter_config.producer_count)
            .map(|_| Box::new(RandomSecretSource::new()) as Box<dyn SecretSource>)
            .collect(),
        SecretSourcePlan::File { path, format } => {
            if hunter_config.producer_count > 1 {
                warn!("⚠️ [SOURCE_POLICY]: File source owns a single handle region; clamping producers to 1.");
            }
            let file_source =
                match FileSecretSource::open(path, *format, Arc::clone(&stop_signal)) {
                    Ok(source) => source,
                    Err(io_fault) => {
                        error!("❌ [CONFIG_FAULT]: campo 'inputFile': {}", io_fault);
                        std::process::exit(1);
                    }
                };
            vec![Box::new(file_source)]
        }
    };

    // 6. IGNICIÓN DEL TEJIDO DE BÚSQUEDA (ESTRATO L2)
    let expansion_kernel: Arc<dyn GridKernel> = match hunter_config.kernel {
        KernelDirective::ScalarMultiply => Arc::new(ScalarMultiplyKernel),
        KernelDirective::PointAddition => Arc::new(PointAdditionKernel),
    };

    let blueprint = FabricBlueprint {
        settings: hunter_config.fabric_settings,
        grid_parameters: hunter_config.grid_parameters,
        secret_sources,
        expansion_kernel,
        address_census,
        hit_sink: Arc::new(TracingHitSink::new()),
        vanity_matcher: hunter_config.vanity_matcher,
        stop_signal,
    };

    let fabric_handle = blueprint
        .ignite()
        .context("FABRIC_FAULT: ignition collapsed")?;

    info!("🚀 [SHELL]: Control handed to the search fabric. Transitioning to OPERATIONAL.");

    // 7. ESPERA Y CIERRE DETERMINISTA
    // Los productores sellan su finalización al agotar la fuente, tras el
    // lote run-once, o al observar la señal de parada del host.
    fabric_handle.await_producers();
    let shutdown_report = fabric_handle.shutdown();

    info!(
        "🏁 [SHELL]: Hunt sealed. Probes: {} | hits: {} | vanity hits: {} | drained cleanly: {}.",
        shutdown_report.telemetry.checked_keys,
        shutdown_report.telemetry.hits,
        shutdown_report.telemetry.vanity_hits,
        shutdown_report.drained_cleanly
    );

    Ok(())
}
