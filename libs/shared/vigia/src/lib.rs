// [libs/shared/vigia/src/lib.rs]
/*!
 * =================================================================
 * APARATO: VIGÍA NEURAL OBSERVER (V5.0 - VETA MADRE)
 * CLASIFICACIÓN: SHARED UTILITY (ESTRATO L4)
 * RESPONSABILIDAD: BOOTSTRAP DE TELEMETRÍA Y BALIZA DE PÁNICOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SINGLE WRITER: El bootstrap usa 'try_init'; un segundo intento se
 *    degrada a advertencia y reutiliza el suscriptor vigente (los
 *    Proving Grounds re-invocan la ignición sin colapsar).
 * 2. CHAINED BEACON: La baliza de pánicos encadena el hook heredado en
 *    vez de suplantarlo; el volcado estándar del runtime sobrevive.
 * 3. THREAD FORENSICS: Cada colapso registra el nombre del hilo del
 *    tejido (productor/consumidor/stats) junto a sus coordenadas.
 *
 * # Mathematical Proof (Observability Integrity):
 * Los registros del Hot-Loop (hit/miss/vanity) conservan formatos
 * estables línea-a-línea; un colapso abrupto del host nunca deja un
 * hallazgo sin rastro recuperable.
 * =================================================================
 */

use std::any::Any;
use std::panic;
use std::sync::Once;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Estratos de dominio que el filtro por defecto promueve sobre el ruido.
const DOMAIN_TRACE_TARGETS: [&str; 3] = [
    "veta_core_keys",
    "veta_core_census",
    "veta_domain_fabric",
];

/// Guardia de instalación única de la baliza de pánicos.
static PANIC_BEACON_GUARD: Once = Once::new();

/// Inicializa el sistema de trazas del Vigía e instala la baliza de pánicos.
///
/// # Comportamiento:
/// - Desarrollo: consola compacta sin target, nivel 'debug' en el dominio.
/// - Producción: tramas JSON planas, nivel 'info' en el dominio.
/// - `RUST_LOG` presente: el operador manda y el defecto se descarta.
///
/// Una segunda invocación en el mismo proceso no colapsa: advierte y
/// conserva el suscriptor ya vigente.
pub fn init_tracing(service_nominal_identifier: &str) {
    let trace_filter = resolve_trace_filter(service_nominal_identifier);

    let bootstrap_verdict = if cfg!(debug_assertions) {
        tracing_subscriber::fmt()
            .with_env_filter(trace_filter)
            .compact()
            .with_target(false)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(trace_filter)
            .json()
            .flatten_event(true)
            .try_init()
    };

    if bootstrap_verdict.is_err() {
        warn!(
            "⚠️ [VIGIA_REUSED]: A global subscriber already rules this process; [{}] joins it.",
            service_nominal_identifier
        );
    }

    install_panic_beacon(service_nominal_identifier);

    info!(
        "👁️  [VIGIA_ONLINE]: Trace strata levelized for [{}]. Panic beacon ARMED.",
        service_nominal_identifier
    );
}

/// Resuelve el filtro de trazas: el entorno del operador tiene prioridad
/// absoluta; en su ausencia se construye la directiva de dominio.
fn resolve_trace_filter(service_nominal_identifier: &str) -> EnvFilter {
    if let Ok(operator_filter) = EnvFilter::try_from_default_env() {
        return operator_filter;
    }
    EnvFilter::new(domain_filter_directives(service_nominal_identifier))
}

/// Construye la directiva de dominio por defecto: el mundo a 'warn', el
/// servicio y los estratos del tejido al nivel de la compilación.
fn domain_filter_directives(service_nominal_identifier: &str) -> String {
    let domain_level = if cfg!(debug_assertions) { "debug" } else { "info" };

    let mut filter_directives = format!("warn,{service_nominal_identifier}={domain_level}");
    for domain_target in DOMAIN_TRACE_TARGETS {
        filter_directives.push(',');
        filter_directives.push_str(domain_target);
        filter_directives.push('=');
        filter_directives.push_str(domain_level);
    }
    filter_directives
}

/// Instala (una sola vez por proceso) la baliza forense de pánicos.
///
/// La baliza registra servicio, hilo, coordenadas y payload, y después
/// delega en el hook heredado para conservar el volcado estándar.
fn install_panic_beacon(service_nominal_identifier: &str) {
    let service_tag = service_nominal_identifier.to_string();

    PANIC_BEACON_GUARD.call_once(move || {
        let inherited_hook = panic::take_hook();

        panic::set_hook(Box::new(move |panic_metadata| {
            let collapsing_thread = std::thread::current();
            let collapse_coordinates = panic_metadata
                .location()
                .map(ToString::to_string)
                .unwrap_or_else(|| "coordenadas desconocidas".to_string());

            error!(
                target: "panic_beacon",
                service = %service_tag,
                thread = collapsing_thread.name().unwrap_or("anonimo"),
                estrato = %collapse_coordinates,
                "🔥 [THREAD_COLLAPSE]: {}",
                describe_panic_payload(panic_metadata.payload())
            );

            inherited_hook(panic_metadata);
        }));
    });
}

/// Extrae la representación textual de un payload de pánico.
fn describe_panic_payload(panic_payload: &dyn Any) -> &str {
    if let Some(static_text) = panic_payload.downcast_ref::<&str>() {
        return static_text;
    }
    if let Some(owned_text) = panic_payload.downcast_ref::<String>() {
        return owned_text.as_str();
    }
    "payload opaco sin representación textual"
}
