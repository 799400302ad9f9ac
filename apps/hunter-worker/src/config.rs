// [apps/hunter-worker/src/config.rs]
/*!
 * =================================================================
 * APARATO: HUNTER DIRECTIVES & CONFIG VALIDATOR (V4.2 - VETA MADRE)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L3)
 * RESPONSABILIDAD: PARSEO DE DIRECTIVAS Y DOMINIO DE FALLO DE ARRANQUE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SINGLE FAILURE LINE: Toda directiva ilegal produce exactamente un
 *    error nombrando el campo ofensor; el arranque aborta con código
 *    distinto de cero.
 * 2. ENV FALLBACK: Cada directiva acepta bandera larga o variable de
 *    entorno, al estilo de los nodos de enjambre.
 * 3. COMPILE ONCE: El patrón vanity se compila aquí, en el dominio de
 *    fallo del arranque, jamás en el Hot-Loop.
 * =================================================================
 */

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use veta_core_keys::arithmetic::parse_hex_u256;
use veta_core_keys::wif::Network;
use veta_domain_fabric::errors::FabricError;
use veta_domain_fabric::fabric::FabricSettings;
use veta_domain_fabric::producer::GridParameters;
use veta_domain_fabric::secret_source::SecretFormat;
use veta_domain_fabric::vanity::VanityMatcher;

/**
 * Directivas de mando para el nodo cazador.
 * Configuración inyectada vía CLI o variables de entorno.
 */
#[derive(Parser, Debug)]
#[command(
    author = "Raz Podesta <metaShark Tech>",
    version = "4.2",
    about = "Veta Madre Sovereign Key Hunter // Pipelined HASH160 census audit"
)]
pub struct HunterDirectives {
    // --- ESTRATO CONSUMIDOR ---
    /// Cantidad de trabajadores consumidores (por defecto, núcleos físicos).
    #[arg(long, env = "VETA_THREADS")]
    pub threads: Option<usize>,

    /// Capacidad Q de la cola de lotes.
    #[arg(long, env = "VETA_QUEUE_SIZE", default_value_t = 32)]
    pub queue_size: usize,

    /// Siesta del consumidor tras una ronda vacía, en milisegundos.
    #[arg(long, env = "VETA_DELAY_EMPTY_CONSUMER_MS", default_value_t = 50)]
    pub delay_empty_consumer: u64,

    /// Re-deriva cada llave vía la librería de referencia y compara byte a byte.
    #[arg(long, env = "VETA_RUNTIME_PUBLIC_KEY_CALCULATION_CHECK")]
    pub runtime_public_key_calculation_check: bool,

    /// Habilita el cotejo vanity de direcciones Base58.
    #[arg(long, env = "VETA_ENABLE_VANITY")]
    pub enable_vanity: bool,

    /// Patrón regex (cadena completa) para el cotejo vanity.
    #[arg(long, env = "VETA_VANITY_PATTERN")]
    pub vanity_pattern: Option<String>,

    /// Período del reportero de estadísticas en segundos (> 0).
    #[arg(long, env = "VETA_PRINT_STATISTICS_EVERY_N_SECONDS", default_value_t = 10)]
    pub print_statistics_every_n_seconds: u64,

    /// Ruta del artefacto binario del censo de direcciones.
    #[arg(long, env = "VETA_ADDRESS_INDEX_PATH")]
    pub address_index_path: PathBuf,

    // --- ESTRATO PRODUCTOR ---
    /// Cantidad P de productores de rejilla.
    #[arg(long, env = "VETA_PRODUCERS", default_value_t = 1)]
    pub producers: usize,

    /// Bits bajos del secreto que se enumeran (tamaño de lote 2^g).
    #[arg(long, env = "VETA_GRID_NUM_BITS", default_value_t = 8)]
    pub grid_num_bits: u8,

    /// Máscara de aniquilación de 256 bits en hexadecimal.
    #[arg(long, env = "VETA_KILL_BITS", default_value = "ff")]
    pub kill_bits: String,

    /// Emite un único lote por productor y cierra la cacería.
    #[arg(long, env = "VETA_RUN_ONCE")]
    pub run_once: bool,

    /// Red de destino para WIF y direcciones del rastro.
    #[arg(long, env = "VETA_NETWORK", value_enum, default_value_t = NetworkDirective::Mainnet)]
    pub network: NetworkDirective,

    /// Variante de fuente de secretos semilla.
    #[arg(long, env = "VETA_SECRET_SOURCE", value_enum, default_value_t = SecretSourceDirective::Random)]
    pub secret_source: SecretSourceDirective,

    /// Archivo de entrada para la fuente de secretos 'file'.
    #[arg(long, env = "VETA_INPUT_FILE")]
    pub input_file: Option<PathBuf>,

    /// Formato de decodificación de cada línea del archivo de entrada.
    #[arg(long, env = "VETA_SECRET_FORMAT", value_enum, default_value_t = SecretFormatDirective::StringDoSha256)]
    pub secret_format: SecretFormatDirective,

    /// Kernel de expansión de rejilla del pool productor.
    #[arg(long, env = "VETA_KERNEL", value_enum, default_value_t = KernelDirective::ScalarMultiply)]
    pub kernel: KernelDirective,

    /// Ventana máxima de drenado durante el apagado, en segundos.
    #[arg(long, env = "VETA_AWAIT_QUEUE_EMPTY_SECONDS", default_value_t = 60)]
    pub await_queue_empty_seconds: u64,
}

/// Selector de red expuesto como directiva.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NetworkDirective {
    /// Red principal de Bitcoin.
    Mainnet,
    /// Red de pruebas.
    Testnet,
}

impl From<NetworkDirective> for Network {
    fn from(directive: NetworkDirective) -> Self {
        match directive {
            NetworkDirective::Mainnet => Network::Mainnet,
            NetworkDirective::Testnet => Network::Testnet,
        }
    }
}

/// Variante de fuente de secretos expuesta como directiva.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SecretSourceDirective {
    /// CSPRNG del sistema, infinita, privada por productor.
    Random,
    /// Líneas de un archivo decodificadas por formato configurado.
    File,
}

/// Formato de secreto expuesto como directiva.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SecretFormatDirective {
    /// Entero decimal de precisión arbitraria.
    BigIntegerDecimal,
    /// Entero hexadecimal (resumen SHA256 pre-calculado).
    HexSha256,
    /// SHA256 de los bytes UTF-8 de la línea.
    StringDoSha256,
    /// Llave privada volcada en WIF.
    DumpedPrivateKey,
}

impl From<SecretFormatDirective> for SecretFormat {
    fn from(directive: SecretFormatDirective) -> Self {
        match directive {
            SecretFormatDirective::BigIntegerDecimal => SecretFormat::BigIntegerDecimal,
            SecretFormatDirective::HexSha256 => SecretFormat::HexSha256,
            SecretFormatDirective::StringDoSha256 => SecretFormat::StringDoSha256,
            SecretFormatDirective::DumpedPrivateKey => SecretFormat::DumpedPrivateKey,
        }
    }
}

/// Kernel de expansión expuesto como directiva.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KernelDirective {
    /// Multiplicación escalar plena por celda (variante canónica CPU).
    ScalarMultiply,
    /// Ancla única más adiciones de punto (contrato de despacho por lotes).
    PointAddition,
}

/// Fallos de configuración: fatales en el arranque, nombran el campo ofensor.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Patrón vanity sintácticamente ilegal.
    #[error("campo 'vanityPattern': {0}")]
    VanityPattern(#[from] regex::Error),

    /// Cotejo vanity habilitado sin patrón.
    #[error("campo 'vanityPattern': requerido cuando 'enableVanity' está activo")]
    VanityPatternMissing,

    /// Período de estadísticas fuera de dominio.
    #[error("campo 'printStatisticsEveryNSeconds': debe ser mayor que cero")]
    NonPositiveStatsPeriod,

    /// Parámetros de rejilla ilegales (bits o máscara).
    #[error("campo 'gridNumBits'/'killBits': {0}")]
    Grid(FabricError),

    /// Máscara de aniquilación hexadecimal malformada.
    #[error("campo 'killBits': {0}")]
    KillBits(veta_core_keys::errors::KeyError),

    /// Pool consumidor vacío.
    #[error("campo 'threads': debe ser mayor que cero")]
    NoConsumerThreads,

    /// Pool productor vacío.
    #[error("campo 'producers': debe ser mayor que cero")]
    NoProducers,

    /// Fuente de archivo sin ruta de entrada.
    #[error("campo 'inputFile': requerido cuando 'secretSource' es 'file'")]
    InputFileMissing,
}

/// Plan de construcción de las fuentes de secretos (una por productor).
#[derive(Debug, Clone)]
pub enum SecretSourcePlan {
    /// Cada productor posee su propio CSPRNG.
    Random,
    /// Un único productor recorre el archivo de entrada.
    File {
        /// Ruta del archivo de semillas.
        path: PathBuf,
        /// Formato de decodificación por línea.
        format: SecretFormat,
    },
}

/// Configuración validada y sellada del nodo cazador.
#[derive(Debug)]
pub struct HunterConfig {
    /// Ajustes globales del tejido.
    pub fabric_settings: FabricSettings,
    /// Parámetros de rejilla compartidos.
    pub grid_parameters: GridParameters,
    /// Cantidad P de productores.
    pub producer_count: usize,
    /// Plan de fuentes de secretos.
    pub secret_source_plan: SecretSourcePlan,
    /// Kernel de expansión elegido.
    pub kernel: KernelDirective,
    /// Cotejador vanity compilado (cadena completa).
    pub vanity_matcher: Option<Arc<VanityMatcher>>,
    /// Ruta del artefacto del censo.
    pub address_index_path: PathBuf,
}

impl HunterConfig {
    /**
     * Valida las directivas y sella la configuración del nodo.
     *
     * # Errors:
     * Retorna el primer `ConfigError` encontrado; el llamador lo imprime
     * como única línea de error y aborta con código distinto de cero.
     */
    pub fn from_directives(directives: &HunterDirectives) -> Result<Self, ConfigError> {
        let consumer_thread_count = directives.threads.unwrap_or_else(num_cpus::get);
        if consumer_thread_count == 0 {
            return Err(ConfigError::NoConsumerThreads);
        }

        if directives.producers == 0 {
            return Err(ConfigError::NoProducers);
        }

        if directives.print_statistics_every_n_seconds == 0 {
            return Err(ConfigError::NonPositiveStatsPeriod);
        }

        let kill_mask = parse_hex_u256(&directives.kill_bits).map_err(ConfigError::KillBits)?;
        let grid_parameters =
            GridParameters::new(directives.grid_num_bits, kill_mask, directives.run_once)
                .map_err(ConfigError::Grid)?;

        let vanity_matcher = if directives.enable_vanity {
            let pattern = directives
                .vanity_pattern
                .as_deref()
                .ok_or(ConfigError::VanityPatternMissing)?;
            Some(Arc::new(VanityMatcher::compile(pattern)?))
        } else {
            None
        };

        let secret_source_plan = match directives.secret_source {
            SecretSourceDirective::Random => SecretSourcePlan::Random,
            SecretSourceDirective::File => {
                let path = directives
                    .input_file
                    .clone()
                    .ok_or(ConfigError::InputFileMissing)?;
                SecretSourcePlan::File {
                    path,
                    format: directives.secret_format.into(),
                }
            }
        };

        let fabric_settings = FabricSettings {
            consumer_thread_count,
            queue_capacity: directives.queue_size,
            delay_empty_consumer: Duration::from_millis(directives.delay_empty_consumer),
            await_queue_empty: Duration::from_secs(directives.await_queue_empty_seconds),
            statistics_period: Some(Duration::from_secs(directives.print_statistics_every_n_seconds)),
            runtime_public_key_calculation_check: directives.runtime_public_key_calculation_check,
            network: directives.network.into(),
        };

        Ok(Self {
            fabric_settings,
            grid_parameters,
            producer_count: directives.producers,
            secret_source_plan,
            kernel: directives.kernel,
            vanity_matcher,
            address_index_path: directives.address_index_path.clone(),
        })
    }
}
