// [libs/domain/search-fabric/src/secret_source.rs]
/*!
 * =================================================================
 * APARATO: SECRET SOURCE ENGINE (V7.1 - VETA MADRE)
 * CLASIFICACIÓN: DOMAIN FABRIC (ESTRATO L2)
 * RESPONSABILIDAD: EMISIÓN PEREZOSA DE SECRETOS SEMILLA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PRIVATE ENTROPY: Cada productor posee su propia fuente (CSPRNG o
 *    región de archivo); cero estado compartido entre hilos.
 * 2. FAULT TOLERANT LINES: Una línea ilegal se registra con su número
 *    y se salta; la cacería jamás muere por una entrada corrupta.
 * 3. PROMPT STOP: La señal de parada se observa entre líneas; la
 *    fuente retorna de inmediato aun a mitad de archivo.
 * =================================================================
 */

use crate::errors::FabricError;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info};
use veta_core_keys::arithmetic::{parse_hex_u256, secret_from_decimal, secret_to_decimal};
use veta_core_keys::hashing::sha256_of_utf8;
use veta_core_keys::wif::wif_to_secret;

/// Formato de decodificación de una línea de entrada a escalar de 256 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretFormat {
    /// Entero decimal de precisión arbitraria (hasta 256 bits).
    BigIntegerDecimal,
    /// Entero hexadecimal (típicamente un resumen SHA256 pre-calculado).
    HexSha256,
    /// SHA256 de los bytes UTF-8 de la línea (brainwallet clásica).
    StringDoSha256,
    /// Llave privada volcada en Wallet Import Format (Base58Check).
    DumpedPrivateKey,
}

impl SecretFormat {
    /**
     * Decodifica una línea de texto al escalar secreto correspondiente.
     *
     * # Errors:
     * Retorna el fallo del códec subyacente; el llamador decide la
     * política (las fuentes de archivo registran y saltan la línea).
     */
    pub fn decode(&self, line: &str) -> Result<[u8; 32], veta_core_keys::errors::KeyError> {
        match self {
            SecretFormat::BigIntegerDecimal => secret_from_decimal(line),
            SecretFormat::HexSha256 => parse_hex_u256(line),
            SecretFormat::StringDoSha256 => Ok(sha256_of_utf8(line)),
            SecretFormat::DumpedPrivateKey => wif_to_secret(line),
        }
    }

    /**
     * Re-codifica un secreto a su representación textual canónica.
     *
     * Solo los formatos numéricos son re-codificables sin pérdida; las
     * transformaciones con hash (frase, WIF con red implícita) retornan `None`.
     */
    #[must_use]
    pub fn encode(&self, secret: &[u8; 32]) -> Option<String> {
        match self {
            SecretFormat::BigIntegerDecimal => Some(secret_to_decimal(secret)),
            SecretFormat::HexSha256 => Some(hex::encode(secret)),
            SecretFormat::StringDoSha256 | SecretFormat::DumpedPrivateKey => None,
        }
    }
}

/// Veredicto de una extracción de la fuente de secretos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOutcome {
    /// Secreto semilla listo para la expansión de rejilla.
    Secret([u8; 32]),
    /// Línea degradada (ya registrada); continuar con la siguiente.
    Skip,
    /// Fuente agotada o parada observada; el productor debe cerrar.
    Exhausted,
}

/// Secuencia perezosa de secretos semilla, privada de cada productor.
pub trait SecretSource: Send {
    /// Extrae el siguiente veredicto de la fuente.
    fn next_secret(&mut self) -> SourceOutcome;
}

/// Fuente infinita alimentada por el CSPRNG del sistema operativo.
///
/// El generador pertenece en exclusiva al productor que la posee.
#[derive(Debug, Default)]
pub struct RandomSecretSource {
    entropy_generator: OsRng,
}

impl RandomSecretSource {
    /// Inicializa la fuente sobre el CSPRNG del sistema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretSource for RandomSecretSource {
    fn next_secret(&mut self) -> SourceOutcome {
        let mut sampled_secret = [0u8; 32];
        self.entropy_generator.fill_bytes(&mut sampled_secret);
        SourceOutcome::Secret(sampled_secret)
    }
}

/// Fuente finita que decodifica líneas de un archivo de entrada.
pub struct FileSecretSource {
    line_reader: Lines<BufReader<File>>,
    secret_format: SecretFormat,
    stop_signal: Arc<AtomicBool>,
    source_label: String,
    current_line_number: u64,
}

impl FileSecretSource {
    /**
     * Abre el archivo de entrada y prepara el decodificador de líneas.
     *
     * # Errors:
     * Propaga el fallo de I/O si el archivo no existe o es ilegible;
     * es un fallo fatal de arranque, no de cacería.
     */
    pub fn open<P: AsRef<Path>>(
        input_path: P,
        secret_format: SecretFormat,
        stop_signal: Arc<AtomicBool>,
    ) -> Result<Self, std::io::Error> {
        let source_label = input_path.as_ref().display().to_string();
        let file_handle = File::open(&input_path)?;

        info!("📖 [SECRET_SOURCE]: Input strata [{}] opened with format {:?}.", source_label, secret_format);

        Ok(Self {
            line_reader: BufReader::new(file_handle).lines(),
            secret_format,
            stop_signal,
            source_label,
            current_line_number: 0,
        })
    }
}

impl SecretSource for FileSecretSource {
    fn next_secret(&mut self) -> SourceOutcome {
        // La parada se observa entre líneas: retorno inmediato aun a mitad de archivo.
        if self.stop_signal.load(Ordering::Relaxed) {
            return SourceOutcome::Exhausted;
        }

        let Some(line_result) = self.line_reader.next() else {
            info!(
                "🏁 [SECRET_SOURCE]: Input strata [{}] exhausted after {} lines.",
                self.source_label, self.current_line_number
            );
            return SourceOutcome::Exhausted;
        };
        self.current_line_number += 1;

        let raw_line = match line_result {
            Ok(text) => text,
            Err(io_fault) => {
                error!(
                    "❌ [SOURCE_IO_FAULT]: [{}] line {} unreadable: {}. Sealing source.",
                    self.source_label, self.current_line_number, io_fault
                );
                return SourceOutcome::Exhausted;
            }
        };

        let trimmed_line = raw_line.trim();
        if trimmed_line.is_empty() {
            return SourceOutcome::Skip;
        }

        match self.secret_format.decode(trimmed_line) {
            Ok(decoded_secret) => SourceOutcome::Secret(decoded_secret),
            Err(decoding_fault) => {
                let parse_fault = FabricError::SourceParse {
                    line_number: self.current_line_number,
                    reason: decoding_fault.to_string(),
                };
                error!("❌ [SOURCE_PARSE_FAULT]: [{}] {}", self.source_label, parse_fault);
                SourceOutcome::Skip
            }
        }
    }
}

impl std::fmt::Debug for FileSecretSource {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FileSecretSource")
            .field("source_label", &self.source_label)
            .field("secret_format", &self.secret_format)
            .field("current_line_number", &self.current_line_number)
            .finish_non_exhaustive()
    }
}
