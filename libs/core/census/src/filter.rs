// [libs/core/census/src/filter.rs]
#![allow(unsafe_code)] // Autorizado exclusivamente para el mapeo de memoria virtual (mmap)

/*!
 * =================================================================
 * APARATO: PERSISTENT CENSUS FILTER (V6.0 - VETA MADRE)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: MATRIZ DE BLOOM PERSISTENTE CON ARTEFACTO SELLADO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SEALED ARTIFACT: El censo en disco lleva sello mágico y revisión
 *    de layout; un artefacto ajeno o de otra generación se rechaza
 *    antes de tocar el decodificador binario.
 * 2. SINGLE HYDRATION PATH: Una sola puerta de entrada ('open') decide
 *    internamente entre mapeo de memoria y lectura buffered; el
 *    llamador nunca elige la vía.
 * 3. STARTUP CONTRACT: El censo se abre una vez en el arranque; tras
 *    la hidratación es inmutable y concurrente-seguro para N sondas.
 *
 * # Mathematical Proof (Bloom Saturation):
 * La tasa de falsos positivos pactada en la construcción sobrevive al
 * viaje por disco: el cuerpo binario preserva la matriz bit a bit y la
 * revisión de layout veda cualquier reinterpretación entre versiones.
 * =================================================================
 */

use crate::errors::CensusError;
use crate::membership::AddressCensus;
use bloomfilter::Bloom;
use memmap2::{Mmap, MmapOptions};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Sello mágico que encabeza todo artefacto de censo legítimo.
const ARTIFACT_MAGIC: [u8; 4] = *b"VCNS";
/// Revisión del layout binario; se incrementa ante cualquier ruptura.
const ARTIFACT_LAYOUT_REVISION: u16 = 1;
/// Cota de tamaño del artefacto para frenar agotamientos de memoria (1 GiB).
const ARTIFACT_SIZE_CEILING_BYTES: u64 = 1 << 30;

/// Matriz de búsqueda viva del censo de direcciones.
///
/// Inmutable tras la hidratación; las sondas son concurrente-seguras.
pub struct CensusFilter {
    bloom_matrix: Bloom<[u8; 20]>,
    identity_count: u64,
}

/// Vista prestada del censo para el sellado a disco (cero clones).
#[derive(Serialize)]
struct CensusArtifactRef<'a> {
    layout_revision: u16,
    identity_count: u64,
    bloom_matrix: &'a Bloom<[u8; 20]>,
}

/// Cuerpo decodificado de un artefacto hidratado.
#[derive(Deserialize)]
struct CensusArtifact {
    layout_revision: u16,
    identity_count: u64,
    bloom_matrix: Bloom<[u8; 20]>,
}

/// Bytes crudos de un artefacto, por la vía que el kernel haya concedido.
enum ArtifactBytes {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl ArtifactBytes {
    fn as_bytes(&self) -> &[u8] {
        match self {
            ArtifactBytes::Mapped(mapped_region) => mapped_region,
            ArtifactBytes::Buffered(buffered_bytes) => buffered_bytes,
        }
    }
}

/**
 * Obtiene los bytes del artefacto: mmap si el kernel lo concede,
 * lectura buffered como degradación con rastro.
 *
 * # Safety:
 * El mapeo es de solo-lectura sobre un descriptor ya abierto y medido;
 * se asume que el artefacto no muta durante la vida del proceso.
 */
fn hydrate_artifact_bytes(artifact_file: &File) -> Result<ArtifactBytes, CensusError> {
    // SAFETY: descriptor read-only validado por el llamador; inmutabilidad
    // del archivo asumida durante la ejecución.
    match unsafe { MmapOptions::new().map(artifact_file) } {
        Ok(mapped_region) => Ok(ArtifactBytes::Mapped(mapped_region)),
        Err(mmap_rejection) => {
            warn!("🐢 [CENSUS_MMAP_REJECTED]: {}. Falling back to buffered read.", mmap_rejection);
            let mut buffered_bytes = Vec::new();
            let mut fallback_reader = artifact_file;
            fallback_reader.read_to_end(&mut buffered_bytes)?;
            Ok(ArtifactBytes::Buffered(buffered_bytes))
        }
    }
}

impl CensusFilter {
    /**
     * Dimensiona una matriz vacía para el volumen y la tasa pactados.
     *
     * Las entradas degeneradas se acotan en vez de fallar: capacidad
     * mínima de una identidad, tasa confinada a (0, 0.5].
     */
    #[must_use]
    pub fn with_capacity(expected_identities: usize, target_false_positive_rate: f64) -> Self {
        let bounded_capacity = expected_identities.max(1);
        let bounded_rate = target_false_positive_rate.clamp(1e-9, 0.5);

        Self {
            bloom_matrix: Bloom::new_for_fp_rate(bounded_capacity, bounded_rate),
            identity_count: 0,
        }
    }

    /// Registra una huella HASH160 en la matriz.
    #[inline(always)]
    pub fn register(&mut self, fingerprint: [u8; 20]) {
        self.bloom_matrix.set(&fingerprint);
        self.identity_count += 1;
    }

    /// Volumen de identidades registradas en el censo.
    #[must_use]
    pub fn identity_count(&self) -> u64 {
        self.identity_count
    }

    /**
     * Sella el censo en disco: sello mágico + cuerpo binario.
     *
     * # Errors:
     * Propaga los fallos de I/O del sistema de archivos y los colapsos
     * del codificador binario.
     */
    pub fn seal_to_disk<P: AsRef<Path>>(&self, artifact_path: P) -> Result<(), CensusError> {
        let sealing_timer = Instant::now();
        let mut artifact_writer = BufWriter::new(File::create(&artifact_path)?);

        artifact_writer.write_all(&ARTIFACT_MAGIC)?;
        bincode::serialize_into(
            &mut artifact_writer,
            &CensusArtifactRef {
                layout_revision: ARTIFACT_LAYOUT_REVISION,
                identity_count: self.identity_count,
                bloom_matrix: &self.bloom_matrix,
            },
        )?;
        artifact_writer.flush()?;

        info!(
            "💾 [CENSUS_SEALED]: {} identities crystallized. Latency: {:?}",
            self.identity_count,
            sealing_timer.elapsed()
        );
        Ok(())
    }

    /**
     * Puerta única de apertura del censo en el arranque del nodo.
     *
     * Mide el artefacto, obtiene sus bytes (mmap o buffered), valida el
     * sello mágico y la revisión de layout, y decodifica el cuerpo.
     *
     * # Errors:
     * - `CensusError::IoError` si el artefacto no existe o es ilegible.
     * - `CensusError::MalformedArtifact` ante sello, tamaño o revisión
     *   ilegales.
     * - `CensusError::SerializationError` si el cuerpo binario colapsa.
     */
    pub fn open<P: AsRef<Path>>(artifact_path: P) -> Result<Self, CensusError> {
        let hydration_timer = Instant::now();
        let artifact_label = artifact_path.as_ref().display().to_string();
        let artifact_file = File::open(&artifact_path)?;

        // Auditoría de pre-vuelo sobre el tamaño declarado por el kernel.
        let artifact_size = artifact_file.metadata()?.len();
        if artifact_size <= ARTIFACT_MAGIC.len() as u64 {
            return Err(CensusError::MalformedArtifact(format!(
                "[{artifact_label}] truncado: {artifact_size} bytes"
            )));
        }
        if artifact_size > ARTIFACT_SIZE_CEILING_BYTES {
            return Err(CensusError::MalformedArtifact(format!(
                "[{artifact_label}] excede la cota de {ARTIFACT_SIZE_CEILING_BYTES} bytes"
            )));
        }

        let raw_artifact = hydrate_artifact_bytes(&artifact_file)?;
        let (magic_header, artifact_body) = raw_artifact.as_bytes().split_at(ARTIFACT_MAGIC.len());

        if magic_header != ARTIFACT_MAGIC.as_slice() {
            return Err(CensusError::MalformedArtifact(format!(
                "[{artifact_label}] sello mágico desconocido"
            )));
        }

        let decoded_artifact: CensusArtifact = bincode::deserialize(artifact_body)?;
        if decoded_artifact.layout_revision != ARTIFACT_LAYOUT_REVISION {
            return Err(CensusError::MalformedArtifact(format!(
                "[{artifact_label}] revisión de layout {} incompatible con {}",
                decoded_artifact.layout_revision, ARTIFACT_LAYOUT_REVISION
            )));
        }

        info!(
            "🚀 [CENSUS_ONLINE]: {} identities hydrated from [{}]. Latency: {:?}",
            decoded_artifact.identity_count,
            artifact_label,
            hydration_timer.elapsed()
        );

        Ok(Self {
            bloom_matrix: decoded_artifact.bloom_matrix,
            identity_count: decoded_artifact.identity_count,
        })
    }
}

impl AddressCensus for CensusFilter {
    /**
     * Sonda de membresía con latencia constante.
     *
     * # Returns:
     * - `Ok(true)` ante una colisión probable (FPR pactado).
     * - `Ok(false)` ante la ausencia absoluta del rastro.
     */
    #[inline(always)]
    fn contains(&self, hash160_payload: &[u8; 20]) -> Result<bool, CensusError> {
        Ok(self.bloom_matrix.check(hash160_payload))
    }
}
