// [libs/domain/search-fabric/src/vanity.rs]
/*!
 * =================================================================
 * APARATO: VANITY PATTERN MATCHER (V7.0 - VETA MADRE)
 * CLASIFICACIÓN: DOMAIN FABRIC (ESTRATO L2)
 * RESPONSABILIDAD: COTEJO DE DIRECCIONES BASE58 CONTRA PATRÓN DE USUARIO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ENTIRE-STRING SEMANTICS: El patrón debe cubrir la dirección
 *    completa; se sella dentro de un grupo anclado no-capturante.
 * 2. STARTUP FAILURE DOMAIN: La compilación ocurre una sola vez en el
 *    arranque; un patrón ilegal es un fallo de configuración fatal.
 * =================================================================
 */

use regex::Regex;
use tracing::info;

/// Cotejador compilado del patrón vanity del operador.
#[derive(Debug, Clone)]
pub struct VanityMatcher {
    compiled_pattern: Regex,
    nominal_pattern: String,
}

impl VanityMatcher {
    /**
     * Compila el patrón con semántica de cadena completa.
     *
     * # Errors:
     * Propaga el fallo del motor regex; el arranque debe abortar con un
     * error de configuración nombrando el campo.
     */
    pub fn compile(user_pattern: &str) -> Result<Self, regex::Error> {
        let anchored_pattern = format!("^(?:{user_pattern})$");
        let compiled_pattern = Regex::new(&anchored_pattern)?;

        info!("🎭 [VANITY]: Pattern [{}] compiled with entire-string semantics.", user_pattern);

        Ok(Self {
            compiled_pattern,
            nominal_pattern: user_pattern.to_string(),
        })
    }

    /// Evalúa si la dirección completa satisface el patrón.
    #[inline(always)]
    #[must_use]
    pub fn matches_entire(&self, base58_address: &str) -> bool {
        self.compiled_pattern.is_match(base58_address)
    }

    /// Patrón nominal tal como lo escribió el operador.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.nominal_pattern
    }
}
