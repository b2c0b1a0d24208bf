//! # Dimension Normalization Module
//!
//! Questo modulo contiene la logica pura per il calcolo delle dimensioni
//! target delle immagini: divisibili per 4 e dentro il limite 4K.
//!
//! ## Responsabilità:
//! - Calcolo del fattore di scala quando il lato lungo supera `max_dimension`
//! - Arrotondamento indipendente di ogni asse al multiplo di 4 più vicino
//! - Clamp correttivo post-arrotondamento (mai oltre il limite)
//! - Clamp minimo a 4 pixel per asse
//!
//! ## Politica di arrotondamento:
//! Il multiplo di 4 più vicino viene scelto con **round half away from zero**
//! (`f64::round`), quindi un valore esattamente a metà strada (v % 4 == 2)
//! arrotonda verso l'alto. La scelta è documentata perché cambia l'output a
//! dimensioni di confine esatte.
//!
//! ## Note:
//! - L'arrotondamento è per-asse, non congiunto: l'aspect ratio può essere
//!   perturbato fino a 2 pixel per asse. È un'imprecisione accettata.
//! - Nessun side effect: tutte le funzioni sono pure e testabili senza I/O.

/// An image size in pixels. Both axes are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Length of the longer side.
    pub fn longer_side(&self) -> u32 {
        self.width.max(self.height)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Output of [`normalize`]: the target size plus whether it differs
/// from the original on either axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDecision {
    pub target: Dimensions,
    pub changed: bool,
}

/// Round a value to the nearest multiple of 4.
///
/// Half-way values (v % 4 == 2) round up: `round_to_multiple_of_4(6) == 8`.
pub fn round_to_multiple_of_4(value: u32) -> u32 {
    ((value as f64 / 4.0).round() as u32) * 4
}

/// Compute target dimensions that are divisible by 4, within `max_dimension`
/// on the longer side, and as close as per-axis rounding allows to the
/// original aspect ratio.
///
/// `max_dimension` must already be a multiple of 4 and at least 4; the CLI
/// layer normalizes it before any file is processed.
///
/// The steps, in order:
/// 1. Scale both axes down if the longer side exceeds `max_dimension`,
///    truncating each product to an integer.
/// 2. Round each axis independently to the nearest multiple of 4.
/// 3. Corrective pass while either axis is still over the limit: shave 4 from
///    every over-limit axis, then re-check.
/// 4. Floor both axes at 4.
///
/// Step 4 can grow a tiny image (3x3 becomes 4x4); that is intentional.
pub fn normalize(width: u32, height: u32, max_dimension: u32) -> ResizeDecision {
    debug_assert!(width > 0 && height > 0);
    debug_assert!(max_dimension >= 4 && max_dimension % 4 == 0);

    let (mut w, mut h) = (width, height);

    if w.max(h) > max_dimension {
        let scale = max_dimension as f64 / w.max(h) as f64;
        // Truncating cast, not rounding: matches the reference semantics and
        // can skew the aspect ratio by up to one extra pixel per axis.
        w = (w as f64 * scale) as u32;
        h = (h as f64 * scale) as u32;
    }

    let mut new_width = round_to_multiple_of_4(w);
    let mut new_height = round_to_multiple_of_4(h);

    // Rounding up may have pushed an axis past the limit. One corrective pass
    // shaves every over-limit axis by 4, then the condition is re-checked.
    while new_width.max(new_height) > max_dimension {
        if new_width > max_dimension {
            new_width -= 4;
        }
        if new_height > max_dimension {
            new_height -= 4;
        }
    }

    new_width = new_width.max(4);
    new_height = new_height.max(4);

    ResizeDecision {
        target: Dimensions::new(new_width, new_height),
        changed: new_width != width || new_height != height,
    }
}
