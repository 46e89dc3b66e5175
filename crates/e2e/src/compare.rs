//! Cross-view consistency comparator
//!
//! The suite's one reusable pattern: read the same logical field from
//! several independent UI surfaces (list row, edit page, modal, deficit
//! report, warehouse report), normalize each reading, and soft-assert that
//! every surface agrees with the first one.

use serde::{Deserialize, Serialize};

use crate::soft::SoftAssert;

/// The UI surface a reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    MainList,
    EditPage,
    Modal,
    Deficit,
    Warehouse,
}

impl Surface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::MainList => "main list",
            Surface::EditPage => "edit page",
            Surface::Modal => "modal",
            Surface::Deficit => "deficit page",
            Surface::Warehouse => "warehouse page",
        }
    }
}

/// Raw field value read from one surface.
#[derive(Debug, Clone)]
pub struct Reading {
    pub surface: Surface,
    pub raw: String,
}

/// Collects readings of one logical field and verifies pairwise agreement.
pub struct CrossViewCheck<F>
where
    F: Fn(&str) -> String,
{
    field: String,
    normalize: F,
    readings: Vec<Reading>,
}

impl<F> CrossViewCheck<F>
where
    F: Fn(&str) -> String,
{
    pub fn new(field: &str, normalize: F) -> Self {
        Self {
            field: field.to_string(),
            normalize,
            readings: Vec::new(),
        }
    }

    pub fn add(&mut self, surface: Surface, raw: impl Into<String>) -> &mut Self {
        self.readings.push(Reading {
            surface,
            raw: raw.into(),
        });
        self
    }

    /// Soft-compare every surface against the first one added.
    ///
    /// Returns true when all surfaces agree. Zero or one reading passes
    /// vacuously.
    pub fn verify(&self, soft: &mut SoftAssert) -> bool {
        let Some((reference, rest)) = self.readings.split_first() else {
            return true;
        };
        let expected = (self.normalize)(&reference.raw);

        let mut all_agree = true;
        for reading in rest {
            let actual = (self.normalize)(&reading.raw);
            let context = format!(
                "{} on {} vs {}",
                self.field,
                reading.surface.as_str(),
                reference.surface.as_str()
            );
            if !soft.check_eq(&context, &expected, &actual) {
                all_agree = false;
            }
        }
        all_agree
    }
}

/// Trim-only normalization for plain text fields.
pub fn identity(raw: &str) -> String {
    raw.trim().to_string()
}

/// Order-key normalization (strip `№`, drop ` от <date>`).
pub fn order_key(raw: &str) -> String {
    crate::normalize::order_key(raw)
}

/// Canonical date normalization; unparseable input is kept verbatim so the
/// mismatch shows the raw value.
pub fn date(raw: &str) -> String {
    crate::normalize::canonical_date(raw).unwrap_or_else(|| raw.trim().to_string())
}

/// Quantity normalization (digit-group separators stripped).
pub fn quantity(raw: &str) -> String {
    crate::normalize::normalize_qty(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agreeing_surfaces_stay_clean() {
        let mut soft = SoftAssert::new();
        let mut check = CrossViewCheck::new("order number", order_key);
        check
            .add(Surface::MainList, "№ 25-4545 /0 от 18.11.2025")
            .add(Surface::EditPage, "25-4545 /0")
            .add(Surface::Deficit, "№ 25-4545 /0");
        assert!(check.verify(&mut soft));
        assert!(soft.is_clean());
    }

    #[test]
    fn disagreeing_surface_is_recorded_once_per_surface() {
        let mut soft = SoftAssert::new();
        let mut check = CrossViewCheck::new("quantity", quantity);
        check
            .add(Surface::MainList, "7")
            .add(Surface::EditPage, "7")
            .add(Surface::Modal, "5");
        assert!(!check.verify(&mut soft));
        assert_eq!(soft.failures().len(), 1);
        assert!(soft.failures()[0].context.contains("modal"));
    }

    #[test]
    fn date_forms_agree_across_surfaces() {
        let mut soft = SoftAssert::new();
        let mut check = CrossViewCheck::new("urgency date", date);
        check
            .add(Surface::MainList, "Ноя 17, 2025")
            .add(Surface::EditPage, "17.11.2025");
        assert!(check.verify(&mut soft));
    }

    #[test]
    fn empty_and_single_reading_pass_vacuously() {
        let mut soft = SoftAssert::new();
        assert!(CrossViewCheck::new("anything", identity).verify(&mut soft));

        let mut single = CrossViewCheck::new("anything", identity);
        single.add(Surface::MainList, "x");
        assert!(single.verify(&mut soft));
        assert!(soft.is_clean());
    }
}
