//! Clasificador de categorías
//!
//! Orden de resolución: "no aplica" → coincidencia exacta → nombre en español
//! → coincidencia difusa bidireccional. Sin coincidencia es un fallo explícito,
//! nunca una categoría por defecto.

use serde::Serialize;

use crate::models::maintenance_type::MaintenanceCategory;
use crate::services::suggestion_parser::is_not_applicable;

/// Nombres usados por la versión en español de la aplicación
const SPANISH_CATEGORIES: [(&str, MaintenanceCategory); 8] = [
    ("motor", MaintenanceCategory::Engine),
    ("frenos", MaintenanceCategory::Brakes),
    ("transmision", MaintenanceCategory::Transmission),
    ("suspension", MaintenanceCategory::Suspension),
    ("electrico", MaintenanceCategory::Electrical),
    ("llantas", MaintenanceCategory::Tires),
    ("carroceria", MaintenanceCategory::Body),
    ("refrigeracion", MaintenanceCategory::Cooling),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClassificationOutcome {
    Category { category: MaintenanceCategory },
    NotApplicable,
    Failed { reason: String },
}

/// "tIRES" → "Tires", "body work" → "Body Work"
pub fn to_title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn exact_match(text: &str) -> Option<MaintenanceCategory> {
    let titled = to_title_case(text);
    MaintenanceCategory::ALL
        .iter()
        .copied()
        .find(|c| c.as_str() == titled)
}

fn fold_accents(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'Á' | 'À' | 'Ä' => 'a',
            'é' | 'è' | 'ë' | 'É' | 'È' | 'Ë' => 'e',
            'í' | 'ì' | 'ï' | 'Í' | 'Ì' | 'Ï' => 'i',
            'ó' | 'ò' | 'ö' | 'Ó' | 'Ò' | 'Ö' => 'o',
            'ú' | 'ù' | 'ü' | 'Ú' | 'Ù' | 'Ü' => 'u',
            'ñ' | 'Ñ' => 'n',
            other => other,
        })
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Traducción de los nombres en español, ignorando acentos y mayúsculas
pub fn translate_localized(text: &str) -> Option<MaintenanceCategory> {
    let folded = fold_accents(text.trim());
    SPANISH_CATEGORIES
        .iter()
        .find(|(name, _)| *name == folded)
        .map(|(_, category)| *category)
}

/// El candidato contiene el nombre del miembro o el nombre contiene al
/// candidato. Gana el primero en orden canónico.
pub fn fuzzy_match(text: &str) -> Option<MaintenanceCategory> {
    let candidate = text.trim().to_lowercase();
    if candidate.is_empty() {
        return None;
    }

    MaintenanceCategory::ALL.iter().copied().find(|c| {
        let member = c.as_str().to_lowercase();
        candidate.contains(&member) || member.contains(&candidate)
    })
}

pub fn classify_category(text: &str) -> ClassificationOutcome {
    if is_not_applicable(text) {
        return ClassificationOutcome::NotApplicable;
    }

    let cleaned = text.trim().trim_matches(|c: char| c == '.' || c == '"' || c == '*');
    if cleaned.is_empty() {
        return ClassificationOutcome::Failed {
            reason: "Empty category suggestion".to_string(),
        };
    }

    let resolved = exact_match(cleaned)
        .or_else(|| translate_localized(cleaned))
        .or_else(|| fuzzy_match(cleaned));

    match resolved {
        Some(category) => ClassificationOutcome::Category { category },
        None => ClassificationOutcome::Failed {
            reason: format!("'{}' does not match any maintenance category", cleaned),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(c: MaintenanceCategory) -> ClassificationOutcome {
        ClassificationOutcome::Category { category: c }
    }

    #[test]
    fn test_exact_match_after_title_case() {
        assert_eq!(classify_category("Tires"), category(MaintenanceCategory::Tires));
        assert_eq!(classify_category("  bRAKES \n"), category(MaintenanceCategory::Brakes));
        assert_eq!(exact_match("tire"), None);
    }

    #[test]
    fn test_singular_resolves_through_fuzzy_match() {
        assert_eq!(classify_category("tire"), category(MaintenanceCategory::Tires));
        assert_eq!(classify_category("Tires"), classify_category("tire"));
    }

    #[test]
    fn test_fuzzy_match_both_directions() {
        // el candidato contiene al miembro
        assert_eq!(fuzzy_match("Engine oil"), Some(MaintenanceCategory::Engine));
        // el miembro contiene al candidato
        assert_eq!(fuzzy_match("brake"), Some(MaintenanceCategory::Brakes));
    }

    #[test]
    fn test_fuzzy_tie_goes_to_canonical_order() {
        // "Engine" aparece antes que "Cooling" en la taxonomía
        assert_eq!(fuzzy_match("engine cooling"), Some(MaintenanceCategory::Engine));
        // "e" está contenida en varios miembros; gana el primero
        assert_eq!(fuzzy_match("e"), Some(MaintenanceCategory::Engine));
    }

    #[test]
    fn test_spanish_names_are_translated() {
        assert_eq!(classify_category("Llantas"), category(MaintenanceCategory::Tires));
        assert_eq!(classify_category("transmisión"), category(MaintenanceCategory::Transmission));
        assert_eq!(classify_category("ELECTRICO"), category(MaintenanceCategory::Electrical));
        assert_eq!(classify_category("Refrigeración"), category(MaintenanceCategory::Cooling));
    }

    #[test]
    fn test_not_applicable_short_circuit() {
        assert_eq!(classify_category("Not Applicable"), ClassificationOutcome::NotApplicable);
        assert_eq!(classify_category("Engine - not applicable"), ClassificationOutcome::NotApplicable);
    }

    #[test]
    fn test_unknown_text_is_failure_not_default() {
        assert!(matches!(classify_category("Interior detailing"), ClassificationOutcome::Failed { .. }));
        assert!(matches!(classify_category("   "), ClassificationOutcome::Failed { .. }));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(to_title_case("body WORK"), "Body Work");
        assert_eq!(to_title_case(""), "");
    }
}
