//! Interpretación de sugerencias de intervalo
//!
//! Convierte el texto libre devuelto por el servicio generativo en uno de tres
//! estados: valor acotado, "no aplica" o fallo. Las heurísticas (años, rangos,
//! límites) son funciones con nombre propio para poder probarlas por separado.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::ops::RangeInclusive;

pub const MIN_MILEAGE_INTERVAL: i64 = 600;
pub const MAX_MILEAGE_INTERVAL: i64 = 125_000;
pub const MIN_MONTH_INTERVAL: i64 = 1;
pub const MAX_MONTH_INTERVAL: i64 = 120;

/// Ventana de años de calendario que se consideran falsos positivos
pub const PLAUSIBLE_YEARS: RangeInclusive<i64> = 1900..=2100;

// Un número con separadores de miles, o una secuencia simple de dígitos
const NUMBER: &str = r"\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?";

// Separador de rango, el mismo para el campo etiquetado y para el barrido
const RANGE_SEPARATOR: &str = r"\s*(?:-|–|\bto\b)\s*";

lazy_static! {
    static ref NOT_APPLICABLE_RE: Regex =
        Regex::new(r"(?i)\bnot[\s_\-]*applicable\b").expect("valid not-applicable regex");
    static ref INTERVAL_FIELD_RE: Regex = Regex::new(&format!(
        r"(?i)\binterval\b\**\s*[:=]\s*\**\s*(?P<low>{n})(?:{sep}(?P<high>{n}))?",
        n = NUMBER,
        sep = RANGE_SEPARATOR
    ))
    .expect("valid interval field regex");
    static ref EXPLANATION_FIELD_RE: Regex = Regex::new(
        r"(?is)\bexplanation\b\**\s*[:=]\s*\**\s*(?P<text>.*?)\s*(?:\n\s*\**\s*interval\b|\z)"
    )
    .expect("valid explanation field regex");
    static ref NUMBER_TOKEN_RE: Regex = Regex::new(&format!(
        r"(?i)(?P<low>{n})(?:{sep}(?P<high>{n}))?",
        n = NUMBER,
        sep = RANGE_SEPARATOR
    ))
    .expect("valid number token regex");
}

/// Magnitud numérica que se le pidió al servicio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalKind {
    Mileage,
    Months,
}

impl IntervalKind {
    pub fn bounds(self) -> RangeInclusive<i64> {
        match self {
            IntervalKind::Mileage => MIN_MILEAGE_INTERVAL..=MAX_MILEAGE_INTERVAL,
            IntervalKind::Months => MIN_MONTH_INTERVAL..=MAX_MONTH_INTERVAL,
        }
    }

    pub fn unit_label(self) -> &'static str {
        match self {
            IntervalKind::Mileage => "miles",
            IntervalKind::Months => "months",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SuggestionOutcome {
    Applicable {
        value: i64,
        explanation: Option<String>,
    },
    NotApplicable,
    Failed {
        reason: String,
    },
}

impl SuggestionOutcome {
    fn failed(reason: impl Into<String>) -> Self {
        SuggestionOutcome::Failed {
            reason: reason.into(),
        }
    }
}

/// Campo etiquetado `interval: N` encontrado en la respuesta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredSuggestion {
    pub value: i64,
    pub explanation: Option<String>,
}

/// La marca "not applicable" gana sobre cualquier contenido numérico
pub fn is_not_applicable(text: &str) -> bool {
    NOT_APPLICABLE_RE.is_match(text)
}

pub fn is_plausible_year(value: i64) -> bool {
    PLAUSIBLE_YEARS.contains(&value)
}

/// Un número con forma de año se descarta, salvo si es un kilometraje que ya
/// alcanza el mínimo plausible de servicio
pub fn is_excluded_year(value: i64, kind: IntervalKind) -> bool {
    if !is_plausible_year(value) {
        return false;
    }
    !(kind == IntervalKind::Mileage && value >= MIN_MILEAGE_INTERVAL)
}

/// "5000-7500" → 7500. Política conservadora: nunca el promedio ni el mínimo
pub fn resolve_range_to_upper_bound(low: i64, high: Option<i64>) -> i64 {
    match high {
        Some(high) => high.max(low),
        None => low,
    }
}

pub fn is_within_bounds(value: i64, kind: IntervalKind) -> bool {
    kind.bounds().contains(&value)
}

/// Quita separadores de miles y trunca decimales.
///
/// Una secuencia de dígitos que no cabe en `i64` satura a `i64::MAX`, de modo
/// que termina como valor fuera de límites y no como ausencia de valor.
pub fn parse_number_token(token: &str) -> Option<i64> {
    let digits: String = token.chars().filter(|c| *c != ',').collect();
    let integral = digits.split('.').next()?;
    if integral.is_empty() || !integral.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(integral.parse::<i64>().unwrap_or(i64::MAX))
}

fn resolve_captures(caps: &regex::Captures<'_>) -> Option<i64> {
    let low = parse_number_token(caps.name("low")?.as_str())?;
    let high = match caps.name("high") {
        Some(m) => Some(parse_number_token(m.as_str())?),
        None => None,
    };
    Some(resolve_range_to_upper_bound(low, high))
}

/// Extracción estricta de `interval:` / `explanation:`; la explicación pasa sin cambios
pub fn extract_structured(text: &str) -> Option<StructuredSuggestion> {
    let caps = INTERVAL_FIELD_RE.captures(text)?;
    let value = resolve_captures(&caps)?;

    let explanation = EXPLANATION_FIELD_RE
        .captures(text)
        .and_then(|c| c.name("text"))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty());

    Some(StructuredSuggestion { value, explanation })
}

/// Todos los candidatos numéricos en orden de aparición, rangos ya resueltos
pub fn scan_candidates(text: &str) -> Vec<i64> {
    NUMBER_TOKEN_RE
        .captures_iter(text)
        .filter_map(|caps| resolve_captures(&caps))
        .collect()
}

/// Parser configurado para una magnitud concreta.
///
/// `model_year` es el año del vehículo consultado: el texto suele repetirlo
/// ("for your 2019 Civic...") y nunca es un intervalo válido.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionParser {
    kind: IntervalKind,
    model_year: Option<i64>,
}

impl SuggestionParser {
    pub fn new(kind: IntervalKind) -> Self {
        Self {
            kind,
            model_year: None,
        }
    }

    pub fn with_model_year(mut self, year: i64) -> Self {
        self.model_year = Some(year);
        self
    }

    pub fn parse(&self, text: &str) -> SuggestionOutcome {
        if is_not_applicable(text) {
            return SuggestionOutcome::NotApplicable;
        }

        if let Some(structured) = extract_structured(text) {
            return self.validate(structured.value, structured.explanation);
        }

        match self.first_fallback_candidate(text) {
            Some(value) => self.validate(value, None),
            None => SuggestionOutcome::failed(format!(
                "No {} value found in suggestion",
                self.kind.unit_label()
            )),
        }
    }

    fn first_fallback_candidate(&self, text: &str) -> Option<i64> {
        scan_candidates(text)
            .into_iter()
            .filter(|value| Some(*value) != self.model_year)
            .find(|value| !is_excluded_year(*value, self.kind))
    }

    fn validate(&self, value: i64, explanation: Option<String>) -> SuggestionOutcome {
        if is_within_bounds(value, self.kind) {
            SuggestionOutcome::Applicable { value, explanation }
        } else {
            let bounds = self.kind.bounds();
            SuggestionOutcome::failed(format!(
                "Suggested {} value {} is outside [{}, {}]",
                self.kind.unit_label(),
                value,
                bounds.start(),
                bounds.end()
            ))
        }
    }
}
