//! Justification templates
//!
//! Each rule outcome maps to exactly one variant, and each variant renders to
//! a fixed Portuguese message with its numeric fields interpolated.

use crate::core::eligibility::GapInterval;
use std::fmt;

/// Outcome-specific explanation attached to every evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justification {
    /// Enrollment is cancelled
    Cancelled,
    /// The return is to a different course
    DifferentCourse,
    /// The current term does not follow the last active term
    InvalidOrder {
        /// Signed gap as computed
        gap: i128,
    },
    /// Too many terms elapsed
    OverLimit {
        /// Terms strictly between the last active and current terms
        gap: i128,
        /// Gap at which a return stops being ordinary
        limit: i128,
        /// Missing terms, for display
        interval: GapInterval,
    },
    /// All criteria met
    Eligible {
        /// Terms strictly between the last active and current terms
        gap: i128,
        /// Gap at which a return stops being ordinary
        limit: i128,
        /// Missing terms, for display
        interval: GapInterval,
    },
}

impl Justification {
    /// Stable machine-readable code for the variant
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Cancelled => "cancelled",
            Self::DifferentCourse => "different_course",
            Self::InvalidOrder { .. } => "invalid_order",
            Self::OverLimit { .. } => "over_limit",
            Self::Eligible { .. } => "eligible",
        }
    }
}

/// `(de X a Y)` when terms are missing, otherwise a note that none are
fn range_text(gap: i128, interval: &GapInterval) -> String {
    if gap > 0 {
        format!("(de {} a {})", interval.start, interval.end)
    } else {
        "(sem intervalo entre os semestres)".to_string()
    }
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(
                f,
                "A matrícula atual consta como 'Cancelada'. Situações de cancelamento impedem o enquadramento direto em retorno ao curso."
            ),
            Self::DifferentCourse => write!(
                f,
                "O retorno não é para o mesmo curso. O enquadramento exige que o aluno retorne à mesma graduação de origem."
            ),
            Self::InvalidOrder { .. } => write!(
                f,
                "Data do semestre atual deve ser posterior ao último vínculo. Verifique as datas inseridas."
            ),
            Self::OverLimit {
                gap,
                limit,
                interval,
            } => write!(
                f,
                "A soma de períodos letivos entre o último vínculo e o retorno é de {gap} semestre(s) {}, o que atinge ou excede o limite de {limit}.",
                range_text(*gap, interval)
            ),
            Self::Eligible {
                gap,
                limit,
                interval,
            } => write!(
                f,
                "Critérios atendidos: A soma de períodos letivos entre o último vínculo e o retorno é de {gap} semestre(s) {}, o que é menor que {limit}. Matrícula não está cancelada e o curso é o mesmo.",
                range_text(*gap, interval)
            ),
        }
    }
}
