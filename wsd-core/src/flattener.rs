//! # Estratégias de Achatamento de Similaridades
//!
//! "Achatar" (flatten) significa reduzir uma lista de scores de similaridade a um
//! único escalar representativo. É a operação mais básica do motor de agregação:
//! ela é aplicada repetidamente, em níveis (usos → sentido, sentidos → verbete),
//! para transformar dezenas de comparações vetoriais em um score por verbete.
//!
//! As políticas formam um conjunto fechado de variantes (enum), não uma hierarquia
//! aberta de classes: só existem três comportamentos concretos e nenhum plugin
//! dinâmico é necessário.

use serde::{Deserialize, Serialize};

/// Valor neutro retornado por qualquer estratégia ao receber uma lista vazia.
///
/// Invariante explícito do contrato: achatar **nunca falha** com entrada vazia,
/// apenas degrada para este score neutro. Um sentido sem usos conhecidos, por
/// exemplo, produz lista vazia e resolve para `0.0` sem erro.
pub const EMPTY_LIST_SIMILARITY: f64 = 0.0;

/// Política de redução de uma lista de scores a um único escalar.
///
/// Cada variante é uma função pura, determinística e comutativa: a ordem dos
/// scores de entrada não altera o resultado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlatteningStrategy {
    /// Retorna o maior score da lista.
    ///
    /// Intuição: "basta UMA comparação muito boa para este candidato valer".
    /// É a política mais otimista, boa para sentidos com usos heterogêneos.
    Max,
    /// Retorna a média aritmética simples de todos os scores.
    ///
    /// Intuição: "todas as comparações contam igualmente". Scores negativos
    /// (vetores apontando em direções opostas) puxam a média para baixo.
    Average,
    /// Retorna a média apenas dos scores estritamente positivos.
    ///
    /// Intuição: "comparações sem sinal positivo de similaridade não carregam
    /// informação, então são descartadas antes da média". Se nenhum score for
    /// positivo, resolve para [`EMPTY_LIST_SIMILARITY`].
    PositiveAverage,
}

impl FlatteningStrategy {
    /// Todas as variantes, na ordem de declaração. Útil para varreduras de
    /// parâmetros que testam todas as políticas.
    pub const ALL: &'static [Self] = &[Self::Max, Self::Average, Self::PositiveAverage];

    /// Reduz `scores` a um único escalar segundo a política.
    ///
    /// Lista vazia resolve para [`EMPTY_LIST_SIMILARITY`] em todas as variantes.
    pub fn flatten(&self, scores: &[f64]) -> f64 {
        if scores.is_empty() {
            return EMPTY_LIST_SIMILARITY;
        }

        match self {
            Self::Max => scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Average => scores.iter().sum::<f64>() / scores.len() as f64,
            Self::PositiveAverage => {
                let positives: Vec<f64> =
                    scores.iter().copied().filter(|s| *s > 0.0).collect();

                if positives.is_empty() {
                    return EMPTY_LIST_SIMILARITY;
                }

                positives.iter().sum::<f64>() / positives.len() as f64
            }
        }
    }

    /// Nome legível da política, usado nas linhas de resultado das varreduras.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Max => "max",
            Self::Average => "average",
            Self::PositiveAverage => "positive_average",
        }
    }
}
