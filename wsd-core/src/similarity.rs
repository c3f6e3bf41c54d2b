//! # Comparação Vetorial e Cálculo dos Conjuntos de Similaridade
//!
//! A ponte entre os embeddings (vetores densos vindos do provedor externo) e o
//! agregador: compara pares de vetores e monta os conjuntos de scores brutos,
//! na mesma estrutura hierárquica dos verbetes (verbete → sentido → uso).
//!
//! A métrica padrão é a similaridade de cosseno, um escalar em `[-1, 1]` que
//! mede a proximidade direcional de dois vetores. Uma alternativa baseada em
//! distância euclidiana invertida fica disponível para experimentação.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Erros de comparação vetorial. Vetores malformados são violação de contrato
/// do provedor de embeddings e falham cedo, com mensagem descritiva.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimilarityError {
    #[error("dimensões incompatíveis: esperava {expected}, recebeu {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("vetor vazio fornecido para comparação")]
    EmptyVector,

    #[error("vetor de magnitude zero: similaridade de cosseno indefinida")]
    ZeroMagnitude,
}

/// Similaridade de cosseno entre dois vetores de mesma dimensão.
///
/// `cos(a, b) = (a . b) / (|a| * |b|)`. A acumulação é feita em `f64` para
/// reduzir erro numérico mesmo com embeddings em `f32`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, SimilarityError> {
    check_dimensions(a, b)?;

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += (*x as f64) * (*y as f64);
        norm_a += (*x as f64) * (*x as f64);
        norm_b += (*y as f64) * (*y as f64);
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(SimilarityError::ZeroMagnitude);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Similaridade por distância euclidiana invertida: `1 / (d + 1)`.
///
/// Mapeia distância 0 para similaridade 1.0, decaindo suavemente. Diferente do
/// cosseno, é sensível à magnitude dos vetores.
pub fn euclidean_inverse_similarity(a: &[f32], b: &[f32]) -> Result<f64, SimilarityError> {
    check_dimensions(a, b)?;

    let squared: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = (*x as f64) - (*y as f64);
            d * d
        })
        .sum();

    Ok(1.0 / (squared.sqrt() + 1.0))
}

fn check_dimensions(a: &[f32], b: &[f32]) -> Result<(), SimilarityError> {
    if a.is_empty() || b.is_empty() {
        return Err(SimilarityError::EmptyVector);
    }

    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(())
}

/// Métrica de comparação entre dois embeddings. Conjunto fechado de variantes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonStrategy {
    /// Similaridade de cosseno (padrão).
    Cosine,
    /// `1 / (distância euclidiana + 1)`.
    EuclideanInverse,
}

impl Default for ComparisonStrategy {
    fn default() -> Self {
        ComparisonStrategy::Cosine
    }
}

impl ComparisonStrategy {
    pub fn compare(&self, a: &[f32], b: &[f32]) -> Result<f64, SimilarityError> {
        match self {
            Self::Cosine => cosine_similarity(a, b),
            Self::EuclideanInverse => euclidean_inverse_similarity(a, b),
        }
    }
}

/// Calcula os conjuntos de similaridade brutos de uma consulta, preservando a
/// estrutura hierárquica esperada pelo agregador.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityCalculator {
    pub strategy: ComparisonStrategy,
}

impl SimilarityCalculator {
    pub fn new(strategy: ComparisonStrategy) -> Self {
        Self { strategy }
    }

    /// Pipeline de definições: para cada verbete, um score por sentido.
    ///
    /// `definition_embeddings[i][s]` é o embedding da definição do sentido `s`
    /// do verbete `i`; todos são comparados contra o embedding plano do uso
    /// desconhecido.
    pub fn definition_similarity_sets(
        &self,
        unknown_usage_embedding: &[f32],
        definition_embeddings: &[Vec<Vec<f32>>],
    ) -> Result<Vec<Vec<f64>>, SimilarityError> {
        definition_embeddings
            .iter()
            .map(|per_sense| {
                per_sense
                    .iter()
                    .map(|definition| self.strategy.compare(unknown_usage_embedding, definition))
                    .collect()
            })
            .collect()
    }

    /// Pipeline de usos: para cada verbete, para cada sentido, um score por uso
    /// conhecido.
    ///
    /// `usage_embeddings[i][s][u]` é o embedding (marcado com alvo) do uso `u`
    /// do sentido `s` do verbete `i`; todos são comparados contra o embedding
    /// marcado do uso desconhecido.
    pub fn usage_similarity_sets(
        &self,
        unknown_usage_embedding: &[f32],
        usage_embeddings: &[Vec<Vec<Vec<f32>>>],
    ) -> Result<Vec<Vec<Vec<f64>>>, SimilarityError> {
        usage_embeddings
            .iter()
            .map(|per_sense| {
                per_sense
                    .iter()
                    .map(|per_usage| {
                        per_usage
                            .iter()
                            .map(|usage| self.strategy.compare(unknown_usage_embedding, usage))
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }
}
