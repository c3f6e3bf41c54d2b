//! # Ranqueador de Verbetes
//!
//! Combina os dois fluxos de scores agregados (definições e usos) com um peso
//! configurável e produz a ordenação decrescente dos verbetes candidatos.
//!
//! ## Regras importantes
//! - `definition_weight = 0.0` pula o lado das definições por completo (atalho
//!   de performance: quem chama nem precisa computar aquelas similaridades);
//!   simetricamente, `definition_weight = 1.0` pula o lado dos usos.
//! - A ordenação é **estável**: verbetes com scores exatamente iguais mantêm a
//!   ordem relativa original (índice menor primeiro). Esse desempate é regra de
//!   negócio testada, não acidente de implementação.
//! - Nenhuma normalização extra é aplicada após a combinação ponderada.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Um verbete candidato já ranqueado: posição original na consulta + score combinado.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedHeadword {
    /// Índice (0-based) do verbete na lista de candidatos da consulta.
    pub index: usize,
    /// Score combinado `def * w + uso * (1 - w)`.
    pub score: f64,
}

/// Ordenação decrescente dos candidatos. Invariantes: comprimento igual ao
/// número de verbetes da consulta; cada índice em `0..n` aparece exatamente uma vez.
pub type Ranking = Vec<RankedHeadword>;

/// Violação de contrato pelo chamador: os arrays de scores não batem com o
/// número de verbetes declarado. Falha cedo, sem truncar nem preencher.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RankingError {
    #[error("esperava {expected} scores de definição, recebeu {actual}")]
    DefinitionScoresLengthMismatch { expected: usize, actual: usize },

    #[error("esperava {expected} scores de uso, recebeu {actual}")]
    UsageScoresLengthMismatch { expected: usize, actual: usize },
}

/// Produz o ranking decrescente dos `num_headwords` candidatos.
///
/// `definition_scores` e `usage_scores` são os arrays agregados (um score por
/// verbete) dos dois pipelines. O lado pulado pelo peso pode ser passado como
/// slice vazio; ele não é validado nem lido, e conta como `0.0` para todo verbete.
pub fn rank_headwords(
    num_headwords: usize,
    definition_scores: &[f64],
    usage_scores: &[f64],
    definition_weight: f64,
) -> Result<Ranking, RankingError> {
    let use_definitions = definition_weight > 0.0;
    let use_usages = 1.0 - definition_weight > 0.0;

    if use_definitions && definition_scores.len() != num_headwords {
        return Err(RankingError::DefinitionScoresLengthMismatch {
            expected: num_headwords,
            actual: definition_scores.len(),
        });
    }

    if use_usages && usage_scores.len() != num_headwords {
        return Err(RankingError::UsageScoresLengthMismatch {
            expected: num_headwords,
            actual: usage_scores.len(),
        });
    }

    let mut ranking: Ranking = (0..num_headwords)
        .map(|index| {
            let definition = if use_definitions { definition_scores[index] } else { 0.0 };
            let usage = if use_usages { usage_scores[index] } else { 0.0 };

            RankedHeadword {
                index,
                score: definition * definition_weight + usage * (1.0 - definition_weight),
            }
        })
        .collect();

    // sort_by é estável: empates preservam a ordem ascendente de índice.
    ranking.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(ranking)
}
