//! # Agregador Hierárquico de Similaridades
//!
//! Aplica as estratégias de achatamento em níveis, transformando os conjuntos de
//! scores brutos (uma comparação vetorial por par de textos) em **um score por
//! verbete candidato**. São dois pipelines independentes:
//!
//! - **Pipeline de definições**: cada verbete tem um score por sentido (uso
//!   desconhecido × definição do sentido). Um achatamento por verbete.
//! - **Pipeline de usos**: cada verbete tem, por sentido, um score por uso
//!   conhecido (uso desconhecido marcado × uso conhecido marcado). Dois níveis
//!   de achatamento: usos → sentido, depois sentidos → verbete.
//!
//! Nenhum pipeline altera suas entradas; a saída são arrays novos, paralelos à
//! lista de verbetes da consulta.

use crate::flattener::FlatteningStrategy;

/// Agregador configurado com uma política de achatamento por nível.
///
/// Os três "slots" de configuração correspondem aos três pontos onde listas de
/// scores são reduzidas:
/// - `known_usage_flattener`: usos conhecidos de um sentido → score do sentido;
/// - `sense_flattener`: sentidos de um verbete → score do verbete (pipeline de usos);
/// - `definition_flattener`: definições dos sentidos → score do verbete (pipeline de definições).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarityAggregator {
    pub known_usage_flattener: FlatteningStrategy,
    pub sense_flattener: FlatteningStrategy,
    pub definition_flattener: FlatteningStrategy,
}

impl SimilarityAggregator {
    pub fn new(
        known_usage_flattener: FlatteningStrategy,
        sense_flattener: FlatteningStrategy,
        definition_flattener: FlatteningStrategy,
    ) -> Self {
        Self {
            known_usage_flattener,
            sense_flattener,
            definition_flattener,
        }
    }

    /// Agrega o pipeline de definições: um score por verbete.
    ///
    /// `definition_similarity_sets[i]` contém um score por sentido do verbete `i`
    /// (similaridade entre o uso desconhecido e a definição daquele sentido).
    pub fn aggregate_definition_similarities(
        &self,
        definition_similarity_sets: &[Vec<f64>],
    ) -> Vec<f64> {
        definition_similarity_sets
            .iter()
            .map(|per_sense_scores| self.definition_flattener.flatten(per_sense_scores))
            .collect()
    }

    /// Agrega o pipeline de usos em dois níveis: um score por verbete.
    ///
    /// `usage_similarity_sets[i][s]` contém um score por uso conhecido do sentido
    /// `s` do verbete `i`. Primeiro cada sentido é achatado através de seus usos;
    /// depois o verbete é achatado através de seus sentidos.
    ///
    /// Um sentido sem usos conhecidos produz lista vazia e resolve para o valor
    /// neutro, nunca para um erro.
    pub fn aggregate_usage_similarities(
        &self,
        usage_similarity_sets: &[Vec<Vec<f64>>],
    ) -> Vec<f64> {
        usage_similarity_sets
            .iter()
            .map(|per_sense_sets| {
                let sense_scores: Vec<f64> = per_sense_sets
                    .iter()
                    .map(|per_usage_scores| self.known_usage_flattener.flatten(per_usage_scores))
                    .collect();

                self.sense_flattener.flatten(&sense_scores)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flattener::EMPTY_LIST_SIMILARITY;

    fn max_everywhere() -> SimilarityAggregator {
        SimilarityAggregator::new(
            FlatteningStrategy::Max,
            FlatteningStrategy::Max,
            FlatteningStrategy::Max,
        )
    }

    #[test]
    fn test_definition_pipeline_one_score_per_headword() {
        let aggregator = max_everywhere();
        let sets = vec![vec![0.2, 0.8], vec![0.5], vec![0.1, 0.3, 0.9]];
        assert_eq!(
            aggregator.aggregate_definition_similarities(&sets),
            vec![0.8, 0.5, 0.9]
        );
    }

    #[test]
    fn test_usage_pipeline_flattens_in_two_levels() {
        // Usos → sentido via Average, sentidos → verbete via Max
        let aggregator = SimilarityAggregator::new(
            FlatteningStrategy::Average,
            FlatteningStrategy::Max,
            FlatteningStrategy::Max,
        );

        // Verbete único: sentido A com usos [0.4, 0.6] (média 0.5),
        // sentido B com usos [0.9, 0.1] (média 0.5), Max entre sentidos = 0.5
        let sets = vec![vec![vec![0.4, 0.6], vec![0.9, 0.1]]];
        let scores = aggregator.aggregate_usage_similarities(&sets);
        assert_eq!(scores.len(), 1);
        assert!((scores[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sense_without_known_usages_resolves_to_neutral() {
        let aggregator = max_everywhere();

        // Sentido sem usos (lista vazia) vira o valor neutro; o Max entre
        // sentidos ainda escolhe o sentido com sinal.
        let sets = vec![vec![vec![], vec![0.7]]];
        assert_eq!(aggregator.aggregate_usage_similarities(&sets), vec![0.7]);
    }

    #[test]
    fn test_headword_with_only_empty_senses_resolves_to_neutral() {
        let aggregator = max_everywhere();
        let sets = vec![vec![vec![], vec![]]];
        assert_eq!(
            aggregator.aggregate_usage_similarities(&sets),
            vec![EMPTY_LIST_SIMILARITY]
        );
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let aggregator = max_everywhere();
        let sets = vec![vec![0.2, 0.8]];
        let before = sets.clone();
        let _ = aggregator.aggregate_definition_similarities(&sets);
        assert_eq!(sets, before);
    }

    #[test]
    fn test_output_length_matches_headword_count() {
        let aggregator = max_everywhere();
        let definition_sets = vec![vec![0.1]; 7];
        let usage_sets = vec![vec![vec![0.1]]; 7];
        assert_eq!(
            aggregator
                .aggregate_definition_similarities(&definition_sets)
                .len(),
            7
        );
        assert_eq!(
            aggregator.aggregate_usage_similarities(&usage_sets).len(),
            7
        );
    }
}
