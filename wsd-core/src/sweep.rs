//! # Varredura de Parâmetros
//!
//! Roda todos os exemplos anotados sob todas as combinações de configuração
//! (pesos de definição × políticas de achatamento por slot) e registra, para
//! cada rodada, a métrica de separação do verbete correto. É a ferramenta de
//! estudo offline do sistema: com as linhas resultantes se analisam trocas de
//! precisão/cobertura ao mover os limiares e políticas.
//!
//! Cada tupla (exemplo, configuração) é independente das demais, então a
//! varredura é paralelizada por exemplo com `rayon`. Os conjuntos de
//! similaridade de um exemplo não dependem dos achatadores, logo são computados
//! uma única vez por exemplo e reaproveitados em todas as combinações.
//!
//! Exportar CSV ou gráficos fica fora daqui: as linhas são registros
//! serializáveis consumidos por colaboradores externos.

use rayon::prelude::*;
use serde::Serialize;

use crate::aggregator::SimilarityAggregator;
use crate::embedding::EmbeddingProvider;
use crate::flattener::FlatteningStrategy;
use crate::headword::DisambiguationCase;
use crate::metrics::correct_minus_average_incorrect;
use crate::pipeline::WsdError;
use crate::preprocess::{mark_target_lemma, tag_headword_usages};
use crate::ranker::rank_headwords;
use crate::similarity::{ComparisonStrategy, SimilarityCalculator};

/// Pesos de definição testados por padrão.
pub const DEFAULT_DEFINITION_WEIGHTS: &[f64] = &[0.0, 0.1, 0.2];

/// Políticas de achatamento testadas por padrão em cada slot.
pub const DEFAULT_FLATTENERS: &[FlatteningStrategy] =
    &[FlatteningStrategy::Max, FlatteningStrategy::Average];

/// Uma linha de resultado: a configuração usada e a métrica obtida para um
/// exemplo de um lema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub lemma: String,
    pub definition_weight: f64,
    pub known_usage_flattener: FlatteningStrategy,
    pub sense_flattener: FlatteningStrategy,
    pub definition_flattener: FlatteningStrategy,
    /// `correct_minus_average_incorrect` do ranking obtido.
    pub score: f64,
}

/// Uma combinação concreta de parâmetros varridos.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SweepCombination {
    definition_weight: f64,
    known_usage_flattener: FlatteningStrategy,
    sense_flattener: FlatteningStrategy,
    definition_flattener: FlatteningStrategy,
}

/// Executor da varredura: o espaço de busca e o provedor de embeddings.
pub struct SweepRunner<E: EmbeddingProvider + Sync> {
    pub embedder: E,
    pub definition_weights: Vec<f64>,
    pub known_usage_flatteners: Vec<FlatteningStrategy>,
    pub sense_flatteners: Vec<FlatteningStrategy>,
    pub definition_flatteners: Vec<FlatteningStrategy>,
    pub comparison: ComparisonStrategy,
}

impl<E: EmbeddingProvider + Sync> SweepRunner<E> {
    /// Espaço de busca padrão (o mesmo exercitado historicamente: 3 pesos ×
    /// 2 achatadores por slot = 24 combinações).
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            definition_weights: DEFAULT_DEFINITION_WEIGHTS.to_vec(),
            known_usage_flatteners: DEFAULT_FLATTENERS.to_vec(),
            sense_flatteners: DEFAULT_FLATTENERS.to_vec(),
            definition_flatteners: DEFAULT_FLATTENERS.to_vec(),
            comparison: ComparisonStrategy::Cosine,
        }
    }

    /// Número de combinações do produto cartesiano configurado.
    pub fn combination_count(&self) -> usize {
        self.definition_weights.len()
            * self.known_usage_flatteners.len()
            * self.sense_flatteners.len()
            * self.definition_flatteners.len()
    }

    /// Roda todos os exemplos de todos os casos sob todas as combinações.
    ///
    /// As linhas saem agrupadas por caso e exemplo, na ordem do produto
    /// cartesiano (peso, achatador de usos, de sentidos, de definições).
    pub fn run(&self, cases: &[DisambiguationCase]) -> Result<Vec<SweepRow>, WsdError> {
        let combinations = self.combinations();

        // Paraleliza por (caso, exemplo); cada exemplo computa seus conjuntos
        // de similaridade uma vez e varre as combinações em sequência.
        let example_units: Vec<(&DisambiguationCase, usize)> = cases
            .iter()
            .flat_map(|case| {
                (0..case.unknown_usage_examples.len()).map(move |i| (case, i))
            })
            .collect();

        let per_example: Vec<Vec<SweepRow>> = example_units
            .par_iter()
            .map(|(case, example_index)| self.run_example(case, *example_index, &combinations))
            .collect::<Result<_, _>>()?;

        Ok(per_example.into_iter().flatten().collect())
    }

    fn combinations(&self) -> Vec<SweepCombination> {
        let mut combinations =
            Vec::with_capacity(self.combination_count());

        for &definition_weight in &self.definition_weights {
            for &known_usage_flattener in &self.known_usage_flatteners {
                for &sense_flattener in &self.sense_flatteners {
                    for &definition_flattener in &self.definition_flatteners {
                        combinations.push(SweepCombination {
                            definition_weight,
                            known_usage_flattener,
                            sense_flattener,
                            definition_flattener,
                        });
                    }
                }
            }
        }

        combinations
    }

    fn run_example(
        &self,
        case: &DisambiguationCase,
        example_index: usize,
        combinations: &[SweepCombination],
    ) -> Result<Vec<SweepRow>, WsdError> {
        let example = &case.unknown_usage_examples[example_index];
        let num_headwords = case.known_headwords.len();
        let calculator = SimilarityCalculator::new(self.comparison);

        // Embeddings e conjuntos de similaridade: uma vez por exemplo.
        let unknown_plain = self.embedder.embed_plain(&example.usage);
        let tagged_unknown = mark_target_lemma(&example.usage, &case.lemma);
        let unknown_marked = self.embedder.embed_target_marked(&tagged_unknown);

        let definition_embeddings: Vec<Vec<Vec<f32>>> = case
            .known_headwords
            .iter()
            .map(|headword| {
                headword
                    .known_senses
                    .iter()
                    .map(|sense| self.embedder.embed_plain(&sense.definition))
                    .collect()
            })
            .collect();

        let tagged_headwords = tag_headword_usages(&case.known_headwords, &case.lemma);
        let usage_embeddings: Vec<Vec<Vec<Vec<f32>>>> = tagged_headwords
            .iter()
            .map(|headword| {
                headword
                    .known_senses
                    .iter()
                    .map(|sense| {
                        sense
                            .known_usages
                            .iter()
                            .map(|usage| self.embedder.embed_target_marked(usage))
                            .collect()
                    })
                    .collect()
            })
            .collect();

        let definition_sets =
            calculator.definition_similarity_sets(&unknown_plain, &definition_embeddings)?;
        let usage_sets = calculator.usage_similarity_sets(&unknown_marked, &usage_embeddings)?;

        let mut rows = Vec::with_capacity(combinations.len());

        for combination in combinations {
            let aggregator = SimilarityAggregator::new(
                combination.known_usage_flattener,
                combination.sense_flattener,
                combination.definition_flattener,
            );

            let definition_scores = aggregator.aggregate_definition_similarities(&definition_sets);
            let usage_scores = aggregator.aggregate_usage_similarities(&usage_sets);

            let ranking = rank_headwords(
                num_headwords,
                &definition_scores,
                &usage_scores,
                combination.definition_weight,
            )?;

            rows.push(SweepRow {
                lemma: case.lemma.clone(),
                definition_weight: combination.definition_weight,
                known_usage_flattener: combination.known_usage_flattener,
                sense_flattener: combination.sense_flattener,
                definition_flattener: combination.definition_flattener,
                score: correct_minus_average_incorrect(
                    example.index_of_correct_headword,
                    &ranking,
                ),
            });
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::demo_cases;
    use crate::embedding::DemoEmbedder;

    #[test]
    fn test_row_count_is_examples_times_combinations() {
        let cases = demo_cases();
        let total_examples: usize = cases
            .iter()
            .map(|c| c.unknown_usage_examples.len())
            .sum();

        let runner = SweepRunner::new(DemoEmbedder::default());
        let rows = runner.run(&cases).unwrap();

        assert_eq!(runner.combination_count(), 24);
        assert_eq!(rows.len(), total_examples * runner.combination_count());
    }

    #[test]
    fn test_rows_cover_every_weight_and_flattener() {
        let cases = demo_cases();
        let runner = SweepRunner::new(DemoEmbedder::default());
        let rows = runner.run(&cases).unwrap();

        for &weight in DEFAULT_DEFINITION_WEIGHTS {
            assert!(rows.iter().any(|r| r.definition_weight == weight));
        }
        for &flattener in DEFAULT_FLATTENERS {
            assert!(rows.iter().any(|r| r.known_usage_flattener == flattener));
            assert!(rows.iter().any(|r| r.sense_flattener == flattener));
            assert!(rows.iter().any(|r| r.definition_flattener == flattener));
        }
    }

    #[test]
    fn test_sweep_is_deterministic() {
        let cases = demo_cases();
        let runner = SweepRunner::new(DemoEmbedder::default());
        let first = runner.run(&cases).unwrap();
        let second = runner.run(&cases).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_combination_space() {
        let mut runner = SweepRunner::new(DemoEmbedder::default());
        runner.definition_weights = vec![0.0];
        runner.known_usage_flatteners = vec![FlatteningStrategy::Max];
        runner.sense_flatteners = vec![FlatteningStrategy::Max];
        runner.definition_flatteners = vec![FlatteningStrategy::Max];

        let cases = demo_cases();
        let rows = runner.run(&cases).unwrap();

        let total_examples: usize = cases
            .iter()
            .map(|c| c.unknown_usage_examples.len())
            .sum();
        assert_eq!(rows.len(), total_examples);
    }
}
