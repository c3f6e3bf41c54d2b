//! # Pipeline WSD — Orquestrador com Eventos Observáveis
//!
//! O pipeline coordena todos os módulos (pré-processamento, embeddings,
//! comparação, agregação, ranking, decisão) e emite eventos em cada passo via
//! um canal Rust (`mpsc`), permitindo que o servidor WebSocket transmita o
//! raciocínio do sistema em tempo real para o cliente.
//!
//! O fluxo de dados é unidirecional:
//!
//! ```text
//! texto -> marcação de alvo -> embeddings -> conjuntos de similaridade
//!       -> scores agregados por verbete -> ranking ponderado -> decisão
//! ```
//!
//! Cada consulta constrói tudo do zero e descarta tudo ao final: não há cache
//! nem estado compartilhado entre consultas.

use std::sync::mpsc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregator::SimilarityAggregator;
use crate::chooser::HeadwordChooser;
use crate::embedding::EmbeddingProvider;
use crate::flattener::FlatteningStrategy;
use crate::headword::KnownHeadword;
use crate::preprocess::{mark_target_lemma, tag_headword_usages};
use crate::ranker::{rank_headwords, Ranking, RankingError};
use crate::similarity::{ComparisonStrategy, SimilarityCalculator, SimilarityError};

/// Superfície de configuração completa de uma consulta. Sem globais escondidos:
/// tudo que muda o comportamento do motor passa por aqui.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisambiguationConfig {
    /// Peso do pipeline de definições na combinação final, em `[0, 1]`.
    /// `0.0` pula as definições por completo; `1.0` pula os usos.
    pub definition_weight: f64,
    /// Achatamento dos usos conhecidos de um sentido.
    pub known_usage_flattener: FlatteningStrategy,
    /// Achatamento dos sentidos de um verbete (pipeline de usos).
    pub sense_flattener: FlatteningStrategy,
    /// Achatamento das definições dos sentidos de um verbete.
    pub definition_flattener: FlatteningStrategy,
    /// Score mínimo do topo do ranking para aceitar uma resposta.
    pub min_acceptance: f64,
    /// Margem mínima do topo sobre o vice.
    pub min_delta: f64,
    /// Métrica de comparação vetorial.
    pub comparison: ComparisonStrategy,
}

impl Default for DisambiguationConfig {
    fn default() -> Self {
        Self {
            definition_weight: 0.1,
            known_usage_flattener: FlatteningStrategy::Max,
            sense_flattener: FlatteningStrategy::Max,
            definition_flattener: FlatteningStrategy::Average,
            min_acceptance: 0.5,
            min_delta: 0.05,
            comparison: ComparisonStrategy::Cosine,
        }
    }
}

/// Erros do pipeline: propagam as violações de contrato das camadas internas.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WsdError {
    #[error("falha na comparação vetorial: {0}")]
    Similarity(#[from] SimilarityError),

    #[error("falha no ranqueamento: {0}")]
    Ranking(#[from] RankingError),
}

/// Resultado final de uma consulta de desambiguação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisambiguationResult {
    /// Ranking decrescente completo dos candidatos.
    pub ranking: Ranking,
    /// Índice do verbete vencedor, ou `None` em caso de abstenção.
    pub chosen_index: Option<usize>,
    pub processing_ms: u64,
}

/// Eventos emitidos pelo pipeline durante o processamento.
///
/// Permitem que a UI visualize o raciocínio passo-a-passo: qual trecho foi
/// marcado como alvo, quais comparações foram feitas, como os scores foram
/// agregados e ranqueados, e qual foi a decisão.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Passo 1**: alvo localizado e marcado no uso desconhecido.
    TargetMarked {
        tagged_unknown_usage: String,
    },
    /// **Passo 2**: conjuntos de similaridade brutos computados.
    /// O lado pulado pelo peso vem como array vazio.
    SimilaritiesComputed {
        definition_sets: Vec<Vec<f64>>,
        usage_sets: Vec<Vec<Vec<f64>>>,
    },
    /// **Passo 3**: um score agregado por verbete, por pipeline.
    ScoresAggregated {
        definition_scores: Vec<f64>,
        usage_scores: Vec<f64>,
    },
    /// **Passo 4**: ranking ponderado decrescente pronto.
    RankingDone {
        ranking: Ranking,
    },
    /// **Conclusão**: decisão tomada (ou abstenção) e estatísticas de tempo.
    Decision {
        chosen_index: Option<usize>,
        processing_ms: u64,
    },
    /// **Falha**: violação de contrato em alguma camada.
    Error {
        message: String,
    },
}

/// O pipeline de desambiguação principal.
///
/// Genérico sobre o provedor de embeddings: produção usaria um modelo
/// contextual real; a demonstração e os testes usam o
/// [`DemoEmbedder`](crate::embedding::DemoEmbedder).
///
/// # Modos de Uso
/// - **Sync**: método [`disambiguate`](Self::disambiguate) para chamadas diretas.
/// - **Streaming**: método [`disambiguate_streaming`](Self::disambiguate_streaming)
///   para UIs reativas (via WebSocket).
pub struct WsdPipeline<E: EmbeddingProvider> {
    pub embedder: E,
    pub config: DisambiguationConfig,
}

impl<E: EmbeddingProvider> WsdPipeline<E> {
    /// Cria o pipeline com a configuração padrão.
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            config: DisambiguationConfig::default(),
        }
    }

    pub fn with_config(embedder: E, config: DisambiguationConfig) -> Self {
        Self { embedder, config }
    }

    /// Desambigua um uso desconhecido contra os verbetes candidatos e retorna o
    /// resultado final.
    pub fn disambiguate(
        &self,
        target_lemma: &str,
        unknown_usage: &str,
        known_headwords: &[KnownHeadword],
    ) -> Result<DisambiguationResult, WsdError> {
        self.run(target_lemma, unknown_usage, known_headwords, |_| {})
    }

    /// Executa o pipeline emitindo eventos de progresso pelo canal `tx`.
    ///
    /// Erros não são retornados: viram um [`PipelineEvent::Error`] no canal,
    /// para que o cliente visual também veja a falha.
    pub fn disambiguate_streaming(
        &self,
        target_lemma: &str,
        unknown_usage: &str,
        known_headwords: &[KnownHeadword],
        tx: mpsc::Sender<PipelineEvent>,
    ) {
        let outcome = self.run(target_lemma, unknown_usage, known_headwords, |event| {
            let _ = tx.send(event);
        });

        if let Err(error) = outcome {
            let _ = tx.send(PipelineEvent::Error {
                message: error.to_string(),
            });
        }
    }

    /// Corpo único do pipeline; `emit` recebe cada evento na ordem do fluxo.
    fn run(
        &self,
        target_lemma: &str,
        unknown_usage: &str,
        known_headwords: &[KnownHeadword],
        mut emit: impl FnMut(PipelineEvent),
    ) -> Result<DisambiguationResult, WsdError> {
        let started = Instant::now();
        let config = self.config;
        let num_headwords = known_headwords.len();

        let use_definitions = config.definition_weight > 0.0;
        let use_usages = 1.0 - config.definition_weight > 0.0;

        // Passo 1: marcação do alvo no uso desconhecido.
        let tagged_unknown_usage = mark_target_lemma(unknown_usage, target_lemma);
        emit(PipelineEvent::TargetMarked {
            tagged_unknown_usage: tagged_unknown_usage.clone(),
        });

        // Passo 2: embeddings e conjuntos de similaridade brutos.
        // Cada lado só é computado se o peso não o anulou (atalho de performance).
        let calculator = SimilarityCalculator::new(config.comparison);

        let definition_sets: Vec<Vec<f64>> = if use_definitions {
            let unknown_plain = self.embedder.embed_plain(unknown_usage);
            let definition_embeddings: Vec<Vec<Vec<f32>>> = known_headwords
                .iter()
                .map(|headword| {
                    headword
                        .known_senses
                        .iter()
                        .map(|sense| self.embedder.embed_plain(&sense.definition))
                        .collect()
                })
                .collect();

            calculator.definition_similarity_sets(&unknown_plain, &definition_embeddings)?
        } else {
            Vec::new()
        };

        let usage_sets: Vec<Vec<Vec<f64>>> = if use_usages {
            let unknown_marked = self.embedder.embed_target_marked(&tagged_unknown_usage);
            let tagged_headwords = tag_headword_usages(known_headwords, target_lemma);
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

            calculator.usage_similarity_sets(&unknown_marked, &usage_embeddings)?
        } else {
            Vec::new()
        };

        emit(PipelineEvent::SimilaritiesComputed {
            definition_sets: definition_sets.clone(),
            usage_sets: usage_sets.clone(),
        });

        // Passo 3: agregação hierárquica, um score por verbete e por pipeline.
        let aggregator = SimilarityAggregator::new(
            config.known_usage_flattener,
            config.sense_flattener,
            config.definition_flattener,
        );

        let definition_scores = aggregator.aggregate_definition_similarities(&definition_sets);
        let usage_scores = aggregator.aggregate_usage_similarities(&usage_sets);

        emit(PipelineEvent::ScoresAggregated {
            definition_scores: definition_scores.clone(),
            usage_scores: usage_scores.clone(),
        });

        // Passo 4: combinação ponderada e ranking estável decrescente.
        let ranking = rank_headwords(
            num_headwords,
            &definition_scores,
            &usage_scores,
            config.definition_weight,
        )?;

        emit(PipelineEvent::RankingDone {
            ranking: ranking.clone(),
        });

        // Passo final: aceitar ou se abster.
        let chooser = HeadwordChooser::new(config.min_acceptance, config.min_delta);
        let chosen_index = chooser.choose(&ranking);
        let processing_ms = started.elapsed().as_millis() as u64;

        emit(PipelineEvent::Decision {
            chosen_index,
            processing_ms,
        });

        Ok(DisambiguationResult {
            ranking,
            chosen_index,
            processing_ms,
        })
    }
}
