//! # wsd-core — Desambiguação de Sentido de Palavras (WSD)
//!
//! Este crate implementa o motor de desambiguação: dado um uso novo de uma
//! palavra ambígua e um conjunto de verbetes candidatos (cada um com sentidos,
//! definições e usos conhecidos), ele decide a qual verbete o uso se refere, ou
//! se abstém quando a evidência é fraca ou ambígua.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui em uma direção só, transformado passo a passo:
//!
//! 1.  **Entrada**: lema alvo, uso desconhecido e verbetes candidatos.
//! 2.  **Marcação de Alvo** ([`preprocess`]): a palavra-alvo é envolta em
//!     `[TGT]...[/TGT]` no uso desconhecido e nos usos conhecidos.
//! 3.  **Embeddings** ([`embedding`]): um provedor externo (caixa preta) mapeia
//!     cada texto para um vetor denso.
//! 4.  **Comparação** ([`similarity`]): similaridade de cosseno entre o uso
//!     desconhecido e cada definição / uso conhecido.
//! 5.  **Agregação** ([`aggregator`] + [`flattener`]): os scores brutos são
//!     achatados hierarquicamente (usos → sentido → verbete) sob políticas
//!     configuráveis.
//! 6.  **Ranking** ([`ranker`]): os dois fluxos (definições e usos) são
//!     combinados com um peso e ordenados de forma estável e decrescente.
//! 7.  **Decisão** ([`chooser`]): limiares de aceitação e de margem decidem
//!     entre responder um índice de verbete ou se abster.
//!
//! As [`metrics`] e a varredura de parâmetros ([`sweep`]) medem a qualidade do
//! sistema offline; não participam da decisão ao vivo.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use wsd_core::{corpus::demo_cases, DemoEmbedder, WsdPipeline};
//!
//! // 1. Instancia o pipeline com o embedder de demonstração
//! let pipeline = WsdPipeline::new(DemoEmbedder::default());
//!
//! // 2. Pega um caso de demonstração ("banco": instituição vs. assento)
//! let case = &demo_cases()[0];
//! let example = &case.unknown_usage_examples[0];
//!
//! // 3. Desambigua
//! let result = pipeline
//!     .disambiguate(&case.lemma, &example.usage, &case.known_headwords)
//!     .unwrap();
//!
//! // 4. Ranking completo e decisão (ou abstenção)
//! for ranked in &result.ranking {
//!     println!("verbete {} com score {:.3}", ranked.index, ranked.score);
//! }
//! println!("escolhido: {:?}", result.chosen_index);
//! ```

pub mod aggregator;
pub mod chooser;
pub mod corpus;
pub mod embedding;
pub mod flattener;
pub mod headword;
pub mod metrics;
pub mod pipeline;
pub mod preprocess;
pub mod ranker;
pub mod similarity;
pub mod sweep;

pub use aggregator::SimilarityAggregator;
pub use chooser::HeadwordChooser;
pub use embedding::{DemoEmbedder, EmbeddingProvider};
pub use flattener::{FlatteningStrategy, EMPTY_LIST_SIMILARITY};
pub use headword::{DisambiguationCase, KnownHeadword, KnownSense, UnknownUsageExample};
pub use pipeline::{
    DisambiguationConfig, DisambiguationResult, PipelineEvent, WsdError, WsdPipeline,
};
pub use ranker::{rank_headwords, RankedHeadword, Ranking, RankingError};
pub use similarity::{cosine_similarity, ComparisonStrategy, SimilarityError};
pub use sweep::{SweepRow, SweepRunner};
