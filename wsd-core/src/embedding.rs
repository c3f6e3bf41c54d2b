//! # Provedor de Embeddings (colaborador externo)
//!
//! O modelo de linguagem contextual que transforma texto em vetor é uma caixa
//! preta para este crate: pode ser um BERT atrás de um serviço, um modelo local
//! ou uma simulação. O trait [`EmbeddingProvider`] captura exatamente a costura
//! necessária, e nada mais.
//!
//! São dois tipos de embedding por consulta:
//! - **plano**: o texto inteiro vira um vetor (usado contra definições);
//! - **marcado**: o trecho entre `[TGT]` e `[/TGT]` domina o vetor (usado
//!   contra usos conhecidos, que também vêm marcados).
//!
//! O [`DemoEmbedder`] incluso é uma simulação determinística sem ML, no espírito
//! de um bi-encoder de brinquedo: suficiente para a UI de demonstração e para
//! testes de integração, inútil para qualidade real.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use unicode_segmentation::UnicodeSegmentation;

use crate::preprocess::{TARGET_CLOSE, TARGET_OPEN};

/// A costura com o modelo de embeddings externo.
///
/// Implementações devem ser determinísticas por texto e devolver sempre a mesma
/// dimensão; vetores de dimensões trocadas falham adiante na comparação.
pub trait EmbeddingProvider {
    /// Embedding do texto completo, sem tratamento de alvo.
    fn embed_plain(&self, text: &str) -> Vec<f32>;

    /// Embedding de um texto com o alvo marcado com `[TGT]...[/TGT]`.
    /// O trecho marcado deve dominar a representação.
    fn embed_target_marked(&self, text: &str) -> Vec<f32>;
}

/// Embedder simulado: saco de trigramas de caracteres com hashing, normalizado.
///
/// Palavras são segmentadas por Unicode; cada trigrama de caracteres incrementa
/// um balde do vetor escolhido por hash. Textos com vocabulário parecido geram
/// vetores próximos em cosseno, o que basta para demonstrar o motor de
/// agregação e ranking com dados reais de brinquedo.
#[derive(Debug, Clone, Copy)]
pub struct DemoEmbedder {
    pub dimensions: usize,
}

impl Default for DemoEmbedder {
    fn default() -> Self {
        Self { dimensions: 64 }
    }
}

impl DemoEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Saco de trigramas com hashing, sem normalização.
    fn accumulate_grams(&self, text: &str, weight: f32, buckets: &mut [f32]) {
        for word in text.unicode_words() {
            let lower = word.to_lowercase();
            let chars: Vec<char> = lower.chars().collect();

            // Palavras curtas contam como um trigrama único
            if chars.len() < 3 {
                let bucket = hash_bucket(&lower, buckets.len());
                buckets[bucket] += weight;
                continue;
            }

            for gram in chars.windows(3) {
                let key: String = gram.iter().collect();
                let bucket = hash_bucket(&key, buckets.len());
                buckets[bucket] += weight;
            }
        }
    }

    fn normalized(&self, mut buckets: Vec<f32>) -> Vec<f32> {
        let norm: f32 = buckets.iter().map(|v| v * v).sum::<f32>().sqrt();

        if norm > 0.0 {
            for v in buckets.iter_mut() {
                *v /= norm;
            }
        } else {
            // Texto sem palavra alguma: vetor unitário fixo, para nunca
            // devolver magnitude zero ao comparador.
            buckets[0] = 1.0;
        }

        buckets
    }
}

impl EmbeddingProvider for DemoEmbedder {
    fn embed_plain(&self, text: &str) -> Vec<f32> {
        let mut buckets = vec![0.0f32; self.dimensions];
        self.accumulate_grams(text, 1.0, &mut buckets);
        self.normalized(buckets)
    }

    fn embed_target_marked(&self, text: &str) -> Vec<f32> {
        let mut buckets = vec![0.0f32; self.dimensions];

        // O trecho marcado pesa mais que o contexto ao redor, imitando a
        // extração dos hidden states do span alvo em um modelo real.
        match extract_target_span(text) {
            Some((target, context)) => {
                self.accumulate_grams(&target, 3.0, &mut buckets);
                self.accumulate_grams(&context, 1.0, &mut buckets);
            }
            None => self.accumulate_grams(text, 1.0, &mut buckets),
        }

        self.normalized(buckets)
    }
}

/// Separa `[TGT]alvo[/TGT]` do restante do texto. `None` se os marcadores não
/// existirem ou estiverem malformados.
fn extract_target_span(text: &str) -> Option<(String, String)> {
    let open = text.find(TARGET_OPEN)?;
    let close = text.find(TARGET_CLOSE)?;

    let target_start = open + TARGET_OPEN.len();
    if close < target_start {
        return None;
    }

    let target = text[target_start..close].to_string();
    let context = format!(
        "{} {}",
        &text[..open],
        &text[close + TARGET_CLOSE.len()..]
    );

    Some((target, context))
}

fn hash_bucket(key: &str, num_buckets: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    (hasher.finish() as usize) % num_buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::cosine_similarity;

    #[test]
    fn test_embedding_is_deterministic() {
        let embedder = DemoEmbedder::default();
        let a = embedder.embed_plain("O banco aprovou o empréstimo.");
        let b = embedder.embed_plain("O banco aprovou o empréstimo.");
        assert_eq!(a, b);
    }

    #[test]
    fn test_embedding_has_configured_dimension() {
        let embedder = DemoEmbedder::new(32);
        assert_eq!(embedder.embed_plain("qualquer texto").len(), 32);
        assert_eq!(embedder.embed_target_marked("[TGT]texto[/TGT]").len(), 32);
    }

    #[test]
    fn test_embedding_is_unit_norm() {
        let embedder = DemoEmbedder::default();
        let v = embedder.embed_plain("dinheiro conta agência empréstimo");
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_text_never_yields_zero_magnitude() {
        let embedder = DemoEmbedder::default();
        let v = embedder.embed_plain("");
        assert!(v.iter().any(|x| *x != 0.0));
    }

    #[test]
    fn test_similar_vocabulary_scores_higher() {
        let embedder = DemoEmbedder::default();
        let query = embedder.embed_plain("fui ao banco sacar dinheiro da conta");
        let financial = embedder.embed_plain("banco dinheiro conta sacar agência");
        let furniture = embedder.embed_plain("assento madeira praça jardim sentar");

        let sim_financial = cosine_similarity(&query, &financial).unwrap();
        let sim_furniture = cosine_similarity(&query, &furniture).unwrap();
        assert!(sim_financial > sim_furniture);
    }

    #[test]
    fn test_target_span_dominates_marked_embedding() {
        let embedder = DemoEmbedder::default();
        let marked = embedder.embed_target_marked("contexto qualquer [TGT]dinheiro[/TGT] aqui");
        let target_only = embedder.embed_plain("dinheiro");
        let context_only = embedder.embed_plain("contexto qualquer aqui");

        let sim_target = cosine_similarity(&marked, &target_only).unwrap();
        let sim_context = cosine_similarity(&marked, &context_only).unwrap();
        assert!(sim_target > sim_context);
    }

    #[test]
    fn test_extract_target_span() {
        let (target, context) = extract_target_span("a [TGT]manga[/TGT] madura").unwrap();
        assert_eq!(target, "manga");
        assert!(!context.contains("manga"));
        assert!(context.contains("madura"));
        assert!(extract_target_span("sem marcador").is_none());
    }
}
