//! # Modelo de Dados: Verbetes, Sentidos e Usos
//!
//! Tipos que descrevem uma consulta de desambiguação: os verbetes candidatos
//! (cada um com seus sentidos, definições e usos conhecidos) e os exemplos de
//! uso desconhecido com gabarito para avaliação.
//!
//! Todos os tipos são serializáveis: os casos de teste vivem em JSON e a UI web
//! recebe estas estruturas diretamente.
//!
//! Convenção de identidade: um verbete não tem ID próprio; ele é identificado
//! pela sua **posição** (índice 0-based) na lista de candidatos da consulta.
//! É esse índice que o ranking ordena e que o decisor devolve.

use serde::{Deserialize, Serialize};

/// Um sentido de um verbete: uma definição textual e os usos conhecidos.
///
/// Nos usos conhecidos, a palavra-alvo vem marcada com chaves:
/// `"Sentei no {banco} da praça."`. O pré-processamento converte as chaves nos
/// marcadores `[TGT]...[/TGT]` antes de pedir embeddings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownSense {
    /// Definição do sentido, comparada contra o embedding "plano" do uso desconhecido.
    pub definition: String,
    /// Exemplos de uso deste sentido, comparados contra o embedding marcado do
    /// uso desconhecido. Pode ser vazio: o sentido então contribui com o score neutro.
    pub known_usages: Vec<String>,
}

/// Um verbete candidato: a coleção ordenada de seus sentidos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownHeadword {
    pub known_senses: Vec<KnownSense>,
}

/// Um uso desconhecido com gabarito, para avaliação offline.
///
/// O motor ao vivo não conhece `index_of_correct_headword`; só as métricas e as
/// varreduras de parâmetros o utilizam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownUsageExample {
    pub usage: String,
    /// De onde o exemplo veio (corpus, dicionário, anotação manual).
    pub source: String,
    pub index_of_correct_headword: usize,
}

/// Um caso completo de desambiguação: o lema alvo, os verbetes candidatos e os
/// exemplos anotados.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisambiguationCase {
    /// Forma canônica da palavra sendo desambiguada (ex: "banco").
    pub lemma: String,
    pub unknown_usage_examples: Vec<UnknownUsageExample>,
    pub known_headwords: Vec<KnownHeadword>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_round_trips_through_json() {
        let case = DisambiguationCase {
            lemma: "banco".to_string(),
            unknown_usage_examples: vec![UnknownUsageExample {
                usage: "Abri uma conta no banco.".to_string(),
                source: "manual".to_string(),
                index_of_correct_headword: 0,
            }],
            known_headwords: vec![KnownHeadword {
                known_senses: vec![KnownSense {
                    definition: "instituição financeira".to_string(),
                    known_usages: vec!["Fui ao {banco} sacar dinheiro.".to_string()],
                }],
            }],
        };

        let json = serde_json::to_string(&case).unwrap();
        let back: DisambiguationCase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, case);
    }

    #[test]
    fn test_deserializes_fixture_shape() {
        // Mesmo formato dos arquivos JSON de casos de teste.
        let json = r#"{
            "lemma": "manga",
            "unknown_usage_examples": [
                {"usage": "Comi uma manga madura.", "source": "corpus", "index_of_correct_headword": 0}
            ],
            "known_headwords": [
                {"known_senses": [{"definition": "fruta tropical", "known_usages": []}]},
                {"known_senses": [{"definition": "parte da camisa", "known_usages": []}]}
            ]
        }"#;

        let case: DisambiguationCase = serde_json::from_str(json).unwrap();
        assert_eq!(case.known_headwords.len(), 2);
        assert!(case.known_headwords[0].known_senses[0].known_usages.is_empty());
    }
}
