//! # Casos de Demonstração em Português Brasileiro
//!
//! Casos de desambiguação escritos à mão para lemas classicamente ambíguos do
//! PT-BR ("banco", "manga", "vela"). Cada caso traz os verbetes candidatos com
//! definições e usos conhecidos anotados (alvo entre chaves) e exemplos de uso
//! desconhecido com gabarito.
//!
//! Os exemplos foram redigidos com vocabulário de contexto bem separado entre
//! os verbetes, para que até o embedder simulado de demonstração consiga
//! distingui-los; servem à UI web, aos testes de integração e às varreduras.

use crate::headword::{DisambiguationCase, KnownHeadword, KnownSense, UnknownUsageExample};

/// Retorna os casos de demonstração completos.
pub fn demo_cases() -> Vec<DisambiguationCase> {
    vec![banco_case(), manga_case(), vela_case()]
}

/// "banco": instituição financeira vs. assento.
fn banco_case() -> DisambiguationCase {
    DisambiguationCase {
        lemma: "banco".to_string(),
        known_headwords: vec![
            KnownHeadword {
                known_senses: vec![
                    KnownSense {
                        definition: "instituição financeira que guarda dinheiro, movimenta contas e concede empréstimos".to_string(),
                        known_usages: vec![
                            "Fui ao {banco} sacar dinheiro da minha conta.".to_string(),
                            "O {banco} aprovou o empréstimo para comprar a casa.".to_string(),
                        ],
                    },
                    KnownSense {
                        definition: "agência ou prédio onde essa instituição atende os clientes".to_string(),
                        known_usages: vec![
                            "A fila do {banco} estava enorme na agência do centro.".to_string(),
                        ],
                    },
                ],
            },
            KnownHeadword {
                known_senses: vec![
                    KnownSense {
                        definition: "assento comprido, com ou sem encosto, para duas ou mais pessoas".to_string(),
                        known_usages: vec![
                            "Sentei no {banco} de madeira da praça para descansar.".to_string(),
                            "O {banco} do jardim ficava embaixo da árvore.".to_string(),
                        ],
                    },
                ],
            },
        ],
        unknown_usage_examples: vec![
            UnknownUsageExample {
                usage: "Fui ao banco sacar dinheiro da conta ontem.".to_string(),
                source: "anotação manual".to_string(),
                index_of_correct_headword: 0,
            },
            UnknownUsageExample {
                usage: "Sentei no banco de madeira da praça com meu avô.".to_string(),
                source: "anotação manual".to_string(),
                index_of_correct_headword: 1,
            },
        ],
    }
}

/// "manga": fruta vs. parte da camisa.
fn manga_case() -> DisambiguationCase {
    DisambiguationCase {
        lemma: "manga".to_string(),
        known_headwords: vec![
            KnownHeadword {
                known_senses: vec![
                    KnownSense {
                        definition: "fruta tropical doce, de polpa amarela e caroço grande".to_string(),
                        known_usages: vec![
                            "Comi uma {manga} madura e doce no café da manhã.".to_string(),
                            "A {manga} colhida do pé estava suculenta.".to_string(),
                        ],
                    },
                ],
            },
            KnownHeadword {
                known_senses: vec![
                    KnownSense {
                        definition: "parte da camisa ou do casaco que cobre o braço".to_string(),
                        known_usages: vec![
                            "A {manga} da camisa rasgou no cotovelo.".to_string(),
                            "Dobrei a {manga} do casaco porque estava comprida.".to_string(),
                        ],
                    },
                ],
            },
        ],
        unknown_usage_examples: vec![
            UnknownUsageExample {
                usage: "Comi uma manga madura e doce depois do almoço.".to_string(),
                source: "anotação manual".to_string(),
                index_of_correct_headword: 0,
            },
            UnknownUsageExample {
                usage: "A manga da camisa rasgou quando prendeu na porta.".to_string(),
                source: "anotação manual".to_string(),
                index_of_correct_headword: 1,
            },
        ],
    }
}

/// "vela": de cera (iluminação) vs. de barco (navegação).
fn vela_case() -> DisambiguationCase {
    DisambiguationCase {
        lemma: "vela".to_string(),
        known_headwords: vec![
            KnownHeadword {
                known_senses: vec![
                    KnownSense {
                        definition: "peça de cera com pavio que se acende para iluminar".to_string(),
                        known_usages: vec![
                            "Acendi uma {vela} quando a energia elétrica acabou.".to_string(),
                            "A {vela} de cera derreteu sobre o castiçal.".to_string(),
                        ],
                    },
                ],
            },
            KnownHeadword {
                known_senses: vec![
                    KnownSense {
                        definition: "pano resistente que impulsiona embarcações com a força do vento".to_string(),
                        known_usages: vec![
                            "O vento forte rasgou a {vela} do barco em alto mar.".to_string(),
                            "Içamos a {vela} assim que o vento mudou de direção.".to_string(),
                        ],
                    },
                ],
            },
        ],
        unknown_usage_examples: vec![
            UnknownUsageExample {
                usage: "Acendi uma vela quando a energia acabou em casa.".to_string(),
                source: "anotação manual".to_string(),
                index_of_correct_headword: 0,
            },
            UnknownUsageExample {
                usage: "O vento forte rasgou a vela do barco durante a regata.".to_string(),
                source: "anotação manual".to_string(),
                index_of_correct_headword: 1,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_cases_are_well_formed() {
        let cases = demo_cases();
        assert_eq!(cases.len(), 3);

        for case in &cases {
            assert!(!case.known_headwords.is_empty());
            assert!(!case.unknown_usage_examples.is_empty());

            for example in &case.unknown_usage_examples {
                // O gabarito aponta para um verbete existente
                assert!(example.index_of_correct_headword < case.known_headwords.len());
                // E o lema aparece no exemplo
                assert!(example.usage.to_lowercase().contains(&case.lemma));
            }
        }
    }

    #[test]
    fn test_known_usages_carry_brace_annotation() {
        for case in demo_cases() {
            for headword in &case.known_headwords {
                for sense in &headword.known_senses {
                    for usage in &sense.known_usages {
                        assert!(
                            usage.contains('{') && usage.contains('}'),
                            "uso sem anotação de alvo: {usage}"
                        );
                    }
                }
            }
        }
    }
}
