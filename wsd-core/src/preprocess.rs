//! # Pré-processamento: Marcação da Palavra-Alvo
//!
//! Antes de pedir embeddings "marcados", a palavra-alvo precisa estar envolta em
//! `[TGT]...[/TGT]`, tanto no uso desconhecido quanto nos usos conhecidos.
//!
//! Duas origens de marcação:
//! - **Uso desconhecido**: localizamos a ocorrência do lema no texto
//!   (tolerante a flexão: "bancos" casa com o lema "banco") e a envolvemos nos
//!   marcadores. Se o lema não for encontrado, o texto inteiro vira o alvo.
//! - **Usos conhecidos**: vêm anotados com chaves (`"Sentei no {banco}."`);
//!   as chaves são reescritas para os marcadores via regex. Se um uso vier sem
//!   chaves, caímos na localização por lema.
//!
//! Todas as funções devolvem strings novas: nada aqui altera as estruturas do
//! chamador em lugar nenhum.

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::headword::{KnownHeadword, KnownSense};

/// Marcador de abertura do trecho alvo, token especial do modelo de embeddings.
pub const TARGET_OPEN: &str = "[TGT]";
/// Marcador de fechamento do trecho alvo.
pub const TARGET_CLOSE: &str = "[/TGT]";

/// Sufixo flexional máximo tolerado ao casar uma palavra com o lema.
/// Cobre plurais e flexões curtas do PT-BR ("banco" → "bancos", "velas").
const MAX_INFLECTION_SUFFIX: usize = 2;

/// Envolve a ocorrência do lema em `usage` com os marcadores de alvo.
///
/// A comparação é por prefixo, caso-insensitiva: uma palavra casa se for igual
/// ao lema ou se começar com ele e sobrar no máximo um sufixo flexional curto.
/// Sem ocorrência, o texto inteiro é marcado como alvo (o contexto todo passa a
/// representar a palavra, que é o comportamento degradado menos ruim).
pub fn mark_target_lemma(usage: &str, target_lemma: &str) -> String {
    let words: Vec<&str> = usage.split_whitespace().collect();

    let target_position = words
        .iter()
        .position(|word| word_matches_lemma(word, target_lemma));

    match target_position {
        Some(position) => {
            let marked: Vec<String> = words
                .iter()
                .enumerate()
                .map(|(i, word)| {
                    if i == position {
                        format!("{}{}{}", TARGET_OPEN, word, TARGET_CLOSE)
                    } else {
                        (*word).to_string()
                    }
                })
                .collect();

            marked.join(" ")
        }
        None => format!("{}{}{}", TARGET_OPEN, usage, TARGET_CLOSE),
    }
}

/// Reescreve a anotação `{alvo}` de um uso conhecido para `[TGT]alvo[/TGT]`.
///
/// Se o texto não tiver chaves, recorre à localização por lema, como no uso
/// desconhecido.
pub fn replace_braces_with_target_markers(text: &str, target_lemma: &str) -> String {
    // Regex simples o bastante para a anotação dos casos: um par de chaves por uso.
    let pattern = Regex::new(r"\{([^{}]*)\}").expect("regex de chaves inválida");

    let replaced = pattern
        .replace_all(text, format!("{}$1{}", TARGET_OPEN, TARGET_CLOSE).as_str())
        .into_owned();

    if replaced != text {
        return replaced;
    }

    mark_target_lemma(text, target_lemma)
}

/// Devolve uma cópia dos verbetes com todos os usos conhecidos marcados.
///
/// A versão original deste passo alterava as estruturas do chamador em lugar;
/// aqui a marcação é um valor derivado novo, e a entrada permanece intacta.
pub fn tag_headword_usages(
    known_headwords: &[KnownHeadword],
    target_lemma: &str,
) -> Vec<KnownHeadword> {
    known_headwords
        .iter()
        .map(|headword| KnownHeadword {
            known_senses: headword
                .known_senses
                .iter()
                .map(|sense| KnownSense {
                    definition: sense.definition.clone(),
                    known_usages: sense
                        .known_usages
                        .iter()
                        .map(|usage| replace_braces_with_target_markers(usage, target_lemma))
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

/// Uma palavra do texto casa com o lema?
///
/// Remove pontuação das bordas (grafemas), compara em minúsculas e tolera um
/// sufixo flexional curto.
fn word_matches_lemma(word: &str, lemma: &str) -> bool {
    let stripped: String = word
        .graphemes(true)
        .filter(|g| g.chars().any(|c| c.is_alphanumeric()))
        .collect();

    let word_lower = stripped.to_lowercase();
    let lemma_lower = lemma.to_lowercase();

    if word_lower == lemma_lower {
        return true;
    }

    word_lower.starts_with(&lemma_lower)
        && word_lower.len() - lemma_lower.len() <= MAX_INFLECTION_SUFFIX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_exact_lemma_occurrence() {
        let marked = mark_target_lemma("Fui ao banco sacar dinheiro.", "banco");
        assert_eq!(marked, "Fui ao [TGT]banco[/TGT] sacar dinheiro.");
    }

    #[test]
    fn test_marks_inflected_form() {
        let marked = mark_target_lemma("Os bancos fecharam cedo.", "banco");
        assert_eq!(marked, "Os [TGT]bancos[/TGT] fecharam cedo.");
    }

    #[test]
    fn test_matching_ignores_case_and_punctuation() {
        let marked = mark_target_lemma("Manga, a fruta preferida.", "manga");
        assert_eq!(marked, "[TGT]Manga,[/TGT] a fruta preferida.");
    }

    #[test]
    fn test_lemma_not_found_marks_whole_usage() {
        let marked = mark_target_lemma("Nada a ver com o alvo.", "banco");
        assert_eq!(marked, "[TGT]Nada a ver com o alvo.[/TGT]");
    }

    #[test]
    fn test_unrelated_word_with_same_prefix_does_not_match() {
        // "bancada" começa com "banc", não com "banco": não casa com o lema.
        let marked = mark_target_lemma("A bancada votou contra.", "banco");
        assert_eq!(marked, "[TGT]A bancada votou contra.[/TGT]");
    }

    #[test]
    fn test_replaces_braces_with_markers() {
        let replaced = replace_braces_with_target_markers("Sentei no {banco} da praça.", "banco");
        assert_eq!(replaced, "Sentei no [TGT]banco[/TGT] da praça.");
    }

    #[test]
    fn test_braces_absent_falls_back_to_lemma_search() {
        let replaced = replace_braces_with_target_markers("Sentei no banco da praça.", "banco");
        assert_eq!(replaced, "Sentei no [TGT]banco[/TGT] da praça.");
    }

    #[test]
    fn test_tag_headword_usages_does_not_mutate_input() {
        let headwords = vec![KnownHeadword {
            known_senses: vec![KnownSense {
                definition: "assento".to_string(),
                known_usages: vec!["Sentei no {banco}.".to_string()],
            }],
        }];

        let tagged = tag_headword_usages(&headwords, "banco");

        // Entrada intacta, saída marcada.
        assert_eq!(headwords[0].known_senses[0].known_usages[0], "Sentei no {banco}.");
        assert_eq!(
            tagged[0].known_senses[0].known_usages[0],
            "Sentei no [TGT]banco[/TGT]."
        );
    }
}
