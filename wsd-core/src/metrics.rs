//! # Métricas de Avaliação (diagnóstico)
//!
//! Medem, sobre um ranking já pronto e com o gabarito em mãos, o quão separado o
//! verbete correto ficou dos incorretos. São funções somente-leitura usadas nas
//! varreduras de parâmetros; **não** participam da decisão ao vivo do
//! [`HeadwordChooser`](crate::chooser::HeadwordChooser).

use crate::ranker::RankedHeadword;

/// Score do verbete correto menos a **média** dos scores dos demais.
///
/// Com um único verbete no ranking não existem incorretos; a média deles é
/// definida como `0.0` (evitando divisão por zero), e a métrica vira o próprio
/// score do correto. `correct_index` deve ser um índice presente no ranking.
pub fn correct_minus_average_incorrect(
    correct_index: usize,
    ranking: &[RankedHeadword],
) -> f64 {
    let correct_score = score_of(correct_index, ranking);

    let average_of_incorrect = if ranking.len() >= 2 {
        let sum_of_incorrect: f64 =
            ranking.iter().map(|r| r.score).sum::<f64>() - correct_score;
        sum_of_incorrect / (ranking.len() - 1) as f64
    } else {
        0.0
    };

    correct_score - average_of_incorrect
}

/// Score do verbete correto menos o **maior** score entre os demais.
///
/// Positiva quando o correto venceu todos os incorretos; o módulo do valor é a
/// margem de vitória (ou de derrota, se negativa). Sem incorretos, o melhor
/// deles é definido como `0.0`.
pub fn correct_minus_best_incorrect(
    correct_index: usize,
    ranking: &[RankedHeadword],
) -> f64 {
    let correct_score = score_of(correct_index, ranking);

    let best_incorrect = if ranking.len() >= 2 {
        ranking
            .iter()
            .filter(|r| r.index != correct_index)
            .map(|r| r.score)
            .fold(f64::NEG_INFINITY, f64::max)
    } else {
        0.0
    };

    correct_score - best_incorrect
}

fn score_of(correct_index: usize, ranking: &[RankedHeadword]) -> f64 {
    ranking
        .iter()
        .find(|r| r.index == correct_index)
        .map(|r| r.score)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranking(pairs: &[(usize, f64)]) -> Vec<RankedHeadword> {
        pairs
            .iter()
            .map(|&(index, score)| RankedHeadword { index, score })
            .collect()
    }

    #[test]
    fn test_average_incorrect_margin() {
        // Correto = índice 1 (0.9); incorretos 0.3 e 0.5, média 0.4.
        let r = ranking(&[(1, 0.9), (2, 0.5), (0, 0.3)]);
        let margin = correct_minus_average_incorrect(1, &r);
        assert!((margin - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_average_incorrect_with_single_headword() {
        // Sem incorretos: métrica = score do correto - 0.
        let r = ranking(&[(0, 0.62)]);
        assert_eq!(correct_minus_average_incorrect(0, &r), 0.62);
    }

    #[test]
    fn test_best_incorrect_margin_when_correct_wins() {
        let r = ranking(&[(1, 0.9), (2, 0.5), (0, 0.3)]);
        let margin = correct_minus_best_incorrect(1, &r);
        assert!((margin - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_best_incorrect_margin_when_correct_loses() {
        // O correto (índice 0) perdeu para o índice 2: margem negativa.
        let r = ranking(&[(2, 0.8), (0, 0.6), (1, 0.1)]);
        let margin = correct_minus_best_incorrect(0, &r);
        assert!((margin + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_best_incorrect_with_single_headword() {
        let r = ranking(&[(0, 0.62)]);
        assert_eq!(correct_minus_best_incorrect(0, &r), 0.62);
    }

    #[test]
    fn test_metrics_ignore_ranking_order() {
        // As métricas leem o ranking por índice, não por posição.
        let sorted = ranking(&[(1, 0.9), (2, 0.5), (0, 0.3)]);
        let shuffled = ranking(&[(0, 0.3), (1, 0.9), (2, 0.5)]);
        assert_eq!(
            correct_minus_average_incorrect(1, &sorted),
            correct_minus_average_incorrect(1, &shuffled)
        );
        assert_eq!(
            correct_minus_best_incorrect(1, &sorted),
            correct_minus_best_incorrect(1, &shuffled)
        );
    }
}
