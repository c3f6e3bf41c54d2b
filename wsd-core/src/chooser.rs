//! # Decisor de Verbete (aceitar ou se abster)
//!
//! Última etapa do motor: dado o ranking decrescente, decide se o sistema
//! **aceita** o candidato do topo ou **se abstém** de responder. A decisão é uma
//! máquina de estados pequena e pura, função apenas dos dois primeiros scores:
//!
//! 1. Ranking com um único candidato: aceita imediatamente (não há com quem comparar).
//! 2. Score do topo abaixo de `min_acceptance`: abstém (confiança insuficiente).
//! 3. Margem sobre o vice menor que `min_delta`: abstém (ambiguidade alta demais).
//! 4. Caso contrário: aceita e devolve o índice original do vencedor.
//!
//! Candidatos do terceiro lugar em diante nunca influenciam a decisão.

use crate::ranker::RankedHeadword;

/// Decisor configurado com os dois limiares de confiança.
///
/// Os limiares são entrada externa livre: valores fora de `[0, 1]` não são
/// rejeitados, apenas tornam a aceitação mais estrita ou mais frouxa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadwordChooser {
    /// Score mínimo do topo do ranking para aceitar qualquer resposta.
    pub min_acceptance: f64,
    /// Margem mínima do topo sobre o segundo colocado.
    pub min_delta: f64,
}

impl HeadwordChooser {
    pub fn new(min_acceptance: f64, min_delta: f64) -> Self {
        Self {
            min_acceptance,
            min_delta,
        }
    }

    /// Decide sobre um ranking decrescente: `Some(índice)` para aceitar,
    /// `None` para se abster. Ranking vazio também resulta em abstenção.
    pub fn choose(&self, descending_ranking: &[RankedHeadword]) -> Option<usize> {
        match descending_ranking {
            [] => None,
            [only] => Some(only.index),
            [top, second, ..] => {
                if top.score < self.min_acceptance {
                    return None;
                }

                if top.score - second.score < self.min_delta {
                    return None;
                }

                Some(top.index)
            }
        }
    }
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
    fn test_single_candidate_is_auto_accepted() {
        // Limiares absurdamente estritos não importam com candidato único.
        let chooser = HeadwordChooser::new(99.0, 99.0);
        let r = ranking(&[(0, 0.01)]);
        assert_eq!(chooser.choose(&r), Some(0));
    }

    #[test]
    fn test_abstains_below_min_acceptance() {
        let chooser = HeadwordChooser::new(0.5, 0.05);
        let r = ranking(&[(1, 0.49), (0, 0.10)]);
        assert_eq!(chooser.choose(&r), None);
    }

    #[test]
    fn test_abstains_on_small_margin_even_with_high_top_score() {
        // Empate exato no topo: delta 0.0 < 0.05, abstém apesar do 0.81.
        let chooser = HeadwordChooser::new(0.5, 0.05);
        let r = ranking(&[(2, 0.81), (0, 0.81), (1, 0.40)]);
        assert_eq!(chooser.choose(&r), None);
    }

    #[test]
    fn test_accepts_confident_winner() {
        let chooser = HeadwordChooser::new(0.5, 0.05);
        let r = ranking(&[(1, 0.9), (0, 0.3)]);
        assert_eq!(chooser.choose(&r), Some(1));
    }

    #[test]
    fn test_third_place_never_affects_decision() {
        let chooser = HeadwordChooser::new(0.5, 0.05);
        let close_third = ranking(&[(1, 0.9), (0, 0.3), (2, 0.899)]);
        let far_third = ranking(&[(1, 0.9), (0, 0.3), (2, -1.0)]);
        assert_eq!(chooser.choose(&close_third), chooser.choose(&far_third));
    }

    #[test]
    fn test_empty_ranking_abstains() {
        let chooser = HeadwordChooser::new(0.0, 0.0);
        assert_eq!(chooser.choose(&[]), None);
    }

    #[test]
    fn test_margin_exactly_at_min_delta_is_accepted() {
        let chooser = HeadwordChooser::new(0.0, 0.25);
        let r = ranking(&[(0, 0.75), (1, 0.5)]);
        // 0.75 - 0.5 = 0.25, que NÃO é menor que min_delta: aceita.
        assert_eq!(chooser.choose(&r), Some(0));
    }
}
