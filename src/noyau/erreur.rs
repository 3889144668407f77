//! Taxonomie des erreurs du noyau.
//!
//! Contrat côté utilisateur : un seul indicateur “Erreur”.
//! Le détail (`CauseEval`, caractère fautif) ne sert qu’aux traces et aux tests.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurCalc {
    /// Après réécriture, l’expression contient un caractère hors liste blanche.
    #[error("caractère invalide '{caractere}' (position {position})")]
    CaractereInvalide { caractere: char, position: usize },

    /// Analyse ou évaluation impossible, quelle qu’en soit la cause.
    #[error("expression invalide: {0}")]
    Evaluation(CauseEval),
}

/// Cause interne d’un échec d’évaluation (diagnostic seulement).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CauseEval {
    #[error("entrée vide")]
    ExpressionVide,

    #[error("parenthèses non fermées")]
    ParentheseNonFermee,

    #[error("parenthèse fermante inattendue")]
    ParentheseInattendue,

    #[error("identifiant inconnu: {0}")]
    IdentifiantInconnu(String),

    #[error("{0} n’est pas une fonction")]
    PasUneFonction(String),

    #[error("{nom} attend {attendu} argument(s), reçu {recu}")]
    Arite {
        nom: String,
        attendu: usize,
        recu: usize,
    },

    #[error("syntaxe: {0}")]
    Syntaxe(&'static str),

    #[error("nombre invalide: {0}")]
    NombreInvalide(String),

    #[error("le résultat n’est pas un nombre")]
    ValeurNonNumerique,

    #[error("imbrication trop profonde")]
    ProfondeurExcessive,
}

impl From<CauseEval> for ErreurCalc {
    fn from(cause: CauseEval) -> Self {
        ErreurCalc::Evaluation(cause)
    }
}
