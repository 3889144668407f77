//! État de session + actions (=, M+, M-, MC, MR, AC, DEG/RAD, historique).
//!
//! Contrats :
//! - `Ans` (dernier résultat) change une seule fois par “=” réussi ; AC le remet à 0.
//! - La mémoire ne change que par M+ / M- / MC.
//! - Un échec d’évaluation ne modifie RIEN (ni Ans, ni mémoire, ni historique).
//! - Historique borné (FIFO) : on évince le plus ancien.

use std::collections::VecDeque;

use tracing::debug;

use super::bibliotheque::ModeAngle;
use super::erreur::ErreurCalc;
use super::eval::eval_expression;
use super::format::{format_resultat, TEXTE_NAN};

/// Taille maximale de l’historique.
pub const HISTORIQUE_MAX: usize = 100;

/// Garde-fou d’affichage : ligne “expr =” tronquée.
const LIGNE_HISTORIQUE_MAX: usize = 2000;

#[derive(Clone, Debug, PartialEq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: String,
}

/// Résultat d’un “=” réussi, prêt pour la vue.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultatEgal {
    pub texte: String,
    pub ligne: String,
    pub entree: EntreeHistorique,
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    mode: ModeAngle,
    dernier: f64,
    memoire: f64,
    historique: VecDeque<EntreeHistorique>,
}

impl Session {
    pub fn mode(&self) -> ModeAngle {
        self.mode
    }

    /// Valeur liée à `Ans`.
    pub fn dernier_resultat(&self) -> f64 {
        self.dernier
    }

    pub fn memoire(&self) -> f64 {
        self.memoire
    }

    /// Du plus ancien au plus récent.
    pub fn historique(&self) -> impl DoubleEndedIterator<Item = &EntreeHistorique> {
        self.historique.iter()
    }

    pub fn taille_historique(&self) -> usize {
        self.historique.len()
    }

    /* ------------------------ Actions ------------------------ */

    /// “=” : évalue l’affichage (ou `Ans` s’il est vide).
    pub fn egal(&mut self, affichage: &str) -> Result<ResultatEgal, ErreurCalc> {
        let expression = self.texte_a_evaluer(affichage);
        let valeur = eval_expression(&expression, self)?;
        let texte = format_resultat(valeur);

        let ligne = format!("{} =", tronquer(&expression, LIGNE_HISTORIQUE_MAX));

        let entree = EntreeHistorique {
            expression,
            resultat: texte.clone(),
        };

        self.dernier = valeur;
        self.pousser_historique(entree.clone());

        Ok(ResultatEgal {
            texte,
            ligne,
            entree,
        })
    }

    /// M+ : erreurs avalées (aucun effet visible).
    pub fn memoire_plus(&mut self, affichage: &str) {
        if let Some(v) = self.evaluer_silencieux(affichage) {
            self.memoire += v;
        }
    }

    /// M- : erreurs avalées (aucun effet visible).
    pub fn memoire_moins(&mut self, affichage: &str) {
        if let Some(v) = self.evaluer_silencieux(affichage) {
            self.memoire -= v;
        }
    }

    /// MC
    pub fn memoire_effacer(&mut self) {
        self.memoire = 0.0;
    }

    /// MR : texte à insérer dans l’affichage (réévaluable, même non fini).
    pub fn memoire_rappel(&self) -> String {
        texte_brut(self.memoire)
    }

    pub fn basculer_mode(&mut self) {
        self.mode = self.mode.bascule();
    }

    pub fn vider_historique(&mut self) {
        self.historique.clear();
    }

    /// AC : seule la dernière réponse est remise à zéro (mémoire et historique conservés).
    pub fn tout_effacer(&mut self) {
        self.dernier = 0.0;
    }

    /* ------------------------ Outils ------------------------ */

    fn texte_a_evaluer(&self, affichage: &str) -> String {
        if affichage.is_empty() {
            texte_brut(self.dernier)
        } else {
            affichage.to_string()
        }
    }

    fn evaluer_silencieux(&self, affichage: &str) -> Option<f64> {
        let expression = self.texte_a_evaluer(affichage);
        match eval_expression(&expression, self) {
            Ok(v) => Some(v),
            Err(e) => {
                debug!(erreur = %e, "mémoire : évaluation ignorée");
                None
            }
        }
    }

    fn pousser_historique(&mut self, entree: EntreeHistorique) {
        self.historique.push_back(entree);
        while self.historique.len() > HISTORIQUE_MAX {
            self.historique.pop_front();
        }
    }
}

/// Pleine précision pour un nombre fini, `NaN` sinon.
fn texte_brut(v: f64) -> String {
    if v.is_finite() {
        v.to_string()
    } else {
        TEXTE_NAN.to_string()
    }
}

fn tronquer(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
